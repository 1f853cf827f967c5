//! Run a machine on its own thread.
//!
//! The worker owns the [`GameBoy`] outright. Input goes in over one
//! channel and finished frames come out over another as owned
//! [`Frame`] copies; nothing inside the machine is shared.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError, TrySendError};
use dmgcore_common::Button;

use crate::config::RunnerConfig;
use crate::error::{CpuError, RunnerError};
use crate::machine::{Frame, FrameBuffer, GameBoy};

/// Nominal DMG frame period: 70,224 cycles at 4,194,304 Hz (~59.73 Hz).
const FRAME_DURATION: Duration = Duration::from_nanos(16_742_706);

/// Frames buffered for a slow consumer before new ones are dropped.
const FRAME_QUEUE_DEPTH: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub button: Button,
    pub pressed: bool,
}

enum ControlMessage {
    Input(InputEvent),
    Stop,
}

/// Owner side of a running worker.
pub struct RunnerHandle {
    ctrl_tx: Sender<ControlMessage>,
    frames: Receiver<Frame>,
    /// Taken by `join` or `drop`.
    join: Option<JoinHandle<Result<u64, CpuError>>>,
}

/// Move `machine` onto a new thread and start running it.
///
/// Fails with [`RunnerError::Spawn`] if the OS refuses to create the thread.
pub fn spawn(
    machine: GameBoy<FrameBuffer>,
    config: RunnerConfig,
) -> Result<RunnerHandle, RunnerError> {
    let (ctrl_tx, ctrl_rx) = unbounded();
    let (frame_tx, frames) = bounded(FRAME_QUEUE_DEPTH);

    let join = thread::Builder::new()
        .name("dmgcore-runner".into())
        .spawn(move || {
            Runner {
                machine,
                ctrl_rx,
                frame_tx,
                config,
                frames: 0,
                next_deadline: Instant::now() + FRAME_DURATION,
            }
            .run()
        })
        .inspect_err(|err| log::error!("GB runner: failed to spawn worker thread: {err}"))?;

    Ok(RunnerHandle {
        ctrl_tx,
        frames,
        join: Some(join),
    })
}

impl RunnerHandle {
    /// Queue a button change; applied before the worker's next instruction.
    pub fn send_input(&self, button: Button, pressed: bool) {
        // A closed channel means the worker is gone; `join` reports why.
        let _ = self
            .ctrl_tx
            .send(ControlMessage::Input(InputEvent { button, pressed }));
    }

    /// Completed frames, oldest first.
    #[inline]
    pub fn frames(&self) -> &Receiver<Frame> {
        &self.frames
    }

    /// Ask the worker to stop after its current instruction.
    pub fn stop(&self) {
        let _ = self.ctrl_tx.send(ControlMessage::Stop);
    }

    /// Wait for the worker and return how many frames it ran.
    pub fn join(mut self) -> Result<u64, RunnerError> {
        match self.join.take().map(JoinHandle::join) {
            Some(Ok(result)) => Ok(result?),
            Some(Err(_)) | None => Err(RunnerError::WorkerPanicked),
        }
    }
}

impl Drop for RunnerHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.ctrl_tx.send(ControlMessage::Stop);
            let _ = join.join();
        }
    }
}

struct Runner {
    machine: GameBoy<FrameBuffer>,
    ctrl_rx: Receiver<ControlMessage>,
    frame_tx: Sender<Frame>,
    config: RunnerConfig,
    frames: u64,
    next_deadline: Instant,
}

impl Runner {
    fn run(mut self) -> Result<u64, CpuError> {
        loop {
            if self.drain_control() {
                return Ok(self.frames);
            }

            if let Err(err) = self.machine.step() {
                log::warn!("GB runner: stopping after {} frames: {err}", self.frames);
                return Err(err);
            }

            if self.machine.take_frame_ready() {
                self.frames += 1;
                self.publish_frame();
                if self.config.max_frames.is_some_and(|max| self.frames >= max) {
                    return Ok(self.frames);
                }
                if self.config.realtime {
                    self.pace();
                }
            }
        }
    }

    /// Apply queued control messages. Returns true when the worker
    /// should exit.
    fn drain_control(&mut self) -> bool {
        loop {
            match self.ctrl_rx.try_recv() {
                Ok(ControlMessage::Input(event)) => {
                    self.machine.set_button(event.button, event.pressed)
                }
                Ok(ControlMessage::Stop) => return true,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => return true,
            }
        }
    }

    fn publish_frame(&mut self) {
        match self.frame_tx.try_send(self.machine.sink().snapshot()) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                log::trace!("GB runner: frame receiver dropped");
            }
        }
    }

    fn pace(&mut self) {
        let now = Instant::now();
        if self.next_deadline > now {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += FRAME_DURATION;
        } else {
            // Fell behind; resynchronise instead of bursting.
            self.next_deadline = now + FRAME_DURATION;
        }
    }
}
