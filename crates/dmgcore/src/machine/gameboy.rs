use dmgcore_common::Button;

use super::bus::{AddressSpace, BusEvent, WriterRole};
use super::cartridge::{Cartridge, CartridgeHeader};
use super::display::{DisplaySink, FrameBuffer};
use super::joypad::Joypad;
use super::ppu::ScanlineEngine;
use super::FRAME_CYCLES;
use crate::config::MachineConfig;
use crate::cpu::Cpu;
use crate::error::{CartridgeError, CpuError};
use crate::interrupts::{self, Interrupt};
use crate::io;

/// The whole machine and its single stepping loop.
///
/// Each `step` runs one instruction, then feeds exactly the cycles it
/// cost to the timer and the scanline engine, so display timing never
/// drifts from the instruction stream.
pub struct GameBoy<S: DisplaySink = FrameBuffer> {
    pub cpu: Cpu,
    bus: AddressSpace,
    ppu: ScanlineEngine,
    joypad: Joypad,
    sink: S,
    cycles: u64,
    frame_ready: bool,
}

impl Default for GameBoy<FrameBuffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy<FrameBuffer> {
    pub fn new() -> Self {
        Self::with_sink(FrameBuffer::new(), MachineConfig::default())
    }
}

impl<S: DisplaySink> GameBoy<S> {
    pub fn with_sink(sink: S, config: MachineConfig) -> Self {
        let mut gb = Self {
            cpu: Cpu::with_boot_state(config.boot_state),
            bus: AddressSpace::new(config.ram_fill),
            ppu: ScanlineEngine::new(),
            joypad: Joypad::default(),
            sink,
            cycles: 0,
            frame_ready: false,
        };
        // Power-on register setup queued palette and LCD events.
        gb.apply_bus_events();
        gb
    }

    /// Validate a ROM image and map it into the address space.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<CartridgeHeader, CartridgeError> {
        let cartridge = Cartridge::from_image(image)?;
        let header = cartridge.header.clone();
        self.bus.insert_cartridge(cartridge);
        Ok(header)
    }

    /// Run one instruction or interrupt entry and return its cost in
    /// clock cycles.
    pub fn step(&mut self) -> Result<u32, CpuError> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.apply_bus_events();
        self.bus.tick(cycles);
        if self.ppu.advance(cycles, &mut self.bus, &mut self.sink) {
            self.frame_ready = true;
        }
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Run for one frame's worth of cycles (70,224).
    pub fn step_frame(&mut self) -> Result<(), CpuError> {
        let target = self.cycles + FRAME_CYCLES as u64;
        while self.cycles < target {
            self.step()?;
        }
        Ok(())
    }

    /// Run until the scanline engine enters VBlank.
    ///
    /// With the display off no VBlank ever comes, so the run stops after
    /// one frame's worth of cycles instead.
    pub fn run_until_vblank(&mut self) -> Result<(), CpuError> {
        let start = self.cycles;
        let frames = self.ppu.frames();
        while self.ppu.frames() == frames {
            if !self.ppu.is_enabled() && self.cycles - start >= FRAME_CYCLES as u64 {
                break;
            }
            self.step()?;
        }
        Ok(())
    }

    /// Press or release a button. A fresh press requests the joypad
    /// interrupt.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if self.joypad.set(button, pressed) {
            interrupts::request(&mut self.bus, Interrupt::Joypad);
        }
        self.sync_input_lines();
    }

    #[inline]
    pub fn press(&mut self, button: Button) {
        self.set_button(button, true);
    }

    #[inline]
    pub fn release(&mut self, button: Button) {
        self.set_button(button, false);
    }

    #[inline]
    pub fn is_pressed(&self, button: Button) -> bool {
        self.joypad.is_pressed(button)
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[inline]
    pub fn bus(&self) -> &AddressSpace {
        &self.bus
    }

    /// Direct access for tests and debuggers. Writes made through here
    /// take effect once the next `step` drains the bus events.
    #[inline]
    pub fn bus_mut(&mut self) -> &mut AddressSpace {
        &mut self.bus
    }

    #[inline]
    pub fn ppu(&self) -> &ScanlineEngine {
        &self.ppu
    }

    /// Total clock cycles executed.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.ppu.frames()
    }

    /// Serial bytes captured since the last [`take_serial_output`](Self::take_serial_output).
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    /// Drain the serial capture. Long runs should call this periodically,
    /// the buffer is otherwise unbounded.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.take_serial_output()
    }

    /// True once per VBlank entry since the last call.
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    fn apply_bus_events(&mut self) {
        for event in self.bus.take_events() {
            match event {
                BusEvent::Palette(kind, shades) => self.sink.publish_palette(kind, shades),
                BusEvent::LcdEnabled(on) => self.ppu.set_enabled(on, &mut self.bus),
                BusEvent::InputSelect => self.sync_input_lines(),
            }
        }
    }

    /// Recompute the P1 line nibble for the current group selection.
    fn sync_input_lines(&mut self) {
        let select = self.bus.read_byte(io::P1) & 0x30;
        let lines = self.joypad.lines(select);
        self.bus.write_byte(io::P1, lines, WriterRole::Input);
    }
}
