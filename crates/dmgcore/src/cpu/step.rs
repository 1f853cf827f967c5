use super::decode::PRIMARY;
use super::{Bus, Cpu};
use crate::error::CpuError;
use crate::interrupts;
use crate::io;

impl Cpu {
    /// Execute a single instruction (or interrupt entry) and return the
    /// number of clock cycles it took.
    ///
    /// While halted the CPU idles one machine cycle per call and wakes as
    /// soon as an enabled interrupt is requested, whether or not IME is
    /// set. A locked CPU keeps returning the error that locked it.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if let Some(err) = self.fault {
            return Err(err);
        }

        // STOP ends when a joypad line goes low. Timers and the LCD keep
        // being fed the returned cycles.
        if self.stopped {
            if bus.read8(io::P1) & 0x0F != 0x0F {
                self.stopped = false;
            }
            return Ok(4);
        }

        if self.halted {
            if interrupts::pending(bus) == 0 {
                return Ok(4);
            }
            self.halted = false;
        }

        if let Some(cycles) = self.service_interrupt(bus) {
            return Ok(cycles);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let cycles = self.execute(bus, PRIMARY[opcode as usize], opcode, pc)?;
        self.ime.end_instruction();
        Ok(cycles)
    }
}
