use super::super::{Bus, Cpu};
use crate::interrupts;
use crate::io;

impl Cpu {
    /// Enter the highest-priority pending interrupt if IME allows it.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken. Entry pushes PC
    /// (high byte first), clears IME and the serviced IF bit, jumps to
    /// the source's vector and costs 5 machine cycles.
    pub(in crate::cpu) fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime.enabled() {
            return None;
        }
        let source = interrupts::serviceable(bus)?;

        self.ime.disable_now();
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        interrupts::clear(bus, source);
        self.regs.pc = source.vector();

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            source,
            source.vector(),
            pc,
            self.regs.sp,
            bus.read8(io::IF) & interrupts::INTERRUPT_MASK,
            bus.read8(io::IE),
        );

        Some(20)
    }
}
