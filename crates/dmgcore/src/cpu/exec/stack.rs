use super::super::{Bus, Cpu, Reg16};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, pair: Reg16) -> u32 {
        let value = self.regs.read16(pair);
        self.push_u16(bus, value);
        16
    }

    /// POP AF drops the low nibble of F via `write16`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, pair: Reg16) -> u32 {
        let value = self.pop_u16(bus);
        self.regs.write16(pair, value);
        12
    }
}
