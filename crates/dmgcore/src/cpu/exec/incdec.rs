use super::super::decode::Operand;
use super::super::{Bus, Cpu, Reg16};

impl Cpu {
    /// INC r (4 cycles) / INC (HL) (12 cycles).
    pub(super) fn exec_inc<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u32 {
        let value = self.read_operand(bus, operand);
        let result = self.alu_inc8(value);
        self.write_operand(bus, operand, result);
        4 + 2 * operand.access_cycles()
    }

    /// DEC r (4 cycles) / DEC (HL) (12 cycles).
    pub(super) fn exec_dec<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u32 {
        let value = self.read_operand(bus, operand);
        let result = self.alu_dec8(value);
        self.write_operand(bus, operand, result);
        4 + 2 * operand.access_cycles()
    }

    /// 16-bit INC/DEC touch no flags.
    pub(super) fn exec_inc_pair(&mut self, pair: Reg16) -> u32 {
        let value = self.regs.read16(pair).wrapping_add(1);
        self.regs.write16(pair, value);
        8
    }

    pub(super) fn exec_dec_pair(&mut self, pair: Reg16) -> u32 {
        let value = self.regs.read16(pair).wrapping_sub(1);
        self.regs.write16(pair, value);
        8
    }
}
