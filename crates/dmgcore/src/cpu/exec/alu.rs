use super::super::decode::{AluOp, Operand, Shift};
use super::super::{Bus, Cpu, Flags, Reg16};

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP against a register, (HL) or d8.
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, kind: AluOp, src: Operand) -> u32 {
        let value = self.read_operand(bus, src);
        self.alu(kind, value);
        4 + src.access_cycles()
    }

    pub(super) fn exec_add_hl(&mut self, pair: Reg16) -> u32 {
        let value = self.regs.read16(pair);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_offset<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_sp_offset(imm);
        16
    }

    /// RLCA/RRCA/RLA/RRA.
    pub(super) fn exec_rotate_a(&mut self, kind: Shift) -> u32 {
        self.regs.a = self.alu_shift(kind, self.regs.a);
        self.regs.set_flag(Flags::Z, false);
        4
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flags::N, true);
        self.regs.set_flag(Flags::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, false);
        self.regs.set_flag(Flags::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.regs.flag(Flags::C);
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, false);
        self.regs.set_flag(Flags::C, !carry);
        4
    }
}
