use super::decode::{AluOp, Shift};
use super::{Cpu, Flags};

impl Cpu {
    /// Apply one of the eight accumulator operations to A and `value`.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a;
        let carry = self.regs.flag(Flags::C);
        match op {
            AluOp::Add => self.regs.a = self.regs.add8(a, value, false),
            AluOp::Adc => self.regs.a = self.regs.add8(a, value, carry),
            AluOp::Sub => self.regs.a = self.regs.sub8(a, value, false),
            AluOp::Sbc => self.regs.a = self.regs.sub8(a, value, carry),
            AluOp::And => {
                self.regs.a = a & value;
                self.regs.f = Flags::zero(self.regs.a) | Flags::H;
            }
            AluOp::Xor => {
                self.regs.a = a ^ value;
                self.regs.f = Flags::zero(self.regs.a);
            }
            AluOp::Or => {
                self.regs.a = a | value;
                self.regs.f = Flags::zero(self.regs.a);
            }
            // Flags as for SUB, A untouched.
            AluOp::Cp => {
                self.regs.sub8(a, value, false);
            }
        }
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Updates A, Z, H, C; leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.regs.flag(Flags::C) { 0x60 } else { 0x00 };
        if self.regs.flag(Flags::H) {
            adjust |= 0x06;
        }

        if !self.regs.flag(Flags::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.set_flag(Flags::C, adjust >= 0x60);
        self.regs.set_flag(Flags::H, false);
        self.regs.set_flag(Flags::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL): Z N H, C preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL): Z N H, C preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flags::Z, result == 0);
        self.regs.set_flag(Flags::N, true);
        self.regs.set_flag(Flags::H, (value & 0x0F) == 0);
        result
    }

    /// ADD HL,rr. Z is unaffected; H and C come from bits 11 and 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs.set_flag(Flags::C, (hl as u32) + (value as u32) > 0xFFFF);
        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// SP plus a signed immediate, shared by ADD SP,e8 and LD HL,SP+e8.
    ///
    /// Z and N are cleared. H and C are the carries out of bits 3 and 7
    /// when the unsigned low byte of SP is added to the raw offset byte.
    pub(super) fn alu_sp_offset(&mut self, imm8: u8) -> u16 {
        let sp = self.regs.sp;
        let low = (sp & 0x00FF) as u8;
        self.regs.f = Flags::empty();
        self.regs.set_flag(Flags::H, (low & 0x0F) + (imm8 & 0x0F) > 0x0F);
        self.regs.set_flag(Flags::C, (low as u16) + (imm8 as u16) > 0xFF);
        sp.wrapping_add(imm8 as i8 as i16 as u16)
    }

    /// Rotate/shift used by the CB table. Z reflects the result, N and H
    /// are cleared, C receives the bit shifted out (always 0 for SWAP).
    pub(super) fn alu_shift(&mut self, kind: Shift, value: u8) -> u8 {
        let carry_in = self.regs.flag(Flags::C) as u8;
        let (result, carry) = match kind {
            Shift::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Shift::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Shift::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            Shift::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            Shift::Sla => (value << 1, value & 0x80 != 0),
            Shift::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Shift::Swap => (value.rotate_left(4), false),
            Shift::Srl => (value >> 1, value & 0x01 != 0),
        };
        self.regs.f = Flags::zero(result);
        self.regs.set_flag(Flags::C, carry);
        result
    }

    /// BIT b: Z set when the bit is clear, N cleared, H set, C preserved.
    #[inline]
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        self.regs.set_flag(Flags::Z, value & (1 << bit) == 0);
        self.regs.set_flag(Flags::N, false);
        self.regs.set_flag(Flags::H, true);
    }
}
