use super::decode::{Cond, Operand};
use super::{Bus, Cpu, Flags};

impl Cpu {
    /// Read an 8-bit operand. `Imm` consumes the byte at PC.
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.read8(reg),
            Operand::IndHl => bus.read8(self.regs.hl()),
            Operand::Imm => self.fetch8(bus),
        }
    }

    /// Write an 8-bit operand. The tables never use `Imm` as a destination.
    #[inline]
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.write8(reg, value),
            Operand::IndHl => bus.write8(self.regs.hl(), value),
            Operand::Imm => {}
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push high byte first, so memory[SP] = low and memory[SP+1] = high.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn condition(&self, cond: Cond) -> bool {
        match cond {
            Cond::Always => true,
            Cond::Nz => !self.regs.flag(Flags::Z),
            Cond::Z => self.regs.flag(Flags::Z),
            Cond::Nc => !self.regs.flag(Flags::C),
            Cond::C => self.regs.flag(Flags::C),
        }
    }
}
