use super::super::decode::{Indirect, Operand};
use super::super::{Bus, Cpu, Reg16};

impl Cpu {
    /// LD r,r' / LD r,d8 / LD r,(HL) / LD (HL),r / LD (HL),d8.
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Operand, src: Operand) -> u32 {
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
        4 + src.access_cycles() + dst.access_cycles()
    }

    /// Resolve a BC/DE/HL+/HL- operand, applying the HL post-step.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::Bc => self.regs.bc(),
            Indirect::De => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_a_from_ind<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_ind_from_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_from_abs<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        self.regs.a = bus.read8(addr);
        16
    }

    pub(super) fn exec_ld_abs_from_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a);
        16
    }

    pub(super) fn exec_ldh_a_from_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = 0xFF00 | self.fetch8(bus) as u16;
        self.regs.a = bus.read8(addr);
        12
    }

    pub(super) fn exec_ldh_imm_from_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = 0xFF00 | self.fetch8(bus) as u16;
        bus.write8(addr, self.regs.a);
        12
    }

    pub(super) fn exec_ldh_a_from_c<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.a = bus.read8(0xFF00 | self.regs.c as u16);
        8
    }

    pub(super) fn exec_ldh_c_from_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        bus.write8(0xFF00 | self.regs.c as u16, self.regs.a);
        8
    }

    pub(super) fn exec_ld_pair_imm<B: Bus>(&mut self, bus: &mut B, pair: Reg16) -> u32 {
        let value = self.fetch16(bus);
        self.regs.write16(pair, value);
        12
    }

    /// LD (a16),SP stores SP little-endian.
    pub(super) fn exec_ld_abs_from_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
        20
    }

    pub(super) fn exec_ld_sp_from_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    pub(super) fn exec_ld_hl_from_sp_offset<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let value = self.alu_sp_offset(imm);
        self.regs.set_hl(value);
        12
    }
}
