use super::super::decode::Cond;
use super::super::{Bus, Cpu};

impl Cpu {
    /// JP a16 (16) / JP cc,a16 (16 taken, 12 not taken).
    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    /// JR e8 / JR cc,e8 (12 taken, 8 not taken).
    ///
    /// The displacement is relative to the address after the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if self.condition(cond) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            12
        } else {
            8
        }
    }

    /// CALL a16 (24) / CALL cc,a16 (24 taken, 12 not taken).
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    /// RET (16) / RET cc (20 taken, 8 not taken).
    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        if cond == Cond::Always {
            self.regs.pc = self.pop_u16(bus);
            return 16;
        }
        if self.condition(cond) {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }

    /// RETI re-enables interrupts immediately, without the EI delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime.enable_now();
        16
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u16) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector;
        16
    }
}
