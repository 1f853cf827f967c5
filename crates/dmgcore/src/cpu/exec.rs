mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::decode::Op;
use super::{Bus, Cpu};
use crate::error::CpuError;

impl Cpu {
    /// Execute one decoded primary opcode and return its cost in clock
    /// cycles. `pc` is the address the opcode was fetched from.
    pub(super) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        op: Op,
        opcode: u8,
        pc: u16,
    ) -> Result<u32, CpuError> {
        let cycles = match op {
            Op::Nop => 4,
            Op::Prefix => self.exec_prefixed(bus),
            Op::Invalid => return Err(self.lock(opcode, pc)),

            Op::Ld { dst, src } => self.exec_ld(bus, dst, src),
            Op::LdAFromInd(ind) => self.exec_ld_a_from_ind(bus, ind),
            Op::LdIndFromA(ind) => self.exec_ld_ind_from_a(bus, ind),
            Op::LdAFromAbs => self.exec_ld_a_from_abs(bus),
            Op::LdAbsFromA => self.exec_ld_abs_from_a(bus),
            Op::LdhAFromImm => self.exec_ldh_a_from_imm(bus),
            Op::LdhImmFromA => self.exec_ldh_imm_from_a(bus),
            Op::LdhAFromC => self.exec_ldh_a_from_c(bus),
            Op::LdhCFromA => self.exec_ldh_c_from_a(bus),
            Op::LdPairImm(pair) => self.exec_ld_pair_imm(bus, pair),
            Op::LdAbsFromSp => self.exec_ld_abs_from_sp(bus),
            Op::LdSpFromHl => self.exec_ld_sp_from_hl(),
            Op::LdHlFromSpOffset => self.exec_ld_hl_from_sp_offset(bus),
            Op::Push(pair) => self.exec_push(bus, pair),
            Op::Pop(pair) => self.exec_pop(bus, pair),

            Op::Alu(kind, src) => self.exec_alu(bus, kind, src),
            Op::Inc(operand) => self.exec_inc(bus, operand),
            Op::Dec(operand) => self.exec_dec(bus, operand),
            Op::IncPair(pair) => self.exec_inc_pair(pair),
            Op::DecPair(pair) => self.exec_dec_pair(pair),
            Op::AddHl(pair) => self.exec_add_hl(pair),
            Op::AddSpOffset => self.exec_add_sp_offset(bus),
            Op::RotateA(kind) => self.exec_rotate_a(kind),
            Op::Daa => self.exec_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jp(cond) => self.exec_jp(bus, cond),
            Op::JpHl => self.exec_jp_hl(),
            Op::Jr(cond) => self.exec_jr(bus, cond),
            Op::Call(cond) => self.exec_call(bus, cond),
            Op::Ret(cond) => self.exec_ret(bus, cond),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),

            Op::Halt => self.exec_halt(),
            Op::Stop => self.exec_stop(bus),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),
        };
        Ok(cycles)
    }

    fn lock(&mut self, opcode: u8, pc: u16) -> CpuError {
        let err = CpuError::InvalidOpcode { opcode, pc };
        log::error!("GB CPU locked: {err}");
        self.fault = Some(err);
        err
    }
}
