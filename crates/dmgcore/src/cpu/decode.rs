//! Opcode dispatch tables.
//!
//! Every opcode maps to a small descriptor naming the operation and its
//! operands, so that e.g. all eight `ADD A,r` forms share one routine in
//! `exec`. The tables are built at compile time from the x/y/z bit fields
//! of the opcode byte (`xx yyy zzz`).

use super::regs::{Reg16, Reg8};

/// 8-bit operand selected by a 3-bit register field, or an immediate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Reg(Reg8),
    /// Memory at HL.
    IndHl,
    /// The byte following the opcode.
    Imm,
}

impl Operand {
    /// Register order used by opcode tables: B C D E H L (HL) A.
    const fn from_index(index: u8) -> Operand {
        match index & 0x07 {
            0 => Operand::Reg(Reg8::B),
            1 => Operand::Reg(Reg8::C),
            2 => Operand::Reg(Reg8::D),
            3 => Operand::Reg(Reg8::E),
            4 => Operand::Reg(Reg8::H),
            5 => Operand::Reg(Reg8::L),
            6 => Operand::IndHl,
            _ => Operand::Reg(Reg8::A),
        }
    }

    /// Extra clock cycles an access to this operand adds over a register.
    #[inline]
    pub(crate) const fn access_cycles(self) -> u32 {
        match self {
            Operand::Reg(_) => 0,
            Operand::IndHl | Operand::Imm => 4,
        }
    }
}

/// Memory operand addressed through a register pair for `LD A,(rr)` and
/// `LD (rr),A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Indirect {
    Bc,
    De,
    HlInc,
    HlDec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cond {
    Always,
    Nz,
    Z,
    Nc,
    C,
}

impl Cond {
    const fn from_index(index: u8) -> Cond {
        match index & 0x03 {
            0 => Cond::Nz,
            1 => Cond::Z,
            2 => Cond::Nc,
            _ => Cond::C,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_index(index: u8) -> AluOp {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Rotate and shift kinds, in CB-table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shift {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl Shift {
    const fn from_index(index: u8) -> Shift {
        match index & 0x07 {
            0 => Shift::Rlc,
            1 => Shift::Rrc,
            2 => Shift::Rl,
            3 => Shift::Rr,
            4 => Shift::Sla,
            5 => Shift::Sra,
            6 => Shift::Swap,
            _ => Shift::Srl,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Daa,
    Cpl,
    Scf,
    Ccf,
    /// 0xCB: the next byte indexes [`PREFIXED`].
    Prefix,
    /// One of the eleven unused opcodes.
    Invalid,

    Ld { dst: Operand, src: Operand },
    LdAFromInd(Indirect),
    LdIndFromA(Indirect),
    LdAFromAbs,
    LdAbsFromA,
    LdhAFromImm,
    LdhImmFromA,
    LdhAFromC,
    LdhCFromA,
    LdPairImm(Reg16),
    LdAbsFromSp,
    LdSpFromHl,
    LdHlFromSpOffset,
    Push(Reg16),
    Pop(Reg16),

    Alu(AluOp, Operand),
    Inc(Operand),
    Dec(Operand),
    IncPair(Reg16),
    DecPair(Reg16),
    AddHl(Reg16),
    AddSpOffset,
    /// RLCA/RRCA/RLA/RRA: like the CB forms on A but Z is always cleared.
    RotateA(Shift),

    Jp(Cond),
    JpHl,
    Jr(Cond),
    Call(Cond),
    Ret(Cond),
    Reti,
    Rst(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CbOp {
    Shift(Shift, Operand),
    Bit(u8, Operand),
    Res(u8, Operand),
    Set(u8, Operand),
}

pub(crate) static PRIMARY: [Op; 256] = build_primary();
pub(crate) static PREFIXED: [CbOp; 256] = build_prefixed();

const fn pair(index: u8) -> Reg16 {
    match index & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::SP,
    }
}

const fn stack_pair(index: u8) -> Reg16 {
    match index & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::AF,
    }
}

const fn indirect(index: u8) -> Indirect {
    match index & 0x03 {
        0 => Indirect::Bc,
        1 => Indirect::De,
        2 => Indirect::HlInc,
        _ => Indirect::HlDec,
    }
}

const fn build_primary() -> [Op; 256] {
    let mut table = [Op::Invalid; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_primary(i as u8);
        i += 1;
    }
    table
}

const fn build_prefixed() -> [CbOp; 256] {
    let mut table = [CbOp::Bit(0, Operand::Reg(Reg8::B)); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_prefixed(i as u8);
        i += 1;
    }
    table
}

const fn decode_primary(opcode: u8) -> Op {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;

    match x {
        0 => match z {
            0 => match y {
                0 => Op::Nop,
                1 => Op::LdAbsFromSp,
                2 => Op::Stop,
                3 => Op::Jr(Cond::Always),
                _ => Op::Jr(Cond::from_index(y - 4)),
            },
            1 => {
                if y & 1 == 0 {
                    Op::LdPairImm(pair(y >> 1))
                } else {
                    Op::AddHl(pair(y >> 1))
                }
            }
            2 => {
                if y & 1 == 0 {
                    Op::LdIndFromA(indirect(y >> 1))
                } else {
                    Op::LdAFromInd(indirect(y >> 1))
                }
            }
            3 => {
                if y & 1 == 0 {
                    Op::IncPair(pair(y >> 1))
                } else {
                    Op::DecPair(pair(y >> 1))
                }
            }
            4 => Op::Inc(Operand::from_index(y)),
            5 => Op::Dec(Operand::from_index(y)),
            6 => Op::Ld {
                dst: Operand::from_index(y),
                src: Operand::Imm,
            },
            _ => match y {
                0 => Op::RotateA(Shift::Rlc),
                1 => Op::RotateA(Shift::Rrc),
                2 => Op::RotateA(Shift::Rl),
                3 => Op::RotateA(Shift::Rr),
                4 => Op::Daa,
                5 => Op::Cpl,
                6 => Op::Scf,
                _ => Op::Ccf,
            },
        },
        // LD r,r' block; LD (HL),(HL) is HALT.
        1 => {
            if opcode == 0x76 {
                Op::Halt
            } else {
                Op::Ld {
                    dst: Operand::from_index(y),
                    src: Operand::from_index(z),
                }
            }
        }
        2 => Op::Alu(AluOp::from_index(y), Operand::from_index(z)),
        _ => match z {
            0 => match y {
                0..=3 => Op::Ret(Cond::from_index(y)),
                4 => Op::LdhImmFromA,
                5 => Op::AddSpOffset,
                6 => Op::LdhAFromImm,
                _ => Op::LdHlFromSpOffset,
            },
            1 => match y {
                1 => Op::Ret(Cond::Always),
                3 => Op::Reti,
                5 => Op::JpHl,
                7 => Op::LdSpFromHl,
                _ => Op::Pop(stack_pair(y >> 1)),
            },
            2 => match y {
                0..=3 => Op::Jp(Cond::from_index(y)),
                4 => Op::LdhCFromA,
                5 => Op::LdAbsFromA,
                6 => Op::LdhAFromC,
                _ => Op::LdAFromAbs,
            },
            3 => match y {
                0 => Op::Jp(Cond::Always),
                1 => Op::Prefix,
                6 => Op::Di,
                7 => Op::Ei,
                _ => Op::Invalid,
            },
            4 => match y {
                0..=3 => Op::Call(Cond::from_index(y)),
                _ => Op::Invalid,
            },
            5 => match y {
                1 => Op::Call(Cond::Always),
                3 | 5 | 7 => Op::Invalid,
                _ => Op::Push(stack_pair(y >> 1)),
            },
            6 => Op::Alu(AluOp::from_index(y), Operand::Imm),
            _ => Op::Rst((y as u16) * 8),
        },
    }
}

const fn decode_prefixed(opcode: u8) -> CbOp {
    let y = (opcode >> 3) & 0x07;
    let operand = Operand::from_index(opcode);
    match opcode >> 6 {
        0 => CbOp::Shift(Shift::from_index(y), operand),
        1 => CbOp::Bit(y, operand),
        2 => CbOp::Res(y, operand),
        _ => CbOp::Set(y, operand),
    }
}
