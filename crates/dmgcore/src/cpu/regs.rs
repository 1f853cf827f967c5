use bitflags::bitflags;

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Only the high nibble exists; bits 0-3 always read as zero, which
    /// `from_bits_truncate` enforces whenever F is loaded from a byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 0b1000_0000;
        const N = 0b0100_0000;
        const H = 0b0010_0000;
        const C = 0b0001_0000;
    }
}

impl Flags {
    /// `Z` when `value` is zero, empty otherwise.
    #[inline]
    pub fn zero(value: u8) -> Flags {
        if value == 0 {
            Flags::Z
        } else {
            Flags::empty()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg8 {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

/// Registers for the Game Boy CPU (LR35902).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: Flags,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    pub fn read8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::F => self.f.bits(),
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    pub fn write8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::F => self.f = Flags::from_bits_truncate(value),
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
        }
    }

    pub fn read16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af(),
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
        }
    }

    pub fn write16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::AF => self.set_af(value),
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
        }
    }

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f.bits()])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = Flags::from_bits_truncate(f);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.f.contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.f.set(flag, value);
    }

    /// 8-bit add with optional incoming carry; writes all four flags.
    ///
    /// H is set on a carry out of bit 3, C on a carry out of bit 7.
    pub fn add8(&mut self, lhs: u8, rhs: u8, carry_in: bool) -> u8 {
        let carry = carry_in as u8;
        let half = (lhs & 0x0F) + (rhs & 0x0F) + carry;
        let full = lhs as u16 + rhs as u16 + carry as u16;
        let result = full as u8;

        self.f = Flags::zero(result);
        self.f.set(Flags::H, half > 0x0F);
        self.f.set(Flags::C, full > 0xFF);
        result
    }

    /// 8-bit subtract with optional incoming borrow; writes all four flags.
    ///
    /// H is set on a borrow from bit 4, C on a borrow past bit 7.
    pub fn sub8(&mut self, lhs: u8, rhs: u8, borrow_in: bool) -> u8 {
        let borrow = borrow_in as i16;
        let half = (lhs & 0x0F) as i16 - (rhs & 0x0F) as i16 - borrow;
        let full = lhs as i16 - rhs as i16 - borrow;
        let result = full as u8;

        self.f = Flags::zero(result) | Flags::N;
        self.f.set(Flags::H, half < 0);
        self.f.set(Flags::C, full < 0);
        result
    }
}
