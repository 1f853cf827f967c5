//! Interrupt sources and the requested/enabled register pair.
//!
//! Both registers live in the address space (IF at 0xFF0F, IE at 0xFFFF),
//! so every operation here goes through a [`Bus`]. The master enable flag
//! is CPU state and lives in [`crate::cpu::MasterEnable`].

use crate::cpu::Bus;
use crate::io;

/// Interrupt sources in descending priority order.
///
/// The discriminant is the bit index in IE/IF.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

/// Only the low five bits of IE/IF are wired to sources.
pub const INTERRUPT_MASK: u8 = 0x1F;

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Fixed dispatch address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    /// Highest-priority source present in `bits`, if any.
    pub fn highest(bits: u8) -> Option<Interrupt> {
        let bits = bits & INTERRUPT_MASK;
        if bits == 0 {
            return None;
        }
        Interrupt::ALL
            .get(bits.trailing_zeros() as usize)
            .copied()
    }
}

/// Set the requested bit for `source`.
pub fn request<B: Bus>(bus: &mut B, source: Interrupt) {
    let iflags = bus.read8(io::IF);
    bus.write8(io::IF, iflags | source.bit());
}

/// Clear the requested bit for `source`.
pub fn clear<B: Bus>(bus: &mut B, source: Interrupt) {
    let iflags = bus.read8(io::IF);
    bus.write8(io::IF, iflags & !source.bit());
}

/// Sources that are both requested and enabled.
#[inline]
pub fn pending<B: Bus>(bus: &mut B) -> u8 {
    bus.read8(io::IE) & bus.read8(io::IF) & INTERRUPT_MASK
}

/// Highest-priority source that is both requested and enabled.
///
/// This ignores the master enable flag; the CPU checks that separately.
pub fn serviceable<B: Bus>(bus: &mut B) -> Option<Interrupt> {
    Interrupt::highest(pending(bus))
}
