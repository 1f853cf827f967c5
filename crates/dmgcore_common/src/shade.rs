use crate::Color;

/// One of the four grey levels a DMG palette entry can select.
///
/// The discriminant is the 2-bit value stored in a palette register.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Shade {
    #[default]
    White = 0,
    LightGray = 1,
    DarkGray = 2,
    Black = 3,
}

impl Shade {
    /// Decode the low two bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Shade {
        match bits & 0x03 {
            0 => Shade::White,
            1 => Shade::LightGray,
            2 => Shade::DarkGray,
            _ => Shade::Black,
        }
    }

    /// Decode a full palette register into its four entries.
    ///
    /// Entry `i` is taken from bits `2*i+1..=2*i`, so color index 0 maps
    /// to the two least significant bits.
    pub const fn decode_palette(register: u8) -> [Shade; 4] {
        [
            Shade::from_bits(register),
            Shade::from_bits(register >> 2),
            Shade::from_bits(register >> 4),
            Shade::from_bits(register >> 6),
        ]
    }

    #[inline]
    pub const fn to_color(self) -> Color {
        match self {
            Shade::White => Color::WHITE,
            Shade::LightGray => Color::LIGHT_GRAY,
            Shade::DarkGray => Color::DARK_GRAY,
            Shade::Black => Color::BLACK,
        }
    }
}
