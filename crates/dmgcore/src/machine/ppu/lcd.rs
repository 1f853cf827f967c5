use bitflags::bitflags;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LcdControl: u8 {
        const BG_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        /// 8x16 objects.
        const OBJ_TALL = 0x04;
        /// Background map at 0x9C00 instead of 0x9800.
        const BG_MAP_HIGH = 0x08;
        /// Unsigned tile data at 0x8000 instead of signed at 0x8800.
        const TILE_DATA_LOW = 0x10;
        const WINDOW_ENABLE = 0x20;
        const WINDOW_MAP_HIGH = 0x40;
        const LCD_ENABLE = 0x80;
    }
}

bitflags! {
    /// Bits 2-6 of STAT (0xFF41). The mode field is handled separately.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LcdStatus: u8 {
        const COINCIDENCE = 0x04;
        const HBLANK_INT = 0x08;
        const VBLANK_INT = 0x10;
        const OAM_INT = 0x20;
        const COINCIDENCE_INT = 0x40;
    }
}

impl LcdControl {
    #[inline]
    pub fn bg_map_base(self) -> u16 {
        if self.contains(Self::BG_MAP_HIGH) {
            0x9C00
        } else {
            0x9800
        }
    }

    #[inline]
    pub fn window_map_base(self) -> u16 {
        if self.contains(Self::WINDOW_MAP_HIGH) {
            0x9C00
        } else {
            0x9800
        }
    }

    /// Address of the first byte of background/window tile `index`.
    #[inline]
    pub fn tile_address(self, index: u8) -> u16 {
        if self.contains(Self::TILE_DATA_LOW) {
            0x8000 + index as u16 * 16
        } else {
            (0x9000i32 + (index as i8 as i32) * 16) as u16
        }
    }

    #[inline]
    pub fn obj_height(self) -> u8 {
        if self.contains(Self::OBJ_TALL) {
            16
        } else {
            8
        }
    }
}
