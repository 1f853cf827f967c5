use super::{LcdControl, ScanlineEngine, Scroll};
use crate::io;
use crate::machine::display::{PaletteKind, Pixel};
use crate::machine::AddressSpace;
use crate::SCREEN_WIDTH;

const OAM_BASE: u16 = 0xFE00;
const OAM_ENTRIES: u16 = 40;

/// Sprite attribute bits.
const ATTR_PALETTE: u8 = 0x10;
const ATTR_FLIP_X: u8 = 0x20;
const ATTR_FLIP_Y: u8 = 0x40;
const ATTR_BEHIND_BG: u8 = 0x80;

/// Color index of pixel `x` (0 = leftmost) in a tile row given as its
/// two bitplanes.
#[inline]
fn tile_pixel(lo: u8, hi: u8, x: u8) -> u8 {
    let bit = 7 - x;
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

#[inline]
fn tile_row(bus: &AddressSpace, addr: u16) -> (u8, u8) {
    (bus.read_byte(addr), bus.read_byte(addr.wrapping_add(1)))
}

impl ScanlineEngine {
    /// Build `self.row` for the current line from VRAM and OAM.
    pub(super) fn compose_row(&mut self, bus: &AddressSpace) {
        let lcdc = LcdControl::from_bits_truncate(bus.read_byte(io::LCDC));

        self.draw_background(bus, lcdc);
        if lcdc.contains(LcdControl::WINDOW_ENABLE) {
            self.draw_window(bus, lcdc);
        }
        if lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.draw_sprites(bus, lcdc);
        }
    }

    fn draw_background(&mut self, bus: &AddressSpace, lcdc: LcdControl) {
        if !lcdc.contains(LcdControl::BG_ENABLE) {
            self.row = [Pixel::BLANK; SCREEN_WIDTH];
            return;
        }

        let y = self.scroll.scy.wrapping_add(self.line);
        let map_row = lcdc.bg_map_base() + (y / 8) as u16 * 32;
        let fine_y = (y % 8) as u16;

        // 21 tiles cover the 160 visible pixels once SCX is not a multiple
        // of 8.
        let mut x = 0usize;
        let fine_x = self.scroll.scx % 8;
        for tile in 0..21u8 {
            let column = (self.scroll.scx / 8).wrapping_add(tile) % 32;
            let index = bus.read_byte(map_row + column as u16);
            let (lo, hi) = tile_row(bus, lcdc.tile_address(index) + fine_y * 2);

            let first = if tile == 0 { fine_x } else { 0 };
            for px in first..8 {
                if x == SCREEN_WIDTH {
                    return;
                }
                self.row[x] = Pixel {
                    color: tile_pixel(lo, hi, px),
                    palette: PaletteKind::Background,
                };
                x += 1;
            }
        }
    }

    fn draw_window(&mut self, bus: &AddressSpace, lcdc: LcdControl) {
        let Scroll { wy, wx, .. } = self.scroll;
        if self.line < wy || wx > 166 {
            return;
        }

        let y = self.window_line;
        let map_row = lcdc.window_map_base() + (y / 8) as u16 * 32;
        let fine_y = (y % 8) as u16;
        let start = wx.saturating_sub(7) as usize;
        let shift = 7u8.saturating_sub(wx) as usize;

        for x in start..SCREEN_WIDTH {
            let wx_pos = x - start + shift;
            let index = bus.read_byte(map_row + (wx_pos / 8) as u16);
            let (lo, hi) = tile_row(bus, lcdc.tile_address(index) + fine_y * 2);
            self.row[x] = Pixel {
                color: tile_pixel(lo, hi, (wx_pos % 8) as u8),
                palette: PaletteKind::Background,
            };
        }
        self.window_line = self.window_line.wrapping_add(1);
    }

    fn draw_sprites(&mut self, bus: &AddressSpace, lcdc: LcdControl) {
        let height = lcdc.obj_height();
        let background = self.row.map(|px| px.color);
        let line = self.line as i16;

        // Walk OAM backwards so that lower entries end up on top.
        for entry in (0..OAM_ENTRIES).rev() {
            let base = OAM_BASE + entry * 4;
            let raw_y = bus.read_byte(base);
            let raw_x = bus.read_byte(base + 1);
            let mut tile = bus.read_byte(base + 2);
            let attrs = bus.read_byte(base + 3);

            // Entries parked off screen.
            if raw_x == 0 || raw_x >= 168 || raw_y == 0 || raw_y >= 160 {
                continue;
            }

            let top = raw_y as i16 - 16;
            if line < top || line >= top + height as i16 {
                continue;
            }

            let mut row_in_sprite = (line - top) as u8;
            if attrs & ATTR_FLIP_Y != 0 {
                row_in_sprite = height - 1 - row_in_sprite;
            }
            if height == 16 {
                tile &= 0xFE;
            }
            let addr = 0x8000 + tile as u16 * 16 + row_in_sprite as u16 * 2;
            let (lo, hi) = tile_row(bus, addr);

            let palette = if attrs & ATTR_PALETTE != 0 {
                PaletteKind::Object1
            } else {
                PaletteKind::Object0
            };
            let left = raw_x as i16 - 8;

            for col in 0..8u8 {
                let x = left + col as i16;
                if !(0..SCREEN_WIDTH as i16).contains(&x) {
                    continue;
                }
                let px = if attrs & ATTR_FLIP_X != 0 { 7 - col } else { col };
                let color = tile_pixel(lo, hi, px);
                if color == 0 {
                    continue;
                }
                let x = x as usize;
                if attrs & ATTR_BEHIND_BG != 0 && background[x] != 0 {
                    continue;
                }
                self.row[x] = Pixel { color, palette };
            }
        }
    }
}
