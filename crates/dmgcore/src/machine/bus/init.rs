use super::{AddressSpace, WriterRole};
use crate::config::RamFill;
use crate::io;

impl AddressSpace {
    /// Initialize I/O registers to match the DMG power-on state.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        let loader = WriterRole::Loader;

        // Joypad: no group selected, all lines high.
        self.write_byte(io::P1, 0xCF, loader);

        // Serial.
        self.write_byte(io::SB, 0x00, loader);
        self.write_byte(io::SC, 0x7E, loader);

        // IF has the VBlank request latched by the boot ROM.
        self.write_byte(io::IF, 0x01, loader);
        self.write_byte(io::IE, 0x00, loader);

        // Sound registers are not emulated but their defaults are visible.
        for (addr, value) in [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ] {
            self.write_byte(addr, value, loader);
        }

        // LCD.
        self.write_byte(io::LCDC, 0x91, loader);
        self.write_byte(io::STAT, 0x80, loader);
        self.write_byte(io::SCY, 0x00, loader);
        self.write_byte(io::SCX, 0x00, loader);
        self.write_byte(io::LY, 0x00, loader);
        self.write_byte(io::LYC, 0x00, loader);
        self.memory[io::DMA as usize] = 0xFF;
        self.write_byte(io::BGP, 0xFC, loader);
        self.write_byte(io::OBP0, 0xFF, loader);
        self.write_byte(io::OBP1, 0xFF, loader);
        self.write_byte(io::WY, 0x00, loader);
        self.write_byte(io::WX, 0x00, loader);
    }

    /// Fill WRAM (and its echo) and HRAM according to `fill`.
    ///
    /// `Pattern` uses a fixed-seed xorshift32 so runs stay reproducible
    /// while software still cannot rely on all-zero RAM.
    pub(super) fn fill_internal_ram(&mut self, fill: RamFill) {
        let RamFill::Pattern(seed) = fill else {
            return;
        };
        let mut x = seed.max(1);
        let mut next_byte = move || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        };

        for addr in 0xC000u16..=0xDFFF {
            self.write_byte(addr, next_byte(), WriterRole::Loader);
        }
        for addr in 0xFF80u16..=0xFFFE {
            self.memory[addr as usize] = next_byte();
        }
    }
}
