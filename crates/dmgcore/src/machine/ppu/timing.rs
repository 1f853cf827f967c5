use super::{LcdStatus, Mode, ScanlineEngine};
use crate::interrupts::{self, Interrupt};
use crate::io;
use crate::machine::display::DisplaySink;
use crate::machine::{AddressSpace, WriterRole, TOTAL_LINES};

/// First line of vertical blank.
const VBLANK_LINE: u8 = 144;

impl ScanlineEngine {
    /// Consume `cycles` clock cycles.
    ///
    /// Mode changes land on their exact dot even when an instruction's
    /// cost spans a boundary. Returns true if VBlank was entered.
    pub fn advance<S: DisplaySink>(
        &mut self,
        cycles: u32,
        bus: &mut AddressSpace,
        sink: &mut S,
    ) -> bool {
        if !self.enabled {
            return false;
        }

        let mut entered_vblank = false;
        let mut remaining = cycles;
        while remaining > 0 {
            let end = self.mode.end_dot();
            let step = remaining.min(end - self.dot);
            self.dot += step;
            remaining -= step;
            if self.dot == end {
                entered_vblank |= self.finish_mode(bus, sink);
            }
        }
        entered_vblank
    }

    /// React to LCDC bit 7.
    ///
    /// Turning the display off parks it on line 0 in HBlank. Turning it on
    /// restarts the frame at line 0, OAM scan.
    pub fn set_enabled(&mut self, enabled: bool, bus: &mut AddressSpace) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        self.dot = 0;
        self.window_line = 0;
        log::debug!("GB PPU: LCD {}", if enabled { "on" } else { "off" });

        if enabled {
            self.set_line(0, bus);
            self.enter_mode(Mode::OamScan, bus);
        } else {
            self.line = 0;
            self.mode = Mode::HBlank;
            bus.write_byte(io::LY, 0, WriterRole::Display);
            let stat = bus.read_byte(io::STAT);
            bus.write_byte(io::STAT, stat & !0x03, WriterRole::Display);
        }
    }

    fn finish_mode<S: DisplaySink>(&mut self, bus: &mut AddressSpace, sink: &mut S) -> bool {
        match self.mode {
            Mode::OamScan => {
                self.latch_scroll(bus);
                self.enter_mode(Mode::Transfer, bus);
                false
            }
            Mode::Transfer => {
                self.compose_row(bus);
                sink.publish_row(self.line, &self.row);
                self.enter_mode(Mode::HBlank, bus);
                false
            }
            Mode::HBlank | Mode::VBlank => self.next_line(bus),
        }
    }

    fn next_line(&mut self, bus: &mut AddressSpace) -> bool {
        self.dot = 0;
        let next = match self.line + 1 {
            TOTAL_LINES => 0,
            line => line,
        };
        self.set_line(next, bus);

        match next {
            0 => {
                self.window_line = 0;
                self.enter_mode(Mode::OamScan, bus);
                false
            }
            VBLANK_LINE => {
                self.enter_mode(Mode::VBlank, bus);
                interrupts::request(bus, Interrupt::VBlank);
                self.frames += 1;
                log::debug!("GB PPU: VBlank, frame {}", self.frames);
                true
            }
            line if line < VBLANK_LINE => {
                self.enter_mode(Mode::OamScan, bus);
                false
            }
            _ => false,
        }
    }

    fn enter_mode(&mut self, mode: Mode, bus: &mut AddressSpace) {
        self.mode = mode;
        let stat = bus.read_byte(io::STAT);
        bus.write_byte(io::STAT, (stat & !0x03) | mode.bits(), WriterRole::Display);

        let select = match mode {
            Mode::HBlank => LcdStatus::HBLANK_INT,
            Mode::VBlank => LcdStatus::VBLANK_INT,
            Mode::OamScan => LcdStatus::OAM_INT,
            Mode::Transfer => return,
        };
        if LcdStatus::from_bits_truncate(stat).contains(select) {
            interrupts::request(bus, Interrupt::LcdStat);
        }
    }

    /// Publish the new line in LY and refresh the LYC coincidence bit.
    fn set_line(&mut self, line: u8, bus: &mut AddressSpace) {
        self.line = line;
        bus.write_byte(io::LY, line, WriterRole::Display);

        let stat = LcdStatus::from_bits_truncate(bus.read_byte(io::STAT));
        let matches = line == bus.read_byte(io::LYC);
        let raw = bus.read_byte(io::STAT) & !LcdStatus::COINCIDENCE.bits();
        let coincidence = if matches {
            LcdStatus::COINCIDENCE.bits()
        } else {
            0
        };
        bus.write_byte(io::STAT, raw | coincidence, WriterRole::Display);

        if matches && stat.contains(LcdStatus::COINCIDENCE_INT) {
            interrupts::request(bus, Interrupt::LcdStat);
        }
    }

    fn latch_scroll(&mut self, bus: &AddressSpace) {
        self.scroll.scy = bus.read_byte(io::SCY);
        self.scroll.scx = bus.read_byte(io::SCX);
        self.scroll.wy = bus.read_byte(io::WY);
        self.scroll.wx = bus.read_byte(io::WX);
    }
}
