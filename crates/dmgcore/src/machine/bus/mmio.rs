use dmgcore_common::Shade;

use super::{AddressSpace, BusEvent, WriterRole};
use crate::interrupts::{self, Interrupt, INTERRUPT_MASK};
use crate::io;
use crate::machine::display::PaletteKind;

impl WriterRole {
    /// Bits of P1 this writer may change: the processor owns the group
    /// select bits 4-5, the input driver owns the line bits 0-3.
    fn p1_mask(self) -> u8 {
        match self {
            WriterRole::Processor => 0x30,
            WriterRole::Input => 0x0F,
            WriterRole::Loader => 0xFF,
            WriterRole::Display | WriterRole::Dma => 0x00,
        }
    }

    /// Bits of STAT this writer may change. Mode bits 0-1 belong to the
    /// scanline engine alone.
    fn stat_mask(self) -> u8 {
        match self {
            WriterRole::Processor => 0x7C,
            WriterRole::Display => 0x07,
            WriterRole::Loader => 0xFF,
            WriterRole::Input | WriterRole::Dma => 0x00,
        }
    }
}

impl AddressSpace {
    pub(super) fn write_io(&mut self, addr: u16, value: u8, role: WriterRole) {
        match addr {
            io::P1 => {
                let mask = role.p1_mask();
                self.write_masked(addr, value, mask);
                if role == WriterRole::Processor {
                    self.events.push(BusEvent::InputSelect);
                }
            }
            io::SB => self.serial.sb = value,
            io::SC => {
                if self.serial.write_sc(value) {
                    interrupts::request(self, Interrupt::Serial);
                }
            }
            io::DIV..=io::TAC => {
                if self.timer.write(addr, value) {
                    interrupts::request(self, Interrupt::Timer);
                }
            }
            io::IF => self.memory[addr as usize] = value & INTERRUPT_MASK,
            io::LCDC => {
                let old = self.memory[addr as usize];
                self.memory[addr as usize] = value;
                if (old ^ value) & 0x80 != 0 {
                    self.events.push(BusEvent::LcdEnabled(value & 0x80 != 0));
                }
            }
            io::STAT => self.write_masked(addr, value, role.stat_mask()),
            io::LY => {
                if matches!(role, WriterRole::Display | WriterRole::Loader) {
                    self.memory[addr as usize] = value;
                } else {
                    log::trace!("GB bus: rejected LY write 0x{:02X} by {:?}", value, role);
                }
            }
            io::DMA => {
                self.memory[addr as usize] = value;
                self.oam_dma(value);
            }
            io::BGP | io::OBP0 | io::OBP1 => {
                self.memory[addr as usize] = value;
                let kind = match addr {
                    io::BGP => PaletteKind::Background,
                    io::OBP0 => PaletteKind::Object0,
                    _ => PaletteKind::Object1,
                };
                self.events
                    .push(BusEvent::Palette(kind, Shade::decode_palette(value)));
            }
            _ => self.memory[addr as usize] = value,
        }
    }

    #[inline]
    fn write_masked(&mut self, addr: u16, value: u8, mask: u8) {
        let old = self.memory[addr as usize];
        self.memory[addr as usize] = (old & !mask) | (value & mask);
    }
}
