use dmgcore_common::Shade;

use super::cartridge::{Cartridge, CartridgeHeader, CartridgeKind, Mbc1};
use super::display::PaletteKind;
use super::serial::Serial;
use super::timer::Timer;
use super::MEMORY_SIZE;
use crate::config::RamFill;
use crate::cpu::Bus;
use crate::interrupts::{self, Interrupt, INTERRUPT_MASK};
use crate::io;

mod dma;
mod init;
mod mmio;

/// Who is performing a write.
///
/// A few registers are shared between owners and only accept the bits
/// belonging to the writer; the rest of the byte keeps its prior value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriterRole {
    /// Instruction stores.
    Processor,
    /// The joypad matrix driver.
    Input,
    /// The scanline engine.
    Display,
    /// OAM DMA copies.
    Dma,
    /// Initial image and power-on register setup. Unrestricted.
    Loader,
}

/// Side effects of a write that the scheduler forwards to other parts
/// of the machine once the current instruction has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusEvent {
    /// A palette register changed; carries the decoded palette.
    Palette(PaletteKind, [Shade; 4]),
    /// LCDC bit 7 flipped.
    LcdEnabled(bool),
    /// The processor changed the P1 group selection.
    InputSelect,
}

/// The 64 KiB memory map.
///
/// A flat byte array backs everything except the switchable ROM window,
/// the 0xA000-0xBFFF window on MBC1 carts (external RAM, or open bus when
/// the cart has none), and the serial/timer registers, which are owned by
/// their peripherals.
pub struct AddressSpace {
    memory: Box<[u8]>,
    mbc: Option<Mbc1>,
    timer: Timer,
    serial: Serial,
    events: Vec<BusEvent>,
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new(RamFill::Zero)
    }
}

impl AddressSpace {
    /// Power-on memory map. The register setup queues palette and LCD
    /// events that the owner drains with [`take_events`](Self::take_events).
    pub fn new(ram_fill: RamFill) -> Self {
        let mut bus = Self {
            memory: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
            mbc: None,
            timer: Timer::new(),
            serial: Serial::default(),
            events: Vec::new(),
        };
        bus.fill_internal_ram(ram_fill);
        bus.apply_dmg_initial_io_state();
        bus
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x4000..=0x7FFF => match &self.mbc {
                Some(mbc) => mbc.rom_read(addr),
                None => self.memory[addr as usize],
            },
            0xA000..=0xBFFF => match &self.mbc {
                Some(mbc) => mbc.ram_read(addr),
                None => self.memory[addr as usize],
            },
            io::SB => self.serial.sb,
            io::SC => self.serial.read_sc(),
            io::DIV..=io::TAC => self.timer.read(addr),
            io::IF => self.memory[addr as usize] | !INTERRUPT_MASK,
            _ => self.memory[addr as usize],
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8, role: WriterRole) {
        match addr {
            0x0000..=0x7FFF if role == WriterRole::Loader => self.memory[addr as usize] = value,
            0x0000..=0x7FFF => self.write_cartridge_control(addr, value),
            0xA000..=0xBFFF if self.mbc.is_some() => {
                if let Some(mbc) = self.mbc.as_mut() {
                    mbc.ram_write(addr, value);
                }
            }
            0xC000..=0xDDFF => {
                self.memory[addr as usize] = value;
                self.memory[addr as usize + 0x2000] = value;
            }
            0xE000..=0xFDFF => {
                self.memory[addr as usize] = value;
                self.memory[addr as usize - 0x2000] = value;
            }
            0xFF00..=0xFF7F => self.write_io(addr, value, role),
            _ => self.memory[addr as usize] = value,
        }
    }

    /// Copy a validated cartridge into the map.
    ///
    /// The first 32 KiB are written through the loader role so the flat
    /// array holds bank 0 (and bank 1 for unbanked carts). MBC1 carts
    /// keep the whole image as backing storage for the switchable window.
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        let Cartridge { header, rom, kind } = cartridge;
        for (addr, &byte) in rom.iter().take(0x8000).enumerate() {
            self.write_byte(addr as u16, byte, WriterRole::Loader);
        }

        log::info!(
            "GB cartridge: '{}' type=0x{:02X} rom_banks={} ram_banks={}",
            header.title,
            header.cartridge_type,
            header.rom_banks().unwrap_or(0),
            header.ram_banks(),
        );

        self.mbc = match kind {
            CartridgeKind::RomOnly => None,
            CartridgeKind::Mbc1 { ram } => {
                let ram_banks = if ram { header.ram_banks() } else { 0 };
                Some(Mbc1::new(rom, ram_banks))
            }
        };
    }

    /// Header fields as currently visible in bank 0.
    pub fn header(&self) -> CartridgeHeader {
        CartridgeHeader::read(&self.memory)
    }

    /// Active MBC1 banking mode, if the cartridge has a controller.
    pub fn banking_mode(&self) -> Option<super::BankingMode> {
        self.mbc.as_ref().map(Mbc1::mode)
    }

    /// Currently mapped bank in 0x4000-0x7FFF.
    pub fn rom_bank(&self) -> usize {
        self.mbc.as_ref().map_or(1, Mbc1::rom_bank)
    }

    /// Advance the timer by `cycles` clock cycles.
    pub fn tick(&mut self, cycles: u32) {
        if self.timer.tick(cycles) {
            interrupts::request(self, Interrupt::Timer);
        }
    }

    /// Bytes sent over the serial port since the last drain.
    pub fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }

    /// Hand over the captured serial bytes and start a fresh buffer.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.serial.output)
    }

    /// Hand over the side effects queued since the last call.
    pub fn take_events(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.events)
    }

    fn write_cartridge_control(&mut self, addr: u16, value: u8) {
        match self.mbc.as_mut() {
            Some(mbc) => mbc.control_write(addr, value),
            None => log::trace!(
                "GB bus: ignored ROM write 0x{:02X} -> 0x{:04X} (no controller)",
                value,
                addr
            ),
        }
    }
}

impl Bus for AddressSpace {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value, WriterRole::Processor)
    }
}
