mod bus;
mod cartridge;
mod display;
mod gameboy;
mod joypad;
mod ppu;
mod serial;
mod timer;

pub use bus::{AddressSpace, BusEvent, WriterRole};
pub use cartridge::{BankingMode, Cartridge, CartridgeHeader, CartridgeKind};
pub use display::{DisplaySink, Frame, FrameBuffer, NullSink, PaletteKind, Pixel, Row};
pub use gameboy::GameBoy;
pub use ppu::{LcdControl, LcdStatus, Mode, ScanlineEngine};

/// Total addressable memory for the Game Boy (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

/// Clock cycles in one scanline.
pub const LINE_CYCLES: u32 = 456;
/// Scanlines per frame, visible and blanked.
pub const TOTAL_LINES: u8 = 154;
/// Clock cycles in one full frame (154 lines of 456 cycles).
pub const FRAME_CYCLES: u32 = LINE_CYCLES * TOTAL_LINES as u32;

#[cfg(test)]
mod tests;
