//! Scanline-level display controller.
//!
//! The engine is advanced by the scheduler with the exact cycle cost of
//! every instruction and walks the per-line state machine
//! OAM scan (80) → transfer (172) → HBlank (204), then ten VBlank lines.
//! A full row is composed and published when transfer ends.

mod lcd;
mod render;
mod timing;

pub use lcd::{LcdControl, LcdStatus};

use super::display::{Pixel, Row};
use crate::SCREEN_WIDTH;

/// Display sub-state. The discriminant is the value reported in STAT
/// bits 0-1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl Mode {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Dot within the line at which this mode ends.
    const fn end_dot(self) -> u32 {
        match self {
            Mode::OamScan => 80,
            Mode::Transfer => 80 + 172,
            Mode::HBlank | Mode::VBlank => super::LINE_CYCLES,
        }
    }
}

/// Scroll and window registers latched when transfer starts.
#[derive(Clone, Copy, Debug, Default)]
struct Scroll {
    scy: u8,
    scx: u8,
    wy: u8,
    wx: u8,
}

pub struct ScanlineEngine {
    line: u8,
    mode: Mode,
    /// Cycles elapsed in the current line.
    dot: u32,
    enabled: bool,
    scroll: Scroll,
    /// Lines of the window drawn so far this frame.
    window_line: u8,
    row: Row,
    frames: u64,
}

impl Default for ScanlineEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanlineEngine {
    /// Powered-down engine; it starts once LCDC bit 7 is seen set.
    pub fn new() -> Self {
        Self {
            line: 0,
            mode: Mode::HBlank,
            dot: 0,
            enabled: false,
            scroll: Scroll::default(),
            window_line: 0,
            row: [Pixel::BLANK; SCREEN_WIDTH],
            frames: 0,
        }
    }

    #[inline]
    pub fn line(&self) -> u8 {
        self.line
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn dot(&self) -> u32 {
        self.dot
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of VBlank periods entered so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
