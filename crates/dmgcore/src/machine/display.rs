use dmgcore_common::{Color, Shade};

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Which palette register resolves a pixel's color index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    #[default]
    Background,
    Object0,
    Object1,
}

impl PaletteKind {
    #[inline]
    const fn index(self) -> usize {
        match self {
            PaletteKind::Background => 0,
            PaletteKind::Object0 => 1,
            PaletteKind::Object1 => 2,
        }
    }
}

/// One composed pixel: a 2-bit color index and the palette it belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub color: u8,
    pub palette: PaletteKind,
}

impl Pixel {
    pub const BLANK: Pixel = Pixel {
        color: 0,
        palette: PaletteKind::Background,
    };
}

/// A finished scanline.
pub type Row = [Pixel; SCREEN_WIDTH];

/// Receiver for the scanline engine's output.
///
/// Rows arrive in line order once per visible line; palettes arrive
/// whenever software rewrites BGP, OBP0 or OBP1 (and once at power-on).
pub trait DisplaySink {
    fn publish_row(&mut self, line: u8, row: &Row);
    fn publish_palette(&mut self, kind: PaletteKind, shades: [Shade; 4]);
}

/// Sink that drops everything. Useful for headless test ROM runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn publish_row(&mut self, _line: u8, _row: &Row) {}
    fn publish_palette(&mut self, _kind: PaletteKind, _shades: [Shade; 4]) {}
}

/// Immutable copy of a whole screen, handed across threads by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<Color>,
}

impl Frame {
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Packed RGB, 3 bytes per pixel, row-major.
    pub fn to_rgb24(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            let (r, g, b) = color.rgb();
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}

/// Display sink that resolves rows into a 160x144 RGBA frame using the
/// most recently published palettes.
pub struct FrameBuffer {
    palettes: [[Shade; 4]; 3],
    pixels: Vec<Color>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            palettes: [[Shade::White; 4]; 3],
            pixels: vec![Color::WHITE; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    #[inline]
    pub fn palette(&self, kind: PaletteKind) -> [Shade; 4] {
        self.palettes[kind.index()]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    pub fn snapshot(&self) -> Frame {
        Frame {
            pixels: self.pixels.clone(),
        }
    }

    pub fn to_rgb24(&self) -> Vec<u8> {
        self.snapshot().to_rgb24()
    }
}

impl DisplaySink for FrameBuffer {
    fn publish_row(&mut self, line: u8, row: &Row) {
        let y = line as usize;
        if y >= SCREEN_HEIGHT {
            return;
        }
        let dst = &mut self.pixels[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH];
        for (out, px) in dst.iter_mut().zip(row.iter()) {
            let shade = self.palettes[px.palette.index()][(px.color & 0x03) as usize];
            *out = shade.to_color();
        }
    }

    fn publish_palette(&mut self, kind: PaletteKind, shades: [Shade; 4]) {
        self.palettes[kind.index()] = shades;
    }
}
