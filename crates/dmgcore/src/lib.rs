pub mod config;
pub mod cpu;
pub mod error;
pub mod interrupts;
pub mod io;
pub mod machine;
pub mod runner;

pub use config::{BootState, MachineConfig, RamFill, RunnerConfig};
pub use error::{CartridgeError, CpuError, RunnerError};
pub use machine::{DisplaySink, FrameBuffer, GameBoy};

pub use dmgcore_common::{Button, Color, Shade};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
