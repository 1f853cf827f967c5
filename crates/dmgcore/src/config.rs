use typed_builder::TypedBuilder;

/// Register and I/O state the machine starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootState {
    /// State left behind by the DMG boot ROM when it jumps to 0x0100.
    #[default]
    PostBoot,
    /// Every register cleared and PC at 0x0000. Handy for feeding raw
    /// programs to the core without a cartridge header.
    Zeroed,
}

/// Initial contents of work RAM and high RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RamFill {
    #[default]
    Zero,
    /// Deterministic xorshift noise seeded with the given value.
    Pattern(u32),
}

#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
pub struct MachineConfig {
    #[builder(default)]
    pub boot_state: BootState,
    #[builder(default)]
    pub ram_fill: RamFill,
}

/// Settings for the worker-thread embedding in [`crate::runner`].
#[derive(Debug, Clone, Copy, Default, TypedBuilder)]
pub struct RunnerConfig {
    /// Sleep between frames to approximate the nominal 59.73 Hz rate.
    #[builder(default = false)]
    pub realtime: bool,
    /// Stop on its own after this many frames.
    #[builder(default, setter(strip_option))]
    pub max_frames: Option<u64>,
}
