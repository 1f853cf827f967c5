use thiserror::Error;

/// Fatal conditions raised by the instruction interpreter.
///
/// Once an error has been returned the CPU stays locked and every later
/// `step` reports the same error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    #[error("invalid opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("cartridge image is {len} bytes, shorter than the 0x150-byte header")]
    TooShort { len: usize },

    #[error("unsupported ROM size code 0x{0:02X}")]
    UnsupportedRomSize(u8),

    #[error("header declares {declared} bytes of ROM but the image only has {actual}")]
    Truncated { declared: usize, actual: usize },

    #[error("unsupported cartridge type 0x{0:02X}")]
    UnsupportedType(u8),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("emulation stopped: {0}")]
    Emulation(#[from] CpuError),

    #[error("failed to start emulation worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("emulation worker panicked")]
    WorkerPanicked,
}
