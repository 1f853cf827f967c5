mod alu;
mod bus;
mod cb;
pub(crate) mod decode;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use interrupts::MasterEnable;
pub use regs::{Flags, Reg16, Reg8, Registers};

use crate::error::CpuError;

/// Sharp LR35902 core.
///
/// `step` runs one instruction (or one interrupt entry) to completion and
/// reports its cost in clock cycles. All memory traffic goes through the
/// [`Bus`] passed in by the caller.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: MasterEnable,
    pub halted: bool,
    /// STOP low-power state, left when any input line reads low.
    stopped: bool,
    /// Set by the first invalid opcode; the core never runs again.
    fault: Option<CpuError>,
}

impl Cpu {
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn fault(&self) -> Option<CpuError> {
        self.fault
    }
}
