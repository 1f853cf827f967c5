use super::{Cpu, Flags, MasterEnable, Registers};
use crate::config::BootState;

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the DMG boot ROM hands over at 0x0100.
    pub fn new() -> Self {
        Self::with_boot_state(BootState::PostBoot)
    }

    pub fn with_boot_state(boot: BootState) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: MasterEnable::default(),
            halted: false,
            stopped: false,
            fault: None,
        };
        cpu.apply_boot_state(boot);
        cpu
    }

    pub fn reset(&mut self, boot: BootState) {
        self.halted = false;
        self.stopped = false;
        self.fault = None;
        self.ime.reset();
        self.apply_boot_state(boot);
    }

    /// Register values follow Pan Docs' "Power Up Sequence" for DMG.
    /// IME is clear when control reaches the cartridge.
    fn apply_boot_state(&mut self, boot: BootState) {
        self.regs = match boot {
            BootState::PostBoot => Registers {
                a: 0x01,
                f: Flags::Z | Flags::H | Flags::C,
                b: 0x00,
                c: 0x13,
                d: 0x00,
                e: 0xD8,
                h: 0x01,
                l: 0x4D,
                sp: 0xFFFE,
                pc: 0x0100,
            },
            BootState::Zeroed => Registers::default(),
        };
    }
}
