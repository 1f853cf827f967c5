/// What the two MBC1 high bits (written at 0x4000-0x5FFF) select.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BankingMode {
    /// Mode 0: up to 16 Mbit ROM, one 8 KiB RAM bank. The high bits
    /// extend the ROM bank number.
    #[default]
    Rom16Ram8,
    /// Mode 1: up to 4 Mbit ROM, four 8 KiB RAM banks. The high bits
    /// pick the RAM bank.
    Rom4Ram32,
}

/// MBC1 banking state plus the full ROM image and external RAM.
///
/// Control writes never reach the flat memory array. Bank 0 stays fixed
/// at 0x0000-0x3FFF; 0x4000-0x7FFF is served from `rom`.
pub(crate) struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_banks: usize,
    ram_banks: usize,
    /// Low 5 bits of the ROM bank, never 0.
    bank_low: u8,
    bank_high: u8,
    ram_enabled: bool,
    mode: BankingMode,
}

impl Mbc1 {
    pub(crate) fn new(rom: Vec<u8>, ram_banks: usize) -> Self {
        let rom_banks = (rom.len() / 0x4000).max(1);
        Self {
            rom,
            ram: vec![0xFF; ram_banks * 0x2000],
            rom_banks,
            ram_banks,
            bank_low: 1,
            bank_high: 0,
            ram_enabled: false,
            mode: BankingMode::default(),
        }
    }

    /// External RAM is reachable only when present and latched on.
    #[inline]
    fn ram_accessible(&self) -> bool {
        self.ram_enabled && self.ram_banks > 0
    }

    #[inline]
    pub(crate) fn mode(&self) -> BankingMode {
        self.mode
    }

    /// Bank mapped at 0x4000-0x7FFF, wrapped to the real bank count.
    pub(crate) fn rom_bank(&self) -> usize {
        let mut bank = self.bank_low as usize;
        if self.mode == BankingMode::Rom16Ram8 {
            bank |= (self.bank_high as usize) << 5;
        }
        bank % self.rom_banks
    }

    fn ram_bank(&self) -> usize {
        match self.mode {
            BankingMode::Rom16Ram8 => 0,
            BankingMode::Rom4Ram32 => self.bank_high as usize % self.ram_banks.max(1),
        }
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        let offset = (addr & 0x3FFF) as usize;
        self.rom
            .get(self.rom_bank() * 0x4000 + offset)
            .copied()
            .unwrap_or(0xFF)
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_accessible() {
            return 0xFF;
        }
        let offset = (addr & 0x1FFF) as usize;
        self.ram
            .get(self.ram_bank() * 0x2000 + offset)
            .copied()
            .unwrap_or(0xFF)
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_accessible() {
            return;
        }
        let index = self.ram_bank() * 0x2000 + (addr & 0x1FFF) as usize;
        if let Some(slot) = self.ram.get_mut(index) {
            *slot = value;
        }
    }

    /// Writes to 0x0000-0x7FFF.
    pub(crate) fn control_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                // Bank 0 cannot be selected here; 0x00/0x20/0x40/0x60
                // end up as 0x01/0x21/0x41/0x61.
                self.bank_low = match value & 0x1F {
                    0 => 1,
                    bank => bank,
                };
                log::debug!("GB MBC1: ROM bank -> {}", self.rom_bank());
            }
            0x4000..=0x5FFF => {
                self.bank_high = value & 0x03;
                log::debug!("GB MBC1: high bank bits -> {}", self.bank_high);
            }
            0x6000..=0x7FFF => {
                self.mode = if value & 0x01 == 0 {
                    BankingMode::Rom16Ram8
                } else {
                    BankingMode::Rom4Ram32
                };
                log::debug!("GB MBC1: mode -> {:?}", self.mode);
            }
            _ => {}
        }
    }
}
