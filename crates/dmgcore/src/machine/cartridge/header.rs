use crate::error::CartridgeError;

/// Size of the region that holds the header (0x0000-0x014F).
pub(crate) const HEADER_END: usize = 0x150;

/// Fields of the cartridge header at 0x0134-0x014C.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub publisher: [u8; 2],
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub destination: u8,
    pub old_publisher: u8,
    pub version: u8,
}

impl CartridgeHeader {
    pub fn parse(image: &[u8]) -> Result<Self, CartridgeError> {
        if image.len() < HEADER_END {
            return Err(CartridgeError::TooShort { len: image.len() });
        }
        Ok(Self::read(image))
    }

    /// Decode the header from `bytes`, reading missing bytes as zero.
    pub(crate) fn read(bytes: &[u8]) -> Self {
        let byte = |addr: usize| bytes.get(addr).copied().unwrap_or(0);

        let title = (0x134..=0x142)
            .map(byte)
            .take_while(|&b| b != 0)
            .filter(u8::is_ascii)
            .map(char::from)
            .collect::<String>()
            .trim_end()
            .to_string();

        Self {
            title,
            publisher: [byte(0x144), byte(0x145)],
            sgb_flag: byte(0x146),
            cartridge_type: byte(0x147),
            rom_size_code: byte(0x148),
            ram_size_code: byte(0x149),
            destination: byte(0x14A),
            old_publisher: byte(0x14B),
            version: byte(0x14C),
        }
    }

    /// ROM size in bytes: 32 KiB shifted left by the size code.
    pub fn rom_size(&self) -> Option<usize> {
        match self.rom_size_code {
            code @ 0x00..=0x08 => Some(0x8000 << code),
            _ => None,
        }
    }

    /// Number of 16 KiB ROM banks.
    pub fn rom_banks(&self) -> Option<usize> {
        self.rom_size().map(|size| size / 0x4000)
    }

    /// Number of 8 KiB external RAM banks. A 2 KiB chip counts as one.
    pub fn ram_banks(&self) -> usize {
        match self.ram_size_code {
            0x01 | 0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        }
    }
}
