mod header;
mod mbc1;

pub use header::CartridgeHeader;
pub use mbc1::BankingMode;
pub(super) use mbc1::Mbc1;

use crate::error::CartridgeError;

/// Banking hardware a cartridge carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeKind {
    /// 32 KiB mapped straight into 0x0000-0x7FFF.
    RomOnly,
    /// MBC1, optionally with external RAM.
    Mbc1 { ram: bool },
}

/// A validated cartridge image, ready to be inserted into an
/// [`AddressSpace`](super::AddressSpace).
#[derive(Clone, Debug)]
pub struct Cartridge {
    pub header: CartridgeHeader,
    pub rom: Vec<u8>,
    pub kind: CartridgeKind,
}

impl Cartridge {
    /// Parse and validate a raw ROM image.
    ///
    /// Bytes beyond the size declared in the header are dropped.
    pub fn from_image(image: &[u8]) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::parse(image)?;

        let declared = header
            .rom_size()
            .ok_or(CartridgeError::UnsupportedRomSize(header.rom_size_code))?;
        if image.len() < declared {
            return Err(CartridgeError::Truncated {
                declared,
                actual: image.len(),
            });
        }

        let kind = match header.cartridge_type {
            0x00 => CartridgeKind::RomOnly,
            0x01 => CartridgeKind::Mbc1 { ram: false },
            0x02 | 0x03 => CartridgeKind::Mbc1 { ram: true },
            other => return Err(CartridgeError::UnsupportedType(other)),
        };

        Ok(Self {
            header,
            rom: image[..declared].to_vec(),
            kind,
        })
    }
}
