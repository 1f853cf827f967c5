use super::{AddressSpace, WriterRole};

impl AddressSpace {
    /// OAM DMA: copy 160 bytes from `page << 8` to 0xFE00..=0xFE9F.
    ///
    /// The copy happens at once and ignores the 160 machine cycles and
    /// bus conflicts of real hardware.
    pub(super) fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        log::debug!("GB DMA: 0x{:04X} -> OAM", base);
        for i in 0u16..0xA0 {
            let byte = self.read_byte(base.wrapping_add(i));
            self.write_byte(0xFE00 + i, byte, WriterRole::Dma);
        }
    }
}
