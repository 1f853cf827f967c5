/// Serial port reduced to what test ROMs need.
///
/// A transfer started on SC with the internal clock (bits 7 and 0 set)
/// finishes at once: SB is appended to `output` and the start bit drops.
/// `output` keeps growing until the owner drains it.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Serial {
    #[inline]
    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    /// Returns true when a transfer completed and the serial interrupt
    /// should be requested.
    pub(super) fn write_sc(&mut self, value: u8) -> bool {
        self.sc = value & 0x81;
        if self.sc == 0x81 {
            self.output.push(self.sb);
            log::trace!("GB serial: sent 0x{:02X}", self.sb);
            self.sc &= !0x80;
            return true;
        }
        false
    }
}
