/// Memory interface seen by the CPU.
///
/// Every store an instruction performs is a processor write. Peripherals
/// that write with a different role go through
/// [`AddressSpace::write_byte`](crate::machine::AddressSpace::write_byte)
/// instead.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
