use super::decode::{CbOp, PREFIXED};
use super::{Bus, Cpu};

impl Cpu {
    /// Fetch the byte after 0xCB and run the prefixed operation.
    ///
    /// Register forms cost 8 cycles; (HL) forms cost 16, except BIT which
    /// only reads memory and costs 12. The cost includes the prefix fetch.
    pub(super) fn exec_prefixed<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        match PREFIXED[cb as usize] {
            CbOp::Shift(kind, operand) => {
                let value = self.read_operand(bus, operand);
                let result = self.alu_shift(kind, value);
                self.write_operand(bus, operand, result);
                8 + 2 * operand.access_cycles()
            }
            CbOp::Bit(bit, operand) => {
                let value = self.read_operand(bus, operand);
                self.alu_bit(bit, value);
                8 + operand.access_cycles()
            }
            CbOp::Res(bit, operand) => {
                let value = self.read_operand(bus, operand);
                self.write_operand(bus, operand, value & !(1 << bit));
                8 + 2 * operand.access_cycles()
            }
            CbOp::Set(bit, operand) => {
                let value = self.read_operand(bus, operand);
                self.write_operand(bus, operand, value | (1 << bit));
                8 + 2 * operand.access_cycles()
            }
        }
    }
}
