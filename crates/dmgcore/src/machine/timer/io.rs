use super::Timer;
use crate::io;

impl Timer {
    pub(in super::super) fn read(&self, addr: u16) -> u8 {
        match addr {
            io::DIV => (self.counter >> 8) as u8,
            io::TIMA => self.tima,
            io::TMA => self.tma,
            io::TAC => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    /// Register write. Returns true when the write itself overflowed
    /// TIMA and the timer interrupt has to be requested.
    pub(in super::super) fn write(&mut self, addr: u16, value: u8) -> bool {
        match addr {
            io::DIV => {
                // Clearing the counter is a falling edge if the selected
                // bit was high.
                let before = self.input_bit();
                self.counter = 0;
                before && self.increment_tima()
            }
            io::TIMA => {
                self.tima = value;
                false
            }
            io::TMA => {
                self.tma = value;
                false
            }
            io::TAC => {
                let before = self.input_bit();
                self.tac = value & 0x07;
                before && !self.input_bit() && self.increment_tima()
            }
            _ => false,
        }
    }
}
