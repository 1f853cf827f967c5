/// Divider and programmable timer (DIV/TIMA/TMA/TAC).
///
/// A 16-bit counter advances once per clock cycle; DIV exposes its upper
/// byte. TIMA counts falling edges of the counter bit selected by TAC, so
/// anything that drops that bit (a DIV reset, a TAC change) can produce an
/// extra increment just like the hardware multiplexer does.
mod io;

pub(super) struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    /// Low three bits of TAC.
    tac: u8,
}

impl Timer {
    /// Power-on state as left by the boot ROM (DIV reads 0xAB).
    pub(super) fn new() -> Self {
        Self {
            counter: 0xABCC,
            tima: 0x00,
            tma: 0x00,
            tac: 0x00,
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Counter bit feeding TIMA for the current clock select:
    /// 00 → 4096 Hz, 01 → 262144 Hz, 10 → 65536 Hz, 11 → 16384 Hz.
    #[inline]
    fn input_bit(&self) -> bool {
        let shift = match self.tac & 0x03 {
            0x00 => 9,
            0x01 => 3,
            0x02 => 5,
            _ => 7,
        };
        self.enabled() && (self.counter >> shift) & 1 != 0
    }

    /// Bump TIMA; on overflow reload it from TMA and report the
    /// interrupt request.
    fn increment_tima(&mut self) -> bool {
        match self.tima.checked_add(1) {
            Some(next) => {
                self.tima = next;
                false
            }
            None => {
                self.tima = self.tma;
                true
            }
        }
    }

    /// Advance by `cycles` clock cycles. Returns true if TIMA overflowed
    /// at least once.
    pub(super) fn tick(&mut self, cycles: u32) -> bool {
        let mut overflowed = false;
        for _ in 0..cycles {
            let before = self.input_bit();
            self.counter = self.counter.wrapping_add(1);
            if before && !self.input_bit() {
                overflowed |= self.increment_tima();
            }
        }
        overflowed
    }
}
