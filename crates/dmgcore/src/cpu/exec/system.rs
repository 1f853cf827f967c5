use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        4
    }

    /// STOP is encoded as two bytes; the second is ignored.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _ = self.fetch8(bus);
        self.stopped = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime.schedule(false);
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime.schedule(true);
        4
    }
}
