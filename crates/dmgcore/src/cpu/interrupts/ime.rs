/// Interrupt master enable (IME).
///
/// EI and DI do not change IME immediately: the new value lands once the
/// instruction *after* them has completed. A scheduled change moves from
/// `Requested` (end of EI/DI) to `Armed` (end of the next instruction)
/// and is applied at that point. RETI and interrupt entry change IME
/// immediately and bypass the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MasterEnable {
    enabled: bool,
    scheduled: Option<Scheduled>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Scheduled {
    value: bool,
    armed: bool,
}

impl MasterEnable {
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// True while an EI/DI is waiting to take effect.
    #[inline]
    pub fn change_pending(&self) -> bool {
        self.scheduled.is_some()
    }

    pub(in crate::cpu) fn schedule(&mut self, value: bool) {
        self.scheduled = Some(Scheduled {
            value,
            armed: false,
        });
    }

    pub(in crate::cpu) fn enable_now(&mut self) {
        self.enabled = true;
        self.scheduled = None;
    }

    pub(in crate::cpu) fn disable_now(&mut self) {
        self.enabled = false;
    }

    /// Advance the delay pipeline; called once after every instruction.
    pub(in crate::cpu) fn end_instruction(&mut self) {
        match self.scheduled {
            Some(Scheduled { value, armed: true }) => {
                self.enabled = value;
                self.scheduled = None;
            }
            Some(ref mut pending) => pending.armed = true,
            None => {}
        }
    }

    pub(in crate::cpu) fn reset(&mut self) {
        *self = MasterEnable::default();
    }
}
