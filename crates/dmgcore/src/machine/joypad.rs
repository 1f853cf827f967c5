use dmgcore_common::{Button, ButtonGroup};

/// Pressed state of the eight buttons, split by matrix group.
///
/// Bits are 1 for pressed here; P1 shows the inverse.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Joypad {
    directions: u8,
    actions: u8,
}

impl Joypad {
    fn bits_mut(&mut self, group: ButtonGroup) -> &mut u8 {
        match group {
            ButtonGroup::Direction => &mut self.directions,
            ButtonGroup::Action => &mut self.actions,
        }
    }

    /// Update one button. Returns true if it went from released to pressed.
    pub(super) fn set(&mut self, button: Button, pressed: bool) -> bool {
        let bit = 1u8 << button.line();
        let bits = self.bits_mut(button.group());
        let was_pressed = *bits & bit != 0;
        if pressed {
            *bits |= bit;
        } else {
            *bits &= !bit;
        }
        pressed && !was_pressed
    }

    pub(super) fn is_pressed(&self, button: Button) -> bool {
        let bits = match button.group() {
            ButtonGroup::Direction => self.directions,
            ButtonGroup::Action => self.actions,
        };
        bits & (1 << button.line()) != 0
    }

    /// Low nibble of P1 for the given select bits (0 = line pulled low).
    pub(super) fn lines(&self, select: u8) -> u8 {
        let mut low = 0x0F;
        if select & ButtonGroup::Direction.select_mask() == 0 {
            low &= !self.directions;
        }
        if select & ButtonGroup::Action.select_mask() == 0 {
            low &= !self.actions;
        }
        low & 0x0F
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_selected_group_is_visible() {
        let mut pad = Joypad::default();
        pad.set(Button::Start, true);
        pad.set(Button::Left, true);

        assert_eq!(pad.lines(0x30), 0x0F);
        assert_eq!(pad.lines(0x20), 0x0D);
        assert_eq!(pad.lines(0x10), 0x07);
        assert_eq!(pad.lines(0x00), 0x05);
    }

    #[test]
    fn repeated_press_is_not_new() {
        let mut pad = Joypad::default();
        assert!(pad.set(Button::A, true));
        assert!(!pad.set(Button::A, true));
        assert!(pad.is_pressed(Button::A));
        assert!(!pad.set(Button::A, false));
        assert!(!pad.is_pressed(Button::A));
        assert!(pad.set(Button::A, true));
    }
}
