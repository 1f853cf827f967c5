/// The eight logical DMG buttons.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

/// Which half of the input matrix a button is wired to.
///
/// P1 bit 4 selects the direction keys and bit 5 the action keys; a
/// group is selected when its bit is 0.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ButtonGroup {
    Direction,
    Action,
}

impl Button {
    pub const fn group(self) -> ButtonGroup {
        match self {
            Button::Right | Button::Left | Button::Up | Button::Down => ButtonGroup::Direction,
            Button::A | Button::B | Button::Select | Button::Start => ButtonGroup::Action,
        }
    }

    /// Line bit (0-3) inside the low nibble of P1.
    pub const fn line(self) -> u8 {
        match self {
            Button::Right | Button::A => 0,
            Button::Left | Button::B => 1,
            Button::Up | Button::Select => 2,
            Button::Down | Button::Start => 3,
        }
    }
}

impl ButtonGroup {
    /// P1 select bit that enables this group when cleared.
    pub const fn select_mask(self) -> u8 {
        match self {
            ButtonGroup::Direction => 0x10,
            ButtonGroup::Action => 0x20,
        }
    }
}
