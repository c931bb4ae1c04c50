//! Parameter addressing modes.

/// How an operand's value is obtained.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The operand is an address; read the cell it names.
    #[default]
    Position = 0,
    /// The operand is the value itself. Never valid for a destination.
    Immediate = 1,
    /// The operand is an offset from the relative base.
    Relative = 2,
}

/// All valid modes, in digit order.
pub const ALL_MODES: [Mode; 3] = [Mode::Position, Mode::Immediate, Mode::Relative];

impl Mode {
    /// Map a single decimal digit to a mode.
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }

    /// The decimal digit this mode is encoded as.
    pub fn digit(&self) -> i64 {
        *self as i64
    }
}
