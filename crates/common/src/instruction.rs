//! Instruction word decoding for the Intcode instruction set.
//!
//! An instruction word packs the opcode and the parameter modes in decimal:
//! ```text
//!   ABCDE
//!    1002
//!   DE - two-digit opcode      (02 = multiply)
//!    C - mode of 1st operand   (0 = position)
//!    B - mode of 2nd operand   (1 = immediate)
//!    A - mode of 3rd operand   (0 = position, omitted as a leading zero)
//! ```
//! Modes that are not written are position mode.

use crate::error::DecodeError;
use crate::mode::Mode;
use crate::opcode::Opcode;

/// Largest operand count of any opcode.
pub const MAX_OPERANDS: usize = 3;

/// A decoded instruction word: the operation and one mode per operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Mode for each operand slot. Slots past `opcode.operand_count()` are
    /// always `Mode::Position`.
    pub modes: [Mode; MAX_OPERANDS],
}

impl Instruction {
    /// Build an instruction from an opcode and the modes of its leading
    /// operands. Missing modes are position mode; extra modes are dropped.
    pub fn new(opcode: Opcode, modes: &[Mode]) -> Self {
        let mut slots = [Mode::Position; MAX_OPERANDS];
        for (slot, mode) in slots
            .iter_mut()
            .zip(modes.iter())
            .take(opcode.operand_count())
        {
            *slot = *mode;
        }
        Self {
            opcode,
            modes: slots,
        }
    }

    /// Decode an instruction word.
    ///
    /// Every mode digit present in the word is validated, including digits
    /// beyond the opcode's operand count, which are otherwise ignored.
    pub fn decode(word: i64) -> Result<Self, DecodeError> {
        if word < 0 {
            return Err(DecodeError::UnknownOpcode(word));
        }

        let opcode = Opcode::try_from(word % 100)?;
        let mut modes = [Mode::Position; MAX_OPERANDS];
        let mut rest = word / 100;
        let mut index = 0;

        while rest != 0 {
            let digit = rest % 10;
            let mode =
                Mode::from_digit(digit).ok_or(DecodeError::UnknownMode { word, mode: digit })?;
            if index < opcode.operand_count() {
                modes[index] = mode;
            }
            rest /= 10;
            index += 1;
        }

        Ok(Self { opcode, modes })
    }

    /// Encode back to the shortest instruction word with these modes.
    pub fn encode(&self) -> i64 {
        let mut word = self.opcode as i64;
        let mut scale = 100;
        for mode in self.modes.iter().take(self.opcode.operand_count()) {
            word += mode.digit() * scale;
            scale *= 10;
        }
        word
    }

    /// Mode of the operand at `index` (0-based).
    pub fn mode(&self, index: usize) -> Mode {
        self.modes.get(index).copied().unwrap_or_default()
    }
}
