//! Opcode definitions for the Intcode instruction set.

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The discriminant is the value of the low two decimal digits of an
/// instruction word.
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `c = a + b`.
    Add = 1,
    /// `c = a * b`.
    Multiply = 2,
    /// Store the next queued input at `a`, or suspend if there is none.
    Input = 3,
    /// Emit `a`.
    Output = 4,
    /// Jump to `b` if `a` is non-zero.
    JumpIfTrue = 5,
    /// Jump to `b` if `a` is zero.
    JumpIfFalse = 6,
    /// `c = 1` if `a < b`, else `c = 0`.
    LessThan = 7,
    /// `c = 1` if `a == b`, else `c = 0`.
    Equals = 8,
    /// Add `a` to the relative base.
    AdjustBase = 9,
    /// Stop the machine for good.
    Halt = 99,
}

/// All valid opcodes, in numeric order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Add,
    Opcode::Multiply,
    Opcode::Input,
    Opcode::Output,
    Opcode::JumpIfTrue,
    Opcode::JumpIfFalse,
    Opcode::LessThan,
    Opcode::Equals,
    Opcode::AdjustBase,
    Opcode::Halt,
];

impl TryFrom<i64> for Opcode {
    type Error = DecodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Multiply),
            3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output),
            5 => Ok(Opcode::JumpIfTrue),
            6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan),
            8 => Ok(Opcode::Equals),
            9 => Ok(Opcode::AdjustBase),
            99 => Ok(Opcode::Halt),
            other => Err(DecodeError::UnknownOpcode(other)),
        }
    }
}

impl Opcode {
    /// Total number of operands following the opcode word.
    pub fn operand_count(&self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Number of trailing operands that name a destination address.
    pub fn write_operands(&self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 1,
            Opcode::Input => 1,
            _ => 0,
        }
    }

    /// Distance from this instruction to the next one when no jump is taken.
    pub fn width(&self) -> usize {
        1 + self.operand_count()
    }

    /// Short lowercase name used by the disassembler.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Multiply => "mul",
            Opcode::Input => "in",
            Opcode::Output => "out",
            Opcode::JumpIfTrue => "jnz",
            Opcode::JumpIfFalse => "jz",
            Opcode::LessThan => "lt",
            Opcode::Equals => "eq",
            Opcode::AdjustBase => "arb",
            Opcode::Halt => "halt",
        }
    }
}
