//! Intcode common types, instruction decoding and program loading.
//!
//! This crate provides the foundational pieces shared by the machine and its
//! callers:
//!
//! - [`Opcode`]: the ten operations of the instruction set
//! - [`Mode`]: position, immediate and relative addressing
//! - [`Instruction`]: decoding of a decimal instruction word
//! - [`Program`]: a memory image, loadable from comma-separated text
//! - [`disassemble`]: a linear-sweep listing of a program
//! - [`DecodeError`] / [`ParseError`]: what can go wrong on the way in

pub mod disassembler;
pub mod error;
pub mod instruction;
pub mod mode;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use disassembler::disassemble;
pub use error::{DecodeError, ParseError};
pub use instruction::{Instruction, MAX_OPERANDS};
pub use mode::Mode;
pub use opcode::Opcode;
pub use program::Program;
