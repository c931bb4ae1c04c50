//! Runtime faults of the Intcode machine.
//!
//! Every fault is fatal for the machine that raised it: the machine moves to
//! `Halted` and never executes again. Each variant names the address of the
//! instruction being executed (`at`).

use intcode_common::DecodeError;
use thiserror::Error;

use crate::state::State;

/// Errors that stop a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The word at the program counter is not a valid instruction.
    #[error("{source} at address {at}")]
    Decode {
        at: usize,
        #[source]
        source: DecodeError,
    },

    /// An operand or jump target resolved to an address below zero.
    #[error("negative address {address} at instruction {at}")]
    NegativeAddress { at: usize, address: i64 },

    /// A destination operand used immediate mode.
    #[error("immediate-mode destination at instruction {at}")]
    ImmediateWrite { at: usize },

    /// A state change outside the transition table was requested.
    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition { from: State, to: State },
}
