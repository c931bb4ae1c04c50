//! Intcode virtual machine: executes integer programs cooperatively.
//!
//! The machine is stack-less: it has
//! - a demand-grown memory tape holding both code and data
//! - a program counter and a relative base
//! - an input queue and an output queue
//! - an explicit execution [`State`]
//!
//! A run call executes until the program halts or suspends. It suspends when
//! it needs input that has not been queued yet and, with
//! [`OutputPolicy::Pause`], after every value it emits. The caller feeds
//! input, collects output and calls run again.
//!
//! # Usage
//!
//! ```
//! use intcode_vm::{Machine, State};
//!
//! // Echo one value.
//! let mut machine = Machine::new(vec![3, 0, 4, 0, 99]);
//! assert_eq!(machine.run().unwrap(), State::AwaitingInput);
//!
//! machine.append_input(&[42]);
//! assert_eq!(machine.run().unwrap(), State::Halted);
//! assert_eq!(machine.take_output(), vec![42]);
//! ```

pub mod ascii;
pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;
pub mod state;

pub use error::RuntimeError;
pub use machine::{Machine, MachineConfig, OutputPolicy};
pub use memory::Memory;
pub use state::State;

/// Run a program on a fresh machine with all input supplied up front and
/// return everything it emitted.
///
/// Execution stops at the first suspension. If the program asks for more
/// input than supplied, the output produced so far is returned.
///
/// # Errors
///
/// Returns [`RuntimeError`] if the program faults.
pub fn run(memory: &[i64], input: &[i64]) -> Result<Vec<i64>, RuntimeError> {
    let mut machine = Machine::new(memory.to_vec()).with_input(input);
    machine.run()?;
    Ok(machine.take_output())
}
