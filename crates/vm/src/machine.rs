//! Machine state: memory, pointers, I/O queues, configuration.

use intcode_common::Program;
use log::debug;

use crate::error::RuntimeError;
use crate::memory::Memory;
use crate::state::State;

/// What the machine does right after emitting a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputPolicy {
    /// Keep executing. Outputs accumulate until the next suspension.
    #[default]
    Continue,
    /// Suspend in `PausedOnOutput` after every emitted value.
    Pause,
}

/// Per-machine settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MachineConfig {
    /// Value of memory cells that were never written.
    pub default_fill: i64,
    /// Whether a run call returns after every emitted value.
    pub output: OutputPolicy,
}

impl MachineConfig {
    /// Configuration for single-step output handshakes.
    pub fn pausing() -> Self {
        Self {
            output: OutputPolicy::Pause,
            ..Self::default()
        }
    }

    pub fn with_fill(self, default_fill: i64) -> Self {
        Self {
            default_fill,
            ..self
        }
    }
}

/// An Intcode machine.
///
/// Owns all of its state. `Clone` produces a fully independent copy, which
/// is the supported way to fork a machine and explore several futures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub(crate) memory: Memory,
    /// Address of the next instruction.
    pub(crate) pc: usize,
    pub(crate) relative_base: i64,
    /// Input queue. Entries before `input_cursor` have been consumed.
    pub(crate) input: Vec<i64>,
    pub(crate) input_cursor: usize,
    pub(crate) output: Vec<i64>,
    pub(crate) state: State,
    pub(crate) config: MachineConfig,
    pub(crate) executed: u64,
}

impl Machine {
    /// Create a machine in `Booting` with the default configuration.
    pub fn new(memory: Vec<i64>) -> Self {
        Self::with_config(memory, MachineConfig::default())
    }

    pub fn with_config(memory: Vec<i64>, config: MachineConfig) -> Self {
        Self {
            memory: Memory::new(memory, config.default_fill),
            pc: 0,
            relative_base: 0,
            input: Vec::new(),
            input_cursor: 0,
            output: Vec::new(),
            state: State::Booting,
            config,
            executed: 0,
        }
    }

    pub fn from_program(program: &Program, config: MachineConfig) -> Self {
        Self::with_config(program.words.clone(), config)
    }

    /// Seed the input queue. Builder form of [`Machine::append_input`].
    pub fn with_input(mut self, values: &[i64]) -> Self {
        self.append_input(values);
        self
    }

    /// Queue more input. Legal in any state; a halted machine simply never
    /// reads it.
    pub fn append_input(&mut self, values: &[i64]) {
        self.input.extend_from_slice(values);
    }

    /// Drain and return everything emitted since the last drain.
    pub fn take_output(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.output)
    }

    /// Everything emitted since the last drain, without draining.
    pub fn output(&self) -> &[i64] {
        &self.output
    }

    pub fn last_output(&self) -> Option<i64> {
        self.output.last().copied()
    }

    /// Read a memory cell. Does not grow memory; cells past the end report
    /// the fill value.
    pub fn peek(&self, address: usize) -> i64 {
        self.memory.get(address)
    }

    /// Patch a memory cell, growing memory if needed.
    pub fn poke(&mut self, address: usize, value: i64) {
        self.memory.write(address, value);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// The dense part of the memory tape. Far cells written sparsely are
    /// only visible through [`Machine::peek`].
    pub fn memory(&self) -> &[i64] {
        self.memory.as_slice()
    }

    /// Queued input not yet consumed.
    pub fn pending_input(&self) -> &[i64] {
        &self.input[self.input_cursor..]
    }

    pub fn config(&self) -> MachineConfig {
        self.config
    }

    /// Instructions executed over the machine's whole life.
    pub fn instructions_executed(&self) -> u64 {
        self.executed
    }

    /// Move to `next` if the transition table allows it.
    pub(crate) fn transition(&mut self, next: State) -> Result<(), RuntimeError> {
        if !self.state.can_transition_to(next) {
            return Err(RuntimeError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        debug!("{} -> {} at pc {}", self.state, next, self.pc);
        self.state = next;
        Ok(())
    }
}
