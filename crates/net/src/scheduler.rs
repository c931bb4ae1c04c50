//! Round-robin scheduling of cooperative machines.
//!
//! There are no threads. A machine runs until it suspends, then the next
//! machine gets its turn. Data moves between machines only by explicit
//! transfer from one output queue to another input queue.

use intcode_vm::{Machine, State};
use log::trace;

use crate::error::NetError;

/// Owns a list of machines and drives them in turn. Machine ids are the
/// order in which they were spawned.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    machines: Vec<Machine>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a machine and return its id.
    pub fn spawn(&mut self, machine: Machine) -> usize {
        self.machines.push(machine);
        self.machines.len() - 1
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn get(&self, id: usize) -> Result<&Machine, NetError> {
        self.machines.get(id).ok_or(NetError::UnknownMachine(id))
    }

    pub fn get_mut(&mut self, id: usize) -> Result<&mut Machine, NetError> {
        self.machines.get_mut(id).ok_or(NetError::UnknownMachine(id))
    }

    /// Give machine `id` one time slice: run it until it suspends or halts.
    pub fn run_slice(&mut self, id: usize) -> Result<State, NetError> {
        let machine = self.get_mut(id)?;
        let state = machine
            .run()
            .map_err(|source| NetError::Machine { id, source })?;
        trace!("machine {id} yielded: {state}");
        Ok(state)
    }

    /// Give every machine one slice, in id order. Halted machines are
    /// visited but do nothing.
    pub fn round(&mut self) -> Result<Vec<State>, NetError> {
        (0..self.machines.len()).map(|id| self.run_slice(id)).collect()
    }

    /// Move everything machine `from` has emitted onto the input queue of
    /// machine `to`. Returns how many values moved. `from` may equal `to`.
    pub fn transfer(&mut self, from: usize, to: usize) -> Result<usize, NetError> {
        self.get(to)?;
        let values = self.get_mut(from)?.take_output();
        self.get_mut(to)?.append_input(&values);
        Ok(values.len())
    }

    pub fn all_halted(&self) -> bool {
        self.machines.iter().all(Machine::is_halted)
    }

    /// Instructions executed by all machines together. A round that leaves
    /// this unchanged made no progress.
    pub fn total_executed(&self) -> u64 {
        self.machines
            .iter()
            .map(Machine::instructions_executed)
            .sum()
    }
}
