//! Amplifier pipelines: machines chained output-to-input.
//!
//! Every stage runs the same program and is seeded with its own phase
//! setting as its first input. A signal enters the first stage; each stage's
//! output becomes the next stage's input. In feedback mode the last stage's
//! output wraps around to the first stage until the last stage halts.

use intcode_vm::{Machine, MachineConfig, State};
use log::debug;

use crate::error::NetError;
use crate::scheduler::Scheduler;

/// A chain of machines, one per phase setting.
#[derive(Debug, Clone)]
pub struct Pipeline {
    scheduler: Scheduler,
}

impl Pipeline {
    /// Build a pipeline with the default machine configuration.
    pub fn new(program: &[i64], phases: &[i64]) -> Result<Self, NetError> {
        Self::with_config(program, phases, MachineConfig::default())
    }

    pub fn with_config(
        program: &[i64],
        phases: &[i64],
        config: MachineConfig,
    ) -> Result<Self, NetError> {
        if phases.is_empty() {
            return Err(NetError::EmptyPipeline);
        }

        let mut scheduler = Scheduler::new();
        for &phase in phases {
            scheduler.spawn(Machine::with_config(program.to_vec(), config).with_input(&[phase]));
        }
        Ok(Self { scheduler })
    }

    pub fn stages(&self) -> usize {
        self.scheduler.len()
    }

    pub fn machines(&self) -> &[Machine] {
        self.scheduler.machines()
    }

    /// Pass `signal` through every stage once and return the last value the
    /// final stage emitted.
    pub fn run_chain(&mut self, signal: i64) -> Result<i64, NetError> {
        let last = self.stages() - 1;
        self.scheduler.get_mut(0)?.append_input(&[signal]);

        for stage in 0..last {
            self.scheduler.run_slice(stage)?;
            self.scheduler.transfer(stage, stage + 1)?;
        }
        self.scheduler.run_slice(last)?;

        let out = self.scheduler.get_mut(last)?.take_output();
        out.last().copied().ok_or(NetError::NoSignal)
    }

    /// Feed `signal` into the first stage and cycle the loop until the last
    /// stage halts. Returns the last value the final stage emitted.
    ///
    /// # Errors
    ///
    /// [`NetError::Deadlock`] if a whole round passes without any machine
    /// executing an instruction, and [`NetError::NoSignal`] if the final
    /// stage halts without ever emitting.
    pub fn run_feedback(&mut self, signal: i64) -> Result<i64, NetError> {
        let stages = self.stages();
        let last = stages - 1;
        let mut result = None;
        self.scheduler.get_mut(0)?.append_input(&[signal]);

        let mut round = 0u64;
        loop {
            round += 1;
            let executed = self.scheduler.total_executed();
            let mut moved = 0;

            for stage in 0..stages {
                let state = self.scheduler.run_slice(stage)?;
                if stage == last {
                    if let Some(value) = self.scheduler.get(stage)?.last_output() {
                        result = Some(value);
                    }
                }
                moved += self.scheduler.transfer(stage, (stage + 1) % stages)?;

                if stage == last && state == State::Halted {
                    debug!("feedback loop finished after {round} rounds");
                    return result.ok_or(NetError::NoSignal);
                }
            }

            if moved == 0 && self.scheduler.total_executed() == executed {
                return Err(NetError::Deadlock);
            }
        }
    }
}
