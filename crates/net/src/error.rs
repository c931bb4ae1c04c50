//! Errors raised while driving several machines together.

use intcode_vm::RuntimeError;
use thiserror::Error;

/// Errors from the scheduler, pipelines and networks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    /// One of the machines faulted.
    #[error("machine {id}: {source}")]
    Machine {
        id: usize,
        #[source]
        source: RuntimeError,
    },

    /// A machine id does not exist in the scheduler.
    #[error("no machine with id {0}")]
    UnknownMachine(usize),

    /// A host-injected packet names an address outside the peer set.
    #[error("no peer with address {0}")]
    UnknownPeer(i64),

    /// A pipeline needs at least one phase setting.
    #[error("pipeline has no stages")]
    EmptyPipeline,

    /// The last stage halted without emitting anything.
    #[error("last stage produced no signal")]
    NoSignal,

    /// A full round made no progress while every machine waited for input.
    #[error("deadlock: every machine is waiting for input")]
    Deadlock,

    /// Every machine halted before the awaited condition was met.
    #[error("every machine halted")]
    AllHalted,
}
