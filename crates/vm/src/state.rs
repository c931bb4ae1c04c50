//! Execution states and the transition table between them.

use std::fmt;

/// Where a machine is in its lifecycle.
///
/// ```text
/// Booting ──► Running ──► Halted
///               ▲  │
///               │  ├────► AwaitingInput ──┐
///               │  └────► PausedOnOutput ─┤
///               └─────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Created, never run.
    #[default]
    Booting,
    /// Inside the fetch-execute loop. Never observed between run calls.
    Running,
    /// Emitted one value and suspended (only with `OutputPolicy::Pause`).
    PausedOnOutput,
    /// Hit a read with an empty input queue. The read re-executes on resume.
    AwaitingInput,
    /// Executed a halt, or faulted. Terminal.
    Halted,
}

impl State {
    /// Whether the transition table allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: State) -> bool {
        matches!(
            (self, next),
            (State::Booting, State::Running)
                | (State::PausedOnOutput, State::Running)
                | (State::AwaitingInput, State::Running)
                | (State::Running, State::Halted)
                | (State::Running, State::AwaitingInput)
                | (State::Running, State::PausedOnOutput)
        )
    }

    pub fn is_halted(self) -> bool {
        self == State::Halted
    }

    pub fn name(self) -> &'static str {
        match self {
            State::Booting => "booting",
            State::Running => "running",
            State::PausedOnOutput => "paused on output",
            State::AwaitingInput => "awaiting input",
            State::Halted => "halted",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
