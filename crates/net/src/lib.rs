//! Composition of Intcode machines.
//!
//! Machines never talk to each other directly. Everything here is driven
//! from the caller's side by a single-threaded round-robin [`Scheduler`]:
//!
//! - [`Pipeline`]: amplifier stages chained output-to-input, optionally in a
//!   feedback loop
//! - [`Network`]: addressed peers exchanging `(dest, x, y)` packets, with a
//!   supervisory [`Sink`] for packets addressed outside the peer set
//!
//! # Usage
//!
//! ```
//! use intcode_net::Pipeline;
//!
//! // Each stage adds its phase to the incoming signal.
//! let program = [3, 11, 3, 12, 1, 11, 12, 11, 4, 11, 99];
//! let mut pipeline = Pipeline::new(&program, &[1, 2, 3]).unwrap();
//! assert_eq!(pipeline.run_chain(0).unwrap(), 6);
//! ```

pub mod error;
pub mod network;
pub mod pipeline;
pub mod scheduler;

pub use error::NetError;
pub use network::{Network, NetworkConfig, Packet, Sink, Tick, NO_PACKET};
pub use pipeline::Pipeline;
pub use scheduler::Scheduler;
