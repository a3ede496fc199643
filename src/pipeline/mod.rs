//! Sampling Pipeline Module
//!
//! ```text
//! Driver tick (1 Hz) -> MotorSimulator::step(mode) -> MotorSample
//!     -> HistoryBuffer::append (FIFO eviction at 30)
//!     -> consumers: dashboard API reads latest/history,
//!        diagnosis client reads the 10-sample tail on demand
//! ```
//!
//! The driver issues at most one step at a time; pausing suspends future
//! ticks without discarding accumulated history, and a mode switch takes
//! effect on the next tick only.

mod state;
pub mod driver;

pub use driver::SamplingDriver;
pub use state::{AppState, SharedState, SystemStatus};
