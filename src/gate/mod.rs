//! Guarded access to remote completions

pub mod guarded;
pub mod rate;

pub use guarded::{GuardedCallGate, GuardedRequest};
pub use rate::{GateConfig, RateGate};
