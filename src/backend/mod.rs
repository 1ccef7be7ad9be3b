//! Implementations of the clearing capability.

pub mod dry_run;
pub mod profile;

pub use dry_run::{DryRunBackend, SIMULATED_LATENCY};
pub use profile::ProfileBackend;
