//! Per-thread event recordings and the builder that enforces their
//! well-formedness invariants.

mod builder;
mod error;
mod execution;

pub use builder::{ExecutionBuilder, INITIALIZATION_THREAD, MAIN_THREAD};
pub use error::Error;
pub use execution::Execution;
