//! The sequential-consistency state-space search over a recorded execution.

mod checker;
mod inconsistency;

pub use checker::{Checker, SequentialConsistencyChecker};
pub use inconsistency::Inconsistency;
