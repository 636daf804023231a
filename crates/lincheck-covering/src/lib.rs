//! Coverings: the "what must already be replayed" predicate the checker
//! consults before advancing a thread.

mod covering;

pub use covering::{Covering, ExternalCausality, ProgramOrder};
