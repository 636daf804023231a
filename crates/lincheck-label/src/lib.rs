//! Label algebra: the event-label sum type and the partial operations over
//! it (`synchronize`, `aggregate`, `replay`, `synchronizedFrom`).
//!
//! This crate has no notion of threads executing, memory, or search — it is
//! the pure data layer the rest of the workspace builds on.

mod aggregate;
mod event;
mod ids;
mod label;
mod replay;
mod sync;

pub use aggregate::aggregate;
pub use event::{Event, EventId};
pub use ids::{KClass, Location, MutexId, ThreadId, Value};
pub use label::{Kind, Label, Phase, SyncType};
pub use replay::{equal_up_to_replay, ReplayPolicy};
pub use sync::{synchronize, Error};
