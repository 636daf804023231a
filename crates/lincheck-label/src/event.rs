//! `Event`: a label placed at a thread position with a global id.

use crate::ids::ThreadId;
use crate::label::Label;

/// An id uniquely identifying an event within a whole run, assigned
/// append-only as events are recorded. Distinct from `(thread_id,
/// thread_position)`, which addresses an event *within* its thread.
pub type EventId = u64;

/// A label placed at a thread position with a global id.
///
/// Events are immutable apart from in-place value rewrites performed
/// during replay (`Label::replay`, called on `self.label`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub thread_id: ThreadId,
    /// 0-based index of this event in its thread's sequence.
    pub thread_position: usize,
    pub label: Label,
    /// The event this one was recorded as synchronizing from, when it is a
    /// response: a response event's covering includes its explicit source
    /// event. `None` for sends, requests, and the virtual `Initialization`
    /// root.
    pub source: Option<EventId>,
}

impl Event {
    pub fn new(id: EventId, thread_id: ThreadId, thread_position: usize, label: Label) -> Self {
        Event {
            id,
            thread_id,
            thread_position,
            label,
            source: None,
        }
    }

    pub fn with_source(
        id: EventId,
        thread_id: ThreadId,
        thread_position: usize,
        label: Label,
        source: EventId,
    ) -> Self {
        Event {
            id,
            thread_id,
            thread_position,
            label,
            source: Some(source),
        }
    }
}
