//! `Covering`, `ProgramOrder`, and `ExternalCausality`.

use std::collections::BTreeSet;

use lincheck_exec::Execution;
use lincheck_label::{Event, EventId};
use tracing::trace;

/// Answers "what must already be in the past of this event?" for a given
/// consistency model. Distinct coverings encode different memory models
/// over the same recorded `Execution`.
pub trait Covering {
    fn cover(&self, execution: &Execution, event: &Event) -> BTreeSet<EventId>;
}

/// `cov(e) = {e' in same thread with e'.position < e.position}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramOrder;

impl Covering for ProgramOrder {
    fn cover(&self, execution: &Execution, event: &Event) -> BTreeSet<EventId> {
        execution.events(event.thread_id)[..event.thread_position]
            .iter()
            .map(|predecessor| predecessor.id)
            .collect()
    }
}

/// Program order plus the cross-thread edge a response records against its
/// explicit source event (fork→start, unlock→lock, write→read, notify→wait,
/// finish→join all arrive this way, since `ExecutionBuilder::append_response`
/// requires the caller to name the source). Used by the sequential
/// consistency checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalCausality;

impl Covering for ExternalCausality {
    fn cover(&self, execution: &Execution, event: &Event) -> BTreeSet<EventId> {
        let mut predecessors = ProgramOrder.cover(execution, event);
        if let Some(source) = event.source {
            trace!(event = event.id, source, "adding external-causality edge");
            predecessors.insert(source);
        }
        predecessors
    }
}
