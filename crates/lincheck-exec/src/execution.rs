//! `Execution`: per-thread ordered sequences of events, with an aggregation
//! view over them.

use std::cell::RefCell;
use std::collections::BTreeMap;

use lincheck_label::{aggregate, Event, EventId, Label, ThreadId};

/// An immutable, append-only recording of what every thread did.
///
/// Built once (via [`crate::builder::ExecutionBuilder`]) and then held fixed
/// for the duration of a consistency check.
#[derive(Debug)]
pub struct Execution {
    pub(crate) threads: BTreeMap<ThreadId, Vec<Event>>,
    /// Index from global event id to its `(thread, position)` address, so
    /// coverings can resolve a recorded `source` id without scanning every
    /// thread when resolving a recorded response's source event.
    by_id: BTreeMap<EventId, (ThreadId, usize)>,
    /// Memoized maximal aggregates, keyed by `(thread, start position)`.
    /// Purely a performance cache over data already in `threads` — cleared
    /// state never changes the result, so sharing it behind a `RefCell` is
    /// sound even though `Execution` itself is otherwise read-only.
    aggregate_cache: RefCell<BTreeMap<(ThreadId, usize), Option<(Label, usize)>>>,
}

impl Execution {
    pub(crate) fn new(threads: BTreeMap<ThreadId, Vec<Event>>) -> Self {
        let by_id = threads
            .iter()
            .flat_map(|(&thread_id, events)| {
                events
                    .iter()
                    .map(move |event| (event.id, (thread_id, event.thread_position)))
            })
            .collect();
        Execution {
            threads,
            by_id,
            aggregate_cache: RefCell::new(BTreeMap::new()),
        }
    }

    /// Looks up an event anywhere in the execution by its global id.
    pub fn event_by_id(&self, id: EventId) -> Option<&Event> {
        let &(thread_id, position) = self.by_id.get(&id)?;
        self.get(thread_id, position)
    }

    pub fn threads(&self) -> impl Iterator<Item = ThreadId> + '_ {
        self.threads.keys().copied()
    }

    pub fn size(&self, thread_id: ThreadId) -> usize {
        self.threads.get(&thread_id).map_or(0, Vec::len)
    }

    pub fn get(&self, thread_id: ThreadId, position: usize) -> Option<&Event> {
        self.threads.get(&thread_id)?.get(position)
    }

    pub fn events(&self, thread_id: ThreadId) -> &[Event] {
        self.threads
            .get(&thread_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the largest prefix starting at `position` that aggregates
    /// into a single total label, together with how many underlying events
    /// it spans. `None` when `position` is out of range for the thread.
    pub fn aggregated_label(&self, thread_id: ThreadId, position: usize) -> Option<(Label, usize)> {
        if let Some(cached) = self.aggregate_cache.borrow().get(&(thread_id, position)) {
            return cached.clone();
        }

        let events = self.threads.get(&thread_id)?;
        let result = if position >= events.len() {
            None
        } else {
            let mut current = events[position].label.clone();
            let mut span = 1usize;
            while let Some(next_event) = events.get(position + span) {
                match aggregate(&current, &next_event.label) {
                    Some(fused) => {
                        current = fused;
                        span += 1;
                    }
                    None => break,
                }
            }
            Some((current, span))
        };

        self.aggregate_cache
            .borrow_mut()
            .insert((thread_id, position), result.clone());
        result
    }
}
