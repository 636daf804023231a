//! `ExecutionBuilder`: the one way to construct a well-formed [`Execution`].

use std::collections::{BTreeMap, BTreeSet};

use lincheck_label::{Event, EventId, Label, Phase, ReplayPolicy, ThreadId};
use tracing::trace;

use crate::error::Error;
use crate::execution::Execution;

/// Sentinel thread id standing in for the virtual [`Label::Initialization`]
/// root. Never a real thread: no `begin_thread`/`append_*` call may target
/// it directly.
pub const INITIALIZATION_THREAD: ThreadId = ThreadId::MAX;

/// Conventional id of the program's main thread: the one thread allowed to
/// finish without appearing in any recorded `ThreadFork` set.
pub const MAIN_THREAD: ThreadId = 0;

/// Builds an [`Execution`] one event at a time, enforcing well-formedness:
/// - every thread's sequence begins with a `ThreadStart` response;
/// - the main thread's start is sourced from `Initialization`;
/// - requests are followed by a matching response before any other event
///   is appended on that thread;
/// - every recorded response is a legal [`Label::synchronized_from`] its
///   claimed source.
#[derive(Debug)]
pub struct ExecutionBuilder {
    threads: BTreeMap<ThreadId, Vec<Event>>,
    pending_request: BTreeMap<ThreadId, Label>,
    begun: BTreeSet<ThreadId>,
    /// Starts at 1: id 0 is reserved for the virtual `Initialization` event,
    /// which never passes through `push`/`push_with_source`.
    next_event_id: EventId,
}

impl Default for ExecutionBuilder {
    fn default() -> Self {
        ExecutionBuilder {
            threads: BTreeMap::new(),
            pending_request: BTreeMap::new(),
            begun: BTreeSet::new(),
            next_event_id: 1,
        }
    }
}

impl ExecutionBuilder {
    pub fn new() -> Self {
        ExecutionBuilder::default()
    }

    /// The virtual root event every main-thread start is sourced from.
    pub fn initialization_event(&self) -> Event {
        Event::new(0, INITIALIZATION_THREAD, 0, Label::Initialization)
    }

    pub fn begin_thread(&mut self, thread_id: ThreadId) -> Result<(), Error> {
        if !self.begun.insert(thread_id) {
            return Err(Error::ThreadAlreadyBegun { thread: thread_id });
        }
        self.threads.entry(thread_id).or_default();
        Ok(())
    }

    pub fn end_thread(&mut self, thread_id: ThreadId) -> Result<(), Error> {
        self.require_begun(thread_id)?;
        self.begun.remove(&thread_id);
        Ok(())
    }

    /// Appends a `Send`-kind label.
    pub fn append_send(&mut self, thread_id: ThreadId, label: Label) -> Result<Event, Error> {
        self.require_begun(thread_id)?;
        self.require_started(thread_id, &label)?;
        let event = self.push(thread_id, label);
        trace!(thread = thread_id, event = event.id, "append_send");
        Ok(event)
    }

    /// Appends a `Request`-kind label. Must be followed by
    /// [`Self::append_response`] before anything else is appended on this
    /// thread.
    pub fn append_request(&mut self, thread_id: ThreadId, label: Label) -> Result<Event, Error> {
        self.require_begun(thread_id)?;
        self.require_started(thread_id, &label)?;
        if self.pending_request.contains_key(&thread_id) {
            return Err(Error::RequestAlreadyPending { thread: thread_id });
        }
        self.pending_request.insert(thread_id, label.clone());
        let event = self.push(thread_id, label);
        trace!(thread = thread_id, event = event.id, "append_request");
        Ok(event)
    }

    /// Appends a `Response`-kind label, validated against the pending
    /// request on this thread (or, for a thread's very first event,
    /// against the `ThreadStart` invariant) and against `source`.
    pub fn append_response(
        &mut self,
        thread_id: ThreadId,
        label: Label,
        source: &Event,
    ) -> Result<Event, Error> {
        self.require_begun(thread_id)?;

        let is_first_event = self.threads.get(&thread_id).is_none_or(Vec::is_empty);
        if is_first_event {
            match &label {
                Label::ThreadStart {
                    phase: Phase::Response,
                    ..
                } => {}
                _ => return Err(Error::MissingThreadStart { thread: thread_id }),
            }
        } else {
            let pending = self
                .pending_request
                .get(&thread_id)
                .ok_or(Error::NoPendingRequest { thread: thread_id })?;
            if !response_matches_request(pending, &label) {
                return Err(Error::ResponseShapeMismatch { thread: thread_id });
            }
        }

        if !label.synchronized_from(&source.label, ReplayPolicy::EXACT) {
            return Err(Error::UnsourcedResponse { thread: thread_id });
        }

        self.pending_request.remove(&thread_id);
        let event = self.push_with_source(thread_id, label, source.id);
        trace!(thread = thread_id, event = event.id, source = source.id, "append_response");
        Ok(event)
    }

    /// Finalizes the builder into an [`Execution`], validating that finish
    /// sets don't overlap and every finished thread id traces back to a
    /// recorded fork, except the main thread, which finishes unforked.
    pub fn build(self) -> Result<Execution, Error> {
        let forked: BTreeSet<ThreadId> = self
            .threads
            .values()
            .flatten()
            .filter_map(|event| match &event.label {
                Label::ThreadFork { fork_thread_ids } => Some(fork_thread_ids.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();

        let mut finished_so_far: BTreeSet<ThreadId> = BTreeSet::new();
        for event in self.threads.values().flatten() {
            if let Label::ThreadFinish {
                finished_thread_ids,
            } = &event.label
            {
                for &tid in finished_thread_ids {
                    if !finished_so_far.insert(tid) {
                        return Err(Error::BarrierRace {
                            thread: tid,
                            reason: "thread finished more than once".into(),
                        });
                    }
                    if tid != MAIN_THREAD && !forked.contains(&tid) {
                        return Err(Error::BarrierRace {
                            thread: tid,
                            reason: "thread finished outside any recorded fork scope".into(),
                        });
                    }
                }
            }
        }

        Ok(Execution::new(self.threads))
    }

    fn push(&mut self, thread_id: ThreadId, label: Label) -> Event {
        let events = self.threads.entry(thread_id).or_default();
        let position = events.len();
        let id = self.next_event_id;
        self.next_event_id += 1;
        let event = Event::new(id, thread_id, position, label);
        events.push(event.clone());
        event
    }

    fn push_with_source(&mut self, thread_id: ThreadId, label: Label, source: EventId) -> Event {
        let events = self.threads.entry(thread_id).or_default();
        let position = events.len();
        let id = self.next_event_id;
        self.next_event_id += 1;
        let event = Event::with_source(id, thread_id, position, label, source);
        events.push(event.clone());
        event
    }

    fn require_begun(&self, thread_id: ThreadId) -> Result<(), Error> {
        if self.begun.contains(&thread_id) {
            Ok(())
        } else {
            Err(Error::ThreadNotBegun { thread: thread_id })
        }
    }

    /// Thread-level invariant: the very first event on a thread must be a
    /// `ThreadStart` response (recorded via `append_response`, never
    /// `append_send`/`append_request`).
    fn require_started(&self, thread_id: ThreadId, label: &Label) -> Result<(), Error> {
        let is_first_event = self.threads.get(&thread_id).is_none_or(Vec::is_empty);
        if is_first_event && !matches!(label, Label::ThreadStart { .. }) {
            return Err(Error::MissingThreadStart { thread: thread_id });
        }
        Ok(())
    }
}

/// Whether `response`'s shape is a legal completion of `request` (ignoring
/// carried values, which only the response fixes).
fn response_matches_request(request: &Label, response: &Label) -> bool {
    use Label::*;
    match (request, response) {
        (
            Read {
                phase: Phase::Request,
                location: l1,
                k_class: k1,
                is_exclusive: e1,
                ..
            },
            Read {
                phase: Phase::Response,
                location: l2,
                k_class: k2,
                is_exclusive: e2,
                ..
            },
        ) => l1 == l2 && k1 == k2 && e1 == e2,

        (
            Lock {
                phase: Phase::Request,
                mutex: m1,
                ..
            },
            Lock {
                phase: Phase::Response,
                mutex: m2,
                ..
            },
        ) => m1 == m2,

        (
            Wait {
                phase: Phase::Request,
                mutex: m1,
            },
            Wait {
                phase: Phase::Response,
                mutex: m2,
            },
        ) => m1 == m2,

        (
            ThreadJoin {
                phase: Phase::Request,
                join_thread_ids: requested,
            },
            ThreadJoin {
                phase: Phase::Response,
                join_thread_ids: remaining,
            },
        ) => remaining.is_subset(requested),

        _ => false,
    }
}
