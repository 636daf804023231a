//! The `Label` sum type and its structural introspection.
//!
//! Labels are plain data: every variant owns its payload and the
//! synchronization/aggregation/replay operations (see [`crate::sync`],
//! [`crate::aggregate`], [`crate::replay`]) are closed-world functions over
//! this enum rather than virtual dispatch on a trait object. The compiler
//! checks exhaustiveness for us whenever a new variant is added.

use std::collections::BTreeSet;

use crate::ids::{KClass, Location, MutexId, ThreadId, Value};

/// Which half of a two-phase (request/response) label this is, or whether
/// the pair has already been fused into one atomic step by
/// [`crate::aggregate::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Request,
    Response,
    /// Produced only by aggregation; never a valid input to `synchronize`.
    Total,
}

/// The three label kinds a send/request/response can take. `Phase::Total`
/// labels are not classified by `Kind`: they never participate in
/// `synchronize`, only in memory replay and covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Send,
    Request,
    Response,
}

/// Whether a label participates in a 1:1 (`Binary`) or N:1 (`Barrier`)
/// synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncType {
    Binary,
    Barrier,
}

/// An immutable descriptor of what an event means.
///
/// `Empty` is the neutral element of [`crate::sync::synchronize`]; plain
/// `Read`/`Write`/`Lock`/... variants model the actions an instrumented
/// program performs, and `ThreadFork`/`ThreadStart`/`ThreadFinish`/
/// `ThreadJoin` model thread lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Neutral element: `L ⊕ Empty = L`.
    Empty,
    /// Virtual root of every execution. Supplies default values for first
    /// reads and starts the main thread.
    Initialization,

    ThreadFork {
        fork_thread_ids: BTreeSet<ThreadId>,
    },
    ThreadStart {
        phase: Phase,
        thread_id: ThreadId,
        is_main_thread: bool,
    },
    ThreadFinish {
        finished_thread_ids: BTreeSet<ThreadId>,
    },
    ThreadJoin {
        phase: Phase,
        join_thread_ids: BTreeSet<ThreadId>,
    },

    Read {
        phase: Phase,
        location: Location,
        /// `None` for a request; always `Some` for a response or total.
        value: Option<Value>,
        k_class: KClass,
        is_exclusive: bool,
    },
    Write {
        location: Location,
        value: Value,
        k_class: KClass,
        is_exclusive: bool,
    },
    /// Compound label produced by [`crate::aggregate::aggregate`]: an
    /// exclusive read-total immediately followed by an exclusive
    /// write-total to the same location by the same thread. Models CAS.
    ReadModifyWrite {
        location: Location,
        read_value: Value,
        write_value: Value,
        k_class: KClass,
    },

    Lock {
        phase: Phase,
        mutex: MutexId,
        reentrance_depth: u32,
        reentrance_count: u32,
    },
    Unlock {
        mutex: MutexId,
        depth: u32,
        count: u32,
    },
    Wait {
        phase: Phase,
        mutex: MutexId,
    },
    Notify {
        mutex: MutexId,
        is_broadcast: bool,
    },
}

impl Label {
    /// Classifies this label as `Send`, `Request`, or `Response`. Panics on
    /// `Phase::Total` labels: those are produced only inside the checker
    /// after aggregation and never flow back through `synchronize`.
    pub fn kind(&self) -> Kind {
        match self {
            Label::Empty | Label::Initialization => Kind::Send,
            Label::ThreadFork { .. }
            | Label::ThreadFinish { .. }
            | Label::Write { .. }
            | Label::Unlock { .. }
            | Label::Notify { .. }
            | Label::ReadModifyWrite { .. } => Kind::Send,
            Label::ThreadStart { phase, .. }
            | Label::ThreadJoin { phase, .. }
            | Label::Read { phase, .. }
            | Label::Lock { phase, .. }
            | Label::Wait { phase, .. } => match phase {
                Phase::Request => Kind::Request,
                Phase::Response => Kind::Response,
                Phase::Total => panic!("Phase::Total labels have no Kind"),
            },
        }
    }

    pub fn sync_type(&self) -> SyncType {
        match self {
            Label::ThreadFinish { .. } | Label::ThreadJoin { .. } => SyncType::Barrier,
            Label::Lock { .. } | Label::Wait { .. } => SyncType::Binary,
            _ => SyncType::Binary,
        }
    }

    /// `isAcquiring ≡ depth − count = 0`, applied to `Lock`'s
    /// `(reentrance_depth, reentrance_count)` pair.
    pub fn is_acquiring(&self) -> bool {
        match self {
            Label::Lock {
                reentrance_depth,
                reentrance_count,
                ..
            } => reentrance_depth == reentrance_count,
            _ => false,
        }
    }

    /// `isReleasing ≡ depth − count = 0`, applied to `Unlock`'s
    /// `(depth, count)` pair.
    pub fn is_releasing(&self) -> bool {
        match self {
            Label::Unlock { depth, count, .. } => depth == count,
            _ => false,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Label::Read { location, .. } | Label::Write { location, .. } => Some(*location),
            Label::ReadModifyWrite { location, .. } => Some(*location),
            _ => None,
        }
    }

    pub fn mutex(&self) -> Option<MutexId> {
        match self {
            Label::Lock { mutex, .. }
            | Label::Unlock { mutex, .. }
            | Label::Wait { mutex, .. }
            | Label::Notify { mutex, .. } => Some(*mutex),
            _ => None,
        }
    }
}
