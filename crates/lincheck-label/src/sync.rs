//! The synchronization operator `⊕` over labels.
//!
//! `synchronize` is partial, commutative, and associative where defined
//! (tested as algebraic laws in `tests/algebra.rs`). Rules that would
//! otherwise require silently discarding a structurally impossible input
//! instead raise [`Error::BarrierRace`].

use std::collections::BTreeSet;

use crate::label::{Label, Phase};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structurally impossible barrier synchronization: a duplicated
    /// thread-finish, or a finish whose scope a join cannot account for.
    #[error("barrier race on thread {thread}: {reason}")]
    BarrierRace { thread: usize, reason: String },
}

/// Attempts to synchronize `a` and `b`, in that order. Returns `Ok(None)`
/// when no rule applies (the bottom element of the partial operator), `Ok(Some(label))`
/// on success, and `Err` only for structurally impossible barrier input.
pub fn synchronize(a: &Label, b: &Label) -> Result<Option<Label>, Error> {
    if let Some(result) = sync_one_way(a, b)? {
        return Ok(Some(result));
    }
    sync_one_way(b, a)
}

/// One-directional half of `synchronize`; `synchronize` tries both orders
/// so that the public operator is commutative by construction.
fn sync_one_way(a: &Label, b: &Label) -> Result<Option<Label>, Error> {
    use Label::*;

    match (a, b) {
        // Neutral element.
        (l, Empty) => Ok(Some(l.clone())),

        // ThreadFork{S} ⊕ ThreadStart^req{tid} iff tid ∈ S → ThreadStart^rsp{tid}.
        (
            ThreadFork { fork_thread_ids },
            ThreadStart {
                phase: Phase::Request,
                thread_id,
                is_main_thread,
            },
        ) if fork_thread_ids.contains(thread_id) && !is_main_thread => Ok(Some(ThreadStart {
            phase: Phase::Response,
            thread_id: *thread_id,
            is_main_thread: false,
        })),

        // Initialization ⊕ ThreadStart^req{tid, isMainThread=true} → ThreadStart^rsp.
        (
            Initialization,
            ThreadStart {
                phase: Phase::Request,
                thread_id,
                is_main_thread: true,
            },
        ) => Ok(Some(ThreadStart {
            phase: Phase::Response,
            thread_id: *thread_id,
            is_main_thread: true,
        })),

        // ThreadFinish{F1} ⊕ ThreadFinish{F2} → ThreadFinish{F1 ∪ F2}.
        (
            ThreadFinish {
                finished_thread_ids: f1,
            },
            ThreadFinish {
                finished_thread_ids: f2,
            },
        ) => {
            if let Some(&dup) = f1.intersection(f2).next() {
                return Err(Error::BarrierRace {
                    thread: dup,
                    reason: "thread finished more than once".into(),
                });
            }
            let union: BTreeSet<_> = f1.union(f2).copied().collect();
            Ok(Some(ThreadFinish {
                finished_thread_ids: union,
            }))
        }

        // ThreadFinish{F} ⊕ ThreadJoin^req{J} iff F ⊆ J → ThreadJoin^rsp{J \ F}.
        (
            ThreadFinish {
                finished_thread_ids: f,
            },
            ThreadJoin {
                phase: Phase::Request,
                join_thread_ids: j,
            },
        ) if f.is_subset(j) => Ok(Some(ThreadJoin {
            phase: Phase::Response,
            join_thread_ids: j.difference(f).copied().collect(),
        })),

        // Write{loc,v} ⊕ Read^req{loc} → Read^rsp{loc, v}.
        (
            Write {
                location: wloc,
                value,
                k_class,
                ..
            },
            Read {
                phase: Phase::Request,
                location: rloc,
                is_exclusive,
                ..
            },
        ) if wloc == rloc => Ok(Some(Read {
            phase: Phase::Response,
            location: *rloc,
            value: Some(*value),
            k_class: *k_class,
            is_exclusive: *is_exclusive,
        })),

        // Initialization ⊕ Read^req{loc} → Read^rsp{loc, default(kClass)}.
        (
            Initialization,
            Read {
                phase: Phase::Request,
                location,
                k_class,
                is_exclusive,
                ..
            },
        ) => Ok(Some(Read {
            phase: Phase::Response,
            location: *location,
            value: Some(k_class.default_value()),
            k_class: *k_class,
            is_exclusive: *is_exclusive,
        })),

        // Unlock{m, releasing} ⊕ Lock^req{m, acquiring} → Lock^rsp{m}.
        (Unlock { mutex: m1, .. }, Lock {
            phase: Phase::Request,
            mutex: m2,
            reentrance_depth,
            reentrance_count,
        }) if m1 == m2 && a.is_releasing() && b.is_acquiring() => Ok(Some(Lock {
            phase: Phase::Response,
            mutex: *m2,
            reentrance_depth: *reentrance_depth,
            reentrance_count: *reentrance_count,
        })),

        // Initialization ⊕ Lock^req{m} → Lock^rsp{m} (only a first acquisition).
        (
            Initialization,
            Lock {
                phase: Phase::Request,
                mutex,
                reentrance_depth,
                reentrance_count,
            },
        ) if b.is_acquiring() => Ok(Some(Lock {
            phase: Phase::Response,
            mutex: *mutex,
            reentrance_depth: *reentrance_depth,
            reentrance_count: *reentrance_count,
        })),

        // Notify{m} ⊕ Wait^req{m} → Wait^rsp{m}.
        (
            Notify { mutex: m1, .. },
            Wait {
                phase: Phase::Request,
                mutex: m2,
            },
        ) if m1 == m2 => Ok(Some(Wait {
            phase: Phase::Response,
            mutex: *m2,
        })),

        _ => Ok(None),
    }
}
