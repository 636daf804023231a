//! Shape comparison, in-place replay, and the `synchronizedFrom` predicate.
//!
//! Object identities (memory addresses, mutex handles) differ across runs
//! of the same scenario even though the *shape* of the recorded events is
//! stable. `replay` lets a label recorded in one run be rewritten in place
//! to carry the mutable fields observed in another, as long as the two
//! agree on everything that isn't allowed to vary.

use crate::label::{Label, Phase};

/// Whether location/mutex identity must match exactly (`relaxed = false`)
/// or may differ between the two labels being compared (`relaxed = true`).
/// Threaded explicitly through the checker rather than a bare `bool`, per
/// the design note recommending a small policy type over a loose flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayPolicy {
    pub relaxed: bool,
}

impl ReplayPolicy {
    pub const EXACT: ReplayPolicy = ReplayPolicy { relaxed: false };
    pub const RELAXED: ReplayPolicy = ReplayPolicy { relaxed: true };
}

/// Shape equality: same kind, same access kind, same `kClass`, same
/// exclusivity, and (unless `policy.relaxed`) the same location/mutex
/// identity. This is the gate both `replay` and `synchronized_from` use.
pub fn equal_up_to_replay(this: &Label, other: &Label, policy: ReplayPolicy) -> bool {
    use Label::*;

    match (this, other) {
        (Empty, Empty) | (Initialization, Initialization) => true,

        (
            Read {
                phase: p1,
                k_class: k1,
                is_exclusive: e1,
                location: l1,
                ..
            },
            Read {
                phase: p2,
                k_class: k2,
                is_exclusive: e2,
                location: l2,
                ..
            },
        ) => p1 == p2 && k1 == k2 && e1 == e2 && (policy.relaxed || l1 == l2),

        (
            Write {
                k_class: k1,
                is_exclusive: e1,
                location: l1,
                ..
            },
            Write {
                k_class: k2,
                is_exclusive: e2,
                location: l2,
                ..
            },
        ) => k1 == k2 && e1 == e2 && (policy.relaxed || l1 == l2),

        (
            ReadModifyWrite {
                k_class: k1,
                location: l1,
                ..
            },
            ReadModifyWrite {
                k_class: k2,
                location: l2,
                ..
            },
        ) => k1 == k2 && (policy.relaxed || l1 == l2),

        (
            Lock {
                phase: p1,
                mutex: m1,
                ..
            },
            Lock {
                phase: p2,
                mutex: m2,
                ..
            },
        ) => p1 == p2 && (policy.relaxed || m1 == m2),

        (Unlock { mutex: m1, .. }, Unlock { mutex: m2, .. }) => policy.relaxed || m1 == m2,

        (Wait { phase: p1, mutex: m1 }, Wait { phase: p2, mutex: m2 }) => {
            p1 == p2 && (policy.relaxed || m1 == m2)
        }

        (Notify { mutex: m1, .. }, Notify { mutex: m2, .. }) => policy.relaxed || m1 == m2,

        (
            ThreadStart {
                phase: p1,
                thread_id: t1,
                ..
            },
            ThreadStart {
                phase: p2,
                thread_id: t2,
                ..
            },
        ) => p1 == p2 && t1 == t2,

        (ThreadFork { .. }, ThreadFork { .. }) => true,
        (ThreadFinish { .. }, ThreadFinish { .. }) => true,
        (ThreadJoin { phase: p1, .. }, ThreadJoin { phase: p2, .. }) => p1 == p2,

        _ => false,
    }
}

impl Label {
    /// Rewrites the mutable fields of `self` (location, value, mutex
    /// identity) from `other` when the two agree on shape. Returns `false`
    /// without mutating when shapes differ. Uses exact (non-relaxed)
    /// location/mutex comparison — see [`synchronized_from`] for the
    /// relaxed variant used by the checker.
    pub fn replay(&mut self, other: &Label) -> bool {
        if !equal_up_to_replay(self, other, ReplayPolicy::EXACT) {
            return false;
        }
        *self = other.clone();
        true
    }

    /// Symmetric predicate validating that `self` is a legal result of
    /// synchronizing with `other`: consistent with
    /// [`crate::sync::synchronize`] in that if
    /// `synchronize(other, x) = self` for some `x`, this returns `true`.
    ///
    /// Implemented as the dual of each `synchronize` rule rather than a
    /// generic search over possible partners `x` (there is no bound on
    /// `x`'s shape other than "whatever the concrete rule allows").
    pub fn synchronized_from(&self, other: &Label, policy: ReplayPolicy) -> bool {
        use Label::*;

        let same_location = |a: &crate::ids::Location, b: &crate::ids::Location| {
            policy.relaxed || a == b
        };
        let same_mutex = |a: &crate::ids::MutexId, b: &crate::ids::MutexId| {
            policy.relaxed || a == b
        };

        match (self, other) {
            // `L ⊕ Empty = L` for every `L`, so any label is trivially the
            // result of synchronizing with `Empty`.
            (_, Empty) => true,

            (
                ThreadStart {
                    phase: Phase::Response,
                    thread_id,
                    is_main_thread: false,
                },
                ThreadFork { fork_thread_ids },
            ) => fork_thread_ids.contains(thread_id),

            (
                ThreadStart {
                    phase: Phase::Response,
                    is_main_thread: true,
                    ..
                },
                Initialization,
            ) => true,

            (ThreadFinish { .. }, ThreadFinish { .. }) => true,

            (
                ThreadJoin {
                    phase: Phase::Response,
                    join_thread_ids: remaining,
                },
                ThreadFinish {
                    finished_thread_ids,
                },
            ) => remaining.is_disjoint(finished_thread_ids),

            (
                Read {
                    phase: Phase::Response,
                    location: rloc,
                    value: Some(rvalue),
                    k_class: rk,
                    ..
                },
                Write {
                    location: wloc,
                    value: wvalue,
                    k_class: wk,
                    ..
                },
            ) => same_location(rloc, wloc) && rvalue == wvalue && rk == wk,

            (
                Read {
                    phase: Phase::Response,
                    value: Some(v),
                    k_class,
                    ..
                },
                Initialization,
            ) => *v == k_class.default_value(),

            (
                Lock {
                    phase: Phase::Response,
                    mutex: m1,
                    ..
                },
                Unlock { mutex: m2, .. },
            ) => same_mutex(m1, m2) && other.is_releasing(),

            (
                Lock {
                    phase: Phase::Response,
                    ..
                },
                Initialization,
            ) => self.is_acquiring(),

            (Wait { phase: Phase::Response, mutex: m1 }, Notify { mutex: m2, .. }) => {
                same_mutex(m1, m2)
            }

            _ => false,
        }
    }
}
