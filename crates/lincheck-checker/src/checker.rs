//! The sequential-consistency state-space search.

use std::collections::{BTreeMap, HashSet};

use lincheck_covering::Covering;
use lincheck_exec::Execution;
use lincheck_label::{ThreadId, Value};
use lincheck_memory::{MemoryTracker, SequentialMemory};
use tracing::trace;

use crate::inconsistency::Inconsistency;

/// Decides whether a recorded execution admits some total order consistent
/// with its memory model. `None` on success, `Some(Inconsistency)` when the
/// search exhausts its state space without reaching a terminal state.
pub trait Checker {
    fn check(&self, execution: &Execution) -> Option<Inconsistency>;
}

/// The production checker: an exhaustive depth-first search over
/// `(counters, memory)` states, gated by a pluggable [`Covering`].
pub struct SequentialConsistencyChecker<C: Covering> {
    covering: C,
}

impl<C: Covering> SequentialConsistencyChecker<C> {
    pub fn new(covering: C) -> Self {
        SequentialConsistencyChecker { covering }
    }
}

type VisitedKey = (Vec<(ThreadId, usize)>, Vec<(u64, Value)>);

impl<C: Covering> Checker for SequentialConsistencyChecker<C> {
    fn check(&self, execution: &Execution) -> Option<Inconsistency> {
        let thread_ids: Vec<ThreadId> = execution.threads().collect();
        let counters: BTreeMap<ThreadId, usize> = thread_ids.iter().map(|&t| (t, 0)).collect();
        let memory = SequentialMemory::new();

        let mut visited: HashSet<VisitedKey> = HashSet::new();
        let mut furthest = counters.clone();

        let reached = self.search(execution, &thread_ids, counters, memory, &mut visited, &mut furthest);

        if reached {
            None
        } else {
            Some(Inconsistency::new(furthest))
        }
    }
}

impl<C: Covering> SequentialConsistencyChecker<C> {
    fn search(
        &self,
        execution: &Execution,
        thread_ids: &[ThreadId],
        counters: BTreeMap<ThreadId, usize>,
        memory: SequentialMemory,
        visited: &mut HashSet<VisitedKey>,
        furthest: &mut BTreeMap<ThreadId, usize>,
    ) -> bool {
        if thread_ids
            .iter()
            .all(|&t| counters[&t] >= execution.size(t))
        {
            return true;
        }

        let key = visited_key(&counters, &memory);
        if !visited.insert(key) {
            return false;
        }

        if depth_sum(&counters) > depth_sum(furthest) {
            *furthest = counters.clone();
        }

        for &thread_id in thread_ids {
            let position = counters[&thread_id];
            if position >= execution.size(thread_id) {
                continue;
            }

            let Some((aggregate_label, span)) = execution.aggregated_label(thread_id, position)
            else {
                continue;
            };

            if !self.is_coverable(execution, &counters, thread_id, position, span) {
                continue;
            }

            let Some(next_memory) = memory.replay(thread_id, &aggregate_label) else {
                continue;
            };

            let mut next_counters = counters.clone();
            next_counters.insert(thread_id, position + span);

            trace!(thread = thread_id, from = position, span, "advancing thread");

            if self.search(execution, thread_ids, next_counters, next_memory, visited, furthest) {
                return true;
            }
        }

        false
    }

    fn is_coverable(
        &self,
        execution: &Execution,
        counters: &BTreeMap<ThreadId, usize>,
        thread_id: ThreadId,
        position: usize,
        span: usize,
    ) -> bool {
        (position..position + span).all(|member_position| {
            let member = execution
                .get(thread_id, member_position)
                .expect("span stays within the thread's recorded length");
            self.covering.cover(execution, member).iter().all(|&dependency_id| {
                match execution.event_by_id(dependency_id) {
                    // The virtual `Initialization` root (id 0) is never
                    // recorded in a thread's sequence; it is always already
                    // in the past.
                    None => true,
                    Some(dependency) => {
                        counters.get(&dependency.thread_id).copied().unwrap_or(0)
                            > dependency.thread_position
                    }
                }
            })
        })
    }
}

fn visited_key(counters: &BTreeMap<ThreadId, usize>, memory: &SequentialMemory) -> VisitedKey {
    let counters = counters.iter().map(|(&t, &p)| (t, p)).collect();
    let memory = memory.entries().map(|(&loc, &v)| (loc.0, v)).collect();
    (counters, memory)
}

fn depth_sum(counters: &BTreeMap<ThreadId, usize>) -> usize {
    counters.values().sum()
}
