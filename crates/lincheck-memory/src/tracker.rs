//! `MemoryTracker`: a snapshot of memory after some prefix of a total order.

use lincheck_label::{KClass, Label, Location, Phase, ThreadId, Value};

/// A mapping from memory location to its current value, observed and
/// mutated one access at a time.
///
/// The tracker never needs `thread_id` for correctness under sequential
/// consistency (memory is global, not per-thread) — it is part of the
/// signature only so a future relaxed-memory tracker can specialize on it
/// without changing this trait.
pub trait MemoryTracker: Clone {
    fn read_value(&self, thread_id: ThreadId, location: Location, k_class: KClass) -> Value;

    fn write_value(&mut self, thread_id: ThreadId, location: Location, value: Value, k_class: KClass);

    /// Atomic compare-and-set: succeeds when the current value equals
    /// `expected`; on success installs `new` and returns `true`.
    fn compare_and_set(
        &mut self,
        thread_id: ThreadId,
        location: Location,
        expected: Value,
        new: Value,
        k_class: KClass,
    ) -> bool;

    /// Deep clone, used when the checker branches during search.
    fn copy(&self) -> Self
    where
        Self: Sized,
    {
        self.clone()
    }

    /// Checker-facing helper: given a *total* label, returns an updated
    /// tracker consistent with executing it, or `None` if the label
    /// contradicts memory.
    fn replay(&self, thread_id: ThreadId, label: &Label) -> Option<Self>
    where
        Self: Sized,
    {
        match label {
            Label::Read {
                phase: Phase::Total,
                location,
                value: Some(expected),
                k_class,
                ..
            } => {
                if self.read_value(thread_id, *location, *k_class) == *expected {
                    Some(self.copy())
                } else {
                    None
                }
            }
            Label::Write {
                location,
                value,
                k_class,
                ..
            } => {
                let mut next = self.copy();
                next.write_value(thread_id, *location, *value, *k_class);
                Some(next)
            }
            Label::ReadModifyWrite {
                location,
                read_value,
                write_value,
                k_class,
            } => {
                let mut next = self.copy();
                if next.compare_and_set(thread_id, *location, *read_value, *write_value, *k_class) {
                    Some(next)
                } else {
                    None
                }
            }
            // Thread lifecycle events and Initialization never touch memory.
            Label::Empty
            | Label::Initialization
            | Label::ThreadFork { .. }
            | Label::ThreadStart { .. }
            | Label::ThreadFinish { .. }
            | Label::ThreadJoin { .. }
            | Label::Lock { .. }
            | Label::Unlock { .. }
            | Label::Wait { .. }
            | Label::Notify { .. } => Some(self.copy()),
            Label::Read { .. } => None,
        }
    }
}
