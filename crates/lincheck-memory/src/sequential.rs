//! `SequentialMemory`: the sequentially-consistent `MemoryTracker`.
//!
//! A single global `location -> value` map; no per-thread views, no
//! reordering buffers.

use std::collections::BTreeMap;

use lincheck_label::{KClass, Location, ThreadId, Value};
use tracing::trace;

use crate::tracker::MemoryTracker;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequentialMemory {
    values: BTreeMap<Location, Value>,
}

impl SequentialMemory {
    pub fn new() -> Self {
        SequentialMemory::default()
    }

    /// The sorted `(location, value)` pairs currently held. Used by the
    /// checker to hash a memory snapshot for its visited set.
    pub fn entries(&self) -> impl Iterator<Item = (&Location, &Value)> {
        self.values.iter()
    }
}

impl MemoryTracker for SequentialMemory {
    fn read_value(&self, _thread_id: ThreadId, location: Location, k_class: KClass) -> Value {
        self.values
            .get(&location)
            .copied()
            .unwrap_or_else(|| k_class.default_value())
    }

    fn write_value(&mut self, _thread_id: ThreadId, location: Location, value: Value, _k_class: KClass) {
        trace!(location = location.0, ?value, "write_value");
        self.values.insert(location, value);
    }

    fn compare_and_set(
        &mut self,
        thread_id: ThreadId,
        location: Location,
        expected: Value,
        new: Value,
        k_class: KClass,
    ) -> bool {
        if self.read_value(thread_id, location, k_class) == expected {
            self.values.insert(location, new);
            trace!(location = location.0, ?expected, ?new, "compare_and_set succeeded");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lincheck_label::Value;

    #[test]
    fn write_then_read_observes_the_write() {
        let mut mem = SequentialMemory::new();
        mem.write_value(0, Location(1), Value::Int(5), KClass::Int);
        assert_eq!(mem.read_value(0, Location(1), KClass::Int), Value::Int(5));
    }

    #[test]
    fn unwritten_location_reads_the_class_default() {
        let mem = SequentialMemory::new();
        assert_eq!(mem.read_value(0, Location(1), KClass::Int), Value::Int(0));
        assert_eq!(
            mem.read_value(0, Location(2), KClass::Boolean),
            Value::Boolean(false)
        );
    }

    #[test]
    fn copy_isolates_the_original() {
        let mut mem = SequentialMemory::new();
        mem.write_value(0, Location(1), Value::Int(1), KClass::Int);
        let mut clone = mem.copy();
        clone.write_value(0, Location(1), Value::Int(2), KClass::Int);
        assert_eq!(mem.read_value(0, Location(1), KClass::Int), Value::Int(1));
        assert_eq!(clone.read_value(0, Location(1), KClass::Int), Value::Int(2));
    }

    #[test]
    fn compare_and_set_succeeds_only_when_expectation_matches() {
        let mut mem = SequentialMemory::new();
        assert!(!mem.compare_and_set(0, Location(1), Value::Int(1), Value::Int(2), KClass::Int));
        assert_eq!(mem.read_value(0, Location(1), KClass::Int), Value::Int(0));

        assert!(mem.compare_and_set(0, Location(1), Value::Int(0), Value::Int(2), KClass::Int));
        assert_eq!(mem.read_value(0, Location(1), KClass::Int), Value::Int(2));
    }
}
