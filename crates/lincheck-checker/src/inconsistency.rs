//! The result of a failed consistency check.

use std::collections::BTreeMap;

use lincheck_label::ThreadId;

/// Reports that no total order interleaving the recorded thread sequences
/// satisfies program order, the covering, and the memory tracker's
/// read-from relation. Not a `std::error::Error`: per the source
/// specification this is a reportable *result* of a successful search, not
/// a failure of the checker itself (an actually malformed execution
/// surfaces as [`lincheck_exec::Error::BarrierRace`] instead).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inconsistency {
    /// The deepest set of per-thread positions the search reached before
    /// every frontier state got stuck, one candidate witness among
    /// possibly several equally-deep ones.
    pub furthest: BTreeMap<ThreadId, usize>,
}

impl Inconsistency {
    pub fn new(furthest: BTreeMap<ThreadId, usize>) -> Self {
        Inconsistency { furthest }
    }
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no consistent total order found; search stalled at {:?}",
            self.furthest
        )
    }
}
