//! Fusing adjacent same-thread events into a single "total" label.
//!
//! Aggregation is the mechanism by which the checker advances a thread by
//! more than one recorded event per search step: a request and its matching
//! response are replayed together, atomically.

use crate::label::{Label, Phase};

/// Attempts to fuse `a` followed by `b` (same thread, adjacent) into one
/// total label. Returns `None` when the pair does not aggregate; callers
/// that need to know "how many underlying events does this total label
/// consume" should track that alongside the label (see
/// `lincheck_exec::Execution::aggregated_label`).
pub fn aggregate(a: &Label, b: &Label) -> Option<Label> {
    use Label::*;

    match (a, b) {
        // Read^req{loc} + Read^rsp{loc, v} → Read^total{loc, v}.
        (
            Read {
                phase: Phase::Request,
                location: loc_a,
                k_class: kc_a,
                is_exclusive: ex_a,
                ..
            },
            Read {
                phase: Phase::Response,
                location: loc_b,
                value,
                ..
            },
        ) if loc_a == loc_b => Some(Read {
            phase: Phase::Total,
            location: *loc_a,
            value: *value,
            k_class: *kc_a,
            is_exclusive: *ex_a,
        }),

        // Read^total_ex{loc, v} + Write{loc, v'}_ex (same location, both
        // exclusive) → ReadModifyWrite(read, write).
        (
            Read {
                phase: Phase::Total,
                location: rloc,
                value: Some(rvalue),
                k_class,
                is_exclusive: true,
            },
            Write {
                location: wloc,
                value: wvalue,
                is_exclusive: true,
                ..
            },
        ) if rloc == wloc => Some(ReadModifyWrite {
            location: *rloc,
            read_value: *rvalue,
            write_value: *wvalue,
            k_class: *k_class,
        }),

        // ThreadStart^req + ThreadStart^rsp (same thread) → ThreadStart^total.
        (
            ThreadStart {
                phase: Phase::Request,
                thread_id: tid_a,
                is_main_thread,
            },
            ThreadStart {
                phase: Phase::Response,
                thread_id: tid_b,
                ..
            },
        ) if tid_a == tid_b => Some(ThreadStart {
            phase: Phase::Total,
            thread_id: *tid_a,
            is_main_thread: *is_main_thread,
        }),

        // ThreadJoin^req + ThreadJoin^rsp{∅} → ThreadJoin^total{∅}.
        (
            ThreadJoin {
                phase: Phase::Request,
                ..
            },
            ThreadJoin {
                phase: Phase::Response,
                join_thread_ids,
            },
        ) if join_thread_ids.is_empty() => Some(ThreadJoin {
            phase: Phase::Total,
            join_thread_ids: join_thread_ids.clone(),
        }),

        _ => None,
    }
}
