//! Algebraic laws for `synchronize`/`aggregate`/`replay`.

use lincheck_label::{synchronize, Error, KClass, Label, Location, MutexId, Phase, ThreadId, Value};
use proptest::prelude::*;

fn write(loc: u64, v: i32) -> Label {
    Label::Write {
        location: Location(loc),
        value: Value::Int(v),
        k_class: KClass::Int,
        is_exclusive: false,
    }
}

fn read_req(loc: u64) -> Label {
    Label::Read {
        phase: Phase::Request,
        location: Location(loc),
        value: None,
        k_class: KClass::Int,
        is_exclusive: false,
    }
}

fn thread_fork(ids: &[ThreadId]) -> Label {
    Label::ThreadFork {
        fork_thread_ids: ids.iter().copied().collect(),
    }
}

fn thread_start_req(tid: ThreadId, is_main: bool) -> Label {
    Label::ThreadStart {
        phase: Phase::Request,
        thread_id: tid,
        is_main_thread: is_main,
    }
}

fn thread_finish(ids: &[ThreadId]) -> Label {
    Label::ThreadFinish {
        finished_thread_ids: ids.iter().copied().collect(),
    }
}

fn thread_join_req(ids: &[ThreadId]) -> Label {
    Label::ThreadJoin {
        phase: Phase::Request,
        join_thread_ids: ids.iter().copied().collect(),
    }
}

fn lock_req(m: u64, depth: u32, count: u32) -> Label {
    Label::Lock {
        phase: Phase::Request,
        mutex: MutexId(m),
        reentrance_depth: depth,
        reentrance_count: count,
    }
}

fn unlock(m: u64, depth: u32, count: u32) -> Label {
    Label::Unlock {
        mutex: MutexId(m),
        depth,
        count,
    }
}

fn wait_req(m: u64) -> Label {
    Label::Wait {
        phase: Phase::Request,
        mutex: MutexId(m),
    }
}

fn notify(m: u64, broadcast: bool) -> Label {
    Label::Notify {
        mutex: MutexId(m),
        is_broadcast: broadcast,
    }
}

/// Every concrete label used below as a neutrality fixture.
fn sample_labels() -> Vec<Label> {
    vec![
        Label::Empty,
        Label::Initialization,
        thread_fork(&[1, 2]),
        thread_start_req(1, false),
        thread_finish(&[1]),
        thread_join_req(&[1, 2]),
        write(7, 42),
        read_req(7),
        lock_req(3, 0, 0),
        unlock(3, 0, 0),
        wait_req(9),
        notify(9, false),
    ]
}

#[test]
fn neutral_element() {
    for label in sample_labels() {
        assert_eq!(
            synchronize(&label, &Label::Empty),
            Ok(Some(label.clone())),
            "L ⊕ Empty should equal L for {label:?}"
        );
        assert_eq!(
            synchronize(&Label::Empty, &label),
            Ok(Some(label.clone())),
            "Empty ⊕ L should equal L for {label:?}"
        );
    }
}

#[test]
fn commutative_on_known_pairs() {
    let pairs = [
        (thread_fork(&[1]), thread_start_req(1, false)),
        (write(5, 1), read_req(5)),
        (Label::Initialization, read_req(5)),
        (unlock(2, 0, 0), lock_req(2, 0, 0)),
        (notify(9, false), wait_req(9)),
        (thread_finish(&[1]), thread_finish(&[2])),
        (thread_finish(&[1]), thread_join_req(&[1, 2])),
    ];
    for (a, b) in pairs {
        assert_eq!(synchronize(&a, &b), synchronize(&b, &a));
    }
}

#[test]
fn write_read_synchronizes_to_the_written_value() {
    let result = synchronize(&write(5, 42), &read_req(5))
        .unwrap()
        .expect("write/read must synchronize");
    assert_eq!(
        result,
        Label::Read {
            phase: Phase::Response,
            location: Location(5),
            value: Some(Value::Int(42)),
            k_class: KClass::Int,
            is_exclusive: false,
        }
    );
}

#[test]
fn mismatched_location_does_not_synchronize() {
    assert_eq!(synchronize(&write(5, 42), &read_req(6)), Ok(None));
}

#[test]
fn duplicate_thread_finish_is_a_barrier_race() {
    let result = synchronize(&thread_finish(&[1, 2]), &thread_finish(&[2, 3]));
    assert!(matches!(result, Err(Error::BarrierRace { thread: 2, .. })));
}

#[test]
fn initialization_supplies_default_for_first_read() {
    let result = synchronize(&Label::Initialization, &read_req(1))
        .unwrap()
        .unwrap();
    assert_eq!(
        result,
        Label::Read {
            phase: Phase::Response,
            location: Location(1),
            value: Some(Value::Int(0)),
            k_class: KClass::Int,
            is_exclusive: false,
        }
    );
}

#[test]
fn wait_never_synchronizes_with_initialization() {
    // No spurious wake-ups: a wait only ever resolves against a real notify.
    assert_eq!(synchronize(&Label::Initialization, &wait_req(1)), Ok(None));
}

#[test]
fn thread_finish_associative_over_three_sets() {
    let a = thread_finish(&[1]);
    let b = thread_finish(&[2]);
    let c = thread_finish(&[3]);

    let ab = synchronize(&a, &b).unwrap().unwrap();
    let ab_c = synchronize(&ab, &c).unwrap().unwrap();

    let bc = synchronize(&b, &c).unwrap().unwrap();
    let a_bc = synchronize(&a, &bc).unwrap().unwrap();

    assert_eq!(ab_c, a_bc);
}

proptest! {
    #[test]
    fn synchronize_is_commutative(
        loc in 0u64..4,
        val in any::<i32>(),
    ) {
        let a = write(loc, val);
        let b = read_req(loc);
        prop_assert_eq!(synchronize(&a, &b), synchronize(&b, &a));
    }

    #[test]
    fn synchronized_from_holds_for_both_operands(
        loc in 0u64..4,
        val in any::<i32>(),
    ) {
        let a = write(loc, val);
        let b = read_req(loc);
        if let Ok(Some(result)) = synchronize(&a, &b) {
            let policy = lincheck_label::ReplayPolicy::EXACT;
            prop_assert!(result.synchronized_from(&a, policy));
            prop_assert!(result.synchronized_from(&b, policy));
        }
    }

    #[test]
    fn thread_finish_union_is_commutative(
        a_ids in prop::collection::btree_set(0usize..6, 0..3),
        b_ids in prop::collection::btree_set(0usize..6, 0..3),
    ) {
        let a = Label::ThreadFinish { finished_thread_ids: a_ids.clone() };
        let b = Label::ThreadFinish { finished_thread_ids: b_ids.clone() };
        prop_assert_eq!(synchronize(&a, &b), synchronize(&b, &a));
    }
}

#[test]
fn aggregation_is_lossless_for_read() {
    let req = read_req(5);
    let rsp = synchronize(&write(5, 9), &req).unwrap().unwrap();
    let total = lincheck_label::aggregate(&req, &rsp).expect("read req/rsp must aggregate");
    match total {
        Label::Read {
            phase: Phase::Total,
            location,
            value,
            ..
        } => {
            assert_eq!(location, Location(5));
            assert_eq!(value, Some(Value::Int(9)));
        }
        other => panic!("expected a total read, got {other:?}"),
    }
}

#[test]
fn replay_only_succeeds_on_matching_shape() {
    let mut a = read_req(5);
    let wrong_shape = write(5, 1);
    assert!(!a.replay(&wrong_shape));
    assert_eq!(a, read_req(5));

    let mut templ = Label::Read {
        phase: Phase::Response,
        location: Location(1),
        value: Some(Value::Int(0)),
        k_class: KClass::Int,
        is_exclusive: false,
    };
    let observed = Label::Read {
        phase: Phase::Response,
        location: Location(1),
        value: Some(Value::Int(77)),
        k_class: KClass::Int,
        is_exclusive: false,
    };
    assert!(templ.replay(&observed));
    assert_eq!(templ, observed);
}
