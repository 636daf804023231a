//! The six worked scenarios from the engine's design notes, built directly
//! through [`ExecutionBuilder`] the way an instrumented harness would.

use lincheck_exec::{ExecutionBuilder, Execution, MAIN_THREAD};
use lincheck_label::{Event, KClass, Label, Location, MutexId, Phase, ThreadId, Value};

pub struct Scenario {
    pub name: &'static str,
    pub expected_consistent: bool,
    pub execution: Execution,
}

fn thread_start(thread_id: ThreadId, is_main: bool) -> Label {
    Label::ThreadStart {
        phase: Phase::Response,
        thread_id,
        is_main_thread: is_main,
    }
}

fn begin(builder: &mut ExecutionBuilder, thread_id: ThreadId, is_main: bool, source: &Event) -> Event {
    builder.begin_thread(thread_id).unwrap();
    builder
        .append_response(thread_id, thread_start(thread_id, is_main), source)
        .unwrap()
}

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

fn read_rsp(loc: u64, v: i32) -> Label {
    Label::Read {
        phase: Phase::Response,
        location: Location(loc),
        value: Some(Value::Int(v)),
        k_class: KClass::Int,
        is_exclusive: false,
    }
}

fn lock_req(mutex: u64) -> Label {
    Label::Lock {
        phase: Phase::Request,
        mutex: MutexId(mutex),
        reentrance_depth: 0,
        reentrance_count: 0,
    }
}

fn lock_rsp(mutex: u64) -> Label {
    Label::Lock {
        phase: Phase::Response,
        mutex: MutexId(mutex),
        reentrance_depth: 0,
        reentrance_count: 0,
    }
}

fn unlock(mutex: u64) -> Label {
    Label::Unlock {
        mutex: MutexId(mutex),
        depth: 0,
        count: 0,
    }
}

fn single_writer_single_reader() -> Scenario {
    const READER: ThreadId = 1;
    let mut builder = ExecutionBuilder::new();
    let init = builder.initialization_event();

    begin(&mut builder, MAIN_THREAD, true, &init);
    let fork_event = builder
        .append_send(MAIN_THREAD, Label::ThreadFork { fork_thread_ids: [READER].into_iter().collect() })
        .unwrap();
    let write_event = builder.append_send(MAIN_THREAD, write(1, 1)).unwrap();

    begin(&mut builder, READER, false, &fork_event);
    builder.append_request(READER, read_req(1)).unwrap();
    builder
        .append_response(READER, read_rsp(1, 1), &write_event)
        .unwrap();

    Scenario {
        name: "single-writer-single-reader",
        expected_consistent: true,
        execution: builder.build().unwrap(),
    }
}

fn store_buffer() -> Scenario {
    const T2: ThreadId = 1;
    let mut builder = ExecutionBuilder::new();
    let init = builder.initialization_event();

    begin(&mut builder, MAIN_THREAD, true, &init);
    let fork_event = builder
        .append_send(MAIN_THREAD, Label::ThreadFork { fork_thread_ids: [T2].into_iter().collect() })
        .unwrap();
    builder.append_send(MAIN_THREAD, write(1, 1)).unwrap();
    builder.append_request(MAIN_THREAD, read_req(2)).unwrap();
    builder
        .append_response(MAIN_THREAD, read_rsp(2, 0), &init)
        .unwrap();

    begin(&mut builder, T2, false, &fork_event);
    builder.append_send(T2, write(2, 1)).unwrap();
    builder.append_request(T2, read_req(1)).unwrap();
    builder
        .append_response(T2, read_rsp(1, 0), &init)
        .unwrap();

    Scenario {
        name: "store-buffer-both-default",
        expected_consistent: false,
        execution: builder.build().unwrap(),
    }
}

fn cas_success() -> Scenario {
    const READER: ThreadId = 1;
    let mut builder = ExecutionBuilder::new();
    let init = builder.initialization_event();

    begin(&mut builder, MAIN_THREAD, true, &init);
    let fork_event = builder
        .append_send(MAIN_THREAD, Label::ThreadFork { fork_thread_ids: [READER].into_iter().collect() })
        .unwrap();
    builder.append_request(MAIN_THREAD, Label::Read {
        phase: Phase::Request,
        location: Location(1),
        value: None,
        k_class: KClass::Int,
        is_exclusive: true,
    }).unwrap();
    builder
        .append_response(
            MAIN_THREAD,
            Label::Read {
                phase: Phase::Response,
                location: Location(1),
                value: Some(Value::Int(0)),
                k_class: KClass::Int,
                is_exclusive: true,
            },
            &init,
        )
        .unwrap();
    let cas_write = builder
        .append_send(
            MAIN_THREAD,
            Label::Write {
                location: Location(1),
                value: Value::Int(1),
                k_class: KClass::Int,
                is_exclusive: true,
            },
        )
        .unwrap();

    begin(&mut builder, READER, false, &fork_event);
    builder.append_request(READER, read_req(1)).unwrap();
    builder
        .append_response(READER, read_rsp(1, 1), &cas_write)
        .unwrap();

    Scenario {
        name: "cas-success",
        expected_consistent: true,
        execution: builder.build().unwrap(),
    }
}

fn cas_failure() -> Scenario {
    const RACER: ThreadId = 1;
    let mut builder = ExecutionBuilder::new();
    let init = builder.initialization_event();

    begin(&mut builder, MAIN_THREAD, true, &init);
    let fork_event = builder
        .append_send(MAIN_THREAD, Label::ThreadFork { fork_thread_ids: [RACER].into_iter().collect() })
        .unwrap();
    let write_event = builder.append_send(MAIN_THREAD, write(1, 2)).unwrap();

    begin(&mut builder, RACER, false, &fork_event);
    builder
        .append_request(
            RACER,
            Label::Read {
                phase: Phase::Request,
                location: Location(1),
                value: None,
                k_class: KClass::Int,
                is_exclusive: true,
            },
        )
        .unwrap();
    builder
        .append_response(
            RACER,
            Label::Read {
                phase: Phase::Response,
                location: Location(1),
                value: Some(Value::Int(2)),
                k_class: KClass::Int,
                is_exclusive: true,
            },
            &write_event,
        )
        .unwrap();

    Scenario {
        name: "cas-failure",
        expected_consistent: true,
        execution: builder.build().unwrap(),
    }
}

fn fork_join() -> Scenario {
    const WORKER: ThreadId = 1;
    let mut builder = ExecutionBuilder::new();
    let init = builder.initialization_event();

    begin(&mut builder, MAIN_THREAD, true, &init);
    let fork_event = builder
        .append_send(MAIN_THREAD, Label::ThreadFork { fork_thread_ids: [WORKER].into_iter().collect() })
        .unwrap();

    begin(&mut builder, WORKER, false, &fork_event);
    let write_event = builder.append_send(WORKER, write(1, 7)).unwrap();
    let finish_event = builder
        .append_send(WORKER, Label::ThreadFinish { finished_thread_ids: [WORKER].into_iter().collect() })
        .unwrap();

    builder
        .append_request(MAIN_THREAD, Label::ThreadJoin { phase: Phase::Request, join_thread_ids: [WORKER].into_iter().collect() })
        .unwrap();
    builder
        .append_response(
            MAIN_THREAD,
            Label::ThreadJoin { phase: Phase::Response, join_thread_ids: Default::default() },
            &finish_event,
        )
        .unwrap();
    builder.append_request(MAIN_THREAD, read_req(1)).unwrap();
    builder
        .append_response(MAIN_THREAD, read_rsp(1, 7), &write_event)
        .unwrap();

    Scenario {
        name: "fork-join",
        expected_consistent: true,
        execution: builder.build().unwrap(),
    }
}

fn lock_mutual_exclusion() -> Scenario {
    const T2: ThreadId = 1;
    const MUTEX: u64 = 0;
    let mut builder = ExecutionBuilder::new();
    let init = builder.initialization_event();

    begin(&mut builder, MAIN_THREAD, true, &init);
    let fork_event = builder
        .append_send(MAIN_THREAD, Label::ThreadFork { fork_thread_ids: [T2].into_iter().collect() })
        .unwrap();

    builder.append_request(MAIN_THREAD, lock_req(MUTEX)).unwrap();
    builder
        .append_response(MAIN_THREAD, lock_rsp(MUTEX), &init)
        .unwrap();
    builder.append_request(MAIN_THREAD, read_req(1)).unwrap();
    builder
        .append_response(MAIN_THREAD, read_rsp(1, 0), &init)
        .unwrap();
    builder.append_send(MAIN_THREAD, write(1, 1)).unwrap();
    let t1_unlock = builder.append_send(MAIN_THREAD, unlock(MUTEX)).unwrap();

    begin(&mut builder, T2, false, &fork_event);
    builder.append_request(T2, lock_req(MUTEX)).unwrap();
    builder
        .append_response(T2, lock_rsp(MUTEX), &t1_unlock)
        .unwrap();
    builder.append_request(T2, read_req(1)).unwrap();
    builder
        .append_response(T2, read_rsp(1, 1), &t1_unlock)
        .unwrap();
    builder.append_send(T2, write(1, 2)).unwrap();
    builder.append_send(T2, unlock(MUTEX)).unwrap();

    Scenario {
        name: "lock-mutual-exclusion",
        expected_consistent: true,
        execution: builder.build().unwrap(),
    }
}

pub fn all() -> Vec<Scenario> {
    vec![
        single_writer_single_reader(),
        store_buffer(),
        cas_success(),
        cas_failure(),
        fork_join(),
        lock_mutual_exclusion(),
    ]
}
