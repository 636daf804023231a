#![allow(dead_code)] // Shared across scenario tests; each test file uses a subset.

use lincheck_exec::ExecutionBuilder;
use lincheck_label::{Event, KClass, Label, Location, MutexId, Phase, ThreadId, Value};

pub fn thread_start(thread_id: ThreadId, is_main: bool) -> Label {
    Label::ThreadStart {
        phase: Phase::Response,
        thread_id,
        is_main_thread: is_main,
    }
}

pub fn fork(thread_ids: impl IntoIterator<Item = ThreadId>) -> Label {
    Label::ThreadFork {
        fork_thread_ids: thread_ids.into_iter().collect(),
    }
}

pub fn finish(thread_ids: impl IntoIterator<Item = ThreadId>) -> Label {
    Label::ThreadFinish {
        finished_thread_ids: thread_ids.into_iter().collect(),
    }
}

pub fn join_req(thread_ids: impl IntoIterator<Item = ThreadId>) -> Label {
    Label::ThreadJoin {
        phase: Phase::Request,
        join_thread_ids: thread_ids.into_iter().collect(),
    }
}

pub fn join_rsp() -> Label {
    Label::ThreadJoin {
        phase: Phase::Response,
        join_thread_ids: Default::default(),
    }
}

pub fn write(loc: u64, v: i32) -> Label {
    Label::Write {
        location: Location(loc),
        value: Value::Int(v),
        k_class: KClass::Int,
        is_exclusive: false,
    }
}

pub fn read_req(loc: u64) -> Label {
    Label::Read {
        phase: Phase::Request,
        location: Location(loc),
        value: None,
        k_class: KClass::Int,
        is_exclusive: false,
    }
}

pub fn read_rsp(loc: u64, v: i32) -> Label {
    Label::Read {
        phase: Phase::Response,
        location: Location(loc),
        value: Some(Value::Int(v)),
        k_class: KClass::Int,
        is_exclusive: false,
    }
}

pub fn rmw_req(loc: u64) -> Label {
    Label::Read {
        phase: Phase::Request,
        location: Location(loc),
        value: None,
        k_class: KClass::Int,
        is_exclusive: true,
    }
}

pub fn rmw_read_rsp(loc: u64, v: i32) -> Label {
    Label::Read {
        phase: Phase::Response,
        location: Location(loc),
        value: Some(Value::Int(v)),
        k_class: KClass::Int,
        is_exclusive: true,
    }
}

pub fn rmw_write(loc: u64, v: i32) -> Label {
    Label::Write {
        location: Location(loc),
        value: Value::Int(v),
        k_class: KClass::Int,
        is_exclusive: true,
    }
}

pub fn lock_req(mutex: u64) -> Label {
    Label::Lock {
        phase: Phase::Request,
        mutex: MutexId(mutex),
        reentrance_depth: 0,
        reentrance_count: 0,
    }
}

pub fn lock_rsp(mutex: u64) -> Label {
    Label::Lock {
        phase: Phase::Response,
        mutex: MutexId(mutex),
        reentrance_depth: 0,
        reentrance_count: 0,
    }
}

pub fn unlock(mutex: u64) -> Label {
    Label::Unlock {
        mutex: MutexId(mutex),
        depth: 0,
        count: 0,
    }
}

/// Begins `thread_id`, recording its `ThreadStart` response as sourced from
/// `source`. Returns the start event.
pub fn begin(
    builder: &mut ExecutionBuilder,
    thread_id: ThreadId,
    is_main: bool,
    source: &Event,
) -> Event {
    builder.begin_thread(thread_id).unwrap();
    builder
        .append_response(thread_id, thread_start(thread_id, is_main), source)
        .unwrap()
}
