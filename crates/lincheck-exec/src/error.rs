//! Well-formedness errors raised by [`crate::builder::ExecutionBuilder`].

use lincheck_label::ThreadId;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("thread {thread} was already begun")]
    ThreadAlreadyBegun { thread: ThreadId },
    #[error("thread {thread} has no pending request to respond to")]
    NoPendingRequest { thread: ThreadId },
    #[error("thread {thread} already has a pending request awaiting a response")]
    RequestAlreadyPending { thread: ThreadId },
    #[error("response on thread {thread} does not match the shape of its pending request")]
    ResponseShapeMismatch { thread: ThreadId },
    #[error("response on thread {thread} is not a legal result of synchronizing with its claimed source")]
    UnsourcedResponse { thread: ThreadId },
    #[error("thread {thread}'s first event must be a ThreadStart response")]
    MissingThreadStart { thread: ThreadId },
    #[error("appended to thread {thread} which was never begun")]
    ThreadNotBegun { thread: ThreadId },
    #[error("barrier race on thread {thread}: {reason}")]
    BarrierRace { thread: ThreadId, reason: String },
}
