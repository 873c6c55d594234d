//! The submission queue shared by a pool's submitters and workers.
//!
//! [`TaskQueue`] is a mutual-exclusion-guarded FIFO: any thread may push,
//! worker threads pop. Popping is non-blocking by design (a worker that
//! loses the lock race treats the queue as momentarily empty and retries)
//! while a condition variable lets idle workers park until work arrives.

mod fifo;

pub use fifo::{PopError, PushError, TaskQueue};
