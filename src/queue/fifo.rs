//! Mutex-guarded FIFO task queue shared between submitters and workers.

use crate::core::Task;
use log::trace;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Errors returned by the pop operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    /// No task was available (or the queue lock was contended, see
    /// [`TaskQueue::try_pop`])
    Empty,
    /// The queue has been closed; no more tasks will be handed out
    Closed,
}

impl fmt::Display for PopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopError::Empty => write!(f, "queue is empty"),
            PopError::Closed => write!(f, "queue is closed"),
        }
    }
}

impl std::error::Error for PopError {}

/// Error returned by [`TaskQueue::push`] when the queue has been closed.
///
/// Carries the rejected task back to the caller so it is neither lost nor
/// silently dropped.
pub struct PushError(pub Task);

impl PushError {
    /// Takes the rejected task back out of the error
    pub fn into_task(self) -> Task {
        self.0
    }
}

impl fmt::Debug for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PushError").field(&self.0).finish()
    }
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue is closed")
    }
}

impl std::error::Error for PushError {}

/// A thread-safe FIFO of [`Task`]s.
///
/// One mutex guards the buffer as a unit; it is held only for O(1) link and
/// unlink operations and never across a task's execution. A condition
/// variable hands newly pushed tasks to parked workers, so an idle worker
/// wakes as soon as work arrives instead of polling on a fixed sleep.
///
/// Ordering: tasks come out in the order they were pushed (FIFO admission).
/// A task returned by a successful pop is owned solely by the caller.
///
/// # Example
///
/// ```rust
/// use taskpool::queue::TaskQueue;
/// use taskpool::Task;
///
/// let queue = TaskQueue::new();
/// queue.push(Task::new(|| {})).unwrap();
/// let task = queue.try_pop().unwrap();
/// task.run();
/// ```
pub struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    available: Condvar,
    closed: AtomicBool,
}

impl TaskQueue {
    /// Creates a new empty, open queue
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Links a task at the tail of the queue and wakes one parked worker.
    ///
    /// Blocks briefly on the queue lock; the critical section is O(1).
    ///
    /// # Errors
    ///
    /// Returns [`PushError`] carrying the task back if the queue has been
    /// closed.
    pub fn push(&self, task: Task) -> Result<(), PushError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(PushError(task));
        }

        let mut tasks = self.tasks.lock();
        // close() may have won the race for the lock
        if self.closed.load(Ordering::Acquire) {
            return Err(PushError(task));
        }
        tasks.push_back(task);
        trace!("task enqueued ({} queued)", tasks.len());
        drop(tasks);

        self.available.notify_one();
        Ok(())
    }

    /// Attempts to unlink the head task without blocking.
    ///
    /// Uses a non-blocking lock acquisition: if another thread currently
    /// holds the queue lock, this reports [`PopError::Empty`] immediately
    /// rather than waiting. Losing the race is indistinguishable from an
    /// empty queue on purpose; the caller simply retries later, keeping the
    /// common case low-latency.
    ///
    /// # Errors
    ///
    /// - [`PopError::Empty`] if no task was available or the lock was held
    /// - [`PopError::Closed`] once the queue has been closed
    pub fn try_pop(&self) -> Result<Task, PopError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(PopError::Closed);
        }

        let mut tasks = match self.tasks.try_lock() {
            Some(guard) => guard,
            None => return Err(PopError::Empty),
        };
        tasks.pop_front().ok_or(PopError::Empty)
    }

    /// Waits up to `timeout` for a task, parking on the queue's condition
    /// variable.
    ///
    /// # Errors
    ///
    /// - [`PopError::Empty`] if no task arrived within `timeout`
    /// - [`PopError::Closed`] as soon as the queue is closed, even if tasks
    ///   remain queued (remaining tasks are reclaimed by
    ///   [`drain`](Self::drain) at teardown, not handed out)
    pub fn pop_timeout(&self, timeout: Duration) -> Result<Task, PopError> {
        let deadline = Instant::now() + timeout;
        let mut tasks = self.tasks.lock();
        loop {
            if self.closed.load(Ordering::Acquire) {
                return Err(PopError::Closed);
            }
            if let Some(task) = tasks.pop_front() {
                return Ok(task);
            }
            if self.available.wait_until(&mut tasks, deadline).timed_out() {
                return if self.closed.load(Ordering::Acquire) {
                    Err(PopError::Closed)
                } else {
                    Err(PopError::Empty)
                };
            }
        }
    }

    /// Closes the queue and wakes every parked worker.
    ///
    /// Subsequent pushes fail and pops report [`PopError::Closed`]. Tasks
    /// still queued are not handed out; they stay in place until
    /// [`drain`](Self::drain) reclaims them.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        // Taking the lock orders the store against workers that checked the
        // flag and are about to park; the wakeup below then reaches them.
        drop(self.tasks.lock());
        self.available.notify_all();
    }

    /// Returns `true` if the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Removes and drops every remaining task without running it.
    ///
    /// Tolerates an already-empty queue. Returns how many tasks were
    /// dropped.
    pub fn drain(&self) -> usize {
        let mut tasks = self.tasks.lock();
        let dropped = tasks.len();
        tasks.clear();
        dropped
    }

    /// Current number of queued tasks.
    ///
    /// Maintained for observability and tests only; control flow never
    /// depends on it.
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Returns `true` if no tasks are queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
