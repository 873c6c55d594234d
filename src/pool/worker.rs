//! Worker thread implementation

use crate::core::{PoolError, Result, Task};
use crate::queue::{PopError, TaskQueue};
use log::{debug, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicIsize, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of tasks executed to completion (work and callback)
    pub tasks_executed: AtomicU64,
    /// Total number of tasks that panicked mid-execution
    pub tasks_panicked: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the executed-task counter
    pub fn increment_executed(&self) {
        self.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the panicked-task counter
    pub fn increment_panicked(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total tasks executed
    pub fn get_tasks_executed(&self) -> u64 {
        self.tasks_executed.load(Ordering::Relaxed)
    }

    /// Get total tasks panicked
    pub fn get_tasks_panicked(&self) -> u64 {
        self.tasks_panicked.load(Ordering::Relaxed)
    }
}

/// A long-lived thread that repeatedly fetches and executes tasks.
///
/// A worker has no idle state distinct from running: between tasks it is
/// simply parked inside a bounded queue wait. It terminates only when the
/// queue it serves is closed, which it observes at a task boundary or while
/// parked, never in the middle of a task.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker bound to the shared queue.
    ///
    /// `poll_interval` bounds how long the worker parks between dequeue
    /// attempts; it is also the upper bound on how long a fully idle worker
    /// takes to notice that the queue was closed.
    pub(crate) fn spawn(
        id: usize,
        name_prefix: &str,
        queue: Arc<TaskQueue>,
        outstanding: Arc<AtomicIsize>,
        poll_interval: Duration,
    ) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, queue, outstanding, stats_clone, poll_interval);
            })
            .map_err(|e| PoolError::spawn_with_source(id, "cannot create worker thread", e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Main worker loop: fetch, execute, release, repeat.
    fn run(
        id: usize,
        queue: Arc<TaskQueue>,
        outstanding: Arc<AtomicIsize>,
        stats: Arc<WorkerStats>,
        poll_interval: Duration,
    ) {
        debug!("worker {} started", id);

        loop {
            // Fast path first; fall back to a bounded park when the queue
            // is empty or the lock was contended.
            let task = match queue.try_pop() {
                Ok(task) => task,
                Err(PopError::Empty) => match queue.pop_timeout(park_slice(poll_interval)) {
                    Ok(task) => task,
                    Err(PopError::Empty) => continue,
                    Err(PopError::Closed) => break,
                },
                Err(PopError::Closed) => break,
            };

            Self::execute(id, task, &stats);

            // The task and its closures are gone; only now does the work
            // count as finished for wait().
            outstanding.fetch_sub(1, Ordering::AcqRel);
        }

        debug!(
            "worker {} shutting down ({} tasks executed, {} panicked)",
            id,
            stats.get_tasks_executed(),
            stats.get_tasks_panicked()
        );
    }

    /// Execute a single task with panic protection.
    ///
    /// A panicking task must not take its worker down with it; the panic is
    /// contained, logged, and counted. A panic in the work closure skips the
    /// completion callback.
    fn execute(id: usize, task: Task, stats: &WorkerStats) {
        match catch_unwind(AssertUnwindSafe(move || task.run())) {
            Ok(()) => stats.increment_executed(),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                warn!("worker {}: task panicked: {}", id, panic_msg);
                stats.increment_panicked();
            }
        }
    }

    /// Join the worker thread, waiting at most `timeout` for it to finish.
    ///
    /// Returns `Ok(true)` once the thread is joined, `Ok(false)` if it was
    /// still busy when the timeout expired and had to be abandoned. An
    /// abandoned worker finishes its in-flight task and exits on its own;
    /// it is just no longer waited for.
    pub(crate) fn join_within(mut self, timeout: Duration) -> Result<bool> {
        let thread = match self.thread.take() {
            Some(thread) => thread,
            None => return Ok(true),
        };

        let start = Instant::now();
        loop {
            if thread.is_finished() {
                thread
                    .join()
                    .map_err(|_| PoolError::join(self.id, "worker panicked"))?;
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                warn!(
                    "worker {} still busy after {:?}; abandoning join",
                    self.id, timeout
                );
                return Ok(false);
            }
            thread::sleep(Duration::from_millis(1));
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // The pool joins workers explicitly during shutdown; reaching
            // this point means the worker was dropped some other way. Wait
            // briefly so a worker that already observed queue closure can
            // finish, but never hang.
            const DROP_TIMEOUT: Duration = Duration::from_secs(5);

            let start = Instant::now();
            while !thread.is_finished() {
                if start.elapsed() >= DROP_TIMEOUT {
                    warn!(
                        "worker {} did not finish within {:?} during drop; thread may be leaked",
                        self.id, DROP_TIMEOUT
                    );
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }
            if thread.join().is_err() {
                warn!("worker {} panicked during shutdown", self.id);
            }
        }
    }
}

/// One bounded park interval, jittered so idle workers do not wake in
/// lockstep.
fn park_slice(poll_interval: Duration) -> Duration {
    let max_jitter_ms = (poll_interval.as_millis() as u64 / 4).max(1);
    poll_interval + Duration::from_millis(fastrand::u64(0..max_jitter_ms))
}
