//! Worker pool implementation

use crate::core::{PoolError, Result, Task};
use crate::pool::alarm::{Alarm, AlarmHandler};
use crate::pool::worker::{Worker, WorkerStats};
use crate::queue::TaskQueue;
use crossbeam_utils::Backoff;
use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a worker pool
#[derive(Clone)]
pub struct PoolConfig {
    /// Number of worker threads (0 = number of CPUs)
    pub num_threads: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
    /// Upper bound on how long an idle worker parks between dequeue
    /// attempts. Default: 100ms
    ///
    /// Newly pushed tasks wake a parked worker immediately; this interval
    /// only bounds how long a fully idle worker takes to notice shutdown.
    pub poll_interval: Duration,
    /// How long `shutdown` waits for each worker to finish its in-flight
    /// task before abandoning the join. Default: 5s
    pub shutdown_timeout: Duration,
    /// Optional one-shot expiry alarm: duration and handler
    expiry: Option<(Duration, AlarmHandler)>,
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("num_threads", &self.num_threads)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field("poll_interval", &self.poll_interval)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .field(
                "expiry",
                &self.expiry.as_ref().map(|(d, _)| format!("{:?}", d)),
            )
            .finish()
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            thread_name_prefix: "worker".to_string(),
            poll_interval: Duration::from_millis(100),
            shutdown_timeout: Duration::from_secs(5),
            expiry: None,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with the specified number of threads
    #[must_use]
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: if num_threads == 0 {
                num_cpus::get()
            } else {
                num_threads
            },
            ..Default::default()
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the idle-worker park interval.
    ///
    /// # Panics
    ///
    /// Panics if interval is zero.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "poll interval must be non-zero");
        self.poll_interval = interval;
        self
    }

    /// Set how long `shutdown` waits for each worker's in-flight task.
    ///
    /// A worker still busy when the timeout expires is abandoned: it
    /// finishes its task and exits on its own, but `shutdown` no longer
    /// waits for it. This bounds teardown latency even with stuck tasks.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Arm a one-shot expiry alarm when the pool is created.
    ///
    /// The handler runs once, on a dedicated thread, `duration` after the
    /// pool finishes spawning its workers, unless the pool is shut down
    /// first, which disarms the alarm. The alarm never cancels the pool;
    /// it only notifies the caller.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taskpool::prelude::*;
    /// use std::time::Duration;
    ///
    /// # fn main() -> Result<()> {
    /// let config = PoolConfig::new(2)
    ///     .with_expiry(Duration::from_secs(60), || eprintln!("pool expired"));
    /// let pool = WorkerPool::with_config(config)?;
    /// # pool.shutdown()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_expiry<H>(mut self, duration: Duration, handler: H) -> Self
    where
        H: Fn() + Send + Sync + 'static,
    {
        self.expiry = Some((duration, Arc::new(handler)));
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(PoolError::invalid_config(
                "num_threads",
                "Number of threads must be greater than 0",
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(PoolError::invalid_config(
                "poll_interval",
                "Poll interval must be non-zero",
            ));
        }
        if let Some((duration, _)) = &self.expiry {
            if duration.is_zero() {
                return Err(PoolError::invalid_config(
                    "expiry",
                    "Expiry duration must be non-zero",
                ));
            }
        }
        Ok(())
    }
}

/// A fixed-size pool of worker threads fed from one FIFO submission queue.
///
/// All worker threads are spawned before the constructor returns; a failure
/// partway through unwinds everything already built, so a caller either
/// gets a fully usable pool or no pool at all.
///
/// # Teardown
///
/// [`shutdown`](Self::shutdown) cancels cooperatively: the queue is closed,
/// each worker stops at its next task boundary, and tasks still queued are
/// dropped without being executed. Work in flight is never aborted mid-task;
/// a worker that exceeds [`PoolConfig::shutdown_timeout`] is abandoned
/// rather than waited for.
///
/// # Caller contract
///
/// `shutdown` must not race with concurrent [`submit`](Self::submit) calls,
/// and no tasks may be submitted while [`wait`](Self::wait) is in flight:
/// the pool cannot distinguish "drained" from "draining while more
/// arrives". Both are documented limitations, not enforced internally.
///
/// # Example
///
/// ```rust
/// use taskpool::prelude::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let pool = WorkerPool::with_threads(4)?;
/// let counter = Arc::new(AtomicUsize::new(0));
///
/// for _ in 0..100 {
///     let counter = Arc::clone(&counter);
///     pool.submit(move || {
///         counter.fetch_add(1, Ordering::Relaxed);
///     })?;
/// }
///
/// pool.wait();
/// assert_eq!(counter.load(Ordering::Relaxed), 100);
/// pool.shutdown()?;
/// # Ok(())
/// # }
/// ```
pub struct WorkerPool {
    config: PoolConfig,
    queue: Arc<TaskQueue>,
    workers: RwLock<Vec<Worker>>,
    outstanding: Arc<AtomicIsize>,
    running: AtomicBool,
    total_tasks_submitted: AtomicU64,
    alarm: RwLock<Option<Alarm>>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .field("running", &self.running.load(Ordering::Relaxed))
            .field(
                "total_tasks_submitted",
                &self.total_tasks_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl WorkerPool {
    /// Create a worker pool with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(PoolConfig::default())
    }

    /// Create a worker pool with the specified number of threads
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(num_threads))
    }

    /// Create a worker pool with custom configuration.
    ///
    /// Spawns exactly `config.num_threads` worker threads and, if
    /// configured, arms the expiry alarm once every thread is confirmed
    /// running. On any failure (validation, thread spawn, alarm) the
    /// queue is closed and already-spawned workers are joined before the
    /// error is returned: no partial pool is ever observable.
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        let queue = Arc::new(TaskQueue::new());
        let outstanding = Arc::new(AtomicIsize::new(0));

        let mut workers = Vec::with_capacity(config.num_threads);
        for id in 0..config.num_threads {
            match Worker::spawn(
                id,
                &config.thread_name_prefix,
                Arc::clone(&queue),
                Arc::clone(&outstanding),
                config.poll_interval,
            ) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    Self::unwind_partial(&queue, workers, config.shutdown_timeout);
                    return Err(e);
                }
            }
        }

        // Armed only after every worker is confirmed spawned; an alarm
        // failure unwinds exactly like a spawn failure.
        let alarm = match &config.expiry {
            Some((duration, handler)) => {
                match Alarm::arm(&config.thread_name_prefix, *duration, Arc::clone(handler)) {
                    Ok(alarm) => Some(alarm),
                    Err(e) => {
                        Self::unwind_partial(&queue, workers, config.shutdown_timeout);
                        return Err(e);
                    }
                }
            }
            None => None,
        };

        debug!(
            "worker pool '{}' started with {} threads",
            config.thread_name_prefix, config.num_threads
        );

        Ok(Self {
            config,
            queue,
            workers: RwLock::new(workers),
            outstanding,
            running: AtomicBool::new(true),
            total_tasks_submitted: AtomicU64::new(0),
            alarm: RwLock::new(alarm),
        })
    }

    /// Tear down a half-built pool: close the queue so spawned workers
    /// exit, then join them.
    fn unwind_partial(queue: &TaskQueue, workers: Vec<Worker>, timeout: Duration) {
        queue.close();
        for worker in workers {
            let _ = worker.join_within(timeout);
        }
    }

    /// Submit a work closure to the pool
    pub fn submit<F>(&self, work: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit_task(Task::new(work))
    }

    /// Submit a work closure with a completion callback.
    ///
    /// The completion callback runs after the work closure, on the same
    /// worker thread, so it observes all of the work's side effects.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taskpool::prelude::*;
    ///
    /// # fn main() -> Result<()> {
    /// let pool = WorkerPool::with_threads(2)?;
    /// pool.submit_with_completion(
    ///     || println!("working"),
    ///     || println!("done"),
    /// )?;
    /// pool.wait();
    /// # pool.shutdown()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_with_completion<F, C>(&self, work: F, completion: C) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.submit_task(Task::with_completion(work, completion))
    }

    /// Submit an already-constructed [`Task`].
    ///
    /// The outstanding-task counter is incremented only after the enqueue
    /// succeeds, so [`wait`](Self::wait) never counts work that no worker
    /// can reach.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotRunning`] after `shutdown`
    /// - [`PoolError::ShuttingDown`] if the submission lost the race with a
    ///   concurrent teardown
    pub fn submit_task(&self, task: Task) -> Result<()> {
        if !self.running.load(Ordering::Acquire) {
            return Err(PoolError::not_running(&self.config.thread_name_prefix));
        }

        match self.queue.push(task) {
            Ok(()) => {
                self.outstanding.fetch_add(1, Ordering::AcqRel);
                self.total_tasks_submitted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(_rejected) => Err(PoolError::shutting_down(self.queue.len())),
        }
    }

    /// Block until every submitted task has finished executing.
    ///
    /// Polls the outstanding-task counter, spinning briefly before backing
    /// off to short sleeps. Worker threads are never blocked by a waiter.
    ///
    /// Caller contract: do not submit concurrently with `wait`; the count
    /// being polled cannot tell "drained" apart from "still arriving".
    pub fn wait(&self) {
        let backoff = Backoff::new();
        while self.outstanding.load(Ordering::Acquire) > 0 {
            if backoff.is_completed() {
                std::thread::sleep(Duration::from_millis(1));
            } else {
                backoff.snooze();
            }
        }
    }

    /// Get the number of worker threads
    pub fn num_threads(&self) -> usize {
        self.config.num_threads
    }

    /// Check if the pool is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of tasks currently queued (not yet picked up by a worker)
    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    /// Number of tasks submitted but not yet finished executing.
    ///
    /// Transiently inexact while submissions are in flight; exact once all
    /// `submit` calls have returned.
    pub fn outstanding_tasks(&self) -> usize {
        self.outstanding.load(Ordering::Acquire).max(0) as usize
    }

    /// Get total number of tasks submitted
    pub fn total_tasks_submitted(&self) -> u64 {
        self.total_tasks_submitted.load(Ordering::Relaxed)
    }

    /// Get statistics for all workers.
    ///
    /// Returns an empty vector after `shutdown`.
    pub fn worker_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.workers.read().iter().map(|w| w.stats()).collect()
    }

    /// Get total tasks executed across all workers
    pub fn total_tasks_executed(&self) -> u64 {
        let workers = self.workers.read();
        workers.iter().map(|w| w.stats().get_tasks_executed()).sum()
    }

    /// Get total tasks panicked across all workers
    pub fn total_tasks_panicked(&self) -> u64 {
        let workers = self.workers.read();
        workers.iter().map(|w| w.stats().get_tasks_panicked()).sum()
    }

    /// Shut the pool down and join every worker thread.
    ///
    /// 1. Stops accepting new submissions
    /// 2. Disarms the expiry alarm, if one was configured and has not fired
    /// 3. Closes the queue, the cooperative cancellation signal; tasks
    ///    still queued are dropped **unexecuted**
    /// 4. Joins each worker, waiting at most
    ///    [`PoolConfig::shutdown_timeout`] for its in-flight task
    ///
    /// Idempotent: repeated calls return `Ok(())` immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Join`] if a worker thread panicked (all other
    /// workers are still joined first).
    pub fn shutdown(&self) -> Result<()> {
        // Only the first caller performs the teardown
        if self
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        if let Some(alarm) = self.alarm.write().take() {
            alarm.disarm();
        }

        self.queue.close();
        let dropped = self.queue.drain();
        if dropped > 0 {
            debug!("dropping {} pending tasks unexecuted", dropped);
            // Dropped tasks will never decrement the counter themselves.
            self.outstanding
                .fetch_sub(dropped as isize, Ordering::AcqRel);
        }

        let workers = std::mem::take(&mut *self.workers.write());
        let mut abandoned = 0usize;
        let mut first_err = None;
        for worker in workers {
            match worker.join_within(self.config.shutdown_timeout) {
                Ok(true) => {}
                Ok(false) => abandoned += 1,
                Err(e) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        if abandoned > 0 {
            warn!(
                "worker pool '{}' shut down with {} worker(s) abandoned mid-task",
                self.config.thread_name_prefix, abandoned
            );
        } else {
            debug!(
                "worker pool '{}' shut down cleanly",
                self.config.thread_name_prefix
            );
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.running.load(Ordering::Acquire) {
            if let Err(e) = self.shutdown() {
                warn!(
                    "failed to shut down worker pool '{}' during drop: {}",
                    self.config.thread_name_prefix, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_pool_creation() {
        let pool = WorkerPool::new().expect("failed to create pool");
        assert!(pool.is_running());
        assert_eq!(pool.num_threads(), num_cpus::get());

        pool.shutdown().expect("failed to shutdown pool");
        assert!(!pool.is_running());
    }

    #[test]
    fn test_pool_with_threads() {
        let pool = WorkerPool::with_threads(4).expect("failed to create pool");
        assert_eq!(pool.num_threads(), 4);
        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_task_execution() {
        let pool = WorkerPool::with_threads(2).expect("failed to create pool");
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .expect("failed to submit task");
        }

        pool.wait();
        assert_eq!(counter.load(Ordering::Relaxed), 10);
        assert_eq!(pool.total_tasks_submitted(), 10);
        assert_eq!(pool.total_tasks_executed(), 10);

        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_completion_runs_after_work_on_same_thread() {
        let pool = WorkerPool::with_threads(1).expect("failed to create pool");
        let events = Arc::new(Mutex::new(Vec::new()));

        let work_events = Arc::clone(&events);
        let done_events = Arc::clone(&events);
        pool.submit_with_completion(
            move || {
                work_events
                    .lock()
                    .unwrap()
                    .push(("work", thread::current().id()));
            },
            move || {
                done_events
                    .lock()
                    .unwrap()
                    .push(("completion", thread::current().id()));
            },
        )
        .expect("failed to submit task");

        pool.wait();
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "work");
        assert_eq!(events[1].0, "completion");
        assert_eq!(events[0].1, events[1].1);

        drop(events);
        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_wait_with_no_tasks_returns_immediately() {
        let pool = WorkerPool::with_threads(2).expect("failed to create pool");
        let start = Instant::now();
        pool.wait();
        assert!(start.elapsed() < Duration::from_millis(100));
        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_submit_after_shutdown() {
        let pool = WorkerPool::with_threads(2).expect("failed to create pool");
        pool.shutdown().expect("failed to shutdown pool");

        let result = pool.submit(|| {});
        assert!(matches!(result, Err(PoolError::NotRunning { .. })));
    }

    #[test]
    fn test_double_shutdown() {
        let pool = WorkerPool::with_threads(2).expect("failed to create pool");
        pool.shutdown().expect("first shutdown failed");
        pool.shutdown().expect("second shutdown failed");
    }

    #[test]
    fn test_shutdown_drops_pending_tasks() {
        let config = PoolConfig::new(1).with_shutdown_timeout(Duration::from_millis(100));
        let pool = WorkerPool::with_config(config).expect("failed to create pool");

        let (started_tx, started_rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        // Occupy the lone worker
        pool.submit(move || {
            started_tx.send(()).unwrap();
            let _ = release_rx.recv();
        })
        .expect("failed to submit blocking task");
        started_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("blocking task should start");

        // These can never be picked up before shutdown
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..5 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .expect("failed to submit task");
        }

        pool.shutdown().expect("failed to shutdown pool");
        let _ = release_tx.send(());

        // Pending tasks were dropped, not executed
        thread::sleep(Duration::from_millis(100));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(pool.outstanding_tasks(), 0);
    }

    #[test]
    fn test_concurrent_submit() {
        let pool = Arc::new(WorkerPool::with_threads(4).expect("failed to create pool"));
        let counter = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        for _ in 0..10 {
            let pool = Arc::clone(&pool);
            let counter = Arc::clone(&counter);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    let counter = Arc::clone(&counter);
                    pool.submit(move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                    })
                    .expect("failed to submit task");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("submitter thread panicked");
        }

        pool.wait();
        assert_eq!(counter.load(Ordering::Relaxed), 1000);
        assert_eq!(pool.total_tasks_submitted(), 1000);

        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_panicking_task_does_not_poison_pool() {
        let pool = WorkerPool::with_threads(2).expect("failed to create pool");

        for _ in 0..3 {
            pool.submit(|| panic!("intentional panic for testing"))
                .expect("failed to submit task");
        }

        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .expect("failed to submit task");
        }

        pool.wait();
        assert_eq!(counter.load(Ordering::Relaxed), 10);
        assert_eq!(pool.total_tasks_panicked(), 3);
        assert_eq!(pool.total_tasks_executed(), 10);

        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_expiry_alarm_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);

        let config = PoolConfig::new(1).with_expiry(Duration::from_millis(30), move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        let pool = WorkerPool::with_config(config).expect("failed to create pool");

        thread::sleep(Duration::from_millis(200));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // The alarm does not cancel the pool
        assert!(pool.is_running());
        pool.shutdown().expect("failed to shutdown pool");
    }

    #[test]
    fn test_shutdown_disarms_expiry_alarm() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);

        let config = PoolConfig::new(1).with_expiry(Duration::from_millis(200), move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        let pool = WorkerPool::with_config(config).expect("failed to create pool");

        pool.shutdown().expect("failed to shutdown pool");
        thread::sleep(Duration::from_millis(300));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_config_builder() {
        let config = PoolConfig::new(8)
            .with_thread_name_prefix("crunch")
            .with_poll_interval(Duration::from_millis(50))
            .with_shutdown_timeout(Duration::from_secs(1));

        assert_eq!(config.num_threads, 8);
        assert_eq!(config.thread_name_prefix, "crunch");
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_zero_threads_defaults_to_cpus() {
        let config = PoolConfig::new(0);
        assert_eq!(config.num_threads, num_cpus::get());
    }

    #[test]
    fn test_config_validate_rejects_zero_threads() {
        let config = PoolConfig {
            num_threads: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "poll interval must be non-zero")]
    fn test_poll_interval_zero_panics() {
        let _ = PoolConfig::new(2).with_poll_interval(Duration::ZERO);
    }

    #[test]
    fn test_config_validate_rejects_zero_expiry() {
        let config = PoolConfig::new(2).with_expiry(Duration::ZERO, || {});
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_drop_shuts_down() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::with_threads(2).expect("failed to create pool");
            for _ in 0..10 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                })
                .expect("failed to submit task");
            }
            pool.wait();
        }
        // Pool dropped without an explicit shutdown; workers are joined and
        // all waited-for work ran.
        assert_eq!(counter.load(Ordering::Relaxed), 10);
    }
}
