//! Task value type: a unit of work plus an optional completion callback

use std::fmt;

/// A boxed unit of work that can be sent to a worker thread
pub type WorkFn = Box<dyn FnOnce() + Send + 'static>;

/// One unit of submitted work.
///
/// A task bundles a work closure with an optional completion closure. The
/// worker that picks the task up runs the work first, then the completion,
/// in that order, on the same thread. The completion always observes the
/// work's side effects and never runs concurrently with it.
///
/// [`run`](Self::run) consumes the task, so a task can only ever execute
/// once. Dropping a task that was never run discards both closures without
/// invoking them; that is how work still queued at pool shutdown is dropped.
///
/// # Example
///
/// ```rust
/// use taskpool::Task;
///
/// let task = Task::new(|| println!("working"))
///     .on_completion(|| println!("done"));
/// task.run();
/// ```
pub struct Task {
    work: WorkFn,
    completion: Option<WorkFn>,
}

impl Task {
    /// Create a task from a work closure, with no completion callback
    pub fn new<F>(work: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            work: Box::new(work),
            completion: None,
        }
    }

    /// Create a task with both a work closure and a completion callback
    pub fn with_completion<F, C>(work: F, completion: C) -> Self
    where
        F: FnOnce() + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        Self {
            work: Box::new(work),
            completion: Some(Box::new(completion)),
        }
    }

    /// Attach a completion callback, replacing any previous one
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn on_completion<C>(mut self, completion: C) -> Self
    where
        C: FnOnce() + Send + 'static,
    {
        self.completion = Some(Box::new(completion));
        self
    }

    /// Returns `true` if a completion callback is attached
    pub fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Execute the work closure, then the completion callback if present.
    ///
    /// Consumes the task; both closures are released when this returns.
    pub fn run(self) {
        (self.work)();
        if let Some(completion) = self.completion {
            completion();
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("has_completion", &self.has_completion())
            .finish()
    }
}
