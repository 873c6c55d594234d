//! One-shot expiry alarm for the worker pool.
//!
//! A pool can be created with an expiry duration and a handler; the handler
//! runs once, on its own thread, when the duration elapses, unless the
//! alarm is disarmed first. The alarm never tears the pool down itself; it
//! only notifies the caller.

use crate::core::{PoolError, Result};
use log::{debug, warn};
use parking_lot::{Condvar, Mutex};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Handler invoked when a pool's expiry alarm fires
pub type AlarmHandler = Arc<dyn Fn() + Send + Sync + 'static>;

struct AlarmState {
    disarmed: Mutex<bool>,
    changed: Condvar,
}

/// A one-shot timer thread created alongside the pool.
///
/// The timer thread waits on a condition variable until the deadline. If
/// [`disarm`](Self::disarm) is called first, the thread exits without
/// effect; otherwise the handler is invoked exactly once.
pub(crate) struct Alarm {
    state: Arc<AlarmState>,
}

impl Alarm {
    /// Spawns the timer thread and arms it for `duration`.
    pub(crate) fn arm(name_prefix: &str, duration: Duration, handler: AlarmHandler) -> Result<Self> {
        let state = Arc::new(AlarmState {
            disarmed: Mutex::new(false),
            changed: Condvar::new(),
        });
        let state_clone = Arc::clone(&state);

        thread::Builder::new()
            .name(format!("{}-alarm", name_prefix))
            .spawn(move || {
                Self::run(state_clone, duration, handler);
            })
            .map_err(|e| PoolError::alarm_with_source("cannot create alarm thread", e))?;

        debug!("expiry alarm armed for {:?}", duration);
        Ok(Self { state })
    }

    fn run(state: Arc<AlarmState>, duration: Duration, handler: AlarmHandler) {
        let deadline = Instant::now() + duration;

        let mut disarmed = state.disarmed.lock();
        while !*disarmed {
            if state.changed.wait_until(&mut disarmed, deadline).timed_out() {
                break;
            }
        }
        if *disarmed {
            debug!("expiry alarm disarmed before firing");
            return;
        }
        drop(disarmed);

        debug!("expiry alarm fired after {:?}", duration);
        if catch_unwind(AssertUnwindSafe(|| handler())).is_err() {
            warn!("expiry alarm handler panicked");
        }
    }

    /// Prevents the handler from firing if it has not fired yet.
    pub(crate) fn disarm(&self) {
        let mut disarmed = self.state.disarmed.lock();
        *disarmed = true;
        self.state.changed.notify_all();
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.disarm();
    }
}
