//! Single-shot timer that coalesces bursts of triggers.
//!
//! A [`Debouncer`] owns one worker thread and at most one pending deadline.
//! Every [`trigger`](Debouncer::trigger) pushes the deadline out to `delay`
//! from now, so a burst of triggers fires the callback once, `delay` after
//! the last one. The callback runs on the worker thread, never twice at the
//! same time. A panicking callback is logged and the worker keeps serving
//! later triggers.
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    deadline: Option<Instant>,
    shutdown: bool,
    fired: u64,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    signal: Condvar,
}

/// Runs a callback once triggers stop arriving for `delay`.
///
/// Dropping the debouncer stops the worker; a pending run is discarded.
pub struct Debouncer {
    delay: Duration,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl Debouncer {
    /// Spawns the worker thread. Nothing runs until the first trigger.
    pub fn new<F>(delay: Duration, callback: F) -> Debouncer
    where
        F: FnMut() + Send + 'static,
    {
        let shared = Arc::new(Shared::default());
        let worker = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || run(shared, callback))
        };

        Debouncer {
            delay,
            shared,
            worker: Some(worker),
        }
    }

    /// Idle time between the last trigger and the run.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer, replacing any pending deadline.
    pub fn trigger(&self) {
        let mut state = self.shared.state.lock();
        state.deadline = Some(Instant::now() + self.delay);
        self.shared.signal.notify_one();
    }

    /// Drops the pending deadline. Returns whether one was pending. A
    /// callback already running is not interrupted.
    pub fn cancel(&self) -> bool {
        let mut state = self.shared.state.lock();
        let pending = state.deadline.take().is_some();
        self.shared.signal.notify_one();
        pending
    }

    /// Whether a deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().deadline.is_some()
    }

    /// Number of times the callback has started.
    pub fn fired(&self) -> u64 {
        self.shared.state.lock().fired
    }
}

fn run<F: FnMut()>(shared: Arc<Shared>, mut callback: F) {
    let mut state = shared.state.lock();

    loop {
        if state.shutdown {
            return;
        }

        let deadline = state.deadline;

        match deadline {
            None => shared.signal.wait(&mut state),
            Some(deadline) if Instant::now() >= deadline => {
                state.deadline = None;
                state.fired += 1;
                let result = MutexGuard::unlocked(&mut state, || {
                    panic::catch_unwind(AssertUnwindSafe(&mut callback))
                });
                if result.is_err() {
                    log::error!("Debounced callback panicked");
                }
            }
            Some(deadline) => {
                shared.signal.wait_until(&mut state, deadline);
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
            state.deadline = None;
            self.shared.signal.notify_one();
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Debounce worker panicked");
            }
        }
    }
}
