//! The scheduling seam used for deferred waiter wakeups.
//!
//! When an event is not configured for inline wakeups, releasing a waiter submits the
//! wakeup to a [`WakeScheduler`] instead of running it on the setter's call stack. The
//! scheduler is injectable so the primitive stays decoupled from any specific executor
//! and remains easy to test.

use std::sync::{Arc, LazyLock};

use futures::executor::ThreadPool;

// Starting the shared pool can only fail due to OS thread exhaustion, at which point
// the process cannot make progress anyway.
const ERR_POOL_START: &str = "failed to start the shared wakeup thread pool";

/// A deferred wakeup: resolves one released waiter when executed.
pub type Wakeup = Box<dyn FnOnce() + Send + 'static>;

/// Submits wakeup callbacks for execution off the caller's stack.
///
/// [`AutoResetEvent`][crate::AutoResetEvent] resolves released waiters through this trait
/// unless it was created with inline wakeups. Implement it to control where waiter
/// wakeups execute, e.g. to route them onto an application-owned executor or to capture
/// them in a test harness and run them manually.
pub trait WakeScheduler: Send + Sync + 'static {
    /// Schedules `wakeup` to run asynchronously, not on the current call stack.
    ///
    /// Implementations must eventually execute every submitted wakeup exactly once;
    /// dropping a wakeup strands the waiter it would have resolved.
    fn schedule(&self, wakeup: Wakeup);
}

/// The default [`WakeScheduler`], backed by a process-wide `futures` thread pool.
///
/// The pool is created lazily on first use and shared by every event that was not given
/// an explicit scheduler.
///
/// # Example
///
/// ```rust
/// use auto_events::{AutoResetEvent, ThreadPoolScheduler};
///
/// // Equivalent to `AutoResetEvent::new()`.
/// let event = AutoResetEvent::with_scheduler(ThreadPoolScheduler::shared());
/// event.set();
/// ```
#[derive(Debug)]
pub struct ThreadPoolScheduler {
    pool: ThreadPool,
}

static SHARED: LazyLock<Arc<ThreadPoolScheduler>> = LazyLock::new(|| {
    Arc::new(ThreadPoolScheduler {
        pool: ThreadPool::builder()
            .name_prefix("auto_events-wake-")
            .create()
            .expect(ERR_POOL_START),
    })
});

impl ThreadPoolScheduler {
    /// Returns the process-wide shared instance.
    ///
    /// # Panics
    ///
    /// Panics if the underlying thread pool cannot be started on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }
}

impl WakeScheduler for ThreadPoolScheduler {
    fn schedule(&self, wakeup: Wakeup) {
        self.pool.spawn_ok(async move { wakeup() });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use testing::with_watchdog;

    use super::*;

    #[test]
    fn shared_returns_same_instance() {
        let a = ThreadPoolScheduler::shared();
        let b = ThreadPoolScheduler::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn scheduled_wakeup_runs_off_the_calling_stack() {
        with_watchdog(|| {
            let scheduler = ThreadPoolScheduler::shared();
            let (tx, rx) = mpsc::channel();

            let calling_thread = std::thread::current().id();
            scheduler.schedule(Box::new(move || {
                drop(tx.send(std::thread::current().id()));
            }));

            let wakeup_thread = rx
                .recv_timeout(Duration::from_secs(5))
                .expect("wakeup was never executed");
            assert_ne!(wakeup_thread, calling_thread);
        });
    }
}
