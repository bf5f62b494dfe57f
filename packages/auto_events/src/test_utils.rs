//! Testing utilities shared by the unit tests in this crate.

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::Waker;

use futures::task::ArcWake;

use crate::scheduler::{WakeScheduler, Wakeup};

/// A waker that records how many times it has been woken.
#[derive(Debug)]
pub(crate) struct CountingWaker {
    wakes: AtomicUsize,
}

impl CountingWaker {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            wakes: AtomicUsize::new(0),
        })
    }

    pub(crate) fn wake_count(&self) -> usize {
        self.wakes.load(Ordering::SeqCst)
    }

    pub(crate) fn waker(self: &Arc<Self>) -> Waker {
        futures::task::waker(Arc::clone(self))
    }
}

impl ArcWake for CountingWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.wakes.fetch_add(1, Ordering::SeqCst);
    }
}

/// A scheduler that captures submitted wakeups so tests can observe that nothing ran
/// synchronously and control exactly when the wakeups execute.
#[derive(Default)]
pub(crate) struct ManualScheduler {
    queue: Mutex<Vec<Wakeup>>,
}

impl ManualScheduler {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of captured wakeups that have not been run yet.
    pub(crate) fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Runs every captured wakeup, in submission order.
    pub(crate) fn run_all(&self) {
        let wakeups = mem::take(&mut *self.queue.lock().unwrap());

        for wakeup in wakeups {
            wakeup();
        }
    }
}

impl WakeScheduler for ManualScheduler {
    fn schedule(&self, wakeup: Wakeup) {
        self.queue.lock().unwrap().push(wakeup);
    }
}
