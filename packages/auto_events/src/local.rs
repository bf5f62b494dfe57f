//! The single-threaded auto-reset event.
//!
//! Same signaling semantics as the thread-safe variant but with `RefCell`/`Rc`
//! internals and no locking, so it has lower overhead and cannot leave its thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::mem;
use std::rc::Rc;
use std::task::{Poll, Waker};

use crate::wait::LocalWaitFuture;

/// State of the event; same invariant as the thread-safe variant: `signaled` is never
/// true while `waiters` is non-empty.
#[derive(Debug)]
struct LocalEventState {
    /// True iff a signal has been raised and not yet consumed by any waiter.
    signaled: bool,

    /// Suspended callers, released one per `set()` in arrival order.
    waiters: VecDeque<Rc<LocalWaiter>>,
}

/// The completion handle for one suspended caller of the single-threaded event.
#[derive(Debug)]
pub(crate) struct LocalWaiter {
    state: RefCell<LocalWaiterState>,
}

#[derive(Debug)]
enum LocalWaiterState {
    /// Not yet released; holds the waker from the most recent poll, if any.
    Pending(Option<Waker>),

    /// Released by `set()`; the future observes readiness on its next poll.
    Complete,
}

impl LocalWaiter {
    fn new() -> Self {
        Self {
            state: RefCell::new(LocalWaiterState::Pending(None)),
        }
    }

    #[cfg_attr(test, mutants::skip)] // Critical primitive - causes test timeouts if tampered.
    fn complete(&self) {
        let previous_state =
            mem::replace(&mut *self.state.borrow_mut(), LocalWaiterState::Complete);

        let waker = match previous_state {
            LocalWaiterState::Pending(waker) => waker,
            LocalWaiterState::Complete => None,
        };

        // The borrow is released before waking; the waker may poll us right back.
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    // We are intended to be polled via Future::poll, so we have an equivalent signature here.
    #[cfg_attr(test, mutants::skip)] // Critical for code execution to occur in async contexts.
    pub(crate) fn poll(&self, waker: &Waker) -> Poll<()> {
        match &mut *self.state.borrow_mut() {
            LocalWaiterState::Pending(slot) => {
                // This is permitted by the Future API contract, in which case only the
                // waker from the most recent poll should be woken up on release.
                *slot = Some(waker.clone());
                Poll::Pending
            }
            LocalWaiterState::Complete => Poll::Ready(()),
        }
    }
}

/// A single-threaded awaitable auto-reset event.
///
/// Same semantics as [`AutoResetEvent`][crate::AutoResetEvent]: each
/// [`set()`][Self::set] releases exactly one waiter in FIFO order or records a single
/// pending signal, and signals never accumulate beyond one.
///
/// There is no wake policy to configure: everything to do with this event happens on
/// one thread, and the registered waker itself defers the continuation to the local
/// executor, so wakes are always delivered directly inside `set()`.
///
/// # Example
///
/// ```rust
/// use auto_events::LocalAutoResetEvent;
/// use futures::executor::block_on;
///
/// let event = LocalAutoResetEvent::new();
///
/// event.set();
/// block_on(event.wait()); // Completes immediately, consuming the signal.
/// ```
#[derive(Debug)]
pub struct LocalAutoResetEvent {
    state: RefCell<LocalEventState>,

    // Everything to do with this event is single-threaded.
    _single_threaded: PhantomData<*const ()>,
}

impl LocalAutoResetEvent {
    /// Creates a new unsignaled event.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auto_events::LocalAutoResetEvent;
    ///
    /// let event = LocalAutoResetEvent::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RefCell::new(LocalEventState {
                signaled: false,
                waiters: VecDeque::new(),
            }),
            _single_threaded: PhantomData,
        }
    }

    /// Returns a future that completes when this caller's signal arrives.
    ///
    /// If a signal is already pending, it is consumed and the returned future is
    /// complete from the start. Otherwise the caller is queued in `wait()` call order.
    ///
    /// As with the thread-safe variant, there is no cancellation: a dropped pending
    /// future stays queued and still absorbs one future [`set()`][Self::set] call.
    pub fn wait(&self) -> LocalWaitFuture {
        let mut state = self.state.borrow_mut();

        if state.signaled {
            state.signaled = false;
            return LocalWaitFuture::ready();
        }

        let waiter = Rc::new(LocalWaiter::new());
        state.waiters.push_back(Rc::clone(&waiter));
        LocalWaitFuture::waiting(waiter)
    }

    /// Delivers one signal, releasing the earliest waiter or recording a single
    /// pending signal if nobody is waiting.
    ///
    /// Calling `set()` while already signaled is a no-op - signals do not accumulate.
    #[cfg_attr(test, mutants::skip)] // Critical primitive - causes test timeouts if tampered.
    pub fn set(&self) {
        let to_release = {
            let mut state = self.state.borrow_mut();

            match state.waiters.pop_front() {
                Some(waiter) => Some(waiter),
                None => {
                    state.signaled = true;
                    None
                }
            }
        };

        // The state borrow is released first; the wakeup may reenter set() or wait().
        if let Some(waiter) = to_release {
            waiter.complete();
        }
    }
}

impl Default for LocalAutoResetEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::FutureExt;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use static_assertions::assert_not_impl_any;
    use testing::with_watchdog;

    use super::*;
    use crate::LocalWaitFuture;

    #[test]
    fn default_creates_unsignaled_event() {
        let event = LocalAutoResetEvent::default();
        assert!(event.wait().now_or_never().is_none());
    }

    #[test]
    fn set_then_wait_completes_without_suspending() {
        let event = LocalAutoResetEvent::new();

        event.set();

        assert!(event.wait().now_or_never().is_some());
        assert!(event.wait().now_or_never().is_none());
    }

    #[test]
    fn signals_do_not_accumulate() {
        let event = LocalAutoResetEvent::new();

        event.set();
        event.set();

        assert!(event.wait().now_or_never().is_some());
        assert!(event.wait().now_or_never().is_none());
    }

    #[test]
    fn waiters_released_in_fifo_order() {
        let event = LocalAutoResetEvent::new();

        let mut first = event.wait();
        let mut second = event.wait();

        event.set();
        assert!((&mut first).now_or_never().is_some());
        assert!((&mut second).now_or_never().is_none());

        event.set();
        assert!((&mut second).now_or_never().is_some());
    }

    #[test]
    fn abandoned_waiter_absorbs_next_set() {
        let event = LocalAutoResetEvent::new();

        drop(event.wait());
        event.set();

        assert!(event.wait().now_or_never().is_none());
    }

    #[test]
    fn wakes_task_on_local_executor() {
        with_watchdog(|| {
            let mut pool = LocalPool::new();
            let spawner = pool.spawner();

            let event = Rc::new(LocalAutoResetEvent::new());
            let completed = Rc::new(Cell::new(false));

            spawner
                .spawn_local({
                    let event = Rc::clone(&event);
                    let completed = Rc::clone(&completed);
                    async move {
                        event.wait().await;
                        completed.set(true);
                    }
                })
                .unwrap();

            // The task suspends on the first run; setting the event wakes it.
            pool.run_until_stalled();
            assert!(!completed.get());

            event.set();
            pool.run_until_stalled();
            assert!(completed.get());
        });
    }

    #[test]
    fn single_threaded_types() {
        assert_not_impl_any!(LocalAutoResetEvent: Send, Sync);
        assert_not_impl_any!(LocalWaitFuture: Send, Sync);
    }
}
