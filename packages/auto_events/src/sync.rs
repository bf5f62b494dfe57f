//! The thread-safe auto-reset event.

use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex};
use std::task::{Poll, Waker};

use crate::ERR_POISONED_LOCK;
use crate::scheduler::{ThreadPoolScheduler, WakeScheduler};
use crate::wait::WaitFuture;

/// State of the event, always accessed under the event lock.
///
/// Exactly one side can hold pending demand at a time: a raised signal and a queued
/// waiter immediately cancel out against each other, so `signaled` is never true while
/// `waiters` is non-empty.
#[derive(Debug)]
struct EventState {
    /// True iff a signal has been raised and not yet consumed by any waiter.
    signaled: bool,

    /// Suspended callers, released one per `set()` in arrival order.
    waiters: VecDeque<Arc<Waiter>>,
}

/// How a released waiter's wakeup is delivered.
#[derive(Clone)]
enum WakePolicy {
    /// Resolve the waiter on the stack of whoever called `set()`.
    Inline,

    /// Submit the resolution to a scheduler so the setter's thread is never
    /// hijacked to run waiter continuations.
    Deferred(Arc<dyn WakeScheduler>),
}

impl fmt::Debug for WakePolicy {
    #[cfg_attr(test, mutants::skip)] // No API contract for debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => f.write_str("Inline"),
            Self::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// The completion handle for one suspended caller.
///
/// The event retains the right to resolve it (exactly once); the caller's
/// [`WaitFuture`] retains the right to await it. Resolution and awaiting each take
/// the waiter's own lock, never the event lock.
#[derive(Debug)]
pub(crate) struct Waiter {
    state: Mutex<WaiterState>,
}

#[derive(Debug)]
enum WaiterState {
    /// Not yet released; holds the waker from the most recent poll, if any.
    Pending(Option<Waker>),

    /// Released by `set()`; the future observes readiness on its next poll.
    Complete,
}

impl Waiter {
    fn new() -> Self {
        Self {
            state: Mutex::new(WaiterState::Pending(None)),
        }
    }

    /// Resolves the handle, waking the most recently registered waker, if any.
    ///
    /// Idempotent in the sense that a second call finds no waker and changes nothing,
    /// though the event never calls it twice for the same waiter.
    #[cfg_attr(test, mutants::skip)] // Critical primitive - causes test timeouts if tampered.
    pub(crate) fn complete(&self) {
        let waker = {
            let mut state = self.state.lock().expect(ERR_POISONED_LOCK);

            match mem::replace(&mut *state, WaiterState::Complete) {
                WaiterState::Pending(waker) => waker,
                WaiterState::Complete => None,
            }
        };

        // We wake outside the lock so a waker that executes the continuation on this
        // very stack never runs under it.
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    // We are intended to be polled via Future::poll, so we have an equivalent signature here.
    #[cfg_attr(test, mutants::skip)] // Critical for code execution to occur in async contexts.
    pub(crate) fn poll(&self, waker: &Waker) -> Poll<()> {
        let mut state = self.state.lock().expect(ERR_POISONED_LOCK);

        match &mut *state {
            WaiterState::Pending(slot) => {
                // This is permitted by the Future API contract, in which case only the
                // waker from the most recent poll should be woken up on release.
                *slot = Some(waker.clone());
                Poll::Pending
            }
            WaiterState::Complete => Poll::Ready(()),
        }
    }
}

/// A thread-safe awaitable auto-reset event.
///
/// Each call to [`set()`][Self::set] releases exactly one waiter (earliest first), or
/// records a single pending signal if nobody is waiting; the signal automatically
/// resets once consumed. Additional `set()` calls while already signaled are no-ops,
/// so signals never accumulate beyond one.
///
/// The event is reusable indefinitely and may be shared freely across threads (e.g.
/// inside an [`Arc`]). For single-threaded use, see
/// [`LocalAutoResetEvent`][crate::LocalAutoResetEvent] which has lower overhead.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use auto_events::AutoResetEvent;
/// use futures::executor::block_on;
///
/// let event = Arc::new(AutoResetEvent::new());
///
/// let waiter = thread::spawn({
///     let event = Arc::clone(&event);
///     move || block_on(event.wait())
/// });
///
/// event.set();
/// waiter.join().unwrap();
/// ```
#[derive(Debug)]
pub struct AutoResetEvent {
    state: Mutex<EventState>,
    wake_policy: WakePolicy,
}

impl AutoResetEvent {
    fn with_wake_policy(wake_policy: WakePolicy) -> Self {
        Self {
            state: Mutex::new(EventState {
                signaled: false,
                waiters: VecDeque::new(),
            }),
            wake_policy,
        }
    }

    /// Creates a new unsignaled event with deferred wakeups.
    ///
    /// Released waiters are woken via the shared
    /// [`ThreadPoolScheduler`][crate::ThreadPoolScheduler], simulating classic
    /// blocking-event semantics: the thread calling [`set()`][Self::set] never runs
    /// waiter continuations itself.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auto_events::AutoResetEvent;
    /// use futures::executor::block_on;
    ///
    /// let event = AutoResetEvent::new();
    /// event.set();
    /// block_on(event.wait());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_wake_policy(WakePolicy::Deferred(ThreadPoolScheduler::shared()))
    }

    /// Creates a new unsignaled event that resolves waiters on the setter's call stack.
    ///
    /// This trades reentrancy isolation for lower latency: a waker that executes the
    /// waiter's continuation synchronously will run it inside [`set()`][Self::set].
    /// Both operations remain safe to call from within such a continuation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auto_events::AutoResetEvent;
    /// use futures::FutureExt;
    ///
    /// let event = AutoResetEvent::with_inline_wakeups();
    ///
    /// let wait = event.wait();
    /// event.set(); // The waiter is resolved before `set()` returns.
    /// assert!(wait.now_or_never().is_some());
    /// ```
    #[must_use]
    pub fn with_inline_wakeups() -> Self {
        Self::with_wake_policy(WakePolicy::Inline)
    }

    /// Creates a new unsignaled event that defers wakeups to the given scheduler.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auto_events::{AutoResetEvent, ThreadPoolScheduler};
    ///
    /// let event = AutoResetEvent::with_scheduler(ThreadPoolScheduler::shared());
    /// event.set();
    /// ```
    #[must_use]
    pub fn with_scheduler(scheduler: Arc<dyn WakeScheduler>) -> Self {
        Self::with_wake_policy(WakePolicy::Deferred(scheduler))
    }

    /// Returns a future that completes when this caller's signal arrives.
    ///
    /// If a signal is already pending, it is consumed and the returned future is
    /// complete from the start, without allocation or suspension. Otherwise the caller
    /// is queued and the future completes when a later [`set()`][Self::set] reaches it;
    /// waiters are served in the order `wait()` was called, regardless of when the
    /// futures are first polled.
    ///
    /// There is no timeout or cancellation: a pending future that is dropped without
    /// being awaited stays queued and still absorbs one future `set()` call, whose
    /// wakeup is then silently discarded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auto_events::AutoResetEvent;
    /// use futures::executor::block_on;
    ///
    /// let event = AutoResetEvent::new();
    ///
    /// event.set();
    /// block_on(event.wait()); // Completes immediately, consuming the signal.
    /// ```
    pub fn wait(&self) -> WaitFuture {
        let mut state = self.state.lock().expect(ERR_POISONED_LOCK);

        if state.signaled {
            state.signaled = false;
            return WaitFuture::ready();
        }

        let waiter = Arc::new(Waiter::new());
        state.waiters.push_back(Arc::clone(&waiter));
        WaitFuture::waiting(waiter)
    }

    /// Delivers one signal.
    ///
    /// If any waiters are queued, the earliest one is released; otherwise the event
    /// becomes signaled so the next [`wait()`][Self::wait] completes immediately.
    /// Calling `set()` while already signaled is a no-op - signals do not accumulate.
    ///
    /// Never blocks and never suspends; the waiter's wakeup is delivered per the
    /// event's wake policy, outside the event lock.
    ///
    /// # Example
    ///
    /// ```rust
    /// use auto_events::AutoResetEvent;
    ///
    /// let event = AutoResetEvent::new();
    /// event.set();
    /// event.set(); // No-op: one signal is already pending.
    /// ```
    #[cfg_attr(test, mutants::skip)] // Critical primitive - causes test timeouts if tampered.
    pub fn set(&self) {
        let to_release = {
            let mut state = self.state.lock().expect(ERR_POISONED_LOCK);

            match state.waiters.pop_front() {
                Some(waiter) => Some(waiter),
                None => {
                    state.signaled = true;
                    None
                }
            }
        };

        // Resolution happens outside the event lock so arbitrary continuation code
        // (which may reenter `set()` or `wait()`) never runs under it.
        if let Some(waiter) = to_release {
            match &self.wake_policy {
                WakePolicy::Inline => waiter.complete(),
                WakePolicy::Deferred(scheduler) => {
                    scheduler.schedule(Box::new(move || waiter.complete()));
                }
            }
        }
    }
}

impl Default for AutoResetEvent {
    fn default() -> Self {
        Self::new()
    }
}
