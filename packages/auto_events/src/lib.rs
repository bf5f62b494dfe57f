//! Awaitable auto-reset event signaling for concurrent environments.
//!
//! An auto-reset event is a signal that releases exactly one waiter per call to
//! [`set()`][AutoResetEvent::set] and then automatically reverts to the unsignaled state.
//! It mirrors the classic thread-blocking auto-reset event but replaces blocking waits
//! with `Future` suspension points, so no thread is tied up while waiting.
//!
//! Both single-threaded and thread-safe variants are available:
//! - [`AutoResetEvent`] - Thread-safe variant that can be shared across threads
//! - [`LocalAutoResetEvent`] - Single-threaded variant with lower overhead
//!
//! # Semantics
//!
//! - [`wait()`][AutoResetEvent::wait] consumes a pending signal immediately, or suspends
//!   until the next signal arrives.
//! - [`set()`][AutoResetEvent::set] releases the earliest waiter (FIFO order), or records
//!   a single pending signal if nobody is waiting. Signals do not accumulate - setting an
//!   already-signaled event is a no-op.
//! - The event is reusable indefinitely; there is no terminal state.
//!
//! # Wakeup delivery
//!
//! By default, a released waiter is woken asynchronously via a shared thread pool, so the
//! thread calling `set()` is never hijacked to run waiter continuations. Construct the
//! event with [`AutoResetEvent::with_inline_wakeups()`] to instead wake the waiter on the
//! setter's own call stack, trading reentrancy isolation for lower latency. A custom
//! [`WakeScheduler`] can be injected via [`AutoResetEvent::with_scheduler()`].
//!
//! # Thread-safe Example
//!
//! ```rust
//! use auto_events::AutoResetEvent;
//! use futures::executor::block_on;
//!
//! let event = AutoResetEvent::new();
//!
//! // Raise the signal; nobody is waiting, so it is remembered.
//! event.set();
//!
//! // The next wait consumes the pending signal without suspending.
//! block_on(event.wait());
//! ```
//!
//! # Single-threaded Example
//!
//! ```rust
//! use auto_events::LocalAutoResetEvent;
//! use futures::executor::block_on;
//!
//! let event = LocalAutoResetEvent::new();
//!
//! event.set();
//! block_on(event.wait());
//! ```
//!
//! # Known constraints
//!
//! There is no timeout or cancellation support. A pending [`WaitFuture`] that is dropped
//! without being awaited stays in the waiter queue and will still absorb one future
//! `set()` call, with the wakeup silently discarded. Callers that abandon waits without
//! a matching `set()` leak one queue entry per abandoned wait.

mod constants;
mod local;
mod scheduler;
mod sync;
mod wait;

#[cfg(test)]
mod test_utils;

pub(crate) use self::constants::ERR_POISONED_LOCK;

pub use self::wait::{LocalWaitFuture, WaitFuture};
pub use self::local::LocalAutoResetEvent;
pub use self::scheduler::{ThreadPoolScheduler, WakeScheduler, Wakeup};
pub use self::sync::AutoResetEvent;
