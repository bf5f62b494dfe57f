//! `Future` implementations handed out by the wait operations.
//!
//! Each future either starts out complete (the caller consumed an already-pending
//! signal, so no completion handle is allocated) or co-owns one queued waiter: the
//! event retains the right to resolve the waiter, the future retains the right to
//! await it.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::local::LocalWaiter;
use crate::sync::Waiter;

/// A future that completes when [`AutoResetEvent::wait()`][crate::AutoResetEvent::wait]
/// observes its signal.
///
/// Completes with `()` exactly once and never fails; polling after completion keeps
/// returning readiness. Dropping a pending instance abandons the underlying waiter
/// without removing it from the event's queue (see the crate-level documentation on
/// known constraints).
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct WaitFuture {
    inner: WaitFutureInner,
}

#[derive(Debug)]
enum WaitFutureInner {
    /// The signal was already pending when the wait began.
    Ready,

    /// Queued behind zero or more earlier waiters; resolved by a later `set()`.
    Waiting(Arc<Waiter>),
}

impl WaitFuture {
    pub(crate) fn ready() -> Self {
        Self {
            inner: WaitFutureInner::Ready,
        }
    }

    pub(crate) fn waiting(waiter: Arc<Waiter>) -> Self {
        Self {
            inner: WaitFutureInner::Waiting(waiter),
        }
    }
}

impl Future for WaitFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &self.inner {
            WaitFutureInner::Ready => Poll::Ready(()),
            WaitFutureInner::Waiting(waiter) => waiter.poll(cx.waker()),
        }
    }
}

/// A future that completes when
/// [`LocalAutoResetEvent::wait()`][crate::LocalAutoResetEvent::wait] observes its
/// signal.
///
/// The single-threaded counterpart of [`WaitFuture`], with the same completion and
/// abandonment semantics.
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct LocalWaitFuture {
    inner: LocalWaitFutureInner,
}

#[derive(Debug)]
enum LocalWaitFutureInner {
    /// The signal was already pending when the wait began.
    Ready,

    /// Queued behind zero or more earlier waiters; resolved by a later `set()`.
    Waiting(Rc<LocalWaiter>),
}

impl LocalWaitFuture {
    pub(crate) fn ready() -> Self {
        Self {
            inner: LocalWaitFutureInner::Ready,
        }
    }

    pub(crate) fn waiting(waiter: Rc<LocalWaiter>) -> Self {
        Self {
            inner: LocalWaitFutureInner::Waiting(waiter),
        }
    }
}

impl Future for LocalWaitFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &self.inner {
            LocalWaitFutureInner::Ready => Poll::Ready(()),
            LocalWaitFutureInner::Waiting(waiter) => waiter.poll(cx.waker()),
        }
    }
}
