//! Demonstrates the two wakeup delivery policies.
//!
//! With inline wakeups, a released waiter is resolved on the stack of the thread that
//! called `set()`, so the completion is observable the moment `set()` returns. With
//! the default deferred policy, `set()` only submits the wakeup to a scheduler.

use auto_events::AutoResetEvent;
use futures::FutureExt;
use futures::executor::block_on;

fn main() {
    println!("=== Auto-Reset Event Wakeup Policy Example ===");

    println!("\n1. Inline wakeups:");
    let event = AutoResetEvent::with_inline_wakeups();
    let mut wait = event.wait();

    event.set();
    let completed = (&mut wait).now_or_never().is_some();
    println!("   waiter already complete when set() returned: {completed}");

    println!("\n2. Deferred wakeups (the default):");
    let event = AutoResetEvent::new();
    let wait = event.wait();

    event.set();
    // The wakeup is delivered via the shared thread pool; awaiting still works as
    // usual, the completion just does not happen on the setter's stack.
    block_on(wait);
    println!("   waiter completed after the scheduler delivered the wakeup");

    println!("\nExample completed successfully!");
}
