//! Basic example of auto-reset event signaling.
//!
//! This example demonstrates the core semantics: a signal releases exactly one wait
//! and then automatically resets, and signals never accumulate beyond one.

use auto_events::AutoResetEvent;
use futures::FutureExt;
use futures::executor::block_on;

fn main() {
    println!("=== Auto-Reset Event Basic Example ===");

    let event = AutoResetEvent::new();

    println!("Raising the signal with nobody waiting...");
    event.set();
    event.set(); // No-op: one signal is already pending.

    println!("First wait consumes the pending signal without suspending...");
    block_on(event.wait());

    let second_is_pending = event.wait().now_or_never().is_none();
    println!("Second wait finds the event reset (still pending): {second_is_pending}");

    println!("Example completed successfully!");
}
