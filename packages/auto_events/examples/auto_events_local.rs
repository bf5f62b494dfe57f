//! Using the single-threaded event variant with a local executor.
//!
//! `LocalAutoResetEvent` has the same semantics as `AutoResetEvent` but uses
//! non-atomic internals and cannot leave its thread.

use std::rc::Rc;

use auto_events::LocalAutoResetEvent;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

fn main() {
    println!("=== Local Auto-Reset Event Example ===");

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let event = Rc::new(LocalAutoResetEvent::new());

    for task in 0..3 {
        spawner
            .spawn_local({
                let event = Rc::clone(&event);
                async move {
                    event.wait().await;
                    println!("  task {task}: released");
                }
            })
            .unwrap();
    }

    // All three tasks suspend; release them one signal at a time, in FIFO order.
    pool.run_until_stalled();

    for signal in 0..3 {
        println!("sending signal {signal}");
        event.set();
        pool.run_until_stalled();
    }

    println!("Example completed successfully!");
}
