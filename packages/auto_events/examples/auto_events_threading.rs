//! Cross-thread ping-pong with two auto-reset events.
//!
//! Two threads alternate turns, each releasing the other via its own event. Every
//! signal releases exactly one wait, so the threads stay in lockstep without any
//! additional synchronization.

use std::sync::Arc;
use std::thread;

use auto_events::AutoResetEvent;
use futures::executor::block_on;

const ROUNDS: usize = 5;

fn main() {
    println!("=== Auto-Reset Event Threading Example ===");

    let ping = Arc::new(AutoResetEvent::new());
    let pong = Arc::new(AutoResetEvent::new());

    let responder = thread::spawn({
        let ping = Arc::clone(&ping);
        let pong = Arc::clone(&pong);
        move || {
            for round in 0..ROUNDS {
                block_on(ping.wait());
                println!("  responder: received ping {round}, sending pong");
                pong.set();
            }
        }
    });

    for round in 0..ROUNDS {
        println!("main: sending ping {round}");
        ping.set();
        block_on(pong.wait());
    }

    responder.join().unwrap();
    println!("Example completed successfully!");
}
