//! Push-Based Event Stream Example
//!
//! Demonstrates driving the same operator surface from a push-based source:
//! an event emitter feeds values into a stream, and `take` both limits the
//! output and detaches the listener when the limit is reached.
//!
//! Run with: cargo run --example events

use std::rc::Rc;

use rivulet::prelude::*;
use rivulet::testing::EventEmitter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), StreamError> {
    let emitter = Rc::new(EventEmitter::new());

    // Collect the first five doubled even ticks, then auto-unsubscribe.
    let doubled_evens = from_event(Rc::clone(&emitter), "tick")
        .keep(|n: &i32| n % 2 == 0)
        .map(|n| n * 2)
        .take(5)?;

    let collected = doubled_evens.to_array();
    for n in 1..=20 {
        emitter.emit("tick", n);
    }
    println!("collected: {:?}", collected.await?);
    println!("listeners: {}", emitter.listener_count("tick"));

    // Per-value delivery with a completion callback.
    let first_three = from_event(Rc::clone(&emitter), "tick").take(3)?;
    first_three.subscribe_with(
        |n| println!("received:  {n}"),
        SubscribeOptions::new().on_complete(|| println!("done")),
    );
    for n in 100..110 {
        emitter.emit("tick", n);
    }

    Ok(())
}
