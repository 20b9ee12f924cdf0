//! Tracing Example
//!
//! Demonstrates the optional `tracing` feature: with a subscriber installed,
//! consumers emit trace events for each driver step and subscriptions log
//! their lifecycle.
//!
//! Run with: cargo run --example tracing_demo --features tracing

use rivulet::prelude::*;

fn main() -> Result<(), StreamError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .init();

    let result = sequence(1u64, |n| n + 1)
        .map(|n| n * 3)
        .keep(|n| n % 2 == 0)
        .take(4)?
        .to_array()?;

    println!("result: {result:?}");
    Ok(())
}
