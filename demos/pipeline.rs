//! Pull-Based Pipeline Example
//!
//! Demonstrates lazy sequence processing: building an operator pipeline over
//! an infinite sequence, limiting it with `take`, and consuming it safely.
//!
//! Run with: cargo run --example pipeline

use rivulet::prelude::*;
use rivulet::{ops, pipe};

fn main() -> Result<(), StreamError> {
    // Method chaining: each operator wraps the producer one layer deeper.
    // Nothing runs until a consumer drives the stream.
    let labeled = sequence(1u64, |n| n + 1)
        .map(|n| n * 2)
        .keep(|n| *n > 10)
        .reject(|n| *n > 20)
        .take(2)?
        .map(|n| n.to_string())
        .to_array()?;
    println!("chained:   {labeled:?}");

    // The same pipeline as a reusable point-free transform.
    let operation = pipe![
        ops::map(|n: u64| n * 2),
        ops::keep(|n| *n > 10),
        ops::reject(|n| *n > 20),
        ops::take(2),
        ops::map(|n: u64| n.to_string()),
    ];
    println!("piped:     {:?}", operation(sequence(1, |n| n + 1))?.to_array()?);

    // Finite sources carry their own limit, so no take is required.
    let squares = from_array(vec![1, 2, 3, 4, 5]).map(|n| n * n).to_array()?;
    println!("squares:   {squares:?}");

    // Unlimited streams refuse to materialize; the error names the fix.
    match sequence(1, |n: &u64| n + 1).to_array() {
        Ok(_) => unreachable!(),
        Err(e) => println!("unlimited: {e}"),
    }

    // A pipeline that can never produce a value trips the loop guard instead
    // of spinning forever.
    match sequence(1, |n: &u64| n + 1).keep(|_| false).take(1)?.to_array() {
        Ok(_) => unreachable!(),
        Err(e) => println!("stuck:     {e}"),
    }

    Ok(())
}
