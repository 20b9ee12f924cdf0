//! End-to-end operator stacking over the pull-based stream.
//!
//! Method chaining and `pipe!` composition build the same producer stack, so
//! every pipeline here is asserted both ways.

use rivulet::prelude::*;
use rivulet::{ops, pipe};

#[test]
fn full_pipeline_via_method_chaining() {
    let result = sequence(1u64, |n| n + 1)
        .map(|n| n * 2)
        .keep(|n| *n > 10)
        .reject(|n| *n > 20)
        .take(2)
        .unwrap()
        .map(|n| n.to_string())
        .to_array()
        .unwrap();

    assert_eq!(result, vec!["12", "14"]);
}

#[test]
fn full_pipeline_via_pipe() {
    let operation = pipe![
        ops::map(|n: u64| n * 2),
        ops::keep(|n| *n > 10),
        ops::reject(|n| *n > 20),
        ops::take(2),
        ops::map(|n: u64| n.to_string()),
    ];

    let result = operation(sequence(1, |n| n + 1)).unwrap();
    assert_eq!(result.to_array().unwrap(), vec!["12", "14"]);
}

#[test]
fn pipelines_compose_with_each_other() {
    let double_evens = pipe![ops::map(|n: u64| n * 2), ops::keep(|n| n % 4 == 0)];
    let first_three = pipe![double_evens, ops::take(3)];

    let result = first_three(sequence(1, |n| n + 1)).unwrap();
    assert_eq!(result.to_array().unwrap(), vec![4, 8, 12]);
}

#[test]
fn take_while_stops_at_first_failure() {
    let result = sequence(1, |n| n + 1)
        .map(|n| if n == 4 { 0 } else { n })
        .take_while(|n| *n > 0)
        .to_array_unchecked()
        .unwrap();

    assert_eq!(result, vec![1, 2, 3]);
}

#[test]
fn take_until_is_take_while_negated() {
    let until = sequence(1, |n| n + 1)
        .take_until(|n| *n >= 4)
        .to_array_unchecked()
        .unwrap();
    let while_not = sequence(1, |n| n + 1)
        .take_while(|n| *n < 4)
        .to_array_unchecked()
        .unwrap();

    assert_eq!(until, while_not);
    assert_eq!(until, vec![1, 2, 3]);
}

#[test]
fn keep_skips_but_take_while_ends() {
    // keep passes over non-matching elements; take_while terminates on the
    // first one.
    let kept = sequence(1, |n| n + 1)
        .keep(|n| n % 2 == 0)
        .take(3)
        .unwrap()
        .to_array()
        .unwrap();
    assert_eq!(kept, vec![2, 4, 6]);

    let prefix = sequence(1, |n| n + 1)
        .take(3)
        .unwrap()
        .take_while(|n| n % 2 == 0)
        .to_array()
        .unwrap();
    assert_eq!(prefix, Vec::<i32>::new());
}

#[test]
fn from_array_streams_are_inherently_limited() {
    let result = from_array(vec![1, 2, 3, 4])
        .map(|n| n * 10)
        .to_array()
        .unwrap();

    assert_eq!(result, vec![10, 20, 30, 40]);
}

#[test]
fn unlimited_stream_refuses_to_materialize() {
    let result = sequence(1, |n: &i32| n + 1).map(|n| n * 2).to_array();
    assert_eq!(result.unwrap_err(), StreamError::Unsafe);
}

#[test]
fn take_zero_is_rejected_up_front() {
    use std::cell::Cell;
    use std::rc::Rc;

    let calls = Rc::new(Cell::new(0));
    let ticks = Rc::clone(&calls);
    let stream = from_fn(move || {
        ticks.set(ticks.get() + 1);
        0
    });

    let result = stream.take(0);
    assert_eq!(result.unwrap_err(), StreamError::UnsafeNumber(0));
    // Validation happens before any evaluation; the generator never runs.
    assert_eq!(calls.get(), 0);
}

#[test]
fn everything_filtered_stream_trips_the_loop_guard() {
    let result = sequence(1, |n: &i32| n + 1)
        .keep(|_| false)
        .take(1)
        .unwrap()
        .to_array();

    assert_eq!(result.unwrap_err(), StreamError::PossibleInfiniteLoop);
}

#[test]
fn loop_guard_ceiling_is_configurable() {
    // 50 consecutive skips fits under a ceiling of 100 but not under 10.
    let sparse = sequence(1u64, |n| n + 1).keep(|n| n % 50 == 0).take(2).unwrap();

    assert_eq!(sparse.to_array_with(100).unwrap(), vec![50, 100]);
    assert_eq!(
        sparse.to_array_with(10).unwrap_err(),
        StreamError::PossibleInfiniteLoop
    );
}

#[test]
fn later_take_overrides_earlier_take() {
    let result = sequence(1, |n: &i32| n + 1)
        .take(2)
        .unwrap()
        .take(5)
        .unwrap()
        .to_array()
        .unwrap();

    assert_eq!(result, vec![1, 2, 3, 4, 5]);
}

#[test]
fn streams_are_reusable_after_consumption() {
    let stream = sequence(1, |n: &i32| n + 1).take(3).unwrap();

    assert_eq!(stream.to_array().unwrap(), vec![1, 2, 3]);
    assert_eq!(stream.to_array().unwrap(), vec![1, 2, 3]);
}

#[test]
fn each_visits_in_order() {
    let mut seen = Vec::new();
    sequence(1, |n: &i32| n + 1)
        .take(4)
        .unwrap()
        .each(|n| seen.push(n))
        .unwrap();

    assert_eq!(seen, vec![1, 2, 3, 4]);
}

#[test]
fn subscribe_with_runs_completion_callback() {
    use std::cell::Cell;
    use std::rc::Rc;

    let completed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&completed);

    let mut seen = Vec::new();
    sequence(1, |n: &i32| n + 1)
        .take(2)
        .unwrap()
        .subscribe_with(
            |n| seen.push(n),
            SubscribeOptions::new().on_complete(move || flag.set(true)),
        )
        .unwrap();

    assert_eq!(seen, vec![1, 2]);
    assert!(completed.get());
}

#[test]
fn from_fn_repeats_its_producer() {
    use std::cell::Cell;
    use std::rc::Rc;

    let counter = Rc::new(Cell::new(0));
    let state = Rc::clone(&counter);
    let result = from_fn(move || {
        state.set(state.get() + 1);
        state.get()
    })
    .take(3)
    .unwrap()
    .to_array()
    .unwrap();

    assert_eq!(result, vec![1, 2, 3]);
}
