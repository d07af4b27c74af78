// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use rill::prelude::*;
use rill::RillError;
use rill_core::adapters::AnyElement;

#[test]
fn test_empty_source_terminal_results() -> anyhow::Result<()> {
    assert_eq!(sources::empty::<i64>().map_to_i64(|v| v).sum()?, 0);
    assert_eq!(sources::empty::<i64>().reduce(|a, b| a + b)?, None);
    assert!(sources::empty::<i64>().all_match(|_| false)?);
    assert!(sources::empty::<i64>().none_match(|_| true)?);
    assert!(!sources::empty::<i64>().any_match(|_| true)?);
    assert_eq!(sources::empty::<i64>().to_vec()?, Vec::<i64>::new());
    assert_eq!(sources::empty::<i64>().count()?, 0);
    assert_eq!(sources::empty::<i64>().find_first()?, None);
    Ok(())
}

#[test]
fn test_skip_past_the_end_is_empty() -> anyhow::Result<()> {
    let out = sources::from_vec(vec![1, 2, 3]).skip(10).to_vec()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_limit_zero_is_empty_and_terminates_immediately() -> anyhow::Result<()> {
    // even on an infinite source
    let out = sources::iterate(0i64, |n| n + 1).limit(0).to_vec()?;
    assert!(out.is_empty());

    let parallel = sources::iterate(0i64, |n| n + 1)
        .parallel()
        .limit(0)
        .to_vec()?;
    assert!(parallel.is_empty());
    Ok(())
}

#[test]
fn test_flat_map_to_empty_yields_empty() -> anyhow::Result<()> {
    let out = sources::from_vec(vec![1, 2, 3])
        .flat_map(|_| Vec::<i32>::new())
        .to_vec()?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_flat_map_expands_in_order() -> anyhow::Result<()> {
    let out = sources::from_vec(vec![1, 2, 3])
        .flat_map(|n| vec![n; n as usize])
        .to_vec()?;
    assert_eq!(out, vec![1, 2, 2, 3, 3, 3]);
    Ok(())
}

#[test]
fn test_single_element_reduce_returns_it_untouched() -> anyhow::Result<()> {
    let result = sources::from_vec(vec![99]).reduce(|_, _| unreachable!())?;
    assert_eq!(result, Some(99));
    Ok(())
}

#[test]
fn test_iterator_round_trip() -> anyhow::Result<()> {
    let stream = sources::from_iter((0..10).map(|n| n * n));
    let collected: Vec<i32> = stream.iter()?.collect();
    assert_eq!(collected, (0..10).map(|n| n * n).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_iterator_over_an_infinite_op_free_stream_stays_lazy() -> anyhow::Result<()> {
    let mut iter = sources::iterate(1i64, |n| n * 2).iter()?;
    let first_four: Vec<i64> = iter.by_ref().take(4).collect();
    assert_eq!(first_four, vec![1, 2, 4, 8]);
    Ok(())
}

#[test]
fn test_range_step_zero_is_an_illegal_argument() {
    let error = I32Stream::range_step(0, 10, 0).unwrap_err();
    assert!(matches!(error, RillError::IllegalArgument { .. }));
}

#[test]
fn test_primitive_boxing_trips_the_wire() -> anyhow::Result<()> {
    let before = rill_core::tripwire::trip_count();

    let out = I32Stream::range(0, 4).boxed().to_vec()?;

    assert_eq!(out, vec![0, 1, 2, 3]);
    assert!(rill_core::tripwire::trip_count() > before);
    Ok(())
}

#[test]
fn test_unboxing_the_wrong_shape_fails() {
    let erased = sources::from_vec(vec![
        Box::new(1i32) as AnyElement,
        Box::new(2.5f64) as AnyElement,
    ]);

    let error = erased.unbox::<i32>().to_vec().unwrap_err();

    assert!(matches!(error, RillError::ShapeMismatch { .. }));
}

#[test]
fn test_shared_supplier_rejects_a_second_terminal() -> anyhow::Result<()> {
    let supplier = SourceSupplier::from_splittable(rill_core::sources::VecSource::new(vec![1, 2]));

    let first = sources::from_shared_supplier(supplier.clone()).to_vec()?;
    let second = sources::from_shared_supplier(supplier).to_vec();

    assert_eq!(first, vec![1, 2]);
    assert!(matches!(second, Err(RillError::PipelineState { .. })));
    Ok(())
}

#[test]
fn test_collect_into_ready_made_collectors() -> anyhow::Result<()> {
    let as_vec = sources::from_vec(vec![3, 1, 2]).collect(collectors::to_vec())?;
    assert_eq!(as_vec, vec![3, 1, 2]);

    let as_set = sources::from_vec(vec![1, 1, 2]).collect(collectors::to_set())?;
    assert_eq!(as_set.len(), 2);

    let counted = sources::from_vec(vec![1, 1, 2])
        .parallel()
        .collect(collectors::counting())?;
    assert_eq!(counted, 3);
    Ok(())
}

#[test]
fn test_joining_and_grouping_collectors() -> anyhow::Result<()> {
    let joined = sources::from_vec(vec!["a", "b", "c"]).collect(collectors::joining("-"))?;
    assert_eq!(joined, "a-b-c");

    let parallel_joined = sources::from_vec(vec!["a"; 2_000])
        .parallel()
        .collect(collectors::joining("-"))?;
    assert_eq!(parallel_joined.len(), 2_000 * 2 - 1);

    let grouped = sources::from_vec(vec![1, 2, 3, 4, 5, 6])
        .collect(collectors::grouping_by(|n: &i32| n % 2))?;
    assert_eq!(grouped[&0], vec![2, 4, 6]);
    assert_eq!(grouped[&1], vec![1, 3, 5]);
    Ok(())
}

#[test]
fn test_custom_collector_contract() -> anyhow::Result<()> {
    let collector = Collector::new(
        String::new,
        |acc: &mut String, word: &str| {
            acc.push_str(word);
        },
        |mut left, right| {
            left.push_str(&right);
            left
        },
    );

    let joined = sources::from_vec(vec!["a", "b", "c"]).collect(collector)?;

    assert_eq!(joined, "abc");
    Ok(())
}
