// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use rill_core::sources::{RangeI64Source, VecSource};
use rill_core::Characteristics;
use rill_pipeline::ops::{DistinctOp, FilterOp, MapOp, SliceOp, SortedOp};
use rill_pipeline::{terminal, Pipeline};
use rill_test_utils::ScriptedSource;

#[test]
fn test_parallel_fold_matches_sequential() -> anyhow::Result<()> {
    let items: Vec<i64> = (0..10_000).collect();

    let sequential = terminal::fold(
        Pipeline::from_splittable(VecSource::new(items.clone())),
        0i64,
        |acc, v| acc + v,
        |l, r| l + r,
    )?;
    let parallel = terminal::fold(
        Pipeline::from_splittable(VecSource::new(items)).parallel(),
        0i64,
        |acc, v| acc + v,
        |l, r| l + r,
    )?;

    assert_eq!(sequential, parallel);
    Ok(())
}

#[test]
fn test_parallel_collect_preserves_encounter_order() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 5_000))
        .parallel()
        .append(MapOp::new(|v: i64| v * 3));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, (0..5_000).map(|v| v * 3).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_unsplittable_source_runs_as_a_single_leaf() -> anyhow::Result<()> {
    // Arrange
    let (source, stats) = ScriptedSource::new(
        (0..100).collect(),
        Characteristics::SIZED | Characteristics::ORDERED,
    );
    let pipeline = Pipeline::from_splittable(source.unsplittable()).parallel();

    // Act
    let out = terminal::collect_node(pipeline, true)?.into_vec();

    // Assert: identical to the sequential result, with zero splits
    assert_eq!(out, (0..100).collect::<Vec<_>>());
    assert_eq!(stats.splits(), 0);
    assert_eq!(stats.advances(), 100);
    Ok(())
}

#[test]
fn test_parallel_sorted_materializes_a_boundary() -> anyhow::Result<()> {
    // Arrange: a map downstream of the boundary must run exactly once
    // per element of the boundary-collected node
    let downstream_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&downstream_calls);

    let mut items: Vec<i64> = (0..2_000).rev().collect();
    items.extend(0..2_000); // duplicates, still unsorted
    let expected_len = items.len();

    let pipeline = Pipeline::from_splittable(VecSource::new(items))
        .parallel()
        .append(SortedOp::natural())
        .append(MapOp::new(move |v: i64| {
            counter.fetch_add(1, Ordering::Relaxed);
            v
        }));

    // Act
    let out = terminal::collect_node(pipeline, true)?.into_vec();

    // Assert
    let mut expected: Vec<i64> = (0..2_000).rev().collect();
    expected.extend(0..2_000);
    expected.sort();
    assert_eq!(out, expected);
    assert_eq!(downstream_calls.load(Ordering::Relaxed), expected_len);
    Ok(())
}

#[test]
fn test_parallel_distinct_on_ordered_input_keeps_first_occurrences() -> anyhow::Result<()> {
    let mut items = Vec::new();
    for round in 0..4 {
        items.extend((0..500).map(|v| v + round * 250));
    }

    let pipeline = Pipeline::from_splittable(VecSource::new(items.clone()))
        .parallel()
        .append(DistinctOp::new());

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    // first occurrences in encounter order
    let mut seen = HashSet::new();
    let expected: Vec<i32> = items.into_iter().filter(|v| seen.insert(*v)).collect();
    assert_eq!(out, expected);
    Ok(())
}

#[test]
fn test_parallel_sized_slice_skips_out_of_window_leaves() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 100_000))
        .parallel()
        .append(SliceOp::new(50_000, Some(10)));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, (50_000..50_010).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_parallel_general_slice_trims_after_collect() -> anyhow::Result<()> {
    // A filter clears SIZED, forcing the collect-and-trim fallback
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 10_000))
        .parallel()
        .append(FilterOp::new(|v: &i64| v % 2 == 0))
        .append(SliceOp::new(10, Some(5)));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, vec![20, 22, 24, 26, 28]);
    Ok(())
}

#[test]
fn test_parallel_for_each_visits_everything() -> anyhow::Result<()> {
    let total = AtomicI64::new(0);

    terminal::for_each(
        Pipeline::from_splittable(RangeI64Source::new(0, 10_000)).parallel(),
        |value| {
            total.fetch_add(value, Ordering::Relaxed);
        },
    )?;

    assert_eq!(total.load(Ordering::Relaxed), (0..10_000).sum::<i64>());
    Ok(())
}

#[test]
fn test_parallel_reduce_without_identity() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(1, 1_001)).parallel();

    let product_free_sum = terminal::reduce(pipeline, |a, b| a + b)?;

    assert_eq!(product_free_sum, Some((1..1_001).sum::<i64>()));
    Ok(())
}
