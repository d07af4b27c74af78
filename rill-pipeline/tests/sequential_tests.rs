// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rill_core::sources::VecSource;
use rill_core::Property;
use rill_pipeline::ops::{DistinctOp, FilterOp, MapOp, PeekOp, SliceOp, SortedOp};
use rill_pipeline::{terminal, Pipeline};
use rill_test_utils::test_data;

#[test]
fn test_stateless_ops_fuse_into_one_traversal() -> anyhow::Result<()> {
    // Arrange: two peeks around a map; fusion interleaves per element
    let log = Arc::new(Mutex::new(Vec::new()));
    let before = Arc::clone(&log);
    let after = Arc::clone(&log);

    let pipeline = Pipeline::from_splittable(VecSource::new(vec![1, 2, 3]))
        .append(PeekOp::new(move |value: &i32| {
            before.lock().unwrap().push(format!("in:{value}"))
        }))
        .append(MapOp::new(|value: i32| value * 10))
        .append(PeekOp::new(move |value: &i32| {
            after.lock().unwrap().push(format!("out:{value}"))
        }));

    // Act
    let out = terminal::collect_node(pipeline, true)?.into_vec();

    // Assert
    assert_eq!(out, vec![10, 20, 30]);
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["in:1", "out:10", "in:2", "out:20", "in:3", "out:30"]
    );
    Ok(())
}

#[test]
fn test_sorted_then_distinct_uses_compare_to_last() -> anyhow::Result<()> {
    // After sorted, the combined flags carry SORTED, so distinct takes
    // the single-pass strategy; observable as first-occurrence output
    let pipeline = Pipeline::from_splittable(VecSource::new(test_data::sorted_with_duplicates()))
        .append(SortedOp::natural())
        .append(DistinctOp::new());

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_flag_propagation_through_the_chain() {
    let pipeline = Pipeline::from_splittable(VecSource::new(vec![3, 1, 2]))
        .append(SortedOp::<i32>::natural());

    let flags = pipeline.stream_flags();
    assert!(flags.has(Property::Sorted));
    assert!(flags.is_ordered());
    assert!(flags.is_sized());

    let filtered = pipeline.append(FilterOp::new(|_: &i32| true));
    assert!(!filtered.stream_flags().is_sized());
    assert!(filtered.stream_flags().has(Property::Sorted));
}

#[test]
fn test_parallel_flag_flips_with_the_mode() {
    let pipeline = Pipeline::from_splittable(VecSource::new(vec![1]));
    assert!(!pipeline.stream_flags().is_parallel());

    let pipeline = pipeline.parallel();
    assert!(pipeline.stream_flags().is_parallel());
    assert!(pipeline.is_parallel());

    let pipeline = pipeline.sequential();
    assert!(!pipeline.stream_flags().is_parallel());
}

#[test]
fn test_slice_skips_and_limits() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(VecSource::new((0..10).collect::<Vec<i32>>()))
        .append(SliceOp::new(3, Some(4)));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, vec![3, 4, 5, 6]);
    Ok(())
}

#[test]
fn test_limit_cancels_the_pull_loop_after_enough_elements() -> anyhow::Result<()> {
    // Cancellation is polled before each pull: exactly three elements
    // cross the peek once three have been accepted downstream
    let pulls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulls);

    let pipeline = Pipeline::from_splittable(VecSource::new((0..100).collect::<Vec<i32>>()))
        .append(PeekOp::new(move |_: &i32| {
            counter.fetch_add(1, Ordering::Relaxed);
        }))
        .append(SliceOp::new(0, Some(3)));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, vec![0, 1, 2]);
    assert_eq!(pulls.load(Ordering::Relaxed), 3);
    Ok(())
}

#[test]
fn test_reduce_on_single_element_skips_the_operator() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(VecSource::new(vec![41]));

    let result = terminal::reduce(pipeline, |_, _| panic!("operator must not run"))?;

    assert_eq!(result, Some(41));
    Ok(())
}

#[test]
fn test_fold_runs_in_encounter_order() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(VecSource::new(test_data::words()));

    let joined = terminal::fold(
        pipeline,
        String::new(),
        |mut acc: String, word: String| {
            acc.push_str(&word);
            acc.push(' ');
            acc
        },
        |mut left, right| {
            left.push_str(&right);
            left
        },
    )?;

    assert_eq!(joined, "delta alpha echo alpha bravo ");
    Ok(())
}
