// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use rill_core::sources::{RangeI64Source, VecSource};
use rill_core::RillError;
use rill_pipeline::ops::{MapOp, SortedOp};
use rill_pipeline::{terminal, MatchKind, Pipeline, SourceSupplier};

#[test]
fn test_panicking_predicate_is_surfaced_sequentially() {
    let pipeline = Pipeline::from_splittable(VecSource::new(vec![1, 2, 3]));

    let error = terminal::match_kind(pipeline, MatchKind::All, |v| {
        assert!(*v != 3, "callback tripped");
        true
    })
    .unwrap_err();

    assert!(matches!(error, RillError::UserCallbackFailure { .. }));
}

#[test]
fn test_panicking_mapper_cancels_the_parallel_tree() {
    // The failing leaf records first, the wave cancels the rest, and
    // exactly one failure comes back
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 100_000))
        .parallel()
        .append(MapOp::new(|v: i64| {
            assert!(v != 77_777, "callback tripped");
            v
        }));

    let error = terminal::collect_node(pipeline, true).unwrap_err();

    assert!(matches!(error, RillError::UserCallbackFailure { .. }));
}

#[test]
fn test_panicking_comparator_in_parallel_boundary() {
    let pipeline = Pipeline::from_splittable(VecSource::new((0..10_000).collect::<Vec<i64>>()))
        .parallel()
        .append(SortedOp::by(|_: &i64, _: &i64| panic!("comparator tripped")));

    let error = terminal::collect_node(pipeline, true).unwrap_err();

    assert!(matches!(error, RillError::UserCallbackFailure { .. }));
}

#[test]
fn test_shared_supplier_is_consumed_exactly_once() -> anyhow::Result<()> {
    // Arrange: two pipelines over one shared one-shot source
    let supplier = SourceSupplier::from_splittable(VecSource::new(vec![1, 2, 3]));
    let first = Pipeline::from_supplier(supplier.clone());
    let second = Pipeline::from_supplier(supplier);

    // Act
    let out = terminal::collect_node(first, true)?.into_vec();
    let error = terminal::collect_node(second, true).unwrap_err();

    // Assert
    assert_eq!(out, vec![1, 2, 3]);
    assert!(matches!(error, RillError::PipelineState { .. }));
    Ok(())
}

#[test]
fn test_failed_result_is_not_observable() {
    // S6: the terminal's value never materializes once a callback fails
    let pipeline = Pipeline::from_splittable(VecSource::new(vec![1, 2, 3]));

    let result = terminal::match_kind(pipeline, MatchKind::All, |v| {
        assert!(*v != 3, "callback tripped");
        true
    });

    assert!(result.is_err());
}
