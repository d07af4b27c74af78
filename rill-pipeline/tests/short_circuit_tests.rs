// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicUsize, Ordering};

use rill_core::sources::{EmptySource, IterateSource, RangeI64Source, VecSource};
use rill_pipeline::ops::{FilterOp, SliceOp};
use rill_pipeline::{terminal, MatchKind, Pipeline};

#[test]
fn test_limit_bounds_an_infinite_source() -> anyhow::Result<()> {
    // S4: generate-and-filter over an infinite source, bounded by limit
    let pipeline = Pipeline::from_splittable(IterateSource::new(1i64, |n| n + 1))
        .append(FilterOp::new(|n: &i64| n % 7 == 0))
        .append(SliceOp::new(0, Some(3)));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, vec![7, 14, 21]);
    Ok(())
}

#[test]
fn test_parallel_limit_on_an_infinite_source_terminates() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(IterateSource::new(0i64, |n| n + 1))
        .parallel()
        .append(SliceOp::new(5, Some(4)));

    let out = terminal::collect_node(pipeline, true)?.into_vec();

    assert_eq!(out, vec![5, 6, 7, 8]);
    Ok(())
}

#[test]
fn test_find_first_in_parallel_reports_encounter_order() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 100_000))
        .parallel()
        .append(FilterOp::new(|v: &i64| *v >= 60_000));

    let found = terminal::find(pipeline, true)?;

    assert_eq!(found, Some(60_000));
    Ok(())
}

#[test]
fn test_find_any_reports_some_matching_element() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 100_000))
        .parallel()
        .append(FilterOp::new(|v: &i64| v % 1_000 == 17));

    let found = terminal::find(pipeline, false)?.expect("matches exist");

    assert_eq!(found % 1_000, 17);
    Ok(())
}

#[test]
fn test_find_on_empty_is_none() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(EmptySource::<i64>::new());
    assert_eq!(terminal::find(pipeline, true)?, None);
    Ok(())
}

#[test]
fn test_match_kind_table_on_empty_source() -> anyhow::Result<()> {
    // empty: ANY → false, ALL → true, NONE → true
    for (kind, expected) in [
        (MatchKind::Any, false),
        (MatchKind::All, true),
        (MatchKind::None, true),
    ] {
        let pipeline = Pipeline::from_splittable(EmptySource::<i64>::new());
        assert_eq!(
            terminal::match_kind(pipeline, kind, |_| true)?,
            expected,
            "wrong empty result for {kind:?}"
        );
    }
    Ok(())
}

#[test]
fn test_match_kinds_on_data() -> anyhow::Result<()> {
    let make = || Pipeline::from_splittable(VecSource::new(vec![2, 4, 5, 8]));

    assert!(terminal::match_kind(make(), MatchKind::Any, |v| v % 2 == 1)?);
    assert!(!terminal::match_kind(make(), MatchKind::All, |v| v % 2 == 0)?);
    assert!(!terminal::match_kind(make(), MatchKind::None, |v| *v == 5)?);
    assert!(terminal::match_kind(make(), MatchKind::None, |v| *v > 10)?);
    Ok(())
}

#[test]
fn test_any_match_terminates_on_infinite_source() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(IterateSource::new(0i64, |n| n + 1));

    let hit = terminal::match_kind(pipeline, MatchKind::Any, |v| *v > 1_000)?;

    assert!(hit);
    Ok(())
}

#[test]
fn test_parallel_match_short_circuits() -> anyhow::Result<()> {
    let pipeline = Pipeline::from_splittable(RangeI64Source::new(0, 1_000_000)).parallel();

    let hit = terminal::match_kind(pipeline, MatchKind::Any, |v| *v == 250_000)?;

    assert!(hit);
    Ok(())
}

#[test]
fn test_for_each_until_stops_cooperatively() -> anyhow::Result<()> {
    let seen = AtomicUsize::new(0);

    terminal::for_each_until(
        Pipeline::from_splittable(IterateSource::new(0i64, |n| n + 1)),
        |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        },
        || seen.load(Ordering::Relaxed) >= 5,
    )?;

    assert_eq!(seen.load(Ordering::Relaxed), 5);
    Ok(())
}
