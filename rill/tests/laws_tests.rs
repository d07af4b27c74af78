// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use rill::prelude::*;

fn sample() -> Vec<i64> {
    (0..2_000).map(|n: i64| (n * 7919) % 257).collect()
}

#[test]
fn test_parallel_and_sequential_agree_on_ordered_terminals() -> anyhow::Result<()> {
    let sequential = sources::from_vec(sample())
        .map(|n| n + 1)
        .filter(|n| n % 3 != 0)
        .fold(0i64, |acc, v| acc + v, |l, r| l + r)?;
    let parallel = sources::from_vec(sample())
        .parallel()
        .map(|n| n + 1)
        .filter(|n| n % 3 != 0)
        .fold(0i64, |acc, v| acc + v, |l, r| l + r)?;

    assert_eq!(sequential, parallel);
    Ok(())
}

#[test]
fn test_mode_round_trip_is_identity_on_observables() -> anyhow::Result<()> {
    let out = sources::from_vec(sample())
        .sequential()
        .parallel()
        .sequential()
        .to_vec()?;

    assert_eq!(out, sample());
    Ok(())
}

#[test]
fn test_sorted_is_idempotent() -> anyhow::Result<()> {
    let once = sources::from_vec(sample()).sorted().to_vec()?;
    let twice = sources::from_vec(sample()).sorted().sorted().to_vec()?;

    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_distinct_is_idempotent() -> anyhow::Result<()> {
    let once = sources::from_vec(sample()).distinct().to_vec()?;
    let twice = sources::from_vec(sample()).distinct().distinct().to_vec()?;

    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_filter_composition_law() -> anyhow::Result<()> {
    let chained = sources::from_vec(sample())
        .filter(|n| n % 2 == 0)
        .filter(|n| *n > 50)
        .to_vec()?;
    let fused = sources::from_vec(sample())
        .filter(|n| n % 2 == 0 && *n > 50)
        .to_vec()?;

    assert_eq!(chained, fused);
    Ok(())
}

#[test]
fn test_map_composition_law() -> anyhow::Result<()> {
    let chained = sources::from_vec(sample())
        .map(|n| n * 3)
        .map(|n| n - 1)
        .to_vec()?;
    let fused = sources::from_vec(sample()).map(|n| n * 3 - 1).to_vec()?;

    assert_eq!(chained, fused);
    Ok(())
}

#[test]
fn test_parallel_to_vec_is_order_equal_when_ordered() -> anyhow::Result<()> {
    let sequential = sources::from_vec(sample()).map(|n| n * 2).to_vec()?;
    let parallel = sources::from_vec(sample())
        .parallel()
        .map(|n| n * 2)
        .to_vec()?;

    assert_eq!(sequential, parallel);
    Ok(())
}

#[test]
fn test_unordered_parallel_distinct_is_permutation_equal() -> anyhow::Result<()> {
    // generate() is unordered, so parallel distinct may rearrange; the
    // result must still be the same set
    let mut next = 0i64;
    let out = sources::generate(move || {
        next += 1;
        next % 100
    })
    .limit(5_000)
    .parallel()
    .distinct()
    .to_vec()?;

    let expected: HashSet<i64> = (0..100).collect();
    assert_eq!(out.iter().copied().collect::<HashSet<_>>(), expected);
    assert_eq!(out.len(), expected.len());
    Ok(())
}

#[test]
fn test_exact_size_survives_size_preserving_ops() -> anyhow::Result<()> {
    // a sized source through size-preserving ops reports its count
    let source = sources::from_vec(sample())
        .map(|n| n + 1)
        .peek(|_| {})
        .spliterator()?;

    assert_eq!(source.exact_size_if_known(), Some(2_000));
    Ok(())
}

#[test]
fn test_stream_flags_reflect_the_chain() {
    let stream = sources::from_vec(sample()).sorted();
    let flags = stream.stream_flags();
    assert!(flags.is_ordered());
    assert!(flags.is_sized());

    let stream = stream.filter(|_| true).limit(10).parallel();
    let flags = stream.stream_flags();
    assert!(!flags.is_sized());
    assert!(flags.is_short_circuit());
    assert!(flags.is_parallel());
}
