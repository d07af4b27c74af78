// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: Apache-2.0

use rill_core::sources::{EmptySource, GenerateSource, IterateSource, RangeI32Source, VecSource};
use rill_core::{Characteristics, RillError, Splittable, SIZE_UNKNOWN};

fn drain<S: Splittable>(source: &mut S) -> Vec<S::Item> {
    let mut out = Vec::new();
    source.for_each_remaining(&mut |value| out.push(value));
    out
}

#[test]
fn test_vec_source_split_preserves_encounter_order() {
    // Arrange
    let mut source = VecSource::new(vec![1, 2, 3, 4, 5]);

    // Act
    let mut prefix = source.try_split().expect("five elements must split");

    // Assert: prefix covers elements before the remainder of self
    let mut seen = drain(&mut prefix);
    seen.extend(drain(&mut source));
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_vec_source_sizes_are_exact_and_non_increasing() {
    let mut source = VecSource::new(vec![10, 20, 30, 40]);
    assert_eq!(source.exact_size_if_known(), Some(4));

    let prefix = source.try_split().expect("must split");
    assert_eq!(prefix.exact_size_if_known(), Some(2));
    assert_eq!(source.exact_size_if_known(), Some(2));

    source.try_advance(&mut |_| {});
    assert_eq!(source.estimate_size(), 1);
}

#[test]
fn test_singleton_refuses_to_split() {
    let mut source = VecSource::new(vec![42]);
    assert!(source.try_split().is_none());
}

#[test]
fn test_range_source_counts_and_steps() -> anyhow::Result<()> {
    let mut source = RangeI32Source::with_step(0, 10, 3)?;
    assert_eq!(source.exact_size_if_known(), Some(4));
    assert_eq!(drain(&mut source), vec![0, 3, 6, 9]);

    let mut reversed = RangeI32Source::with_step(10, 0, -4)?;
    assert_eq!(reversed.exact_size_if_known(), Some(3));
    assert_eq!(drain(&mut reversed), vec![10, 6, 2]);
    assert!(!reversed.characteristics().contains(Characteristics::SORTED));
    Ok(())
}

#[test]
fn test_range_zero_step_is_illegal() {
    let error = RangeI32Source::with_step(0, 10, 0).unwrap_err();
    assert!(matches!(error, RillError::IllegalArgument { .. }));
}

#[test]
fn test_range_split_halves_deterministically() -> anyhow::Result<()> {
    let mut source = RangeI32Source::with_step(0, 100, 1)?;
    assert!(source.characteristics().contains(Characteristics::UNIFORM));

    let mut prefix = source.try_split().expect("must split");
    assert_eq!(prefix.exact_size_if_known(), Some(50));
    assert_eq!(source.exact_size_if_known(), Some(50));

    let mut seen = drain(&mut prefix);
    seen.extend(drain(&mut source));
    assert_eq!(seen, (0..100).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_iterate_source_is_infinite_and_ordered() {
    let mut source = IterateSource::new(1, |n| n + 1);
    assert_eq!(source.estimate_size(), SIZE_UNKNOWN);
    assert!(source.characteristics().contains(Characteristics::INFINITE));
    assert!(source.characteristics().contains(Characteristics::ORDERED));
    assert_eq!(source.exact_size_if_known(), None);

    let mut first = Vec::new();
    for _ in 0..4 {
        source.try_advance(&mut |value| first.push(value));
    }
    assert_eq!(first, vec![1, 2, 3, 4]);
}

#[test]
fn test_generate_source_is_unordered() {
    let mut counter = 0;
    let mut source = GenerateSource::new(move || {
        counter += 1;
        counter
    });
    assert!(!source.characteristics().contains(Characteristics::ORDERED));
    assert!(source.try_split().is_none());

    let mut value = None;
    source.try_advance(&mut |produced| value = Some(produced));
    assert_eq!(value, Some(1));
}

#[test]
fn test_empty_source() {
    let mut source = EmptySource::<String>::new();
    assert_eq!(source.exact_size_if_known(), Some(0));
    assert!(!source.try_advance(&mut |_| {}));
    assert!(source.try_split().is_none());
}
