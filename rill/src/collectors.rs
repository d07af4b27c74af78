// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made collectors.
//!
//! The [`Collector`] contract — supplier, accumulator, combiner,
//! concurrency marker — is the extension point; the constructors here
//! cover the everyday containers. Grouping and partitioning collectors
//! compose from the same contract via [`Collector::new`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rill_pipeline::Collector;

/// Collects into a vector in encounter order.
pub fn to_vec<T: Send + 'static>() -> Collector<T, Vec<T>> {
    Collector::new(
        Vec::new,
        |container, value| container.push(value),
        |mut left, mut right| {
            left.append(&mut right);
            left
        },
    )
}

/// Collects into a hash set.
pub fn to_set<T: Eq + Hash + Send + 'static>() -> Collector<T, HashSet<T>> {
    Collector::new(
        HashSet::new,
        |container, value| {
            container.insert(value);
        },
        |mut left, right| {
            left.extend(right);
            left
        },
    )
}

/// Counts the elements.
pub fn counting<T: Send + 'static>() -> Collector<T, u64> {
    Collector::new(|| 0, |count, _| *count += 1, |left, right| left + right)
}

/// Concatenates string-like elements with a separator, in encounter
/// order.
pub fn joining<T: AsRef<str> + Send + 'static>(separator: &str) -> Collector<T, String> {
    let between = separator.to_string();
    let between_combine = between.clone();
    Collector::new(
        String::new,
        move |joined: &mut String, value: T| {
            if !joined.is_empty() {
                joined.push_str(&between);
            }
            joined.push_str(value.as_ref());
        },
        move |left, right| {
            if left.is_empty() {
                return right;
            }
            if right.is_empty() {
                return left;
            }
            left + &between_combine + &right
        },
    )
}

/// Buckets elements by a key, preserving encounter order within each
/// bucket.
pub fn grouping_by<T, K, F>(classify: F) -> Collector<T, HashMap<K, Vec<T>>>
where
    T: Send + 'static,
    K: Eq + Hash + Send + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    Collector::new(
        HashMap::new,
        move |buckets: &mut HashMap<K, Vec<T>>, value: T| {
            buckets.entry(classify(&value)).or_default().push(value);
        },
        |mut left, right| {
            for (bucket, mut values) in right {
                left.entry(bucket).or_default().append(&mut values);
            }
            left
        },
    )
}
