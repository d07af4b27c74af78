// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Join-based parallel merge sort, used by the sorted boundary.

use std::cmp::Ordering;

use crate::pool;

/// Below this length a chunk sorts sequentially.
const SEQUENTIAL_CUTOFF: usize = 4096;

/// Stable parallel merge sort over an owned buffer.
pub(crate) fn parallel_sort<T: Send>(
    mut items: Vec<T>,
    compare: &(dyn Fn(&T, &T) -> Ordering + Sync),
) -> Vec<T> {
    if items.len() <= SEQUENTIAL_CUTOFF {
        items.sort_by(|a, b| compare(a, b));
        return items;
    }
    let mid = items.len() / 2;
    let right = items.split_off(mid);
    let (left, right) = pool::join(
        || parallel_sort(items, compare),
        || parallel_sort(right, compare),
    );
    merge(left, right, compare)
}

/// Merges two sorted runs; ties take from the left run, which is what
/// keeps the sort stable.
fn merge<T>(left: Vec<T>, right: Vec<T>, compare: &(dyn Fn(&T, &T) -> Ordering + Sync)) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut next_left = left.next();
    let mut next_right = right.next();
    loop {
        match (next_left.take(), next_right.take()) {
            (Some(l), Some(r)) => {
                if compare(&l, &r) != Ordering::Greater {
                    merged.push(l);
                    next_left = left.next();
                    next_right = Some(r);
                } else {
                    merged.push(r);
                    next_left = Some(l);
                    next_right = right.next();
                }
            }
            (Some(l), None) => {
                merged.push(l);
                merged.extend(left.by_ref());
                break;
            }
            (None, Some(r)) => {
                merged.push(r);
                merged.extend(right.by_ref());
                break;
            }
            (None, None) => break,
        }
    }
    merged
}
