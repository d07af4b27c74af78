// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Small fixed datasets shared across the workspace's tests.

/// Five words, unsorted, with one duplicate pair.
pub fn words() -> Vec<String> {
    ["delta", "alpha", "echo", "alpha", "bravo"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The scenario vector `[5, 3, 1, 4, 2]`.
pub fn shuffled_digits() -> Vec<i32> {
    vec![5, 3, 1, 4, 2]
}

/// An already-sorted vector with runs of duplicates.
pub fn sorted_with_duplicates() -> Vec<i32> {
    vec![1, 1, 2, 2, 3]
}
