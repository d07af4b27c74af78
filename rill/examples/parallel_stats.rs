// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Parallel numeric pipelines: fused traversal, short-circuit search,
//! and a sorted boundary.
//!
//! ```text
//! cargo run --example parallel_stats
//! ```

use rill::prelude::*;

fn main() -> rill::Result<()> {
    let even_sum = I64Stream::range(0, 10_000_000)
        .parallel()
        .filter(|n| n % 2 == 0)
        .map(|n| n * 2)
        .sum()?;
    println!("doubled even sum: {even_sum}");

    let mean = I64Stream::range(1, 1_001).as_f64().average()?;
    println!("mean of 1..=1000: {mean:?}");

    let first_big_square = sources::iterate(1i64, |n| n + 1)
        .map(|n| n * n)
        .filter(|square| square % 1_000_003 == 0)
        .limit(1)
        .to_vec()?;
    println!("first square divisible by 1000003: {first_big_square:?}");

    let top = sources::from_vec((0..100_000).map(|n| (n * 7919) % 1_000).collect::<Vec<i64>>())
        .parallel()
        .map_to_i64(|v| v)
        .distinct()
        .sorted()
        .limit(5)
        .to_vec()?;
    println!("five smallest distinct residues: {top:?}");
    Ok(())
}
