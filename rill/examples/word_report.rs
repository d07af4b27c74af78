// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Group words by length and print a small report.
//!
//! ```text
//! cargo run --example word_report
//! ```

use rill::prelude::*;

fn main() -> rill::Result<()> {
    let words = vec![
        "stream", "lazy", "sink", "split", "fuse", "node", "conc", "fork", "join", "flag",
    ];

    let by_length = sources::from_vec(words.clone())
        .map(str::to_string)
        .collect(collectors::grouping_by(|word: &String| word.len()))?;

    let mut lengths: Vec<_> = by_length.keys().copied().collect();
    lengths.sort_unstable();
    for length in lengths {
        let row = sources::from_vec(by_length[&length].clone())
            .sorted()
            .collect(collectors::joining(", "))?;
        println!("{length}: {row}");
    }

    let total: u64 = sources::from_vec(words)
        .parallel()
        .map_to_i64(|word| word.len() as i64)
        .count()?;
    println!("{total} words in all");
    Ok(())
}
