// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The intermediate operation library.

mod distinct;
mod filter;
mod flat_map;
mod map;
mod peek;
mod slice;
mod sorted;

pub use distinct::DistinctOp;
pub use filter::FilterOp;
pub use flat_map::FlatMapOp;
pub use map::MapOp;
pub use peek::PeekOp;
pub use slice::SliceOp;
pub use sorted::SortedOp;
