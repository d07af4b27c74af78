// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridges between the splittable world and its neighbors: sequential
//! iterators on the way in and out, and the type-erased sink bridge for
//! mixed-shape interop.

mod any_sink;
mod iter_bridge;
mod iter_out;

pub use any_sink::{AnyElement, AnySink, BoxingSink};
pub use iter_bridge::IteratorSource;
pub use iter_out::SplittableIter;
