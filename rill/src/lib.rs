// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `rill` — a lazy, composable, optionally parallel stream engine.
//!
//! A stream is a declarative pipeline: intermediate operations
//! (filter, map, flat-map, sorted, distinct, skip/limit, peek) over a
//! splittable source, finished by one terminal operation (reduce,
//! find, match, for-each, collect). Nothing runs until the terminal
//! does; stateless operations fuse into a single traversal;
//! short-circuit terminals stop the moment the answer is decided; and
//! `parallel()` switches the same pipeline onto a recursive
//! work-stealing decomposition of the source.
//!
//! ```rust
//! use rill::prelude::*;
//!
//! # fn main() -> rill::Result<()> {
//! let total = I64Stream::range(0, 1_000_000)
//!     .parallel()
//!     .filter(|n| n % 2 == 0)
//!     .map(|n| n * 2)
//!     .sum()?;
//! assert_eq!(total, 499_999_000_000);
//! # Ok(())
//! # }
//! ```

mod boxed;
mod primitive;
mod stream;

pub mod collectors;
pub mod prelude;
pub mod sources;

pub use primitive::{F64Stream, I32Stream, I64Stream};
pub use rill_core::{Characteristics, Result, RillError, Shape, Sink, Splittable, StreamFlags};
pub use rill_node::Node;
pub use rill_pipeline::{Collector, MatchKind, Operation, Pipeline, SourceSupplier};
pub use stream::Stream;
