// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop imports for pipeline building.

pub use crate::collectors;
pub use crate::primitive::{F64Stream, I32Stream, I64Stream};
pub use crate::sources;
pub use crate::stream::Stream;
pub use rill_core::{Characteristics, Result, RillError, Sink, Splittable, StreamFlags};
pub use rill_pipeline::{Collector, MatchKind, SourceSupplier};
