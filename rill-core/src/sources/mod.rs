// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Built-in splittable sources.

mod empty;
mod generate;
mod range;
mod vec;

pub use empty::EmptySource;
pub use generate::{GenerateSource, IterateSource};
pub use range::{RangeI32Source, RangeI64Source};
pub use vec::VecSource;
