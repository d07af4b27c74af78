// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Element shape tags.

use std::fmt;

/// The four element shapes a pipeline stage can carry.
///
/// Elements flow statically typed through the engine; the shape tag
/// travels alongside for diagnostics and for the type-erased sink
/// bridge, where a mismatch is only detectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A reference shape: any `T`.
    Reference,
    I32,
    I64,
    F64,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Reference => write!(f, "reference"),
            Shape::I32 => write!(f, "i32"),
            Shape::I64 => write!(f, "i64"),
            Shape::F64 => write!(f, "f64"),
        }
    }
}
