// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core traits and types for the `rill` stream engine.
//!
//! This crate hosts the pieces every other `rill` crate builds on:
//!
//! - [`Splittable`] — the pull-and-split source abstraction
//! - [`Sink`] — the push-model consumer protocol with cooperative
//!   cancellation
//! - [`flags`] — the two-bit flag algebra that propagates stream
//!   characteristics through pipeline composition
//! - [`RillError`] / [`Result`] — the error surface
//! - [`sources`] — built-in splittable sources (vectors, integer ranges,
//!   infinite generators)
//! - [`adapters`] — bridges between sequential iterators and splittable
//!   sources, and the type-erased sink bridge
//! - [`tripwire`] — the non-fatal diagnostic channel for accidental
//!   boxing on primitive paths

#[macro_use]
pub mod logging;

pub mod adapters;
pub mod error;
pub mod flags;
pub mod shape;
pub mod sink;
pub mod sources;
pub mod splittable;
pub mod tripwire;

pub use error::{Result, RillError};
pub use flags::{Characteristics, FlagWord, Property, StreamFlags};
pub use shape::Shape;
pub use sink::Sink;
pub use splittable::{Splittable, SIZE_UNKNOWN};
