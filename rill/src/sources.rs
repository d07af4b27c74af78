// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Source constructors.
//!
//! Everything here is lazy: a constructor records the source and
//! builds nothing until a terminal runs. Sources built from a shared
//! [`SourceSupplier`] may back several pipelines, but only one of them
//! gets to evaluate; the rest fail with `PipelineState`.

use rill_core::adapters::IteratorSource;
use rill_core::sources::{EmptySource, GenerateSource, IterateSource, VecSource};
use rill_core::{Characteristics, Splittable};
use rill_pipeline::{BoxSplittable, Pipeline, SourceSupplier};

use crate::stream::Stream;

/// A stream over an owned vector, in its order.
pub fn from_vec<T: Send + 'static>(items: Vec<T>) -> Stream<T> {
    Stream::new(Pipeline::from_splittable(VecSource::new(items)))
}

/// A stream over a copied slice.
pub fn from_slice<T: Clone + Send + 'static>(items: &[T]) -> Stream<T> {
    from_vec(items.to_vec())
}

/// The empty stream.
pub fn empty<T: Send + 'static>() -> Stream<T> {
    Stream::new(Pipeline::from_splittable(EmptySource::new()))
}

/// A stream draining a sequential iterator. Splits read geometric
/// batches off the front; the stream is unsized.
pub fn from_iter<I>(iter: I) -> Stream<I::Item>
where
    I: Iterator + Send + 'static,
    I::Item: Send + 'static,
{
    Stream::new(Pipeline::from_splittable(IteratorSource::new(iter)))
}

/// As [`from_iter`] with a trusted exact element count, which makes
/// the stream SIZED.
pub fn from_sized_iter<I>(iter: I, exact_size: u64) -> Stream<I::Item>
where
    I: Iterator + Send + 'static,
    I::Item: Send + 'static,
{
    Stream::new(Pipeline::from_splittable(IteratorSource::with_exact_size(
        iter, exact_size,
    )))
}

/// A stream over any splittable source.
pub fn from_splittable<S>(source: S) -> Stream<S::Item>
where
    S: Splittable + 'static,
    S::Item: Send + 'static,
{
    Stream::new(Pipeline::from_splittable(source))
}

/// A stream over a one-shot source factory plus the characteristics it
/// will advertise. The factory runs lazily, at the first terminal.
pub fn from_supplier<T, F>(characteristics: Characteristics, factory: F) -> Stream<T>
where
    T: Send + 'static,
    F: FnOnce() -> BoxSplittable<T> + Send + 'static,
{
    Stream::new(Pipeline::from_supplier(SourceSupplier::new(
        characteristics,
        factory,
    )))
}

/// A stream over an already-shared supplier. Several streams may be
/// built over one supplier; the first terminal consumes it.
pub fn from_shared_supplier<T: Send + 'static>(supplier: SourceSupplier<T>) -> Stream<T> {
    Stream::new(Pipeline::from_supplier(supplier))
}

/// The infinite ordered stream `seed, f(seed), f(f(seed)), …`.
/// Bound it with `limit` or a short-circuit terminal.
pub fn iterate<T, F>(seed: T, advance: F) -> Stream<T>
where
    T: Clone + Send + 'static,
    F: FnMut(&T) -> T + Send + 'static,
{
    Stream::new(Pipeline::from_splittable(IterateSource::new(seed, advance)))
}

/// The infinite unordered stream of supplied values.
pub fn generate<T, F>(supplier: F) -> Stream<T>
where
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
{
    Stream::new(Pipeline::from_splittable(GenerateSource::new(supplier)))
}
