// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The reference-shaped stream surface.

use std::hash::Hash;

use rill_core::adapters::{AnyElement, SplittableIter};
use rill_core::{Result, Splittable, StreamFlags};
use rill_node::Node;
use rill_pipeline::ops::{DistinctOp, FilterOp, FlatMapOp, MapOp, PeekOp, SliceOp, SortedOp};
use rill_pipeline::{terminal, Collector, MatchKind, Pipeline};

use crate::boxed::{BoxOp, UnboxOp};
use crate::primitive::{F64Stream, I32Stream, I64Stream};

/// A lazy, composable, optionally parallel stream of values.
///
/// Intermediate operations return a new `Stream` and execute nothing;
/// one terminal operation consumes the stream and drives the whole
/// pipeline. Ownership enforces single consumption: every operation
/// takes `self`.
///
/// # Examples
///
/// ```rust
/// use rill::sources;
///
/// # fn main() -> rill::Result<()> {
/// let out = sources::from_vec(vec![5, 3, 1, 4, 2])
///     .filter(|n| *n > 1)
///     .sorted()
///     .to_vec()?;
/// assert_eq!(out, vec![2, 3, 4, 5]);
/// # Ok(())
/// # }
/// ```
pub struct Stream<T: Send + 'static> {
    pipeline: Pipeline<T>,
}

impl<T: Send + 'static> Stream<T> {
    pub(crate) fn new(pipeline: Pipeline<T>) -> Self {
        Self { pipeline }
    }

    pub(crate) fn into_pipeline(self) -> Pipeline<T> {
        self.pipeline
    }

    /// Keeps the elements the predicate accepts.
    #[must_use]
    pub fn filter(self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Stream<T> {
        Stream::new(self.pipeline.append(FilterOp::new(predicate)))
    }

    /// Transforms each element.
    #[must_use]
    pub fn map<U: Send + 'static>(
        self,
        mapper: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Stream<U> {
        Stream::new(self.pipeline.append(MapOp::new(mapper)))
    }

    /// Transforms each element into the i32 shape.
    #[must_use]
    pub fn map_to_i32(self, mapper: impl Fn(T) -> i32 + Send + Sync + 'static) -> I32Stream {
        I32Stream::new(self.pipeline.append(MapOp::new(mapper)))
    }

    /// Transforms each element into the i64 shape.
    #[must_use]
    pub fn map_to_i64(self, mapper: impl Fn(T) -> i64 + Send + Sync + 'static) -> I64Stream {
        I64Stream::new(self.pipeline.append(MapOp::new(mapper)))
    }

    /// Transforms each element into the f64 shape.
    #[must_use]
    pub fn map_to_f64(self, mapper: impl Fn(T) -> f64 + Send + Sync + 'static) -> F64Stream {
        F64Stream::new(self.pipeline.append(MapOp::new(mapper)))
    }

    /// Expands each element into zero or more elements. The produced
    /// sequences are consumed sequentially, in place.
    #[must_use]
    pub fn flat_map<U, I>(self, expander: impl Fn(T) -> I + Send + Sync + 'static) -> Stream<U>
    where
        U: Send + 'static,
        I: IntoIterator<Item = U>,
    {
        Stream::new(self.pipeline.append(FlatMapOp::from_iter_fn(expander)))
    }

    /// Observes each element without changing the stream.
    #[must_use]
    pub fn peek(self, consumer: impl Fn(&T) + Send + Sync + 'static) -> Stream<T> {
        Stream::new(self.pipeline.append(PeekOp::new(consumer)))
    }

    /// Drops the first `n` elements.
    #[must_use]
    pub fn skip(self, n: u64) -> Stream<T> {
        Stream::new(self.pipeline.append(SliceOp::new(n, None)))
    }

    /// Keeps at most the first `n` elements; bounds infinite streams.
    #[must_use]
    pub fn limit(self, n: u64) -> Stream<T> {
        Stream::new(self.pipeline.append(SliceOp::new(0, Some(n))))
    }

    /// Re-emits the elements in natural order.
    #[must_use]
    pub fn sorted(self) -> Stream<T>
    where
        T: Ord,
    {
        Stream::new(self.pipeline.append(SortedOp::natural()))
    }

    /// Re-emits the elements in the order the comparator defines.
    #[must_use]
    pub fn sorted_by(
        self,
        comparator: impl Fn(&T, &T) -> std::cmp::Ordering + Send + Sync + 'static,
    ) -> Stream<T> {
        Stream::new(self.pipeline.append(SortedOp::by(comparator)))
    }

    /// Drops duplicates, keeping first occurrences in encounter order.
    #[must_use]
    pub fn distinct(self) -> Stream<T>
    where
        T: Eq + Hash + Clone,
    {
        Stream::new(self.pipeline.append(DistinctOp::new()))
    }

    /// Erases the element type. On a reference stream this is plain
    /// type erasure; recover the typed view with
    /// [`Stream::unbox`].
    #[must_use]
    pub fn boxed(self) -> Stream<AnyElement> {
        Stream::new(self.pipeline.append(BoxOp::new()))
    }

    /// Requests sequential execution.
    #[must_use]
    pub fn sequential(self) -> Stream<T> {
        Stream::new(self.pipeline.sequential())
    }

    /// Requests parallel execution.
    #[must_use]
    pub fn parallel(self) -> Stream<T> {
        Stream::new(self.pipeline.parallel())
    }

    pub fn is_parallel(&self) -> bool {
        self.pipeline.is_parallel()
    }

    /// The compressed view of the combined stream flags.
    pub fn stream_flags(&self) -> StreamFlags {
        self.pipeline.stream_flags()
    }

    /// Runs `action` on every element; order is not guaranteed under
    /// parallel execution.
    pub fn for_each(self, action: impl Fn(T) + Send + Sync) -> Result<()> {
        terminal::for_each(self.pipeline, action)
    }

    /// As [`Stream::for_each`] with a stop predicate polled before
    /// each pull.
    pub fn for_each_until(
        self,
        action: impl Fn(T) + Send + Sync,
        stop: impl Fn() -> bool + Send + Sync,
    ) -> Result<()> {
        terminal::for_each_until(self.pipeline, action, stop)
    }

    /// Reduces with no identity; empty streams yield `None`.
    pub fn reduce(self, operator: impl Fn(T, T) -> T + Send + Sync) -> Result<Option<T>> {
        terminal::reduce(self.pipeline, operator)
    }

    /// Folds onto `identity`; the combiner merges parallel partials.
    pub fn fold<R: Clone + Send + Sync>(
        self,
        identity: R,
        accumulate: impl Fn(R, T) -> R + Send + Sync,
        combine: impl Fn(R, R) -> R + Send + Sync,
    ) -> Result<R> {
        terminal::fold(self.pipeline, identity, accumulate, combine)
    }

    /// Runs the stream into the collector's container.
    pub fn collect<R: Send>(self, collector: Collector<T, R>) -> Result<R> {
        terminal::collect(self.pipeline, collector)
    }

    /// Collects into one contiguous buffer in encounter order.
    pub fn to_vec(self) -> Result<Vec<T>> {
        Ok(terminal::collect_node(self.pipeline, true)?.into_vec())
    }

    /// Collects into the engine's result container; a conc tree under
    /// parallel execution.
    pub fn to_node(self) -> Result<Node<T>> {
        terminal::collect_node(self.pipeline, false)
    }

    pub fn count(self) -> Result<u64> {
        terminal::fold(
            self.pipeline,
            0u64,
            |count, _| count + 1,
            |left, right| left + right,
        )
    }

    pub fn min(self) -> Result<Option<T>>
    where
        T: Ord,
    {
        terminal::reduce(self.pipeline, |a, b| if b < a { b } else { a })
    }

    pub fn max(self) -> Result<Option<T>>
    where
        T: Ord,
    {
        terminal::reduce(self.pipeline, |a, b| if b > a { b } else { a })
    }

    /// The first element in encounter order, if any.
    pub fn find_first(self) -> Result<Option<T>> {
        terminal::find(self.pipeline, true)
    }

    /// Any element; under parallel execution the quickest leaf wins.
    pub fn find_any(self) -> Result<Option<T>> {
        terminal::find(self.pipeline, false)
    }

    pub fn any_match(self, predicate: impl Fn(&T) -> bool + Send + Sync) -> Result<bool> {
        terminal::match_kind(self.pipeline, MatchKind::Any, predicate)
    }

    pub fn all_match(self, predicate: impl Fn(&T) -> bool + Send + Sync) -> Result<bool> {
        terminal::match_kind(self.pipeline, MatchKind::All, predicate)
    }

    pub fn none_match(self, predicate: impl Fn(&T) -> bool + Send + Sync) -> Result<bool> {
        terminal::match_kind(self.pipeline, MatchKind::None, predicate)
    }

    /// Dissolves the stream into a splittable source. Consumes the
    /// stream; op-free streams stay lazy.
    pub fn spliterator(self) -> Result<Box<dyn Splittable<Item = T>>> {
        self.pipeline.into_source()
    }

    /// Dissolves the stream into a sequential iterator.
    pub fn iter(self) -> Result<SplittableIter<Box<dyn Splittable<Item = T>>>> {
        Ok(SplittableIter::new(self.pipeline.into_source()?))
    }
}

impl Stream<AnyElement> {
    /// Recovers the typed view of an erased stream. An element of any
    /// other type fails the terminal with `ShapeMismatch`.
    #[must_use]
    pub fn unbox<T: Send + 'static>(self) -> Stream<T> {
        Stream::new(self.pipeline.append(UnboxOp::new()))
    }
}
