// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The three primitive stream specializations.
//!
//! One macro instantiates the operations every shape shares; ordering,
//! distinctness and the widening conversions differ per shape and are
//! implemented alongside each instantiation.

use rill_core::adapters::SplittableIter;
use rill_core::sources::{RangeI32Source, RangeI64Source};
use rill_core::{Result, Splittable, StreamFlags};
use rill_pipeline::ops::{DistinctOp, FilterOp, FlatMapOp, MapOp, PeekOp, SliceOp, SortedOp};
use rill_pipeline::{terminal, Collector, MatchKind, Pipeline};

use crate::boxed::{BoxOp, UnboxOp};
use crate::stream::Stream;

macro_rules! define_primitive_stream {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub struct $name {
            pipeline: Pipeline<$ty>,
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }

        impl $name {
            pub(crate) fn new(pipeline: Pipeline<$ty>) -> Self {
                Self { pipeline }
            }

            /// Keeps the elements the predicate accepts.
            #[must_use]
            pub fn filter(
                self,
                predicate: impl Fn(&$ty) -> bool + Send + Sync + 'static,
            ) -> $name {
                $name::new(self.pipeline.append(FilterOp::new(predicate)))
            }

            /// Transforms each element within the shape.
            #[must_use]
            pub fn map(self, mapper: impl Fn($ty) -> $ty + Send + Sync + 'static) -> $name {
                $name::new(self.pipeline.append(MapOp::new(mapper)))
            }

            /// Transforms each element into the reference shape.
            #[must_use]
            pub fn map_to_obj<U: Send + 'static>(
                self,
                mapper: impl Fn($ty) -> U + Send + Sync + 'static,
            ) -> Stream<U> {
                Stream::new(self.pipeline.append(MapOp::new(mapper)))
            }

            /// Expands each element into zero or more elements.
            #[must_use]
            pub fn flat_map<I>(
                self,
                expander: impl Fn($ty) -> I + Send + Sync + 'static,
            ) -> $name
            where
                I: IntoIterator<Item = $ty>,
            {
                $name::new(self.pipeline.append(FlatMapOp::from_iter_fn(expander)))
            }

            /// Observes each element without changing the stream.
            #[must_use]
            pub fn peek(self, consumer: impl Fn(&$ty) + Send + Sync + 'static) -> $name {
                $name::new(self.pipeline.append(PeekOp::new(consumer)))
            }

            /// Drops the first `n` elements.
            #[must_use]
            pub fn skip(self, n: u64) -> $name {
                $name::new(self.pipeline.append(SliceOp::new(n, None)))
            }

            /// Keeps at most the first `n` elements.
            #[must_use]
            pub fn limit(self, n: u64) -> $name {
                $name::new(self.pipeline.append(SliceOp::new(0, Some(n))))
            }

            /// Boxes the elements into the reference shape through the
            /// type-erased bridge; the tripwire reports the crossing.
            #[must_use]
            pub fn boxed(self) -> Stream<$ty> {
                Stream::new(
                    self.pipeline
                        .append(BoxOp::new())
                        .append(UnboxOp::<$ty>::new()),
                )
            }

            /// Requests sequential execution.
            #[must_use]
            pub fn sequential(self) -> $name {
                $name::new(self.pipeline.sequential())
            }

            /// Requests parallel execution.
            #[must_use]
            pub fn parallel(self) -> $name {
                $name::new(self.pipeline.parallel())
            }

            pub fn is_parallel(&self) -> bool {
                self.pipeline.is_parallel()
            }

            /// The compressed view of the combined stream flags.
            pub fn stream_flags(&self) -> StreamFlags {
                self.pipeline.stream_flags()
            }

            /// Runs `action` on every element.
            pub fn for_each(self, action: impl Fn($ty) + Send + Sync) -> Result<()> {
                terminal::for_each(self.pipeline, action)
            }

            /// As `for_each` with a stop predicate polled before each
            /// pull.
            pub fn for_each_until(
                self,
                action: impl Fn($ty) + Send + Sync,
                stop: impl Fn() -> bool + Send + Sync,
            ) -> Result<()> {
                terminal::for_each_until(self.pipeline, action, stop)
            }

            /// Reduces with no identity; empty streams yield `None`.
            pub fn reduce(
                self,
                operator: impl Fn($ty, $ty) -> $ty + Send + Sync,
            ) -> Result<Option<$ty>> {
                terminal::reduce(self.pipeline, operator)
            }

            /// Folds onto `identity`.
            pub fn fold<R: Clone + Send + Sync>(
                self,
                identity: R,
                accumulate: impl Fn(R, $ty) -> R + Send + Sync,
                combine: impl Fn(R, R) -> R + Send + Sync,
            ) -> Result<R> {
                terminal::fold(self.pipeline, identity, accumulate, combine)
            }

            /// Runs the stream into the collector's container.
            pub fn collect<R: Send>(self, collector: Collector<$ty, R>) -> Result<R> {
                terminal::collect(self.pipeline, collector)
            }

            /// Collects into one contiguous buffer in encounter order.
            pub fn to_vec(self) -> Result<Vec<$ty>> {
                Ok(terminal::collect_node(self.pipeline, true)?.into_vec())
            }

            pub fn count(self) -> Result<u64> {
                terminal::fold(
                    self.pipeline,
                    0u64,
                    |count, _| count + 1,
                    |left, right| left + right,
                )
            }

            /// The arithmetic mean, `None` on an empty stream.
            pub fn average(self) -> Result<Option<f64>> {
                let (count, total) = terminal::fold(
                    self.pipeline,
                    (0u64, 0.0f64),
                    |(count, total), value| (count + 1, total + value as f64),
                    |(lc, lt), (rc, rt)| (lc + rc, lt + rt),
                )?;
                Ok(if count == 0 {
                    None
                } else {
                    Some(total / count as f64)
                })
            }

            /// The first element in encounter order, if any.
            pub fn find_first(self) -> Result<Option<$ty>> {
                terminal::find(self.pipeline, true)
            }

            /// Any element; under parallel execution the quickest leaf
            /// wins.
            pub fn find_any(self) -> Result<Option<$ty>> {
                terminal::find(self.pipeline, false)
            }

            pub fn any_match(
                self,
                predicate: impl Fn(&$ty) -> bool + Send + Sync,
            ) -> Result<bool> {
                terminal::match_kind(self.pipeline, MatchKind::Any, predicate)
            }

            pub fn all_match(
                self,
                predicate: impl Fn(&$ty) -> bool + Send + Sync,
            ) -> Result<bool> {
                terminal::match_kind(self.pipeline, MatchKind::All, predicate)
            }

            pub fn none_match(
                self,
                predicate: impl Fn(&$ty) -> bool + Send + Sync,
            ) -> Result<bool> {
                terminal::match_kind(self.pipeline, MatchKind::None, predicate)
            }

            /// Dissolves the stream into a splittable source.
            pub fn spliterator(self) -> Result<Box<dyn Splittable<Item = $ty>>> {
                self.pipeline.into_source()
            }

            /// Dissolves the stream into a sequential iterator.
            pub fn iter(self) -> Result<SplittableIter<Box<dyn Splittable<Item = $ty>>>> {
                Ok(SplittableIter::new(self.pipeline.into_source()?))
            }
        }
    };
}

define_primitive_stream!(
    /// A lazy, composable, optionally parallel stream of `i32`.
    I32Stream,
    i32
);

define_primitive_stream!(
    /// A lazy, composable, optionally parallel stream of `i64`.
    I64Stream,
    i64
);

define_primitive_stream!(
    /// A lazy, composable, optionally parallel stream of `f64`.
    F64Stream,
    f64
);

impl I32Stream {
    /// The unit-step range `[from, to)`.
    pub fn range(from: i32, to: i32) -> I32Stream {
        I32Stream::new(Pipeline::from_splittable(RangeI32Source::new(from, to)))
    }

    /// The stepped range `[from, to)`; a zero step is an
    /// `IllegalArgument`.
    pub fn range_step(from: i32, to: i32, step: i32) -> Result<I32Stream> {
        Ok(I32Stream::new(Pipeline::from_splittable(
            RangeI32Source::with_step(from, to, step)?,
        )))
    }

    /// Re-emits the elements in ascending order.
    #[must_use]
    pub fn sorted(self) -> I32Stream {
        I32Stream::new(self.pipeline.append(SortedOp::natural()))
    }

    /// Drops duplicates.
    #[must_use]
    pub fn distinct(self) -> I32Stream {
        I32Stream::new(self.pipeline.append(DistinctOp::new()))
    }

    /// Widens each element to the i64 shape.
    #[must_use]
    pub fn as_i64(self) -> I64Stream {
        I64Stream::new(self.pipeline.append(MapOp::new(|value| value as i64)))
    }

    /// Widens each element to the f64 shape.
    #[must_use]
    pub fn as_f64(self) -> F64Stream {
        F64Stream::new(self.pipeline.append(MapOp::new(|value| value as f64)))
    }

    /// Sums into the wider accumulator, immune to element overflow.
    pub fn sum(self) -> Result<i64> {
        terminal::fold(
            self.pipeline,
            0i64,
            |total, value| total + value as i64,
            |left, right| left + right,
        )
    }

    pub fn min(self) -> Result<Option<i32>> {
        terminal::reduce(self.pipeline, |a, b| a.min(b))
    }

    pub fn max(self) -> Result<Option<i32>> {
        terminal::reduce(self.pipeline, |a, b| a.max(b))
    }
}

impl I64Stream {
    /// The unit-step range `[from, to)`.
    pub fn range(from: i64, to: i64) -> I64Stream {
        I64Stream::new(Pipeline::from_splittable(RangeI64Source::new(from, to)))
    }

    /// The stepped range `[from, to)`; a zero step is an
    /// `IllegalArgument`.
    pub fn range_step(from: i64, to: i64, step: i64) -> Result<I64Stream> {
        Ok(I64Stream::new(Pipeline::from_splittable(
            RangeI64Source::with_step(from, to, step)?,
        )))
    }

    /// Re-emits the elements in ascending order.
    #[must_use]
    pub fn sorted(self) -> I64Stream {
        I64Stream::new(self.pipeline.append(SortedOp::natural()))
    }

    /// Drops duplicates.
    #[must_use]
    pub fn distinct(self) -> I64Stream {
        I64Stream::new(self.pipeline.append(DistinctOp::new()))
    }

    /// Widens each element to the f64 shape.
    #[must_use]
    pub fn as_f64(self) -> F64Stream {
        F64Stream::new(self.pipeline.append(MapOp::new(|value| value as f64)))
    }

    pub fn sum(self) -> Result<i64> {
        terminal::fold(
            self.pipeline,
            0i64,
            |total, value| total + value,
            |left, right| left + right,
        )
    }

    pub fn min(self) -> Result<Option<i64>> {
        terminal::reduce(self.pipeline, |a, b| a.min(b))
    }

    pub fn max(self) -> Result<Option<i64>> {
        terminal::reduce(self.pipeline, |a, b| a.max(b))
    }
}

impl F64Stream {
    /// Re-emits the elements in ascending order under the IEEE total
    /// order, which gives NaN a defined place instead of poisoning the
    /// sort.
    #[must_use]
    pub fn sorted(self) -> F64Stream {
        F64Stream::new(self.pipeline.append(SortedOp::by(f64::total_cmp)))
    }

    /// Drops duplicates under bitwise equality: `-0.0` and `0.0` stay
    /// distinct and equal NaN bit patterns collapse.
    #[must_use]
    pub fn distinct(self) -> F64Stream {
        F64Stream::new(
            self.pipeline
                .append(MapOp::new(f64::to_bits))
                .append(DistinctOp::new())
                .append(MapOp::new(f64::from_bits)),
        )
    }

    pub fn sum(self) -> Result<f64> {
        terminal::fold(
            self.pipeline,
            0.0f64,
            |total, value| total + value,
            |left, right| left + right,
        )
    }

    pub fn min(self) -> Result<Option<f64>> {
        terminal::reduce(self.pipeline, |a, b| {
            if f64::total_cmp(&b, &a) == std::cmp::Ordering::Less {
                b
            } else {
                a
            }
        })
    }

    pub fn max(self) -> Result<Option<f64>> {
        terminal::reduce(self.pipeline, |a, b| {
            if f64::total_cmp(&b, &a) == std::cmp::Ordering::Greater {
                b
            } else {
                a
            }
        })
    }
}
