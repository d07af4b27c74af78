// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The slice operation: skip and limit.

use std::marker::PhantomData;

use rill_core::sources::EmptySource;
use rill_core::{Characteristics, FlagWord, Property, Result, Sink, StreamFlags, SIZE_UNKNOWN};

use crate::plan::Plan;
use crate::stage::{BoxSplittable, Operation};
use crate::terminal::plan_to_node;

/// Drops the first `skip` elements and keeps at most `limit` of the
/// rest. Clears SIZED; injects SHORT_CIRCUIT when a limit is present.
///
/// Parallel evaluation picks one of three boundary strategies:
/// - sized + uniform upstream: per-leaf window arithmetic, leaves
///   entirely outside `[skip, skip+limit)` are never traversed;
/// - unbounded upstream with a limit: a bounded sequential drive, so
///   infinite sources terminate;
/// - otherwise: collect everything and trim left/right.
pub struct SliceOp<T> {
    skip: u64,
    limit: Option<u64>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> SliceOp<T> {
    pub fn new(skip: u64, limit: Option<u64>) -> Self {
        Self {
            skip,
            limit,
            _marker: PhantomData,
        }
    }

    fn window_end(&self) -> Option<u64> {
        self.limit.map(|limit| self.skip.saturating_add(limit))
    }
}

impl<T: Send + 'static> Operation<T, T> for SliceOp<T> {
    fn op_flags(&self) -> FlagWord {
        let word = FlagWord::EMPTY.clear(Property::Sized);
        if self.limit.is_some() {
            word.set(Property::ShortCircuit)
        } else {
            word
        }
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<T> + 'a>,
    ) -> Box<dyn Sink<T> + 'a> {
        Box::new(SliceSink {
            downstream,
            skip_remaining: self.skip,
            limit_remaining: self.limit,
        })
    }

    fn evaluate_parallel(
        &self,
        flags: StreamFlags,
        upstream: Box<dyn Plan<T>>,
    ) -> Result<BoxSplittable<T>> {
        let end = self.window_end();
        if end == Some(self.skip) {
            // limit == 0: nothing can pass, the upstream is not touched
            return Ok(Box::new(EmptySource::new()));
        }
        let sized_uniform = upstream.exact_size_if_known().is_some()
            && upstream
                .characteristics()
                .contains(Characteristics::UNIFORM);
        if sized_uniform {
            let windowed: Box<dyn Plan<T>> = Box::new(WindowPlan {
                base: upstream,
                offset: 0,
                skip: self.skip,
                end,
            });
            let node = plan_to_node(windowed, true, true)?;
            return Ok(Box::new(node.into_source()));
        }
        if upstream.estimate_size() == SIZE_UNKNOWN && self.limit.is_some() {
            let mut upstream = upstream;
            let mut builder = rill_node::builder::<T>(None);
            let mut wrapped = self.wrap_sink(flags, Box::new(&mut builder));
            upstream.copy_into(&mut *wrapped, true);
            drop(wrapped);
            return Ok(Box::new(builder.build().into_source()));
        }
        let node = plan_to_node(upstream, true, false)?;
        let to = end.unwrap_or_else(|| node.count());
        Ok(Box::new(node.truncate(self.skip, to).into_source()))
    }
}

struct SliceSink<'a, T> {
    downstream: Box<dyn Sink<T> + 'a>,
    skip_remaining: u64,
    limit_remaining: Option<u64>,
}

impl<T> Sink<T> for SliceSink<'_, T> {
    fn begin(&mut self, size: u64) {
        let size = if size == SIZE_UNKNOWN {
            SIZE_UNKNOWN
        } else {
            let after_skip = size.saturating_sub(self.skip_remaining);
            match self.limit_remaining {
                Some(limit) => after_skip.min(limit),
                None => after_skip,
            }
        };
        self.downstream.begin(size);
    }

    fn accept(&mut self, value: T) {
        if self.skip_remaining > 0 {
            self.skip_remaining -= 1;
            return;
        }
        match &mut self.limit_remaining {
            Some(0) => {}
            Some(remaining) => {
                *remaining -= 1;
                self.downstream.accept(value);
            }
            None => self.downstream.accept(value),
        }
    }

    fn end(&mut self) {
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.limit_remaining == Some(0) || self.downstream.cancellation_requested()
    }
}

/// A plan wrapper that resolves the slice window structurally: every
/// split tracks its absolute offset, so a leaf knows which local
/// indices fall inside `[skip, end)` and leaves entirely outside are
/// finished without touching their source.
struct WindowPlan<T: Send + 'static> {
    base: Box<dyn Plan<T>>,
    /// Global encounter index of the base plan's first element.
    offset: u64,
    skip: u64,
    end: Option<u64>,
}

impl<T: Send + 'static> WindowPlan<T> {
    /// The local index window `[lo, hi)` of elements to keep.
    fn window(&self) -> (u64, u64) {
        let n = self
            .base
            .exact_size_if_known()
            .unwrap_or_else(|| self.base.estimate_size());
        let lo = self.skip.saturating_sub(self.offset).min(n);
        let hi = match self.end {
            Some(end) => end.saturating_sub(self.offset).min(n),
            None => n,
        };
        (lo, hi.max(lo))
    }
}

impl<T: Send + 'static> Plan<T> for WindowPlan<T> {
    fn estimate_size(&self) -> u64 {
        let (lo, hi) = self.window();
        hi - lo
    }

    fn exact_size_if_known(&self) -> Option<u64> {
        Some(self.estimate_size())
    }

    fn try_split(&mut self) -> Option<Box<dyn Plan<T>>> {
        let prefix = self.base.try_split()?;
        let prefix_size = prefix
            .exact_size_if_known()
            .unwrap_or_else(|| prefix.estimate_size());
        let child = WindowPlan {
            base: prefix,
            offset: self.offset,
            skip: self.skip,
            end: self.end,
        };
        self.offset += prefix_size;
        Some(Box::new(child))
    }

    fn copy_into(&mut self, sink: &mut dyn Sink<T>, _short_circuit: bool) {
        let (lo, hi) = self.window();
        if lo == hi {
            sink.begin(0);
            sink.end();
            return;
        }
        let mut windowed = WindowSink {
            downstream: sink,
            index: 0,
            lo,
            hi,
        };
        self.base.copy_into(&mut windowed, true);
    }

    fn characteristics(&self) -> Characteristics {
        self.base.characteristics()
    }
}

struct WindowSink<'a, T> {
    downstream: &'a mut dyn Sink<T>,
    index: u64,
    lo: u64,
    hi: u64,
}

impl<T> Sink<T> for WindowSink<'_, T> {
    fn begin(&mut self, _size: u64) {
        self.downstream.begin(self.hi - self.lo);
    }

    fn accept(&mut self, value: T) {
        if self.index >= self.lo && self.index < self.hi {
            self.downstream.accept(value);
        }
        self.index += 1;
    }

    fn end(&mut self) {
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.index >= self.hi || self.downstream.cancellation_requested()
    }
}
