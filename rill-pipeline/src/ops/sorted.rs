// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The sorted operation.

use std::cmp::Ordering;
use std::sync::Arc;

use rill_core::{Characteristics, FlagWord, Property, Result, Sink, StreamFlags, SIZE_UNKNOWN};

use crate::plan::Plan;
use crate::sort::parallel_sort;
use crate::stage::{BoxSplittable, Operation};
use crate::terminal::plan_to_node;

/// Caps the eager reservation a sorted sink honors from a size hint.
const MAX_SORT_RESERVE: usize = 1 << 16;

pub(crate) type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Re-emits the elements in sorted order. Injects SORTED and ORDERED.
///
/// The sequential sink buffers everything, sorts on `end`, and pushes
/// downstream honoring its cancellation. The parallel boundary collects
/// the upstream segment, merge-sorts it in parallel, and re-sources the
/// segment at the sorted buffer. Both sorts are stable.
pub struct SortedOp<T> {
    comparator: Comparator<T>,
    /// Natural ordering may be elided when the upstream is already
    /// SORTED; a caller-supplied ordering never is.
    natural: bool,
}

impl<T> SortedOp<T> {
    /// Natural ordering.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self {
            comparator: Arc::new(|a, b| a.cmp(b)),
            natural: true,
        }
    }

    /// A caller-supplied ordering.
    pub fn by(comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self {
            comparator: Arc::new(comparator),
            natural: false,
        }
    }
}

impl<T: Send + 'static> Operation<T, T> for SortedOp<T> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
            .set(Property::Sorted)
            .set(Property::Ordered)
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn wrap_sink<'a>(
        &'a self,
        flags: StreamFlags,
        downstream: Box<dyn Sink<T> + 'a>,
    ) -> Box<dyn Sink<T> + 'a> {
        if self.natural && flags.has(Property::Sorted) {
            // already in order, nothing to re-establish
            return downstream;
        }
        Box::new(SortedSink {
            downstream,
            buffer: Vec::new(),
            comparator: Arc::clone(&self.comparator),
        })
    }

    fn evaluate_parallel(
        &self,
        flags: StreamFlags,
        upstream: Box<dyn Plan<T>>,
    ) -> Result<BoxSplittable<T>> {
        if self.natural && flags.has(Property::Sorted) {
            let node = plan_to_node(upstream, true, false)?;
            return Ok(Box::new(node.into_source()));
        }
        let node = plan_to_node(upstream, true, false)?;
        let sorted = parallel_sort(node.into_vec(), &*self.comparator);
        Ok(Box::new(rill_core::sources::VecSource::with_characteristics(
            sorted,
            Characteristics::ORDERED | Characteristics::SORTED,
        )))
    }
}

struct SortedSink<'a, T> {
    downstream: Box<dyn Sink<T> + 'a>,
    buffer: Vec<T>,
    comparator: Comparator<T>,
}

impl<T> Sink<T> for SortedSink<'_, T> {
    fn begin(&mut self, size: u64) {
        if size != SIZE_UNKNOWN {
            let reserve = usize::try_from(size)
                .unwrap_or(MAX_SORT_RESERVE)
                .min(MAX_SORT_RESERVE);
            self.buffer.reserve(reserve);
        }
    }

    fn accept(&mut self, value: T) {
        self.buffer.push(value);
    }

    fn end(&mut self) {
        let comparator = Arc::clone(&self.comparator);
        self.buffer.sort_by(|a, b| (*comparator)(a, b));
        self.downstream.begin(self.buffer.len() as u64);
        for value in self.buffer.drain(..) {
            if self.downstream.cancellation_requested() {
                break;
            }
            self.downstream.accept(value);
        }
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        // everything upstream must be seen before order is known
        false
    }
}
