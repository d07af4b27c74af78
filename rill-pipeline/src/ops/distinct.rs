// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The distinct operation.

use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

use parking_lot::Mutex;
use rill_core::sources::VecSource;
use rill_core::{Characteristics, FlagWord, Property, Result, Sink, StreamFlags, SIZE_UNKNOWN};

use crate::plan::Plan;
use crate::stage::{BoxSplittable, Operation};
use crate::task;
use crate::terminal::plan_to_node;

/// Drops duplicate elements, keeping first occurrences in encounter
/// order. Injects DISTINCT, clears SIZED.
///
/// Three sequential strategies, picked by the upstream flags: an
/// already-DISTINCT upstream passes through untouched; a SORTED
/// upstream compares against the last element seen (single pass,
/// constant memory); anything else accumulates a seen-set. The
/// parallel boundary mirrors them: identity collect, per-leaf
/// insertion-ordered dedup merged left to right, or a shared
/// concurrent seen-set when order need not survive.
pub struct DistinctOp<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> DistinctOp<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DistinctOp<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Operation<T, T> for DistinctOp<T>
where
    T: Eq + Hash + Clone + Send + 'static,
{
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
            .set(Property::Distinct)
            .clear(Property::Sized)
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn wrap_sink<'a>(
        &'a self,
        flags: StreamFlags,
        downstream: Box<dyn Sink<T> + 'a>,
    ) -> Box<dyn Sink<T> + 'a> {
        if flags.has(Property::Distinct) {
            return downstream;
        }
        if flags.has(Property::Sorted) {
            return Box::new(SortedDistinctSink {
                downstream,
                last: None,
            });
        }
        Box::new(SeenDistinctSink {
            downstream,
            seen: HashSet::new(),
        })
    }

    fn evaluate_parallel(
        &self,
        flags: StreamFlags,
        upstream: Box<dyn Plan<T>>,
    ) -> Result<BoxSplittable<T>> {
        if flags.has(Property::Distinct) {
            let node = plan_to_node(upstream, true, false)?;
            return Ok(Box::new(node.into_source()));
        }
        if flags.is_ordered() || flags.has(Property::Sorted) {
            let sorted = flags.has(Property::Sorted);
            let (out, _seen) = task::invoke(
                upstream,
                &|chunk, _handle| {
                    let mut sink = OrderedDedupSink {
                        out: Vec::new(),
                        seen: HashSet::new(),
                    };
                    chunk.copy_into(&mut sink, false);
                    (sink.out, sink.seen)
                },
                &|(mut left, mut left_seen), (right, _)| {
                    for value in right {
                        if left_seen.insert(value.clone()) {
                            left.push(value);
                        }
                    }
                    (left, left_seen)
                },
                &|| (Vec::new(), HashSet::new()),
                &|| false,
            )?;
            let characteristics = if sorted {
                Characteristics::ORDERED | Characteristics::DISTINCT | Characteristics::SORTED
            } else {
                Characteristics::ORDERED | Characteristics::DISTINCT
            };
            return Ok(Box::new(VecSource::with_characteristics(
                out,
                characteristics,
            )));
        }
        // unordered: one shared seen-set, winners concatenated in
        // whatever order the leaves finish
        let seen = Mutex::new(HashSet::new());
        let out = task::invoke(
            upstream,
            &|chunk, _handle| {
                let mut sink = SharedDedupSink {
                    out: Vec::new(),
                    seen: &seen,
                };
                chunk.copy_into(&mut sink, false);
                sink.out
            },
            &|mut left, mut right| {
                left.append(&mut right);
                left
            },
            &Vec::new,
            &|| false,
        )?;
        Ok(Box::new(VecSource::with_characteristics(
            out,
            Characteristics::DISTINCT,
        )))
    }
}

struct SortedDistinctSink<'a, T> {
    downstream: Box<dyn Sink<T> + 'a>,
    last: Option<T>,
}

impl<T: Eq + Clone> Sink<T> for SortedDistinctSink<'_, T> {
    fn begin(&mut self, _size: u64) {
        self.downstream.begin(SIZE_UNKNOWN);
    }

    fn accept(&mut self, value: T) {
        if self.last.as_ref() != Some(&value) {
            self.last = Some(value.clone());
            self.downstream.accept(value);
        }
    }

    fn end(&mut self) {
        self.last = None;
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.downstream.cancellation_requested()
    }
}

struct SeenDistinctSink<'a, T> {
    downstream: Box<dyn Sink<T> + 'a>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> Sink<T> for SeenDistinctSink<'_, T> {
    fn begin(&mut self, _size: u64) {
        self.downstream.begin(SIZE_UNKNOWN);
    }

    fn accept(&mut self, value: T) {
        if self.seen.insert(value.clone()) {
            self.downstream.accept(value);
        }
    }

    fn end(&mut self) {
        self.seen.clear();
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.downstream.cancellation_requested()
    }
}

struct OrderedDedupSink<T> {
    out: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> Sink<T> for OrderedDedupSink<T> {
    fn accept(&mut self, value: T) {
        if self.seen.insert(value.clone()) {
            self.out.push(value);
        }
    }
}

struct SharedDedupSink<'a, T> {
    out: Vec<T>,
    seen: &'a Mutex<HashSet<T>>,
}

impl<T: Eq + Hash + Clone> Sink<T> for SharedDedupSink<'_, T> {
    fn accept(&mut self, value: T) {
        if self.seen.lock().insert(value.clone()) {
            self.out.push(value);
        }
    }
}
