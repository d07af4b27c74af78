// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The collect terminals and the collector contract.

use parking_lot::Mutex;
use rill_core::{FlagWord, Result, RillError, Sink};
use rill_node::{Node, MAX_ARRAY_SIZE};

use crate::plan::Plan;
use crate::stage::Pipeline;
use crate::task;
use crate::terminal::{guard, prepare};

/// A mutable-reduction recipe: how to make a container, fold an
/// element in, and merge two containers.
///
/// Non-concurrent collectors merge per-leaf containers in encounter
/// order; a concurrent collector accumulates into one shared container
/// behind collector-level synchronization and gives up ordering.
pub struct Collector<T, R> {
    supplier: Box<dyn Fn() -> R + Send + Sync>,
    accumulator: Box<dyn Fn(&mut R, T) + Send + Sync>,
    combiner: Box<dyn Fn(R, R) -> R + Send + Sync>,
    concurrent: bool,
}

impl<T, R> Collector<T, R> {
    pub fn new(
        supplier: impl Fn() -> R + Send + Sync + 'static,
        accumulator: impl Fn(&mut R, T) + Send + Sync + 'static,
        combiner: impl Fn(R, R) -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            supplier: Box::new(supplier),
            accumulator: Box::new(accumulator),
            combiner: Box::new(combiner),
            concurrent: false,
        }
    }

    /// Marks the collector safe for shared accumulation.
    #[must_use]
    pub fn concurrent(mut self) -> Self {
        self.concurrent = true;
        self
    }

    pub fn is_concurrent(&self) -> bool {
        self.concurrent
    }
}

/// Runs the pipeline into the collector's container.
pub fn collect<T, R>(pipeline: Pipeline<T>, collector: Collector<T, R>) -> Result<R>
where
    T: Send + 'static,
    R: Send,
{
    let (mut plan, parallel, short_circuit) = prepare(pipeline, FlagWord::EMPTY, false)?;
    if !parallel {
        let mut sink = CollectSink {
            container: Some((collector.supplier)()),
            accumulator: &collector.accumulator,
        };
        guard(|| {
            plan.copy_into(&mut sink, short_circuit);
            Ok(())
        })?;
        return Ok(sink.take());
    }
    if collector.is_concurrent() {
        let shared = Mutex::new((collector.supplier)());
        task::invoke(
            plan,
            &|chunk, _handle| {
                let mut sink = ConcurrentCollectSink {
                    container: &shared,
                    accumulator: &collector.accumulator,
                };
                chunk.copy_into(&mut sink, short_circuit);
            },
            &|(), ()| (),
            &|| (),
            &|| false,
        )?;
        return Ok(shared.into_inner());
    }
    let result = task::invoke(
        plan,
        &|chunk, _handle| {
            let mut sink = CollectSink {
                container: Some((collector.supplier)()),
                accumulator: &collector.accumulator,
            };
            chunk.copy_into(&mut sink, short_circuit);
            Some(sink.take())
        },
        &|left, right| match (left, right) {
            (Some(left), Some(right)) => Some((collector.combiner)(left, right)),
            (Some(one), None) | (None, Some(one)) => Some(one),
            (None, None) => None,
        },
        &|| None,
        &|| false,
    )?;
    Ok(result.unwrap_or_else(|| (collector.supplier)()))
}

/// The auxiliary collect-to-node terminal: conc tree when `flatten` is
/// false, one contiguous buffer otherwise. Backs `to_vec` and the
/// parallel stateful-op boundaries.
pub fn collect_node<T>(pipeline: Pipeline<T>, flatten: bool) -> Result<Node<T>>
where
    T: Send + 'static,
{
    let (plan, parallel, short_circuit) = prepare(pipeline, FlagWord::EMPTY, false)?;
    if let Some(size) = plan.exact_size_if_known() {
        if size > MAX_ARRAY_SIZE {
            return Err(RillError::StreamSizeExceedsMaxArray {
                requested: size,
                max: MAX_ARRAY_SIZE,
            });
        }
    }
    let node = if parallel {
        plan_to_node(plan, true, short_circuit)?
    } else {
        guard(|| plan_to_node(plan, false, short_circuit))?
    };
    if flatten {
        if node.count() > MAX_ARRAY_SIZE {
            return Err(RillError::StreamSizeExceedsMaxArray {
                requested: node.count(),
                max: MAX_ARRAY_SIZE,
            });
        }
        return Ok(node.flatten());
    }
    Ok(node)
}

/// Drives a plan into a node: per-leaf builders, conc at each join.
/// Parallel panics are handled by the task framework; sequential
/// callers guard at their boundary.
pub(crate) fn plan_to_node<T>(
    plan: Box<dyn Plan<T>>,
    parallel: bool,
    short_circuit: bool,
) -> Result<Node<T>>
where
    T: Send + 'static,
{
    if parallel {
        return task::invoke(
            plan,
            &|chunk, _handle| {
                let mut builder = rill_node::builder::<T>(chunk.exact_size_if_known());
                chunk.copy_into(&mut builder, short_circuit);
                builder.build()
            },
            &|left, right| Node::conc(left, right),
            &|| Node::Empty,
            &|| false,
        );
    }
    let mut plan = plan;
    let mut builder = rill_node::builder::<T>(plan.exact_size_if_known());
    plan.copy_into(&mut builder, short_circuit);
    Ok(builder.build())
}

struct CollectSink<'a, T, R> {
    container: Option<R>,
    accumulator: &'a (dyn Fn(&mut R, T) + Send + Sync),
}

impl<T, R> CollectSink<'_, T, R> {
    fn take(&mut self) -> R {
        match self.container.take() {
            Some(container) => container,
            // unreachable: installed at construction, taken once
            None => unreachable!("collect container already taken"),
        }
    }
}

impl<T, R> Sink<T> for CollectSink<'_, T, R> {
    fn accept(&mut self, value: T) {
        if let Some(container) = &mut self.container {
            (self.accumulator)(container, value);
        }
    }
}

struct ConcurrentCollectSink<'a, T, R> {
    container: &'a Mutex<R>,
    accumulator: &'a (dyn Fn(&mut R, T) + Send + Sync),
}

impl<T, R> Sink<T> for ConcurrentCollectSink<'_, T, R> {
    fn accept(&mut self, value: T) {
        (self.accumulator)(&mut self.container.lock(), value);
    }
}
