// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The reduce and fold terminals.

use rill_core::{FlagWord, Result, Sink};

use crate::stage::Pipeline;
use crate::task;
use crate::terminal::{guard, prepare};

/// Folds every element onto `identity`. In parallel, each leaf folds
/// its chunk onto a fresh identity and adjacent partials combine in
/// encounter order, so the result matches the sequential fold whenever
/// `combine` is associative.
pub fn fold<T, R, A, C>(pipeline: Pipeline<T>, identity: R, accumulate: A, combine: C) -> Result<R>
where
    T: Send + 'static,
    R: Clone + Send + Sync,
    A: Fn(R, T) -> R + Send + Sync,
    C: Fn(R, R) -> R + Send + Sync,
{
    let (mut plan, parallel, short_circuit) = prepare(pipeline, FlagWord::EMPTY, false)?;
    if !parallel {
        let mut sink = FoldSink {
            accumulator: Some(identity),
            accumulate: &accumulate,
            _marker: std::marker::PhantomData,
        };
        guard(|| {
            plan.copy_into(&mut sink, short_circuit);
            Ok(())
        })?;
        return Ok(sink.take());
    }
    let result = task::invoke(
        plan,
        &|chunk, _handle| {
            let mut sink = FoldSink {
                accumulator: Some(identity.clone()),
                accumulate: &accumulate,
                _marker: std::marker::PhantomData,
            };
            chunk.copy_into(&mut sink, short_circuit);
            Some(sink.take())
        },
        &|left, right| match (left, right) {
            (Some(left), Some(right)) => Some(combine(left, right)),
            (Some(one), None) | (None, Some(one)) => Some(one),
            (None, None) => None,
        },
        &|| None,
        &|| false,
    )?;
    Ok(result.unwrap_or(identity))
}

/// Reduces without an identity: an empty pipeline yields `None`, a
/// single element is returned without invoking the operator.
pub fn reduce<T, F>(pipeline: Pipeline<T>, operator: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: Fn(T, T) -> T + Send + Sync,
{
    let (mut plan, parallel, short_circuit) = prepare(pipeline, FlagWord::EMPTY, false)?;
    if !parallel {
        let mut sink = ReduceSink {
            accumulator: None,
            operator: &operator,
        };
        guard(|| {
            plan.copy_into(&mut sink, short_circuit);
            Ok(())
        })?;
        return Ok(sink.accumulator);
    }
    task::invoke(
        plan,
        &|chunk, _handle| {
            let mut sink = ReduceSink {
                accumulator: None,
                operator: &operator,
            };
            chunk.copy_into(&mut sink, short_circuit);
            sink.accumulator
        },
        &|left, right| match (left, right) {
            (Some(left), Some(right)) => Some(operator(left, right)),
            (Some(one), None) | (None, Some(one)) => Some(one),
            (None, None) => None,
        },
        &|| None,
        &|| false,
    )
}

struct FoldSink<'a, T, R, A: Fn(R, T) -> R> {
    accumulator: Option<R>,
    accumulate: &'a A,
    _marker: std::marker::PhantomData<fn(T)>,
}

impl<T, R, A: Fn(R, T) -> R> FoldSink<'_, T, R, A> {
    fn take(&mut self) -> R {
        match self.accumulator.take() {
            Some(accumulator) => accumulator,
            // unreachable: the accumulator is installed at construction
            // and only taken here
            None => unreachable!("fold accumulator already taken"),
        }
    }
}

impl<T, R, A: Fn(R, T) -> R> Sink<T> for FoldSink<'_, T, R, A> {
    fn accept(&mut self, value: T) {
        if let Some(accumulator) = self.accumulator.take() {
            self.accumulator = Some((self.accumulate)(accumulator, value));
        }
    }
}

struct ReduceSink<'a, T, F: Fn(T, T) -> T> {
    accumulator: Option<T>,
    operator: &'a F,
}

impl<T, F: Fn(T, T) -> T> Sink<T> for ReduceSink<'_, T, F> {
    fn accept(&mut self, value: T) {
        self.accumulator = Some(match self.accumulator.take() {
            None => value,
            Some(accumulator) => (self.operator)(accumulator, value),
        });
    }
}
