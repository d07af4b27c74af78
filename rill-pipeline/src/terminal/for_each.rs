// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The for-each terminals.

use rill_core::{FlagWord, Property, Result, Sink};

use crate::stage::Pipeline;
use crate::task;
use crate::terminal::{guard, prepare};

/// Runs `action` on every element. Drops ORDERED upstream: parallel
/// leaves push into their sink chains independently with no result to
/// combine, so the action must tolerate any arrival order.
pub fn for_each<T, A>(pipeline: Pipeline<T>, action: A) -> Result<()>
where
    T: Send + 'static,
    A: Fn(T) + Send + Sync,
{
    let terminal_word = FlagWord::EMPTY.clear(Property::Ordered);
    let (mut plan, parallel, short_circuit) = prepare(pipeline, terminal_word, false)?;
    if !parallel {
        let mut sink = ForEachSink { action: &action };
        return guard(|| {
            plan.copy_into(&mut sink, short_circuit);
            Ok(())
        });
    }
    task::invoke(
        plan,
        &|chunk, _handle| {
            let mut sink = ForEachSink { action: &action };
            chunk.copy_into(&mut sink, short_circuit);
        },
        &|(), ()| (),
        &|| (),
        &|| false,
    )
}

/// As [`for_each`], plus a stop predicate polled before each pull;
/// once it turns true the traversal winds down cooperatively.
pub fn for_each_until<T, A, S>(pipeline: Pipeline<T>, action: A, stop: S) -> Result<()>
where
    T: Send + 'static,
    A: Fn(T) + Send + Sync,
    S: Fn() -> bool + Send + Sync,
{
    let terminal_word = FlagWord::EMPTY.clear(Property::Ordered);
    let (mut plan, parallel, _) = prepare(pipeline, terminal_word, true)?;
    if !parallel {
        let mut sink = UntilSink {
            action: &action,
            stop: &stop,
        };
        return guard(|| {
            plan.copy_into(&mut sink, true);
            Ok(())
        });
    }
    task::invoke(
        plan,
        &|chunk, _handle| {
            let mut sink = UntilSink {
                action: &action,
                stop: &stop,
            };
            chunk.copy_into(&mut sink, true);
        },
        &|(), ()| (),
        &|| (),
        &|| stop(),
    )
}

struct ForEachSink<'a, A> {
    action: &'a A,
}

impl<T, A: Fn(T)> Sink<T> for ForEachSink<'_, A> {
    fn accept(&mut self, value: T) {
        (self.action)(value);
    }
}

struct UntilSink<'a, A, S> {
    action: &'a A,
    stop: &'a S,
}

impl<T, A: Fn(T), S: Fn() -> bool> Sink<T> for UntilSink<'_, A, S> {
    fn accept(&mut self, value: T) {
        (self.action)(value);
    }

    fn cancellation_requested(&self) -> bool {
        (self.stop)()
    }
}
