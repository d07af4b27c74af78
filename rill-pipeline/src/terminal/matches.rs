// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The quantified match terminal.

use rill_core::{FlagWord, Result, Sink};

use crate::stage::Pipeline;
use crate::task::{self, SharedSlot};
use crate::terminal::{guard, prepare};

/// The three match quantifiers, each defined by the predicate value
/// that stops the traversal and the result a stop implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Stops on the first `true`; a stop means `true`.
    Any,
    /// Stops on the first `false`; a stop means `false`.
    All,
    /// Stops on the first `true`; a stop means `false`.
    None,
}

impl MatchKind {
    fn stop_on(self) -> bool {
        match self {
            MatchKind::Any | MatchKind::None => true,
            MatchKind::All => false,
        }
    }

    fn short_circuit_result(self) -> bool {
        matches!(self, MatchKind::Any)
    }
}

/// Evaluates the quantified predicate with short-circuiting: the
/// traversal stops as soon as any element decides the answer.
pub fn match_kind<T, P>(pipeline: Pipeline<T>, kind: MatchKind, predicate: P) -> Result<bool>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync,
{
    let (mut plan, parallel, _) = prepare(pipeline, FlagWord::EMPTY, true)?;
    if !parallel {
        let mut sink = MatchSink {
            predicate: &predicate,
            stop_on: kind.stop_on(),
            stopped: false,
            _marker: std::marker::PhantomData,
        };
        guard(|| {
            plan.copy_into(&mut sink, true);
            Ok(())
        })?;
        return Ok(if sink.stopped {
            kind.short_circuit_result()
        } else {
            !kind.short_circuit_result()
        });
    }
    let slot: SharedSlot<bool> = SharedSlot::new();
    // Every leaf re-polls the shared slot between pulls; that per-leaf
    // overhead is a known trade-off, kept for the cancellation
    // semantics rather than optimized away.
    let stopped_anywhere = task::invoke(
        plan,
        &|chunk, _handle| {
            let mut sink = MatchSink {
                predicate: &predicate,
                stop_on: kind.stop_on(),
                stopped: false,
                _marker: std::marker::PhantomData,
            };
            chunk.copy_into(&mut sink, true);
            if sink.stopped {
                slot.offer(kind.short_circuit_result());
            }
            sink.stopped
        },
        &|left, right| left || right,
        &|| false,
        &|| slot.is_set(),
    )?;
    Ok(if slot.is_set() || stopped_anywhere {
        kind.short_circuit_result()
    } else {
        !kind.short_circuit_result()
    })
}

struct MatchSink<'a, T, P: Fn(&T) -> bool> {
    predicate: &'a P,
    stop_on: bool,
    stopped: bool,
    _marker: std::marker::PhantomData<fn(&T)>,
}

impl<T, P: Fn(&T) -> bool> Sink<T> for MatchSink<'_, T, P> {
    fn accept(&mut self, value: T) {
        if !self.stopped && (self.predicate)(&value) == self.stop_on {
            self.stopped = true;
        }
    }

    fn cancellation_requested(&self) -> bool {
        self.stopped
    }
}
