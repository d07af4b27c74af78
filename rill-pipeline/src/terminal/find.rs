// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The find terminal.

use rill_core::{FlagWord, Property, Result, Sink};

use crate::stage::Pipeline;
use crate::task::{self, SharedSlot};
use crate::terminal::{guard, prepare};

/// Captures the first element seen and cancels the rest.
///
/// With `must_find_first`, only a hit on the left spine may write the
/// shared slot — the leftmost leaf covers the earliest elements — and
/// an off-spine hit merely cancels the encounter-order suffix and
/// reports through the ordered combine. Without it, any hit wins
/// immediately and ORDERED is dropped upstream.
pub fn find<T>(pipeline: Pipeline<T>, must_find_first: bool) -> Result<Option<T>>
where
    T: Send + 'static,
{
    let terminal_word = if must_find_first {
        FlagWord::EMPTY
    } else {
        FlagWord::EMPTY.clear(Property::Ordered)
    };
    let (mut plan, parallel, _) = prepare(pipeline, terminal_word, true)?;
    if !parallel {
        let mut sink = FindSink { found: None };
        guard(|| {
            plan.copy_into(&mut sink, true);
            Ok(())
        })?;
        return Ok(sink.found);
    }
    let slot = SharedSlot::new();
    let combined = task::invoke(
        plan,
        &|chunk, handle| {
            let mut sink = FindSink { found: None };
            chunk.copy_into(&mut sink, true);
            match sink.found {
                None => None,
                Some(value) => {
                    if !must_find_first || handle.is_left_spine() {
                        slot.offer(value);
                        None
                    } else {
                        handle.cancel_later_nodes();
                        Some(value)
                    }
                }
            }
        },
        &|left, right| left.or(right),
        &|| None,
        &|| slot.is_set(),
    )?;
    Ok(slot.take().or(combined))
}

struct FindSink<T> {
    found: Option<T>,
}

impl<T> Sink<T> for FindSink<T> {
    fn accept(&mut self, value: T) {
        if self.found.is_none() {
            self.found = Some(value);
        }
    }

    fn cancellation_requested(&self) -> bool {
        self.found.is_some()
    }
}
