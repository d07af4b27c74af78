// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The filter operation.

use rill_core::{FlagWord, Property, Sink, StreamFlags, SIZE_UNKNOWN};

use crate::stage::Operation;

/// Keeps the elements the predicate accepts. Clears SIZED; the size
/// hint forwarded downstream widens to unknown.
pub struct FilterOp<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> FilterOp<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<T: Send + 'static> Operation<T, T> for FilterOp<T> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY.clear(Property::Sized)
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<T> + 'a>,
    ) -> Box<dyn Sink<T> + 'a> {
        Box::new(FilterSink {
            downstream,
            predicate: &*self.predicate,
        })
    }
}

struct FilterSink<'a, T> {
    downstream: Box<dyn Sink<T> + 'a>,
    predicate: &'a (dyn Fn(&T) -> bool + Send + Sync),
}

impl<T> Sink<T> for FilterSink<'_, T> {
    fn begin(&mut self, _size: u64) {
        self.downstream.begin(SIZE_UNKNOWN);
    }

    fn accept(&mut self, value: T) {
        if (self.predicate)(&value) {
            self.downstream.accept(value);
        }
    }

    fn end(&mut self) {
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.downstream.cancellation_requested()
    }
}
