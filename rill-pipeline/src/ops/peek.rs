// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The peek operation.

use rill_core::{FlagWord, Sink, StreamFlags};

use crate::stage::Operation;

/// Observes each element and forwards it unchanged. No flag effects.
pub struct PeekOp<T> {
    consumer: Box<dyn Fn(&T) + Send + Sync>,
}

impl<T> PeekOp<T> {
    pub fn new(consumer: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            consumer: Box::new(consumer),
        }
    }
}

impl<T: Send + 'static> Operation<T, T> for PeekOp<T> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<T> + 'a>,
    ) -> Box<dyn Sink<T> + 'a> {
        Box::new(PeekSink {
            downstream,
            consumer: &*self.consumer,
        })
    }
}

struct PeekSink<'a, T> {
    downstream: Box<dyn Sink<T> + 'a>,
    consumer: &'a (dyn Fn(&T) + Send + Sync),
}

impl<T> Sink<T> for PeekSink<'_, T> {
    fn begin(&mut self, size: u64) {
        self.downstream.begin(size);
    }

    fn accept(&mut self, value: T) {
        (self.consumer)(&value);
        self.downstream.accept(value);
    }

    fn end(&mut self) {
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.downstream.cancellation_requested()
    }
}
