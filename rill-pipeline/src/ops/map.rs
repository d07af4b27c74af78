// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The map operation.

use rill_core::{FlagWord, Property, Sink, StreamFlags};

use crate::stage::Operation;

/// Transforms each element. Size-preserving; clears SORTED and
/// DISTINCT, since the mapping need not preserve either.
pub struct MapOp<In, Out> {
    mapper: Box<dyn Fn(In) -> Out + Send + Sync>,
}

impl<In, Out> MapOp<In, Out> {
    pub fn new(mapper: impl Fn(In) -> Out + Send + Sync + 'static) -> Self {
        Self {
            mapper: Box::new(mapper),
        }
    }
}

impl<In: Send + 'static, Out: Send + 'static> Operation<In, Out> for MapOp<In, Out> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
            .clear(Property::Sorted)
            .clear(Property::Distinct)
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<Out> + 'a>,
    ) -> Box<dyn Sink<In> + 'a> {
        Box::new(MapSink {
            downstream,
            mapper: &*self.mapper,
        })
    }
}

struct MapSink<'a, In, Out> {
    downstream: Box<dyn Sink<Out> + 'a>,
    mapper: &'a (dyn Fn(In) -> Out + Send + Sync),
}

impl<In, Out> Sink<In> for MapSink<'_, In, Out> {
    fn begin(&mut self, size: u64) {
        self.downstream.begin(size);
    }

    fn accept(&mut self, value: In) {
        self.downstream.accept((self.mapper)(value));
    }

    fn end(&mut self) {
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.downstream.cancellation_requested()
    }
}
