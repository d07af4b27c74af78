// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The flat-map operation.

use rill_core::{FlagWord, Property, Sink, StreamFlags, SIZE_UNKNOWN};

use crate::stage::Operation;

/// Expands each element into zero or more outputs.
///
/// The expander receives the element and an emit callback and calls it
/// once per produced value; inner sequences are thereby consumed
/// sequentially, on the expanding thread, even under parallel
/// execution. Clears SIZED, SORTED and DISTINCT.
pub struct FlatMapOp<In, Out> {
    expander: Box<dyn Fn(In, &mut dyn FnMut(Out)) + Send + Sync>,
}

impl<In, Out> FlatMapOp<In, Out> {
    pub fn new(expander: impl Fn(In, &mut dyn FnMut(Out)) + Send + Sync + 'static) -> Self {
        Self {
            expander: Box::new(expander),
        }
    }

    /// The iterator-flavored constructor most callers want.
    pub fn from_iter_fn<F, I>(f: F) -> Self
    where
        F: Fn(In) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Out>,
    {
        Self::new(move |value, emit| {
            for produced in f(value) {
                emit(produced);
            }
        })
    }
}

impl<In: Send + 'static, Out: Send + 'static> Operation<In, Out> for FlatMapOp<In, Out> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
            .clear(Property::Sized)
            .clear(Property::Sorted)
            .clear(Property::Distinct)
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<Out> + 'a>,
    ) -> Box<dyn Sink<In> + 'a> {
        Box::new(FlatMapSink {
            downstream,
            expander: &*self.expander,
        })
    }
}

struct FlatMapSink<'a, In, Out> {
    downstream: Box<dyn Sink<Out> + 'a>,
    expander: &'a (dyn Fn(In, &mut dyn FnMut(Out)) + Send + Sync),
}

impl<In, Out> Sink<In> for FlatMapSink<'_, In, Out> {
    fn begin(&mut self, _size: u64) {
        self.downstream.begin(SIZE_UNKNOWN);
    }

    fn accept(&mut self, value: In) {
        let downstream = &mut self.downstream;
        // an inner sequence runs to completion; once the downstream
        // cancels, the remainder is dropped rather than forwarded
        (self.expander)(value, &mut |produced| {
            if !downstream.cancellation_requested() {
                downstream.accept(produced);
            }
        });
    }

    fn end(&mut self) {
        self.downstream.end();
    }

    fn cancellation_requested(&self) -> bool {
        self.downstream.cancellation_requested()
    }
}
