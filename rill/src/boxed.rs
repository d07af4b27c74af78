// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Boxing and unboxing stages over the type-erased sink bridge.

use std::marker::PhantomData;

use rill_core::adapters::{AnyElement, AnySink, BoxingSink};
use rill_core::{FlagWord, Property, Sink, StreamFlags};
use rill_pipeline::Operation;

/// Erases each element into an [`AnyElement`]. A primitive element
/// type makes this the accidental-boxing case the tripwire reports.
pub(crate) struct BoxOp<T> {
    _marker: PhantomData<fn(T)>,
}

impl<T> BoxOp<T> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Send + 'static> Operation<T, AnyElement> for BoxOp<T> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
            .clear(Property::Sorted)
            .clear(Property::Distinct)
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<AnyElement> + 'a>,
    ) -> Box<dyn Sink<T> + 'a> {
        Box::new(BoxingSink::new(downstream))
    }
}

/// Recovers typed elements from an erased stream. An element of any
/// other type fails the evaluation with `ShapeMismatch`.
pub(crate) struct UnboxOp<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> UnboxOp<T> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Send + 'static> Operation<AnyElement, T> for UnboxOp<T> {
    fn op_flags(&self) -> FlagWord {
        FlagWord::EMPTY
            .clear(Property::Sorted)
            .clear(Property::Distinct)
    }

    fn wrap_sink<'a>(
        &'a self,
        _flags: StreamFlags,
        downstream: Box<dyn Sink<T> + 'a>,
    ) -> Box<dyn Sink<AnyElement> + 'a> {
        Box::new(AnySink::new(downstream))
    }
}
