// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-evaluation plan: the pipeline helper.
//!
//! A [`Plan`] pairs the resolved source spliterator with the layered
//! sink-wrapping recipe for one evaluation. Splitting a plan splits the
//! underlying source and shares the recipe, which is what the parallel
//! task framework decomposes; [`copy_into`](Plan::copy_into) wraps a
//! terminal sink through every layer and drives the traversal
//! (begin → pull loop → end), polling for cancellation when a
//! short-circuit is known anywhere in the chain.

use std::sync::Arc;

use rill_core::sources::EmptySource;
use rill_core::{Characteristics, Property, Sink, Splittable, StreamFlags, SIZE_UNKNOWN};

use crate::stage::{BoxSplittable, Operation};

/// One evaluation's pairing of source and wrap recipe, erased to its
/// output element type.
pub trait Plan<Out: Send + 'static>: Send {
    /// An upper bound on the elements this plan will push.
    fn estimate_size(&self) -> u64;

    /// The exact output size, present iff the source is sized and every
    /// layered op preserves SIZED.
    fn exact_size_if_known(&self) -> Option<u64>;

    /// Splits off a prefix plan over the same recipe, or `None` when
    /// the source is past splitting.
    fn try_split(&mut self) -> Option<Box<dyn Plan<Out>>>;

    /// Wraps `sink` through every layer and drives the traversal:
    /// `begin(exact-size-or-unknown)`, the pull loop, then `end`.
    /// With `short_circuit`, cancellation is polled before each pull.
    fn copy_into(&mut self, sink: &mut dyn Sink<Out>, short_circuit: bool);

    /// The characteristics of the underlying source spliterator.
    fn characteristics(&self) -> Characteristics;

    /// Hands back the raw source when this plan is a bare source with
    /// no layered ops.
    fn take_source(&mut self) -> Option<BoxSplittable<Out>> {
        None
    }
}

impl<Out: Send + 'static> Plan<Out> for Box<dyn Plan<Out>> {
    fn estimate_size(&self) -> u64 {
        (**self).estimate_size()
    }

    fn exact_size_if_known(&self) -> Option<u64> {
        (**self).exact_size_if_known()
    }

    fn try_split(&mut self) -> Option<Box<dyn Plan<Out>>> {
        (**self).try_split()
    }

    fn copy_into(&mut self, sink: &mut dyn Sink<Out>, short_circuit: bool) {
        (**self).copy_into(sink, short_circuit);
    }

    fn characteristics(&self) -> Characteristics {
        (**self).characteristics()
    }

    fn take_source(&mut self) -> Option<BoxSplittable<Out>> {
        (**self).take_source()
    }
}

/// The innermost layer: a bare source.
pub(crate) struct SourcePlan<T: Send + 'static> {
    source: BoxSplittable<T>,
    flags: StreamFlags,
}

impl<T: Send + 'static> SourcePlan<T> {
    pub(crate) fn new(source: BoxSplittable<T>, flags: StreamFlags) -> Self {
        Self { source, flags }
    }
}

impl<T: Send + 'static> Plan<T> for SourcePlan<T> {
    fn estimate_size(&self) -> u64 {
        self.source.estimate_size()
    }

    fn exact_size_if_known(&self) -> Option<u64> {
        // the combined flags gate the answer, not the spliterator alone
        if self.flags.is_sized() {
            self.source.exact_size_if_known()
        } else {
            None
        }
    }

    fn try_split(&mut self) -> Option<Box<dyn Plan<T>>> {
        let prefix = self.source.try_split()?;
        Some(Box::new(SourcePlan {
            source: prefix,
            flags: self.flags,
        }))
    }

    fn copy_into(&mut self, sink: &mut dyn Sink<T>, short_circuit: bool) {
        let size = self.exact_size_if_known().unwrap_or(SIZE_UNKNOWN);
        sink.begin(size);
        if short_circuit {
            while !sink.cancellation_requested()
                && self.source.try_advance(&mut |value| sink.accept(value))
            {}
        } else {
            self.source
                .for_each_remaining(&mut |value| sink.accept(value));
        }
        sink.end();
    }

    fn characteristics(&self) -> Characteristics {
        self.source.characteristics()
    }

    fn take_source(&mut self) -> Option<BoxSplittable<T>> {
        let empty: BoxSplittable<T> = Box::new(EmptySource::new());
        Some(std::mem::replace(&mut self.source, empty))
    }
}

/// One op layered over a base plan.
pub(crate) struct ComposedPlan<In: Send + 'static, Out: Send + 'static> {
    base: Box<dyn Plan<In>>,
    op: Arc<dyn Operation<In, Out>>,
    /// What the op's wrapper observes: combined flags up to but not
    /// including the op, terminal upstream word folded in.
    flags_before: StreamFlags,
}

impl<In: Send + 'static, Out: Send + 'static> ComposedPlan<In, Out> {
    pub(crate) fn new(
        base: Box<dyn Plan<In>>,
        op: Arc<dyn Operation<In, Out>>,
        flags_before: StreamFlags,
    ) -> Self {
        Self {
            base,
            op,
            flags_before,
        }
    }
}

impl<In: Send + 'static, Out: Send + 'static> Plan<Out> for ComposedPlan<In, Out> {
    fn estimate_size(&self) -> u64 {
        self.base.estimate_size()
    }

    fn exact_size_if_known(&self) -> Option<u64> {
        if self.op.op_flags().clears(Property::Sized) {
            None
        } else {
            self.base.exact_size_if_known()
        }
    }

    fn try_split(&mut self) -> Option<Box<dyn Plan<Out>>> {
        let prefix = self.base.try_split()?;
        Some(Box::new(ComposedPlan {
            base: prefix,
            op: Arc::clone(&self.op),
            flags_before: self.flags_before,
        }))
    }

    fn copy_into(&mut self, sink: &mut dyn Sink<Out>, short_circuit: bool) {
        let mut wrapped = self.op.wrap_sink(self.flags_before, Box::new(sink));
        self.base.copy_into(&mut *wrapped, short_circuit);
    }

    fn characteristics(&self) -> Characteristics {
        self.base.characteristics()
    }
}
