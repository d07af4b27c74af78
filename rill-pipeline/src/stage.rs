// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The pipeline graph: a linear chain of stages.
//!
//! A [`Pipeline`] owns a type-erased chain of stages. Each stage owns
//! its [`Operation`] by value and its upstream stage by boxed
//! ownership, and carries the flag word accumulated up to and
//! including itself. Chaining records structure and executes nothing;
//! a terminal converts the chain into a [`Plan`](crate::plan::Plan)
//! exactly once.
//!
//! Rust ownership stands in for most of the single-link/single-consume
//! state machine: `append` and the terminals take the pipeline by
//! value, so a second link of the same stage is unrepresentable. The
//! machine survives where aliasing is real — the [`SourceSupplier`] is
//! shared by `Arc` across every pipeline built from it and hands out
//! its spliterator exactly once; a second evaluation fails with
//! `PipelineState`.

use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::{Characteristics, FlagWord, Property, Result, RillError, Sink, Splittable, StreamFlags};

use crate::plan::{ComposedPlan, Plan, SourcePlan};

pub type BoxSplittable<T> = Box<dyn Splittable<Item = T>>;

/// An intermediate operation: its flag word, its statefulness, its sink
/// wrapper, and (for stateful ops) its parallel boundary evaluator.
pub trait Operation<In: Send + 'static, Out: Send + 'static>: Send + Sync {
    /// The op's two-bit flag word (SET/CLEAR pairs only).
    fn op_flags(&self) -> FlagWord;

    fn is_stateful(&self) -> bool {
        false
    }

    /// Wraps `downstream` into a sink accepting this op's input.
    ///
    /// `flags` are the combined stream flags up to but not including
    /// this op, with the terminal's upstream flags already folded in.
    fn wrap_sink<'a>(
        &'a self,
        flags: StreamFlags,
        downstream: Box<dyn Sink<Out> + 'a>,
    ) -> Box<dyn Sink<In> + 'a>;

    /// Consumes the upstream plan and produces the splittable source
    /// this op's output segment is rooted at. Only stateful ops are
    /// asked; the engine never calls this on a stateless op.
    fn evaluate_parallel(
        &self,
        flags: StreamFlags,
        upstream: Box<dyn Plan<In>>,
    ) -> Result<BoxSplittable<Out>> {
        let _ = (flags, upstream);
        Err(RillError::pipeline_state(
            "operation has no parallel boundary",
        ))
    }
}

/// The shared, one-shot source factory.
///
/// Cloning shares the underlying factory; whichever pipeline evaluates
/// first consumes it, and later evaluations fail with
/// [`RillError::PipelineState`].
pub struct SourceSupplier<T: Send + 'static> {
    factory: Arc<Mutex<Option<Box<dyn FnOnce() -> BoxSplittable<T> + Send>>>>,
    characteristics: Characteristics,
}

impl<T: Send + 'static> Clone for SourceSupplier<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            characteristics: self.characteristics,
        }
    }
}

impl<T: Send + 'static> SourceSupplier<T> {
    /// Wraps a factory together with the characteristics it will
    /// advertise. The factory runs at most once, lazily, at the first
    /// terminal evaluation.
    pub fn new<F>(characteristics: Characteristics, factory: F) -> Self
    where
        F: FnOnce() -> BoxSplittable<T> + Send + 'static,
    {
        Self {
            factory: Arc::new(Mutex::new(Some(Box::new(factory)))),
            characteristics,
        }
    }

    /// Wraps an already-built splittable source.
    pub fn from_splittable<S>(source: S) -> Self
    where
        S: Splittable<Item = T> + 'static,
    {
        let characteristics = source.characteristics();
        Self::new(characteristics, move || Box::new(source))
    }

    pub fn characteristics(&self) -> Characteristics {
        self.characteristics
    }

    /// Hands out the spliterator. Exactly one call succeeds.
    pub fn take(&self) -> Result<BoxSplittable<T>> {
        let factory = self
            .factory
            .lock()
            .take()
            .ok_or_else(|| RillError::pipeline_state("source already consumed"))?;
        Ok(factory())
    }
}

/// A type-erased stage chain producing elements of `Out`.
trait Chain<Out: Send + 'static>: Send {
    /// The flag word accumulated from the source through this stage.
    fn combined_word(&self) -> FlagWord;

    fn depth(&self) -> usize;

    /// Resolves the source and layers the per-evaluation plan.
    ///
    /// Under `parallel`, each stateful stage materializes a boundary:
    /// its upstream segment is evaluated to completion and the stage's
    /// output becomes a fresh splittable source.
    fn into_plan(
        self: Box<Self>,
        parallel: bool,
        terminal_word: FlagWord,
    ) -> Result<Box<dyn Plan<Out>>>;
}

struct RootChain<T: Send + 'static> {
    supplier: SourceSupplier<T>,
}

impl<T: Send + 'static> Chain<T> for RootChain<T> {
    fn combined_word(&self) -> FlagWord {
        FlagWord::from_characteristics(self.supplier.characteristics())
    }

    fn depth(&self) -> usize {
        0
    }

    fn into_plan(
        self: Box<Self>,
        _parallel: bool,
        terminal_word: FlagWord,
    ) -> Result<Box<dyn Plan<T>>> {
        let word = terminal_word.combine(self.combined_word());
        let source = self.supplier.take()?;
        Ok(Box::new(SourcePlan::new(source, word.stream_flags())))
    }
}

struct OpChain<In: Send + 'static, Out: Send + 'static> {
    upstream: Box<dyn Chain<In>>,
    op: Arc<dyn Operation<In, Out>>,
    combined_word: FlagWord,
    depth: usize,
}

impl<In: Send + 'static, Out: Send + 'static> Chain<Out> for OpChain<In, Out> {
    fn combined_word(&self) -> FlagWord {
        self.combined_word
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn into_plan(
        self: Box<Self>,
        parallel: bool,
        terminal_word: FlagWord,
    ) -> Result<Box<dyn Plan<Out>>> {
        let before = terminal_word.combine(self.upstream.combined_word());
        let base = self.upstream.into_plan(parallel, terminal_word)?;
        if parallel && self.op.is_stateful() {
            rill_core::rill_debug!("materializing a parallel boundary at depth {}", self.depth);
            let source = self.op.evaluate_parallel(before.stream_flags(), base)?;
            let after = terminal_word.combine(self.combined_word);
            return Ok(Box::new(SourcePlan::new(source, after.stream_flags())));
        }
        Ok(Box::new(ComposedPlan::new(
            base,
            self.op,
            before.stream_flags(),
        )))
    }
}

/// A lazily evaluated pipeline with output element type `Out`.
pub struct Pipeline<Out: Send + 'static> {
    chain: Box<dyn Chain<Out>>,
    parallel: bool,
}

impl<Out: Send + 'static> Pipeline<Out> {
    /// The root stage over a shared source supplier.
    pub fn from_supplier(supplier: SourceSupplier<Out>) -> Self {
        Self {
            chain: Box::new(RootChain { supplier }),
            parallel: false,
        }
    }

    /// The root stage over a concrete splittable source.
    pub fn from_splittable<S>(source: S) -> Self
    where
        S: Splittable<Item = Out> + 'static,
    {
        Self::from_supplier(SourceSupplier::from_splittable(source))
    }

    /// Appends an intermediate operation, producing the new leaf stage.
    pub fn append<New, O>(self, op: O) -> Pipeline<New>
    where
        New: Send + 'static,
        O: Operation<Out, New> + 'static,
    {
        let combined_word = op.op_flags().combine(self.chain.combined_word());
        Pipeline {
            chain: Box::new(OpChain {
                depth: self.chain.depth() + 1,
                combined_word,
                op: Arc::new(op),
                upstream: self.chain,
            }),
            parallel: self.parallel,
        }
    }

    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    #[must_use]
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn depth(&self) -> usize {
        self.chain.depth()
    }

    /// The compressed view of the accumulated flags, including the
    /// execution mode.
    pub fn stream_flags(&self) -> StreamFlags {
        let mut word = self.chain.combined_word();
        if self.parallel {
            word = FlagWord::EMPTY.set(Property::Parallel).combine(word);
        }
        word.stream_flags()
    }

    /// Converts the chain into its evaluation plan. Returns the plan,
    /// whether to run it in parallel, and whether the traversal loop
    /// must poll for cancellation.
    pub(crate) fn into_plan(
        self,
        terminal_word: FlagWord,
        terminal_short_circuit: bool,
    ) -> Result<(Box<dyn Plan<Out>>, bool, bool)> {
        let combined = terminal_word.combine(self.chain.combined_word());
        let short_circuit =
            terminal_short_circuit || combined.stream_flags().is_short_circuit();
        let plan = self.chain.into_plan(self.parallel, terminal_word)?;
        Ok((plan, self.parallel, short_circuit))
    }

    /// Dissolves an op-free pipeline back into its source spliterator.
    ///
    /// Pipelines with ops are first evaluated into a node, so this is
    /// eager for them; op-free pipelines hand the raw source through
    /// untouched (and stay lazy and infinite-safe).
    pub fn into_source(self) -> Result<BoxSplittable<Out>> {
        if self.chain.depth() == 0 {
            let (mut plan, _, _) = self.into_plan(FlagWord::EMPTY, false)?;
            return Ok(plan
                .take_source()
                .expect("an op-free plan is always source-backed"));
        }
        let node = crate::terminal::collect_node(self, false)?;
        Ok(Box::new(node.into_source()))
    }
}
