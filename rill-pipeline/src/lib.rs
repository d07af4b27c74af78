// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The engine room of `rill`: the stage graph, the per-evaluation
//! plan, the operation library, the terminal operations, and the
//! recursive splitting task framework.
//!
//! Building a pipeline records structure and runs nothing. A terminal
//! folds its flag word into the chain, resolves the one-shot source,
//! layers the sink-wrapping plan (materializing boundaries for
//! stateful ops under parallel execution), and then drives the
//! traversal — a single pull loop sequentially, or a binary splitting
//! task tree on the worker pool.

pub mod ops;
pub mod plan;
pub mod pool;
pub mod stage;
pub mod terminal;

mod sort;
mod task;

pub use plan::Plan;
pub use stage::{BoxSplittable, Operation, Pipeline, SourceSupplier};
pub use terminal::{
    collect, collect_node, find, fold, for_each, for_each_until, match_kind, reduce, Collector,
    MatchKind,
};
