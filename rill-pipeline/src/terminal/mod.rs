// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal operations.
//!
//! Every terminal follows the same shape: fold the terminal's upstream
//! flag word into the chain, build the plan (materializing parallel
//! boundaries), then either drive the wrapped sink chain sequentially
//! or hand leaf/combine closures to the task framework. User-callback
//! panics are caught at the evaluation boundary and surfaced as
//! `UserCallbackFailure`; the first failure wins.

mod collect;
mod find;
mod for_each;
mod matches;
mod reduce;

pub use collect::{collect, collect_node, Collector};
pub use find::find;
pub use for_each::{for_each, for_each_until};
pub use matches::{match_kind, MatchKind};
pub use reduce::{fold, reduce};

pub(crate) use collect::plan_to_node;

use std::panic::{catch_unwind, AssertUnwindSafe};

use rill_core::{FlagWord, Result, RillError};

use crate::plan::Plan;
use crate::stage::Pipeline;

/// Runs `f`, converting an escaped panic into the error surface.
pub(crate) fn guard<R>(f: impl FnOnce() -> Result<R>) -> Result<R> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(RillError::from_panic(payload)),
    }
}

/// Converts the pipeline into its plan under the terminal's upstream
/// word, catching panics from boundary materialization (a user
/// comparator, say).
pub(crate) fn prepare<T: Send + 'static>(
    pipeline: Pipeline<T>,
    terminal_word: FlagWord,
    terminal_short_circuit: bool,
) -> Result<(Box<dyn Plan<T>>, bool, bool)> {
    guard(|| pipeline.into_plan(terminal_word, terminal_short_circuit))
}
