// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The worker-pool seam.
//!
//! The engine consumes its work-stealing substrate strictly through
//! this module: `parallelism` sizes the task decomposition, `invoke`
//! runs a root computation to completion (the only blocking point),
//! and `join` is the fork/recurse primitive the task framework
//! decomposes with. Everything below is `rayon-core`; nothing else in
//! the workspace touches it.

/// The pool's parallelism level.
pub fn parallelism() -> usize {
    rayon_core::current_num_threads()
}

/// Runs `root` to completion on the calling thread; descendant forks
/// migrate into the pool at the first `join`.
pub fn invoke<R, F>(root: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    root()
}

/// Runs both closures, potentially in parallel, and returns both
/// results. `left` runs on the calling thread; `right` may be stolen.
pub(crate) fn join<A, B, RA, RB>(left: A, right: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon_core::join(left, right)
}
