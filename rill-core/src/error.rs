// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rill stream engine.
//!
//! A single root [`RillError`] covers every fatal failure mode the engine
//! can surface: misuse of the pipeline state machine, shape mismatches on
//! the type-erased bridge, illegal construction arguments, user-callback
//! failures, and oversized array collects. Cancellation is *not* an
//! error — a cancelled terminal returns its kind's defined empty result.
//!
//! The tripwire diagnostic is deliberately absent here: it is non-fatal
//! and observable only through the logging side channel (see
//! [`crate::tripwire`]).

use std::any::Any;

use crate::shape::Shape;

/// Root error type for all rill operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RillError {
    /// The pipeline chain was linked or consumed twice.
    ///
    /// Rust ownership makes most double-links unrepresentable; the
    /// variant survives where aliasing is real, e.g. a shared one-shot
    /// source supplier asked for its spliterator a second time.
    #[error("pipeline state: {context}")]
    PipelineState {
        /// What was attempted on the already-linked or consumed stage
        context: String,
    },

    /// A type-erased sink received an element of the wrong shape.
    #[error("sink shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// The shape the sink was built for
        expected: Shape,
        /// The shape actually received
        found: Shape,
    },

    /// A constructor argument was out of range (e.g. a range step of 0).
    #[error("illegal argument: {context}")]
    IllegalArgument {
        /// Description of the offending argument
        context: String,
    },

    /// A user-supplied predicate, mapper, reducer or collector panicked.
    ///
    /// The first failure reported wins; in parallel execution later
    /// failures are suppressed after the task tree is cancelled.
    #[error("user callback failed: {message}")]
    UserCallbackFailure {
        /// The panic payload, stringified
        message: String,
    },

    /// A sized collect would exceed the maximum flat-array size.
    #[error("stream size {requested} exceeds the maximum array size {max}")]
    StreamSizeExceedsMaxArray {
        /// The exact size the pipeline reported
        requested: u64,
        /// The configured cap
        max: u64,
    },
}

impl RillError {
    /// Create a pipeline-state error with the given context.
    pub fn pipeline_state(context: impl Into<String>) -> Self {
        Self::PipelineState {
            context: context.into(),
        }
    }

    /// Create an illegal-argument error with the given context.
    pub fn illegal_argument(context: impl Into<String>) -> Self {
        Self::IllegalArgument {
            context: context.into(),
        }
    }

    /// Create a shape-mismatch error.
    pub fn shape_mismatch(expected: Shape, found: Shape) -> Self {
        Self::ShapeMismatch { expected, found }
    }

    /// Convert a caught panic payload into an error.
    ///
    /// Payloads that already are a `RillError` (the type-erased sink
    /// bridge reports mismatches this way) pass through unchanged;
    /// anything else becomes a [`RillError::UserCallbackFailure`] with
    /// the stringified payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<RillError>() {
            Ok(error) => return *error,
            Err(payload) => payload,
        };
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "panic with non-string payload".to_string()
        };
        Self::UserCallbackFailure { message }
    }
}

/// Specialized `Result` for rill operations.
pub type Result<T> = std::result::Result<T, RillError>;
