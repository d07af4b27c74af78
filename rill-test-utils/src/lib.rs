// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared test utilities for the `rill` workspace.

pub mod scripted;
pub mod test_data;

pub use scripted::{ScriptedSource, SourceStats};

/// A predicate that panics the moment it sees `trigger`; everything
/// else passes. For exercising user-callback failure paths.
pub fn panic_on<T: PartialEq + std::fmt::Debug + Send + Sync + 'static>(
    trigger: T,
) -> impl Fn(&T) -> bool + Send + Sync {
    move |value| {
        assert!(*value != trigger, "callback tripped on {value:?}");
        true
    }
}
