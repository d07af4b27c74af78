// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The tripwire diagnostic channel.
//!
//! A non-fatal signal that a pipeline took a boxed accept on a primitive
//! path, or fell back from a primitive splittable to a generic one. The
//! channel is process-wide, off by default, and observable only as a
//! side channel: a warning through the logging shim plus a counter for
//! instrumentation.
//!
//! ```ignore
//! rill_core::tripwire::enable();
//! // ... run pipelines ...
//! assert_eq!(rill_core::tripwire::trip_count(), 0);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(false);
static TRIPS: AtomicU64 = AtomicU64::new(0);

/// Turn the channel on.
pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Turn the channel off. Does not reset the counter.
pub fn disable() {
    ENABLED.store(false, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Total trips reported since process start, enabled or not.
pub fn trip_count() -> u64 {
    TRIPS.load(Ordering::Relaxed)
}

/// Report a boxed-path fallback. Cheap when the channel is off.
pub fn trip(context: &str) {
    TRIPS.fetch_add(1, Ordering::Relaxed);
    if is_enabled() {
        rill_warn!("tripwire: {context}");
    }
}
