// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Immutable output containers for the `rill` stream engine.
//!
//! A [`Node`] holds collected results either flat (one contiguous
//! buffer) or as a conc tree (an ordered sequence of child nodes), so
//! parallel leaves can produce output without a shared lock and the
//! root can concatenate in O(1) per join. Builders implement the sink
//! protocol and yield a node on `end`; the [`SpinedBuffer`] backs the
//! variable-capacity builder with geometrically growing chunks.

mod builder;
mod node;
mod source;
mod spined;

pub use builder::{builder, FixedNodeBuilder, NodeBuilder, SpinedNodeBuilder};
pub use node::{Node, MAX_ARRAY_SIZE};
pub use source::NodeSource;
pub use spined::SpinedBuffer;
