// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Node builders: sinks that yield a [`Node`] on `end`.

use rill_core::Sink;

use crate::node::{Node, MAX_ARRAY_SIZE};
use crate::spined::SpinedBuffer;

/// A sink that accumulates elements and yields the finished node.
pub trait NodeBuilder<T>: Sink<T> + Send {
    fn build(self: Box<Self>) -> Node<T>;
}

/// Picks the fixed builder when the target size is known and within the
/// flat-array cap, the spined builder otherwise.
pub fn builder<T: Send + 'static>(exact_size: Option<u64>) -> Box<dyn NodeBuilder<T>> {
    match exact_size {
        Some(size) if size < MAX_ARRAY_SIZE => Box::new(FixedNodeBuilder::new(size)),
        _ => Box::new(SpinedNodeBuilder::new()),
    }
}

/// Pre-sized builder for exactly `expected` elements.
pub struct FixedNodeBuilder<T> {
    buffer: Vec<T>,
    expected: u64,
}

impl<T> FixedNodeBuilder<T> {
    pub fn new(expected: u64) -> Self {
        Self {
            buffer: Vec::with_capacity(expected as usize),
            expected,
        }
    }
}

impl<T> Sink<T> for FixedNodeBuilder<T> {
    fn begin(&mut self, size: u64) {
        debug_assert_eq!(
            size, self.expected,
            "fixed builder began with a different size than it was built for"
        );
    }

    fn accept(&mut self, value: T) {
        debug_assert!((self.buffer.len() as u64) < self.expected);
        self.buffer.push(value);
    }

    fn end(&mut self) {
        debug_assert_eq!(
            self.buffer.len() as u64,
            self.expected,
            "fixed builder ended before filling up"
        );
    }
}

impl<T: Send + 'static> NodeBuilder<T> for FixedNodeBuilder<T> {
    fn build(self: Box<Self>) -> Node<T> {
        Node::leaf(self.buffer)
    }
}

/// Variable-capacity builder backed by a [`SpinedBuffer`].
pub struct SpinedNodeBuilder<T> {
    buffer: SpinedBuffer<T>,
}

impl<T> SpinedNodeBuilder<T> {
    pub fn new() -> Self {
        Self {
            buffer: SpinedBuffer::new(),
        }
    }
}

impl<T> Default for SpinedNodeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sink<T> for SpinedNodeBuilder<T> {
    fn begin(&mut self, size: u64) {
        self.buffer.ensure_capacity(size);
    }

    fn accept(&mut self, value: T) {
        self.buffer.push(value);
    }
}

impl<T: Send + 'static> NodeBuilder<T> for SpinedNodeBuilder<T> {
    fn build(self: Box<Self>) -> Node<T> {
        self.buffer.into_node()
    }
}
