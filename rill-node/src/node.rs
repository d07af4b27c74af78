// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The immutable result container.

use rill_core::Splittable;

use crate::source::NodeSource;

/// The maximum element count of a flat array collect.
///
/// Kept below the 32-bit index space for compatibility with the
/// published collect contract; a sized collect past this cap fails with
/// `StreamSizeExceedsMaxArray` before allocating.
pub const MAX_ARRAY_SIZE: u64 = u32::MAX as u64 - 8;

/// An immutable container of collected elements: flat or a conc tree.
///
/// Depth-first left-to-right traversal reproduces encounter order, and
/// a conc's count is the sum of its children's counts. Nodes never
/// change once built; builders produce them on `end`.
#[derive(Debug, Clone)]
pub enum Node<T> {
    Empty,
    /// Contiguous elements.
    Leaf(Vec<T>),
    /// An ordered concatenation of child nodes.
    Conc { children: Vec<Node<T>>, count: u64 },
}

impl<T> Node<T> {
    pub fn leaf(items: Vec<T>) -> Self {
        if items.is_empty() {
            Node::Empty
        } else {
            Node::Leaf(items)
        }
    }

    /// Concatenates two nodes in encounter order. Empty operands vanish.
    pub fn conc(left: Node<T>, right: Node<T>) -> Self {
        match (left, right) {
            (Node::Empty, right) => right,
            (left, Node::Empty) => left,
            (left, right) => {
                let count = left.count() + right.count();
                Node::Conc {
                    children: vec![left, right],
                    count,
                }
            }
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            Node::Empty => 0,
            Node::Leaf(items) => items.len() as u64,
            Node::Conc { count, .. } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Moves every element into `out`, depth first, left to right.
    pub fn push_into(self, out: &mut Vec<T>) {
        match self {
            Node::Empty => {}
            Node::Leaf(mut items) => out.append(&mut items),
            Node::Conc { children, .. } => {
                for child in children {
                    child.push_into(out);
                }
            }
        }
    }

    /// Copies the tree out into one contiguous buffer.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Node::Empty => Vec::new(),
            Node::Leaf(items) => items,
            node => {
                let mut out = Vec::with_capacity(node.count() as usize);
                node.push_into(&mut out);
                out
            }
        }
    }

    /// Collapses a conc tree into a flat leaf; flat nodes pass through.
    #[must_use]
    pub fn flatten(self) -> Node<T> {
        match self {
            node @ (Node::Empty | Node::Leaf(_)) => node,
            node => Node::leaf(node.into_vec()),
        }
    }
}

impl<T: Send + 'static> Node<T> {
    /// A splittable source draining this node in encounter order.
    pub fn into_source(self) -> NodeSource<T> {
        NodeSource::new(self)
    }

    /// The sub-node covering `[from, to)` of the encounter order:
    /// advances the node's source `from` elements discarding, then
    /// takes the next `min(count, to) - from`.
    #[must_use]
    pub fn truncate(self, from: u64, to: u64) -> Node<T> {
        let count = self.count();
        let to = to.min(count);
        if from >= to {
            return Node::Empty;
        }
        if from == 0 && to == count {
            return self;
        }
        let size = to - from;
        let mut source = self.into_source();
        let mut skipped = 0;
        while skipped < from && source.try_advance(&mut |_| {}) {
            skipped += 1;
        }
        let mut out = Vec::with_capacity(size as usize);
        while (out.len() as u64) < size && source.try_advance(&mut |value| out.push(value)) {}
        Node::leaf(out)
    }
}
