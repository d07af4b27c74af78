// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A variable-capacity buffer with geometrically growing chunks.

use rill_core::SIZE_UNKNOWN;

use crate::node::Node;

/// First chunk holds `2^MIN_CHUNK_POWER` elements.
const MIN_CHUNK_POWER: u32 = 4;
/// Chunk capacities double up to `2^MAX_CHUNK_POWER`.
const MAX_CHUNK_POWER: u32 = 30;
/// Upper bound on the pre-allocation honored from a size hint.
const MAX_HINT_RESERVE: usize = 1 << 16;

/// An ordered buffer of elements in geometrically growing chunks.
///
/// Full chunks are parked on the spine together with a running
/// prefix-sum of their counts; only the chunk being filled is ever
/// reallocated, so `push` never copies previously accepted elements.
pub struct SpinedBuffer<T> {
    current: Vec<T>,
    spine: Vec<Vec<T>>,
    prior_counts: Vec<u64>,
}

impl<T> SpinedBuffer<T> {
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
            spine: Vec::new(),
            prior_counts: Vec::new(),
        }
    }

    /// Reserves for `hint` elements up front, within reason.
    pub fn with_size_hint(hint: u64) -> Self {
        let mut buffer = Self::new();
        buffer.ensure_capacity(hint);
        buffer
    }

    fn chunk_capacity(&self, chunk_index: usize) -> usize {
        let power = (MIN_CHUNK_POWER + chunk_index as u32).min(MAX_CHUNK_POWER);
        1 << power
    }

    pub fn ensure_capacity(&mut self, hint: u64) {
        if hint == SIZE_UNKNOWN || hint == 0 {
            return;
        }
        let want = usize::try_from(hint)
            .unwrap_or(MAX_HINT_RESERVE)
            .min(MAX_HINT_RESERVE);
        if self.current.capacity() < want {
            self.current.reserve(want - self.current.len());
        }
    }

    pub fn len(&self) -> u64 {
        let parked = self
            .prior_counts
            .last()
            .copied()
            .unwrap_or(0)
            + self.spine.last().map_or(0, |chunk| chunk.len() as u64);
        parked + self.current.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.spine.is_empty() && self.current.is_empty()
    }

    pub fn push(&mut self, value: T) {
        if self.current.len() == self.current.capacity() {
            self.roll();
        }
        self.current.push(value);
    }

    /// Parks the full current chunk on the spine and opens the next one.
    fn roll(&mut self) {
        if self.current.capacity() == 0 {
            self.current = Vec::with_capacity(self.chunk_capacity(0));
            return;
        }
        let next_capacity = self.chunk_capacity(self.spine.len() + 1);
        let full = std::mem::replace(&mut self.current, Vec::with_capacity(next_capacity));
        let before = self
            .prior_counts
            .last()
            .copied()
            .unwrap_or(0)
            + self.spine.last().map_or(0, |chunk| chunk.len() as u64);
        self.prior_counts.push(before);
        self.spine.push(full);
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.spine.clear();
        self.prior_counts.clear();
    }

    /// The elements before spine chunk `i` (diagnostic/test hook).
    pub fn prior_count(&self, chunk_index: usize) -> Option<u64> {
        self.prior_counts.get(chunk_index).copied()
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len() as usize);
        for chunk in self.spine {
            out.extend(chunk);
        }
        out.extend(self.current);
        out
    }

    /// Wraps the chunks as a conc node without copying elements.
    pub fn into_node(mut self) -> Node<T> {
        if self.spine.is_empty() {
            return Node::leaf(self.current);
        }
        let count = self.len();
        let mut children: Vec<Node<T>> = Vec::with_capacity(self.spine.len() + 1);
        for chunk in self.spine.drain(..) {
            children.push(Node::leaf(chunk));
        }
        if !self.current.is_empty() {
            children.push(Node::leaf(self.current));
        }
        Node::Conc { children, count }
    }
}

impl<T> Default for SpinedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
