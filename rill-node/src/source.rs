// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A splittable source draining an owned node tree.

use std::collections::VecDeque;

use rill_core::{Characteristics, Splittable};

use crate::node::Node;

/// Drains a [`Node`] in encounter order and splits near the halfway
/// point by element count, descending into conc children where a whole
/// child would overshoot.
pub struct NodeSource<T> {
    /// Partially drained current leaf.
    current: VecDeque<T>,
    /// Pending nodes, front first.
    pending: VecDeque<Node<T>>,
}

impl<T: Send + 'static> NodeSource<T> {
    pub fn new(node: Node<T>) -> Self {
        let mut pending = VecDeque::new();
        if !node.is_empty() {
            pending.push_back(node);
        }
        Self {
            current: VecDeque::new(),
            pending,
        }
    }

    fn remaining(&self) -> u64 {
        self.current.len() as u64 + self.pending.iter().map(Node::count).sum::<u64>()
    }
}

impl<T: Send + 'static> Splittable for NodeSource<T> {
    type Item = T;

    fn try_advance(&mut self, action: &mut dyn FnMut(T)) -> bool {
        loop {
            if let Some(value) = self.current.pop_front() {
                action(value);
                return true;
            }
            match self.pending.pop_front() {
                Some(Node::Empty) => {}
                Some(Node::Leaf(items)) => self.current = items.into(),
                Some(Node::Conc { children, .. }) => {
                    for child in children.into_iter().rev() {
                        self.pending.push_front(child);
                    }
                }
                None => return false,
            }
        }
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        let total = self.remaining();
        if total < 2 {
            return None;
        }
        let target = total / 2;
        let mut prefix = NodeSource {
            current: VecDeque::new(),
            pending: VecDeque::new(),
        };
        let mut taken = 0u64;
        if !self.current.is_empty() {
            if self.current.len() as u64 <= target {
                taken = self.current.len() as u64;
                prefix.current = std::mem::take(&mut self.current);
            } else {
                let tail = self.current.split_off(target as usize);
                prefix.current = std::mem::replace(&mut self.current, tail);
                taken = target;
            }
        }
        while taken < target {
            let Some(node) = self.pending.pop_front() else {
                break;
            };
            let count = node.count();
            if taken + count <= target {
                taken += count;
                prefix.pending.push_back(node);
                continue;
            }
            match node {
                Node::Conc { children, .. } => {
                    // descend: re-queue the children and keep carving
                    for child in children.into_iter().rev() {
                        self.pending.push_front(child);
                    }
                }
                Node::Leaf(mut items) => {
                    let want = (target - taken) as usize;
                    let tail = items.split_off(want);
                    taken += items.len() as u64;
                    prefix.pending.push_back(Node::leaf(items));
                    self.pending.push_front(Node::leaf(tail));
                }
                Node::Empty => {}
            }
        }
        Some(Box::new(prefix))
    }

    fn estimate_size(&self) -> u64 {
        self.remaining()
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::SIZED | Characteristics::ORDERED
    }
}
