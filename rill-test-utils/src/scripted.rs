// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A splittable source with scripted characteristics and traversal
//! instrumentation.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rill_core::{Characteristics, Splittable};

/// Counters shared with every split of a [`ScriptedSource`], readable
/// after the source moved into a pipeline.
#[derive(Clone, Default)]
pub struct SourceStats {
    advances: Arc<AtomicU64>,
    splits: Arc<AtomicU64>,
}

impl SourceStats {
    pub fn advances(&self) -> u64 {
        self.advances.load(Ordering::Relaxed)
    }

    pub fn splits(&self) -> u64 {
        self.splits.load(Ordering::Relaxed)
    }
}

/// A vector-backed source that advertises whatever characteristics the
/// test scripts, optionally refuses to split, and counts traversal
/// operations.
pub struct ScriptedSource<T> {
    items: VecDeque<T>,
    characteristics: Characteristics,
    splittable: bool,
    stats: SourceStats,
}

impl<T: Send + 'static> ScriptedSource<T> {
    pub fn new(items: Vec<T>, characteristics: Characteristics) -> (Self, SourceStats) {
        let stats = SourceStats::default();
        (
            Self {
                items: items.into(),
                characteristics,
                splittable: true,
                stats: stats.clone(),
            },
            stats,
        )
    }

    /// Makes `try_split` always refuse, forcing single-leaf execution.
    #[must_use]
    pub fn unsplittable(mut self) -> Self {
        self.splittable = false;
        self
    }
}

impl<T: Send + 'static> Splittable for ScriptedSource<T> {
    type Item = T;

    fn try_advance(&mut self, action: &mut dyn FnMut(T)) -> bool {
        match self.items.pop_front() {
            Some(value) => {
                self.stats.advances.fetch_add(1, Ordering::Relaxed);
                action(value);
                true
            }
            None => false,
        }
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        if !self.splittable || self.items.len() < 2 {
            return None;
        }
        self.stats.splits.fetch_add(1, Ordering::Relaxed);
        let mid = self.items.len() / 2;
        let prefix: VecDeque<T> = self.items.drain(..mid).collect();
        Some(Box::new(ScriptedSource {
            items: prefix,
            characteristics: self.characteristics,
            splittable: true,
            stats: self.stats.clone(),
        }))
    }

    fn estimate_size(&self) -> u64 {
        self.items.len() as u64
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}
