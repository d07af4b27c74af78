// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A splittable source over an owned vector of elements.

use std::collections::VecDeque;

use crate::flags::Characteristics;
use crate::splittable::Splittable;

/// A sized, ordered source draining an owned buffer front to back.
///
/// Splitting drains the front half into the returned prefix, so the
/// exact size is halved deterministically and the source advertises
/// UNIFORM.
pub struct VecSource<T> {
    items: VecDeque<T>,
    characteristics: Characteristics,
}

impl<T: Send + 'static> VecSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_characteristics(items, Characteristics::ORDERED)
    }

    /// Builds the source with extra advertised characteristics (e.g. a
    /// caller who knows the buffer is sorted and duplicate-free).
    /// SIZED and UNIFORM are always asserted.
    pub fn with_characteristics(items: Vec<T>, characteristics: Characteristics) -> Self {
        Self {
            items: items.into(),
            characteristics: characteristics | Characteristics::SIZED | Characteristics::UNIFORM,
        }
    }
}

impl<T: Send + 'static> Splittable for VecSource<T> {
    type Item = T;

    fn try_advance(&mut self, action: &mut dyn FnMut(T)) -> bool {
        match self.items.pop_front() {
            Some(value) => {
                action(value);
                true
            }
            None => false,
        }
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        if self.items.len() < 2 {
            return None;
        }
        let mid = self.items.len() / 2;
        let prefix: Vec<T> = self.items.drain(..mid).collect();
        Some(Box::new(VecSource {
            items: prefix.into(),
            characteristics: self.characteristics,
        }))
    }

    fn estimate_size(&self) -> u64 {
        self.items.len() as u64
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

impl<T: Send + 'static> From<Vec<T>> for VecSource<T> {
    fn from(items: Vec<T>) -> Self {
        VecSource::new(items)
    }
}
