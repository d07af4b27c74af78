// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential iterator → splittable source bridge.

use crate::flags::Characteristics;
use crate::sources::VecSource;
use crate::splittable::{Splittable, SIZE_UNKNOWN};

/// Batches read per split grow geometrically up to this cap.
const MAX_BATCH: usize = 1024;

/// Adapts any sequential [`Iterator`] into a [`Splittable`].
///
/// `try_advance` pulls straight from the iterator. `try_split` reads a
/// geometric batch (1, 2, 4, … capped at [`MAX_BATCH`]) off the front
/// into an array-backed prefix, leaving the iterator for the tail, so
/// encounter order is preserved. SIZED is advertised iff an exact size
/// was supplied at construction.
pub struct IteratorSource<I: Iterator> {
    iter: I,
    remaining: Option<u64>,
    batch: usize,
    characteristics: Characteristics,
}

impl<I> IteratorSource<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    pub fn new(iter: I) -> Self {
        Self::with_characteristics(iter, None, Characteristics::ORDERED)
    }

    /// `exact_size`, when supplied, must be the true element count.
    pub fn with_exact_size(iter: I, exact_size: u64) -> Self {
        Self::with_characteristics(iter, Some(exact_size), Characteristics::ORDERED)
    }

    pub fn with_characteristics(
        iter: I,
        exact_size: Option<u64>,
        characteristics: Characteristics,
    ) -> Self {
        Self {
            iter,
            remaining: exact_size,
            batch: 1,
            characteristics,
        }
    }
}

impl<I> Splittable for IteratorSource<I>
where
    I: Iterator + Send,
    I::Item: Send + 'static,
{
    type Item = I::Item;

    fn try_advance(&mut self, action: &mut dyn FnMut(I::Item)) -> bool {
        match self.iter.next() {
            Some(value) => {
                if let Some(remaining) = &mut self.remaining {
                    *remaining = remaining.saturating_sub(1);
                }
                action(value);
                true
            }
            None => false,
        }
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = I::Item>>> {
        let size = self.batch;
        let mut buffer = Vec::with_capacity(size);
        for _ in 0..size {
            match self.iter.next() {
                Some(value) => buffer.push(value),
                None => break,
            }
        }
        if buffer.is_empty() {
            return None;
        }
        self.batch = (self.batch * 2).min(MAX_BATCH);
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(buffer.len() as u64);
        }
        Some(Box::new(VecSource::with_characteristics(
            buffer,
            self.characteristics.inherited(),
        )))
    }

    fn estimate_size(&self) -> u64 {
        self.remaining.unwrap_or(SIZE_UNKNOWN)
    }

    fn characteristics(&self) -> Characteristics {
        if self.remaining.is_some() {
            self.characteristics | Characteristics::SIZED
        } else {
            self.characteristics.without(Characteristics::SIZED)
        }
    }
}
