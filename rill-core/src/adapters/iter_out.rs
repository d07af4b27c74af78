// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Splittable source → sequential iterator bridge.

use crate::splittable::Splittable;

/// Drains a [`Splittable`] as a plain [`Iterator`] with a one-element
/// look-ahead, so callers can [`peek`](SplittableIter::peek) without
/// consuming.
pub struct SplittableIter<S: Splittable> {
    source: S,
    lookahead: Option<S::Item>,
}

impl<S: Splittable> SplittableIter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            lookahead: None,
        }
    }

    /// Fills and exposes the look-ahead slot without consuming it.
    pub fn peek(&mut self) -> Option<&S::Item> {
        if self.lookahead.is_none() {
            let slot = &mut self.lookahead;
            self.source.try_advance(&mut |value| *slot = Some(value));
        }
        self.lookahead.as_ref()
    }
}

impl<S: Splittable> Iterator for SplittableIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if let Some(value) = self.lookahead.take() {
            return Some(value);
        }
        let mut slot = None;
        self.source.try_advance(&mut |value| slot = Some(value));
        slot
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let cached = usize::from(self.lookahead.is_some());
        match self.source.exact_size_if_known() {
            Some(size) => {
                let size = usize::try_from(size)
                    .unwrap_or(usize::MAX)
                    .saturating_add(cached);
                (size, Some(size))
            }
            None => (cached, None),
        }
    }
}
