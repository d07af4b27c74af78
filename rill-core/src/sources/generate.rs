// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Infinite generator sources.
//!
//! Neither source splits on its own; parallel pipelines over them run as
//! a single leaf unless a short-circuit op bounds them first. Both
//! report [`SIZE_UNKNOWN`](crate::SIZE_UNKNOWN) and advertise INFINITE.

use crate::flags::Characteristics;
use crate::splittable::{Splittable, SIZE_UNKNOWN};

/// `iterate(seed, f)`: emits `seed, f(seed), f(f(seed)), …` in encounter
/// order.
pub struct IterateSource<T, F> {
    next: T,
    advance: F,
}

impl<T, F> IterateSource<T, F>
where
    T: Clone + Send,
    F: FnMut(&T) -> T + Send,
{
    pub fn new(seed: T, advance: F) -> Self {
        Self {
            next: seed,
            advance,
        }
    }
}

impl<T, F> Splittable for IterateSource<T, F>
where
    T: Clone + Send,
    F: FnMut(&T) -> T + Send,
{
    type Item = T;

    fn try_advance(&mut self, action: &mut dyn FnMut(T)) -> bool {
        let value = self.next.clone();
        self.next = (self.advance)(&value);
        action(value);
        true
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        None
    }

    fn estimate_size(&self) -> u64 {
        SIZE_UNKNOWN
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED | Characteristics::INFINITE
    }
}

/// `generate(supplier)`: an unordered infinite source of supplied values.
pub struct GenerateSource<F> {
    supplier: F,
}

impl<T, F> GenerateSource<F>
where
    T: Send,
    F: FnMut() -> T + Send,
{
    pub fn new(supplier: F) -> Self {
        Self { supplier }
    }
}

impl<T, F> Splittable for GenerateSource<F>
where
    T: Send,
    F: FnMut() -> T + Send,
{
    type Item = T;

    fn try_advance(&mut self, action: &mut dyn FnMut(T)) -> bool {
        action((self.supplier)());
        true
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        None
    }

    fn estimate_size(&self) -> u64 {
        SIZE_UNKNOWN
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::INFINITE
    }
}
