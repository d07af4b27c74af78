// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::marker::PhantomData;

use crate::flags::Characteristics;
use crate::splittable::Splittable;

/// The empty source: sized at zero, never advances, never splits.
pub struct EmptySource<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptySource<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EmptySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Splittable for EmptySource<T> {
    type Item = T;

    fn try_advance(&mut self, _action: &mut dyn FnMut(T)) -> bool {
        false
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        None
    }

    fn estimate_size(&self) -> u64 {
        0
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::SIZED | Characteristics::ORDERED | Characteristics::UNIFORM
    }
}
