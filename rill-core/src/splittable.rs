// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The splittable source abstraction.
//!
//! A [`Splittable`] produces elements one at a time through
//! [`try_advance`](Splittable::try_advance) and recursively halves its
//! remaining work through [`try_split`](Splittable::try_split). Both
//! faces drive the same cursor: after a successful split, the returned
//! prefix covers elements *before* everything left in `self`, so
//! draining the prefix and then `self` reproduces the original
//! encounter order.

use crate::flags::Characteristics;

/// The size estimate for sources that cannot bound their remaining
/// element count, including infinite ones.
pub const SIZE_UNKNOWN: u64 = u64::MAX;

/// An ordered element producer that also supports recursive two-way
/// partitioning for parallel traversal.
///
/// Implementations must keep [`estimate_size`](Splittable::estimate_size)
/// monotonically non-increasing across advances and splits, and sources
/// advertising [`Characteristics::SIZED`] must report exact remaining
/// counts.
pub trait Splittable: Send {
    type Item;

    /// If elements remain, consumes the next one, invokes `action` on it
    /// exactly once, and returns `true`. Returns `false` iff exhausted.
    fn try_advance(&mut self, action: &mut dyn FnMut(Self::Item)) -> bool;

    /// Carves off a prefix of the remaining elements, ideally about half,
    /// or returns `None` when further splitting is uneconomic.
    ///
    /// After a successful split `self` covers the suffix. A sub-split
    /// inherits DISTINCT/SORTED/ORDERED/SIZED but may lose UNIFORM.
    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = Self::Item>>>;

    /// An upper bound on the remaining element count, or [`SIZE_UNKNOWN`].
    fn estimate_size(&self) -> u64;

    /// The characteristics this source advertises.
    fn characteristics(&self) -> Characteristics;

    /// The exact remaining count, present iff SIZED is advertised.
    fn exact_size_if_known(&self) -> Option<u64> {
        if self.characteristics().contains(Characteristics::SIZED) {
            Some(self.estimate_size())
        } else {
            None
        }
    }

    /// Drains every remaining element into `action`.
    fn for_each_remaining(&mut self, action: &mut dyn FnMut(Self::Item)) {
        while self.try_advance(action) {}
    }
}

impl<T> Splittable for Box<dyn Splittable<Item = T>> {
    type Item = T;

    fn try_advance(&mut self, action: &mut dyn FnMut(T)) -> bool {
        (**self).try_advance(action)
    }

    fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = T>>> {
        (**self).try_split()
    }

    fn estimate_size(&self) -> u64 {
        (**self).estimate_size()
    }

    fn characteristics(&self) -> Characteristics {
        (**self).characteristics()
    }

    fn exact_size_if_known(&self) -> Option<u64> {
        (**self).exact_size_if_known()
    }
}
