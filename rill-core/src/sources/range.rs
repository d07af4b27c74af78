// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Integer range sources `[from, to)` with a non-zero step.

use crate::error::{Result, RillError};
use crate::flags::Characteristics;
use crate::splittable::Splittable;

macro_rules! define_range_source {
    ($name:ident, $ty:ty) => {
        /// A sized, ordered, distinct source over `[from, to)` stepping
        /// by `step`. Splits halve the remaining count deterministically.
        #[derive(Debug)]
        pub struct $name {
            next: $ty,
            step: $ty,
            remaining: u64,
        }

        impl $name {
            /// The unit-step range `[from, to)`.
            pub fn new(from: $ty, to: $ty) -> Self {
                match Self::with_step(from, to, 1) {
                    Ok(source) => source,
                    // a step of 1 is always legal
                    Err(_) => unreachable!(),
                }
            }

            /// Fails with [`RillError::IllegalArgument`] when `step` is 0.
            pub fn with_step(from: $ty, to: $ty, step: $ty) -> Result<Self> {
                if step == 0 {
                    return Err(RillError::illegal_argument("range step must be non-zero"));
                }
                let remaining = if step > 0 {
                    if from >= to {
                        0
                    } else {
                        let span = (to as i128) - (from as i128);
                        let step = step as i128;
                        ((span + step - 1) / step) as u64
                    }
                } else {
                    if from <= to {
                        0
                    } else {
                        let span = (from as i128) - (to as i128);
                        let step = -(step as i128);
                        ((span + step - 1) / step) as u64
                    }
                };
                Ok(Self {
                    next: from,
                    step,
                    remaining,
                })
            }
        }

        impl Splittable for $name {
            type Item = $ty;

            fn try_advance(&mut self, action: &mut dyn FnMut($ty)) -> bool {
                if self.remaining == 0 {
                    return false;
                }
                let value = self.next;
                self.remaining -= 1;
                if self.remaining > 0 {
                    // the final increment is skipped, so `next` never
                    // steps past a representable element
                    self.next = ((self.next as i128) + (self.step as i128)) as $ty;
                }
                action(value);
                true
            }

            fn try_split(&mut self) -> Option<Box<dyn Splittable<Item = $ty>>> {
                if self.remaining < 2 {
                    return None;
                }
                let mid = self.remaining / 2;
                let prefix = $name {
                    next: self.next,
                    step: self.step,
                    remaining: mid,
                };
                self.next =
                    ((self.next as i128) + (self.step as i128) * (mid as i128)) as $ty;
                self.remaining -= mid;
                Some(Box::new(prefix))
            }

            fn estimate_size(&self) -> u64 {
                self.remaining
            }

            fn characteristics(&self) -> Characteristics {
                let base = Characteristics::SIZED
                    | Characteristics::ORDERED
                    | Characteristics::DISTINCT
                    | Characteristics::UNIFORM;
                if self.step > 0 {
                    base | Characteristics::SORTED
                } else {
                    base
                }
            }
        }
    };
}

define_range_source!(RangeI32Source, i32);
define_range_source!(RangeI64Source, i64);
