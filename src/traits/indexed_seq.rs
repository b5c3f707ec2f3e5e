/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Traits for read-only sequences indexed by a `usize`.
//!
//! Every structure storing values implements [`IndexedSeq`], which provides
//! the length and positional access, and implements [`IterFrom`] on a
//! reference, which provides a forward iterator starting at an arbitrary
//! position. This property can be tested on a type `T` with the clause `where
//! for<'a> &'a T: IterFrom`.

use impl_tools::autoimpl;

use crate::error::{ensure_index, Result};

/// The type of the values of a sequence.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait Types {
    type Output;
}

/// Access by position to a sequence.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait IndexedSeq: Types {
    /// Returns the value at the specified index, or an error if the index is
    /// not in [0..[len](`IndexedSeq::len`)).
    fn get(&self, index: usize) -> Result<Self::Output> {
        ensure_index!(index, self.len());
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns the value at the specified index.
    ///
    /// # Safety
    ///
    /// `index` must be in [0..[len](`IndexedSeq::len`)). No bounds checking
    /// is performed.
    unsafe fn get_unchecked(&self, index: usize) -> Self::Output;

    /// Returns the length (number of items) of the sequence.
    fn len(&self) -> usize;

    /// Returns true if [`len`](`IndexedSeq::len`) is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forward iteration from a given position.
///
/// This trait is meant to be implemented on references.
pub trait IterFrom {
    type IterFrom: Iterator;

    /// Returns an iterator returning the values of the sequence starting
    /// at position `from`.
    ///
    /// # Panics
    ///
    /// If `from` is greater than the length of the sequence.
    fn iter_from(self, from: usize) -> Self::IterFrom;
}
