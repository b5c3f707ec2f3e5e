/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Basic traits for succinct operations on bit vectors, including [`Rank`] and [`Select`].

Checked methods return an [`Error`](crate::error::Error) when their argument is
out of range; each has an `unsafe` unchecked counterpart.

*/

use impl_tools::autoimpl;

use crate::error::{Error, Result};

/// A trait for succinct data structures that expose the
/// length of the underlying bit vector.
#[allow(clippy::len_without_is_empty)]
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait BitLength {
    /// Returns the length in bits of the underlying bit vector.
    fn len(&self) -> usize;
}

/// A trait for succinct data structures that expose the
/// number of ones of the underlying bit vector.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait NumBits: BitLength {
    /// Returns the number of ones in the underlying bit vector.
    fn num_ones(&self) -> usize;

    /// Returns the number of zeros in the underlying bit vector.
    fn num_zeros(&self) -> usize {
        self.len() - self.num_ones()
    }
}

/// Rank over a bit vector.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait Rank: BitLength {
    /// Returns the number of ones preceding the specified position.
    ///
    /// `pos` can be equal to the length, in which case the result is the
    /// number of ones.
    fn rank(&self, pos: usize) -> Result<usize> {
        if pos > self.len() {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                len: self.len() + 1,
            });
        }
        Ok(unsafe { self.rank_unchecked(pos) })
    }

    /// Returns the number of ones preceding the specified position.
    ///
    /// # Safety
    /// `pos` must be between 0 (included) and the [length of the underlying bit
    /// vector](`BitLength::len`) (included).
    unsafe fn rank_unchecked(&self, pos: usize) -> usize;
}

/// Rank zeros over a bit vector.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait RankZero: Rank {
    /// Returns the number of zeros preceding the specified position.
    fn rank_zero(&self, pos: usize) -> Result<usize> {
        Ok(pos - self.rank(pos)?)
    }

    /// Returns the number of zeros preceding the specified position.
    ///
    /// # Safety
    /// `pos` must be between 0 and the [length of the underlying bit
    /// vector](`BitLength::len`) (included).
    unsafe fn rank_zero_unchecked(&self, pos: usize) -> usize {
        pos - self.rank_unchecked(pos)
    }
}

/// Select over a bit vector.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait Select: NumBits {
    /// Returns the position of the one of given rank.
    fn select(&self, rank: usize) -> Result<usize> {
        if rank >= self.num_ones() {
            return Err(Error::RankOutOfRange {
                rank,
                count: self.num_ones(),
            });
        }
        Ok(unsafe { self.select_unchecked(rank) })
    }

    /// Returns the position of the one of given rank.
    ///
    /// # Safety
    /// `rank` must be between zero (included) and the number of ones in the
    /// underlying bit vector (excluded).
    unsafe fn select_unchecked(&self, rank: usize) -> usize;
}

/// Select zeros over a bit vector.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait SelectZero: NumBits {
    /// Returns the position of the zero of given rank.
    fn select_zero(&self, rank: usize) -> Result<usize> {
        if rank >= self.num_zeros() {
            return Err(Error::RankOutOfRange {
                rank,
                count: self.num_zeros(),
            });
        }
        Ok(unsafe { self.select_zero_unchecked(rank) })
    }

    /// Returns the position of the zero of given rank.
    ///
    /// # Safety
    /// `rank` must be between zero (included) and the number of zeros in the
    /// underlying bit vector (excluded).
    unsafe fn select_zero_unchecked(&self, rank: usize) -> usize;
}

/// Predecessor and successor of positions, and gaps between ones,
/// derived from rank and select.
///
/// All methods fail if the position is not smaller than the
/// [length](`BitLength::len`), and return `None` if there is no bit of the
/// required kind.
pub trait PredSucc: RankZero + Select + SelectZero {
    /// Returns the greatest position of a one smaller than or equal to `pos`.
    fn predecessor1(&self, pos: usize) -> Result<Option<usize>> {
        if pos >= self.len() {
            return Err(out_of_bounds(pos, self.len()));
        }
        let rank = unsafe { self.rank_unchecked(pos + 1) };
        Ok(match rank {
            0 => None,
            _ => Some(unsafe { self.select_unchecked(rank - 1) }),
        })
    }

    /// Returns the least position of a one greater than or equal to `pos`.
    fn successor1(&self, pos: usize) -> Result<Option<usize>> {
        if pos >= self.len() {
            return Err(out_of_bounds(pos, self.len()));
        }
        let rank = unsafe { self.rank_unchecked(pos) };
        Ok((rank < self.num_ones()).then(|| unsafe { self.select_unchecked(rank) }))
    }

    /// Returns the greatest position of a zero smaller than or equal to `pos`.
    fn predecessor0(&self, pos: usize) -> Result<Option<usize>> {
        if pos >= self.len() {
            return Err(out_of_bounds(pos, self.len()));
        }
        let rank = unsafe { self.rank_zero_unchecked(pos + 1) };
        Ok(match rank {
            0 => None,
            _ => Some(unsafe { self.select_zero_unchecked(rank - 1) }),
        })
    }

    /// Returns the least position of a zero greater than or equal to `pos`.
    fn successor0(&self, pos: usize) -> Result<Option<usize>> {
        if pos >= self.len() {
            return Err(out_of_bounds(pos, self.len()));
        }
        let rank = unsafe { self.rank_zero_unchecked(pos) };
        Ok((rank < self.num_zeros()).then(|| unsafe { self.select_zero_unchecked(rank) }))
    }

    /// Returns the distance between the one of rank `rank` and the previous
    /// one, or the position of the first one if `rank` is zero.
    fn delta(&self, rank: usize) -> Result<usize> {
        let pos = self.select(rank)?;
        Ok(match rank {
            0 => pos,
            _ => pos - unsafe { self.select_unchecked(rank - 1) },
        })
    }
}

fn out_of_bounds(index: usize, len: usize) -> Error {
    Error::IndexOutOfBounds { index, len }
}
