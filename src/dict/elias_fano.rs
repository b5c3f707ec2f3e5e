/*
 *
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The Elias–Fano representation of monotone sequences.
//!
//! Given a monotone sequence 0 ≤ *x*₀ ≤ *x*₁ ≤ ... ≤ *x*<sub>*n* – 1</sub> <
//! *u*, where *u* is a given universe, the Elias–Fano representation stores
//! the sequence using at most 2 + lg(*u*/*n*) bits per element, which is very
//! close to the information-theoretical lower bound when *n* is much smaller
//! than *u*.
//!
//! The representation was introduced in Peter Elias in “[Efficient storage and
//! retrieval by content and address of static
//! files](https://dl.acm.org/doi/abs/10.1145/321812.321820)”, *J. Assoc.
//! Comput. Mach.*, 21(2):246–260, 1974, and also independently by Robert Fano
//! in “[On the number of bits required to implement an associative
//! memory](http://csg.csail.mit.edu/pubs/memos/Memo-61/Memo-61.pdf)”,
//! Memorandum 61, Computer Structures Group, Project MAC, MIT, Cambridge,
//! Mass., n.d., 1971.
//!
//! The lower *l* = ⌊lg(*u*/*n*)⌋ bits of each element are stored contiguously
//! in a [`BitVec`], whereas the upper bits are stored in a bit vector of *n* +
//! ⌊*u* / 2<sup>*l*</sup>⌋ + 1 bits by setting, for each 0 ≤ *i* < *n*, the bit
//! of index ⌊*x*<sub>*i*</sub> / 2<sup>*l*</sup>⌋ + *i*. The upper bits of
//! *x*<sub>*i*</sub> are then the position of the *i*-th one minus *i*, and the
//! number of elements whose upper bits are smaller than *h* is the position of
//! the *h*-th zero minus *h*. Both selections are performed by a [`Rank9Sel`]
//! with hints for ones and zeros.

use epserde::*;
use log::debug;
use mem_dbg::*;

use crate::bits::broadword::msb;
use crate::bits::{BitVec, BitVecBuilder};
use crate::error::{ensure_index, Error, Result};
use crate::rank_sel::Rank9Sel;
use crate::traits::*;

/// A monotone sequence of integers stored using the Elias–Fano
/// representation.
///
/// Instances are built with an [`EliasFanoBuilder`], or from the positions of
/// the ones of a bit vector with [`EliasFano::from_bit_vec`].
///
/// # Examples
///
/// ```rust
/// # use succinct::prelude::*;
/// let mut efb = EliasFanoBuilder::new(11, 4)?;
/// efb.push(0)?;
/// efb.push(2)?;
/// efb.push(8)?;
/// efb.push(10)?;
/// let ef = efb.build()?;
///
/// assert_eq!(ef.get(2)?, 8);
/// assert_eq!(ef.rank(8)?, 2);
/// assert_eq!(ef.successor1(3)?, Some(8));
/// assert_eq!(ef.predecessor1(7)?, Some(2));
/// assert_eq!(ef.select_range(1)?, (2, 8));
/// assert_eq!(ef.iter_from(1).collect::<Vec<_>>(), vec![2, 8, 10]);
/// # Ok::<(), succinct::error::Error>(())
/// ```
#[derive(Epserde, Debug, Clone, MemDbg, MemSize)]
pub struct EliasFano {
    /// The number of values.
    n: usize,
    /// A strict upper bound to the values.
    universe: u64,
    /// The number of lower bits.
    l: usize,
    /// The lower-bits array.
    low_bits: BitVec,
    /// The higher-bits array.
    high_bits: Rank9Sel,
}

impl EliasFano {
    /// Returns the number of lower bits used for a sequence of `n` values
    /// smaller than `universe`.
    fn num_low_bits(universe: u64, n: usize) -> usize {
        if n > 0 && universe / n as u64 > 0 {
            msb(universe / n as u64) as usize
        } else {
            0
        }
    }

    /// Builds the sequence of the positions of the ones of `bits`, using its
    /// length as universe.
    pub fn from_bit_vec(bits: &BitVec) -> Self {
        let n = bits.count_ones();
        let mut efb = EliasFanoBuilder::new_unchecked(bits.len() as u64, n);
        for (pos, bit) in bits.iter().enumerate() {
            if bit {
                // SAFETY: positions are increasing and smaller than the length.
                unsafe { efb.push_unchecked(pos as u64) };
            }
        }
        efb.finish()
    }

    /// Returns the number of values in the sequence.
    ///
    /// This method is equivalent to [`IndexedSeq::len`], but it is provided to
    /// reduce ambiguity in method resolution.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the universe, that is, a strict upper bound to the values.
    #[inline]
    pub fn universe(&self) -> u64 {
        self.universe
    }

    /// Returns the number of values. Seeing the sequence as a bit vector of
    /// length [`universe`](EliasFano::universe), it is the number of ones.
    #[inline]
    pub fn num_ones(&self) -> usize {
        self.n
    }

    #[inline(always)]
    unsafe fn low(&self, index: usize) -> u64 {
        self.low_bits.get_bits_unchecked(index * self.l, self.l)
    }

    /// Returns the value of given index.
    pub fn get(&self, index: usize) -> Result<u64> {
        ensure_index!(index, self.n);
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns the value of given index.
    ///
    /// # Safety
    ///
    /// `index` must be smaller than [`len`](EliasFano::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> u64 {
        let high = (self.high_bits.select_unchecked(index) - index) as u64;
        (high << self.l) | self.low(index)
    }

    /// Returns the value of rank `rank`; this is the same as
    /// [`get`](EliasFano::get), but fails with a rank error.
    pub fn select(&self, rank: usize) -> Result<u64> {
        if rank >= self.n {
            return Err(Error::RankOutOfRange {
                rank,
                count: self.n,
            });
        }
        Ok(unsafe { self.get_unchecked(rank) })
    }

    /// Returns the number of values strictly smaller than `value`.
    ///
    /// `value` can be at most the universe.
    pub fn rank(&self, value: u64) -> Result<usize> {
        if value > self.universe {
            return Err(Error::ValueOutOfUniverse {
                value,
                universe: self.universe,
            });
        }
        Ok(unsafe { self.rank_unchecked(value) })
    }

    /// Returns the number of values strictly smaller than `value`.
    ///
    /// # Safety
    ///
    /// `value` must be at most the universe.
    pub unsafe fn rank_unchecked(&self, value: u64) -> usize {
        if value == self.universe || self.n == 0 {
            return self.n;
        }
        let high = (value >> self.l) as usize;
        let low = value & self.low_mask();

        // All values with upper bits at most `high` precede this zero.
        let mut bit_pos = self.high_bits.select_zero_unchecked(high);
        let mut rank = bit_pos - high;
        let words = self.high_bits.bit_vec().as_words();

        while bit_pos > 0
            && (words.get_unchecked((bit_pos - 1) / 64) >> ((bit_pos - 1) % 64)) & 1 != 0
            && self.low(rank - 1) >= low
        {
            bit_pos -= 1;
            rank -= 1;
        }
        rank
    }

    #[inline(always)]
    fn low_mask(&self) -> u64 {
        match self.l {
            0 => 0,
            l => u64::MAX >> (64 - l),
        }
    }

    /// Returns whether `value` belongs to the sequence.
    pub fn contains(&self, value: u64) -> bool {
        if value >= self.universe {
            return false;
        }
        let rank = unsafe { self.rank_unchecked(value) };
        rank < self.n && unsafe { self.get_unchecked(rank) } == value
    }

    /// Returns the least value greater than or equal to `value`, or `None`
    /// if there is no such value.
    ///
    /// Fails if `value` is not smaller than the universe.
    pub fn successor1(&self, value: u64) -> Result<Option<u64>> {
        if value >= self.universe {
            return Err(Error::ValueOutOfUniverse {
                value,
                universe: self.universe,
            });
        }
        let rank = unsafe { self.rank_unchecked(value) };
        Ok((rank < self.n).then(|| unsafe { self.get_unchecked(rank) }))
    }

    /// Returns the greatest value smaller than or equal to `value`, or `None`
    /// if there is no such value.
    ///
    /// Fails if `value` is not smaller than the universe.
    pub fn predecessor1(&self, value: u64) -> Result<Option<u64>> {
        if value >= self.universe {
            return Err(Error::ValueOutOfUniverse {
                value,
                universe: self.universe,
            });
        }
        let rank = unsafe { self.rank_unchecked(value + 1) };
        Ok(match rank {
            0 => None,
            _ => Some(unsafe { self.get_unchecked(rank - 1) }),
        })
    }

    /// Returns the difference between the value of rank `rank` and the
    /// previous one, or the first value if `rank` is zero.
    pub fn delta(&self, rank: usize) -> Result<u64> {
        let value = self.select(rank)?;
        Ok(match rank {
            0 => value,
            _ => value - unsafe { self.get_unchecked(rank - 1) },
        })
    }

    /// Returns the values of index `index` and `index` + 1.
    ///
    /// The second value is recovered by scanning the upper bits from the
    /// position of the first one, avoiding a second selection.
    pub fn select_range(&self, index: usize) -> Result<(u64, u64)> {
        if index + 1 >= self.n {
            return Err(Error::RankOutOfRange {
                rank: index + 1,
                count: self.n,
            });
        }
        let bit_pos = unsafe { self.high_bits.select_unchecked(index) };
        let first = (((bit_pos - index) as u64) << self.l) | unsafe { self.low(index) };

        let words = self.high_bits.bit_vec().as_words();
        let next_pos = bit_pos + 1;
        let mut word_idx = next_pos / 64;
        // SAFETY: there is a one after `bit_pos`, so we never read past the end.
        let mut window =
            unsafe { *words.get_unchecked(word_idx) } & (u64::MAX << (next_pos % 64));
        while window == 0 {
            word_idx += 1;
            window = unsafe { *words.get_unchecked(word_idx) };
        }
        let high = word_idx * 64 + window.trailing_zeros() as usize - (index + 1);
        let second = ((high as u64) << self.l) | unsafe { self.low(index + 1) };
        Ok((first, second))
    }

    /// Returns an iterator over the values.
    #[inline(always)]
    pub fn iter(&self) -> EliasFanoIterator<'_> {
        EliasFanoIterator::new_from(self, 0)
    }

    /// Returns an iterator over the values starting at index `from`.
    ///
    /// # Panics
    ///
    /// If `from` is greater than the length.
    #[inline(always)]
    pub fn iter_from(&self, from: usize) -> EliasFanoIterator<'_> {
        EliasFanoIterator::new_from(self, from)
    }
}

impl Types for EliasFano {
    type Output = u64;
}

impl IndexedSeq for EliasFano {
    #[inline]
    fn len(&self) -> usize {
        self.n
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> u64 {
        EliasFano::get_unchecked(self, index)
    }
}

impl<'a> IterFrom for &'a EliasFano {
    type IterFrom = EliasFanoIterator<'a>;

    fn iter_from(self, from: usize) -> Self::IterFrom {
        EliasFano::iter_from(self, from)
    }
}

impl<'a> IntoIterator for &'a EliasFano {
    type Item = u64;
    type IntoIter = EliasFanoIterator<'a>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for [`EliasFano`].
///
/// The iterator keeps a window on the upper bits, so each step costs
/// constant amortized time.
#[derive(Debug, Clone)]
pub struct EliasFanoIterator<'a> {
    ef: &'a EliasFano,
    /// The index of the next value it will be returned when `next` is called.
    index: usize,
    /// Index of the word loaded in the `window` field.
    word_idx: usize,
    /// Current window on the high bits.
    window: u64,
}

impl<'a> EliasFanoIterator<'a> {
    pub fn new_from(ef: &'a EliasFano, start_index: usize) -> Self {
        if start_index > ef.len() {
            panic!("Index out of bounds: {} > {}", start_index, ef.len());
        }
        if start_index == ef.len() {
            return Self {
                ef,
                index: start_index,
                word_idx: 0,
                window: 0,
            };
        }
        let bit_pos = unsafe { ef.high_bits.select_unchecked(start_index) };
        let word_idx = bit_pos / 64;
        // clean off the bits that we don't care about
        let word = unsafe { *ef.high_bits.bit_vec().as_words().get_unchecked(word_idx) };
        let window = word & (u64::MAX << (bit_pos % 64));
        Self {
            ef,
            index: start_index,
            word_idx,
            window,
        }
    }
}

impl Iterator for EliasFanoIterator<'_> {
    type Item = u64;

    #[inline(always)]
    fn next(&mut self) -> Option<u64> {
        if self.index >= self.ef.len() {
            return None;
        }
        let words = self.ef.high_bits.bit_vec().as_words();
        while self.window == 0 {
            self.word_idx += 1;
            debug_assert!(self.word_idx < words.len());
            self.window = unsafe { *words.get_unchecked(self.word_idx) };
        }
        let bit_idx = self.window.trailing_zeros() as usize;
        let high = (self.word_idx * 64 + bit_idx - self.index) as u64;
        // clear the lowest bit set
        self.window &= self.window - 1;
        let res = (high << self.ef.l) | unsafe { self.ef.low(self.index) };
        self.index += 1;
        Some(res)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for EliasFanoIterator<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.ef.len() - self.index
    }
}

/// A sequential builder for [`EliasFano`].
///
/// After creating an instance, you can use [`EliasFanoBuilder::push`] to add
/// new values, and then call [`EliasFanoBuilder::build`] to create the
/// [`EliasFano`] instance. All declared values must be pushed.
///
/// # Examples
///
/// ```rust
/// # use succinct::prelude::*;
/// let mut efb = EliasFanoBuilder::new(11, 3)?;
/// efb.push(2)?;
/// assert!(matches!(efb.push(1), Err(Error::NotMonotone { value: 1, last: 2 })));
/// assert!(efb.push(11).is_err());
/// efb.push(4)?;
/// assert!(matches!(
///     efb.clone().build(),
///     Err(Error::TooFewValues { declared: 3, pushed: 2 })
/// ));
/// efb.push(4)?;
/// assert!(efb.push(5).is_err());
/// let ef = efb.build()?;
/// assert_eq!(ef.iter().collect::<Vec<_>>(), vec![2, 4, 4]);
/// # Ok::<(), succinct::error::Error>(())
/// ```
#[derive(Debug, Clone, MemDbg, MemSize)]
pub struct EliasFanoBuilder {
    n: usize,
    universe: u64,
    l: usize,
    low_bits: BitVecBuilder,
    high_bits: BitVecBuilder,
    last_value: u64,
    count: usize,
}

impl EliasFanoBuilder {
    /// Creates a builder for an [`EliasFano`] containing `n` values smaller
    /// than `universe`.
    pub fn new(universe: u64, n: usize) -> Result<Self> {
        if n > 0 && universe == 0 {
            return Err(Error::EmptyUniverse(n));
        }
        Ok(Self::new_unchecked(universe, n))
    }

    fn new_unchecked(universe: u64, n: usize) -> Self {
        let l = EliasFano::num_low_bits(universe, n);
        // an empty sequence has no upper bits, whatever the universe
        let high_len = match n {
            0 => 0,
            _ => n + (universe >> l) as usize + 1,
        };
        Self {
            n,
            universe,
            l,
            low_bits: BitVecBuilder::new(),
            high_bits: BitVecBuilder::with_len(high_len),
            last_value: 0,
            count: 0,
        }
    }

    /// Returns the number of values pushed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Adds a new value to the builder.
    ///
    /// Fails if too many values are provided, if the value is not smaller
    /// than the universe, or if it is smaller than the last provided value.
    /// In case of failure, the builder is unchanged.
    pub fn push(&mut self, value: u64) -> Result<()> {
        if self.count == self.n {
            return Err(Error::TooManyValues(self.n));
        }
        if value >= self.universe {
            return Err(Error::ValueOutOfUniverse {
                value,
                universe: self.universe,
            });
        }
        if value < self.last_value {
            return Err(Error::NotMonotone {
                value,
                last: self.last_value,
            });
        }
        unsafe {
            self.push_unchecked(value);
        }
        Ok(())
    }

    /// # Safety
    ///
    /// Values passed to this function must be smaller than the universe and
    /// must be monotone. Moreover, the function should not be called more
    /// than `n` times.
    pub unsafe fn push_unchecked(&mut self, value: u64) {
        let l = self.l;
        self.low_bits.append_bits_unchecked(value, l);
        let high = (value >> l) as usize + self.count;
        self.high_bits.set_unchecked(high, true);
        self.count += 1;
        self.last_value = value;
    }

    /// Builds the sequence; fails if fewer values than declared were pushed.
    pub fn build(self) -> Result<EliasFano> {
        if self.count != self.n {
            return Err(Error::TooFewValues {
                declared: self.n,
                pushed: self.count,
            });
        }
        Ok(self.finish())
    }

    fn finish(self) -> EliasFano {
        debug!(
            "Built EliasFano: {} values, universe {}, {} lower bits",
            self.n, self.universe, self.l
        );
        EliasFano {
            n: self.n,
            universe: self.universe,
            l: self.l,
            low_bits: self.low_bits.build(),
            high_bits: Rank9Sel::with_select_hints(self.high_bits.build(), true, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_low_bits() {
        assert_eq!(EliasFano::num_low_bits(0, 0), 0);
        assert_eq!(EliasFano::num_low_bits(10, 0), 0);
        assert_eq!(EliasFano::num_low_bits(3, 5), 0);
        assert_eq!(EliasFano::num_low_bits(1000, 10), 6);
        assert_eq!(EliasFano::num_low_bits(u64::MAX, 1), 63);
    }

    #[test]
    fn test_rank_with_duplicates() -> Result<()> {
        let values = [0, 3, 3, 3, 7, 64, 64, 65];
        let mut efb = EliasFanoBuilder::new(66, values.len())?;
        for &v in &values {
            efb.push(v)?;
        }
        let ef = efb.build()?;
        assert_eq!(ef.rank(0)?, 0);
        assert_eq!(ef.rank(3)?, 1);
        assert_eq!(ef.rank(4)?, 4);
        assert_eq!(ef.rank(64)?, 5);
        assert_eq!(ef.rank(65)?, 7);
        assert_eq!(ef.rank(66)?, 8);
        assert!(ef.rank(67).is_err());
        assert_eq!(ef.select_range(1)?, (3, 3));
        assert_eq!(ef.delta(4)?, 4);
        Ok(())
    }
}
