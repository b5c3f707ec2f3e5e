/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Lists of arbitrary integers with variable-length codes.
//!
//! Each value *v* is represented by *v* + 1 without its most significant
//! bit; the offsets of the codes in a [`BitVec`] are stored in an
//! [`EliasFano`] sequence, and the length of each code, and thus the position
//! of the missing bit, is recovered from the difference of two consecutive
//! offsets.

use epserde::*;
use mem_dbg::*;

use crate::bits::broadword::msb;
use crate::bits::{BitVec, BitVecBuilder};
use crate::dict::{EliasFano, EliasFanoBuilder};
use crate::error::{ensure_index, Error, Result};
use crate::traits::*;

/// The length of the longest code, that of `u64::MAX - 1`.
const MAX_CODE_LEN: usize = 63;

/// An immutable list of `u64` values stored as variable-length codes indexed
/// by an [`EliasFano`] sequence of offsets.
///
/// # Examples
///
/// ```rust
/// # use succinct::prelude::*;
/// let list = EliasFanoCompressedList::new(&[0, 5, 0, 1 << 40, 3])?;
/// assert_eq!(list.len(), 5);
/// assert_eq!(list.get(3)?, 1 << 40);
/// assert_eq!(list.iter().collect::<Vec<_>>(), vec![0, 5, 0, 1 << 40, 3]);
/// # Ok::<(), succinct::error::Error>(())
/// ```
#[derive(Epserde, Debug, Clone, MemDbg, MemSize)]
pub struct EliasFanoCompressedList {
    /// The offsets of the codes, starting with zero.
    offsets: EliasFano,
    /// The concatenated codes.
    bits: BitVec,
}

impl EliasFanoCompressedList {
    /// Returns the length of the code of `value`, that is, the number of
    /// bits of `value` + 1 minus one.
    ///
    /// Fails if `value` is [`u64::MAX`].
    pub fn code_len(value: u64) -> Result<usize> {
        let shifted = value.checked_add(1).ok_or(Error::ValueTooLarge(value))?;
        Ok(msb(shifted) as usize)
    }

    /// Appends the code of `value` to `bits_builder` and returns its length.
    pub fn append_code(bits_builder: &mut BitVecBuilder, value: u64) -> Result<usize> {
        let l = Self::code_len(value)?;
        bits_builder.append_bits((value + 1) ^ (1 << l), l)?;
        Ok(l)
    }

    /// Builds a list containing the given values.
    pub fn new(values: &[u64]) -> Result<Self> {
        let mut total_len = 0;
        for &value in values {
            total_len += Self::code_len(value)?;
        }

        let mut ef_builder = EliasFanoBuilder::new(total_len as u64 + 1, values.len() + 1)?;
        let mut bits_builder = BitVecBuilder::new();
        ef_builder.push(0)?;
        for &value in values {
            Self::append_code(&mut bits_builder, value)?;
            ef_builder.push(bits_builder.len() as u64)?;
        }
        Self::from_builders(ef_builder, bits_builder)
    }

    /// Builds a list from a builder of offsets and a builder of codes filled
    /// externally.
    ///
    /// This makes it possible to stream values when their number and the
    /// total length of their codes are known in advance: the offset builder
    /// must have been created with universe equal to the total length plus
    /// one and with the number of values plus one; then, zero must be pushed
    /// to it, followed, after appending each code with
    /// [`append_code`](EliasFanoCompressedList::append_code), by the current
    /// length of the code builder.
    pub fn from_builders(ef_builder: EliasFanoBuilder, bits_builder: BitVecBuilder) -> Result<Self> {
        let offsets = ef_builder.build()?;
        let bits = bits_builder.build();
        if offsets.is_empty() {
            return Err(Error::TooFewValues {
                declared: 0,
                pushed: 0,
            });
        }

        // Offsets must start at zero, delimit codes no longer than
        // MAX_CODE_LEN and end at the end of the payload.
        let invalid = |index, offset| Error::InvalidCodeOffset {
            index,
            offset,
            len: bits.len(),
        };
        let mut last = 0;
        for (index, offset) in offsets.iter().enumerate() {
            if (index == 0 && offset != 0) || offset - last > MAX_CODE_LEN as u64 {
                return Err(invalid(index, offset));
            }
            last = offset;
        }
        if last != bits.len() as u64 {
            return Err(invalid(offsets.len() - 1, last));
        }
        Ok(Self { offsets, bits })
    }

    /// Returns the number of values in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of given index.
    pub fn get(&self, index: usize) -> Result<u64> {
        ensure_index!(index, self.len());
        let (start, end) = self.offsets.select_range(index)?;
        let l = (end - start) as usize;
        let code = self.bits.get_bits(start as usize, l)?;
        Ok(((1 << l) | code) - 1)
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> CompressedListIter<'_> {
        self.iter_from(0)
    }

    /// Returns an iterator over the values starting at index `from`.
    ///
    /// # Panics
    ///
    /// If `from` is greater than the length.
    pub fn iter_from(&self, from: usize) -> CompressedListIter<'_> {
        assert!(from <= self.len(), "Index out of bounds: {} > {}", from, self.len());
        let mut offsets = self.offsets.iter_from(from);
        let start = offsets.next().unwrap_or(0);
        CompressedListIter {
            bits: &self.bits,
            offsets,
            start,
        }
    }
}

impl Types for EliasFanoCompressedList {
    type Output = u64;
}

impl IndexedSeq for EliasFanoCompressedList {
    fn get(&self, index: usize) -> Result<u64> {
        EliasFanoCompressedList::get(self, index)
    }

    unsafe fn get_unchecked(&self, index: usize) -> u64 {
        let start = self.offsets.get_unchecked(index);
        let l = (self.offsets.get_unchecked(index + 1) - start) as usize;
        ((1 << l) | self.bits.get_bits_unchecked(start as usize, l)) - 1
    }

    #[inline]
    fn len(&self) -> usize {
        EliasFanoCompressedList::len(self)
    }
}

impl<'a> IterFrom for &'a EliasFanoCompressedList {
    type IterFrom = CompressedListIter<'a>;

    fn iter_from(self, from: usize) -> Self::IterFrom {
        EliasFanoCompressedList::iter_from(self, from)
    }
}

impl<'a> IntoIterator for &'a EliasFanoCompressedList {
    type Item = u64;
    type IntoIter = CompressedListIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over an [`EliasFanoCompressedList`].
#[derive(Debug, Clone)]
pub struct CompressedListIter<'a> {
    bits: &'a BitVec,
    offsets: crate::dict::elias_fano::EliasFanoIterator<'a>,
    /// The offset of the next code.
    start: u64,
}

impl Iterator for CompressedListIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let end = self.offsets.next()?;
        let l = (end - self.start) as usize;
        let code = unsafe { self.bits.get_bits_unchecked(self.start as usize, l) };
        self.start = end;
        Some(((1 << l) | code) - 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for CompressedListIter<'_> {}
