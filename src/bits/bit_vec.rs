/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Packed bit vectors.

A [`BitVecBuilder`] is an append-only, mutable sequence of bits; calling
[`BitVecBuilder::build`] consumes it and returns an immutable [`BitVec`].
Bits are packed in `u64` words, bit `i` being bit `i % 64` of word `i / 64`.
Bits of the last word beyond the length are always zero.

```rust
# use succinct::prelude::*;
let mut builder = BitVecBuilder::new();
builder.push(true);
builder.append_bits(0b101, 3)?;
let bits = builder.build();
assert_eq!(bits.len(), 4);
assert_eq!(bits.get_bits(1, 3)?, 0b101);
# Ok::<(), succinct::error::Error>(())
```

*/

use crate::error::{ensure_index, Error, Result};
use crate::traits::*;
use epserde::*;
use mem_dbg::*;

const BITS: usize = u64::BITS as usize;

/// Creates a [`BitVec`] from a list of zeros and ones.
///
/// ```rust
/// # use succinct::prelude::*;
/// let bits = bit_vec![0, 1, 1, 0];
/// assert_eq!(bits.len(), 4);
/// assert!(bits.get(1).unwrap());
/// ```
#[macro_export]
macro_rules! bit_vec {
    () => {
        $crate::bits::BitVec::default()
    };
    ($($x:expr),+ $(,)?) => {
        {
            let mut builder = $crate::bits::BitVecBuilder::new();
            $( builder.push($x != 0); )*
            builder.build()
        }
    };
}

/// An immutable packed bit vector.
#[derive(Epserde, Debug, Clone, Default, PartialEq, Eq, Hash, MemDbg, MemSize)]
pub struct BitVec {
    data: Vec<u64>,
    len: usize,
}

impl BitVec {
    /// Returns the number of bits in this bit vector.
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the underlying words.
    #[inline(always)]
    pub fn as_words(&self) -> &[u64] {
        &self.data
    }

    /// Returns the number of ones in this bit vector.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|x| x.count_ones() as usize).sum()
    }

    /// Returns the bit at the given position.
    pub fn get(&self, index: usize) -> Result<bool> {
        ensure_index!(index, self.len);
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// # Safety
    ///
    /// `index` must be between 0 (included) and [`BitVec::len`] (excluded).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> bool {
        (self.data.get_unchecked(index / BITS) >> (index % BITS)) & 1 != 0
    }

    /// Returns the `width` bits starting at position `pos` as the lowest
    /// bits of a word.
    pub fn get_bits(&self, pos: usize, width: usize) -> Result<u64> {
        if width > BITS {
            return Err(Error::InvalidBitLength(width));
        }
        if pos + width > self.len {
            return Err(Error::IndexOutOfBounds {
                index: pos + width,
                len: self.len,
            });
        }
        Ok(unsafe { self.get_bits_unchecked(pos, width) })
    }

    /// # Safety
    ///
    /// `width` must be at most 64 and `pos + width` at most [`BitVec::len`].
    #[inline(always)]
    pub unsafe fn get_bits_unchecked(&self, pos: usize, width: usize) -> u64 {
        if width == 0 {
            return 0;
        }
        let word = pos / BITS;
        let shift = pos % BITS;
        let mask = u64::MAX >> (BITS - width);
        if shift + width <= BITS {
            (self.data.get_unchecked(word) >> shift) & mask
        } else {
            ((self.data.get_unchecked(word) >> shift)
                | (self.data.get_unchecked(word + 1) << (BITS - shift)))
                & mask
        }
    }

    /// Returns an iterator over the bits.
    pub fn iter(&self) -> BitIter<'_> {
        BitIter { bits: self, pos: 0 }
    }

    /// Returns an iterator over the bits starting at position `from`.
    ///
    /// # Panics
    ///
    /// If `from` is greater than the length.
    pub fn iter_from(&self, from: usize) -> BitIter<'_> {
        assert!(from <= self.len, "Start out of bounds: {} > {}", from, self.len);
        BitIter {
            bits: self,
            pos: from,
        }
    }

    #[inline(always)]
    pub fn into_raw_parts(self) -> (Vec<u64>, usize) {
        (self.data, self.len)
    }
}

impl BitLength for BitVec {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }
}

impl Types for BitVec {
    type Output = bool;
}

impl IndexedSeq for BitVec {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> bool {
        BitVec::get_unchecked(self, index)
    }
}

impl<'a> IterFrom for &'a BitVec {
    type IterFrom = BitIter<'a>;

    fn iter_from(self, from: usize) -> Self::IterFrom {
        BitVec::iter_from(self, from)
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut builder = BitVecBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}

impl<'a> IntoIterator for &'a BitVec {
    type Item = bool;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the bits of a [`BitVec`].
#[derive(Debug, Clone)]
pub struct BitIter<'a> {
    bits: &'a BitVec,
    pos: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.bits.len {
            return None;
        }
        let bit = unsafe { self.bits.get_unchecked(self.pos) };
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.len - self.pos;
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitIter<'_> {}

/// An append-only builder for [`BitVec`].
#[derive(Debug, Clone, Default, MemDbg, MemSize)]
pub struct BitVecBuilder {
    data: Vec<u64>,
    len: usize,
}

impl BitVecBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder containing `len` zeros.
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![0; len.div_ceil(BITS)],
            len,
        }
    }

    /// Returns the number of bits appended so far.
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Appends a bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let shift = self.len % BITS;
        if shift == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << shift;
        }
        self.len += 1;
    }

    /// Appends the `width` lowest bits of `value`, lowest bit first.
    ///
    /// Bits of `value` above `width` are ignored.
    pub fn append_bits(&mut self, value: u64, width: usize) -> Result<()> {
        if width > BITS {
            return Err(Error::InvalidBitLength(width));
        }
        unsafe { self.append_bits_unchecked(value, width) };
        Ok(())
    }

    /// # Safety
    ///
    /// `width` must be at most 64.
    #[inline]
    pub(crate) unsafe fn append_bits_unchecked(&mut self, value: u64, width: usize) {
        debug_assert!(width <= BITS);
        if width == 0 {
            return;
        }
        let value = value & (u64::MAX >> (BITS - width));
        let shift = self.len % BITS;
        if shift == 0 {
            self.data.push(value);
        } else {
            let last = self.data.len() - 1;
            self.data[last] |= value << shift;
            if shift + width > BITS {
                self.data.push(value >> (BITS - shift));
            }
        }
        self.len += width;
    }

    /// Sets the bit at a position that has already been appended.
    pub fn set(&mut self, index: usize, bit: bool) -> Result<()> {
        ensure_index!(index, self.len);
        unsafe { self.set_unchecked(index, bit) };
        Ok(())
    }

    /// # Safety
    ///
    /// `index` must be smaller than [`BitVecBuilder::len`].
    #[inline(always)]
    pub(crate) unsafe fn set_unchecked(&mut self, index: usize, bit: bool) {
        debug_assert!(index < self.len);
        let word = self.data.get_unchecked_mut(index / BITS);
        if bit {
            *word |= 1 << (index % BITS);
        } else {
            *word &= !(1 << (index % BITS));
        }
    }

    /// Consumes the builder, returning the immutable bit vector.
    pub fn build(self) -> BitVec {
        BitVec {
            data: self.data,
            len: self.len,
        }
    }
}

impl Extend<bool> for BitVecBuilder {
    fn extend<T: IntoIterator<Item = bool>>(&mut self, iter: T) {
        for bit in iter {
            self.push(bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_bits_across_words() -> Result<()> {
        let mut builder = BitVecBuilder::new();
        builder.append_bits(0b1, 1)?;
        builder.append_bits(u64::MAX, 64)?;
        builder.append_bits(0xDEAD, 16)?;
        builder.append_bits(0xFFFF, 0)?;
        assert_eq!(builder.len(), 81);
        let bits = builder.build();
        assert_eq!(bits.get_bits(0, 1)?, 1);
        assert_eq!(bits.get_bits(1, 64)?, u64::MAX);
        assert_eq!(bits.get_bits(65, 16)?, 0xDEAD);
        assert_eq!(bits.count_ones(), 1 + 64 + 0xDEAD_u64.count_ones() as usize);
        assert!(bits.get_bits(70, 12).is_err());
        Ok(())
    }

    #[test]
    fn test_unchecked_writes() -> Result<()> {
        let mut builder = BitVecBuilder::with_len(70);
        unsafe {
            builder.set_unchecked(3, true);
            builder.set_unchecked(69, true);
            builder.set_unchecked(3, false);
            builder.append_bits_unchecked(0b101, 3);
            builder.append_bits_unchecked(u64::MAX, 0);
        }
        let bits = builder.build();
        assert_eq!(bits.len(), 73);
        assert_eq!(bits.count_ones(), 3);
        assert_eq!(bits.get_bits(69, 4)?, 0b1011);
        Ok(())
    }

    #[test]
    fn test_invalid_width() {
        let mut builder = BitVecBuilder::new();
        assert!(matches!(
            builder.append_bits(0, 65),
            Err(Error::InvalidBitLength(65))
        ));
        assert_eq!(builder.len(), 0);
    }

    #[test]
    fn test_set() -> Result<()> {
        let mut builder = BitVecBuilder::with_len(100);
        builder.set(37, true)?;
        builder.set(99, true)?;
        builder.set(99, false)?;
        assert!(builder.set(100, true).is_err());
        let bits = builder.build();
        assert_eq!(bits.count_ones(), 1);
        assert!(bits.get(37)?);
        assert!(!bits.get(99)?);
        assert!(bits.get(100).is_err());
        Ok(())
    }
}
