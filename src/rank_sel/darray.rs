/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use epserde::*;
use log::debug;
use mem_dbg::*;

use crate::bits::broadword::select_in_word;
use crate::bits::BitVec;
use crate::error::{Error, Result};

/// Selection of ones with a [`DArray`].
pub type DArray1 = DArray<true>;
/// Selection of zeros with a [`DArray`].
pub type DArray0 = DArray<false>;

/**

A select-only index for the bits of value `BIT` of a bit vector that is not
stored in the structure.

The positions of the bits of value `BIT` are grouped in blocks of 1024. If the
positions of a block span less than 2¹⁶ bits, the block is *dense*: we store
the position of its first bit and, every 32 positions, a 16-bit offset from
it; selection then scans at most a few words starting from the closest offset.
Otherwise the block is *sparse* and all its positions are stored explicitly in
an overflow array.

This is the *darray* structure described by Daisuke Okanohara and Kunihiko
Sadakane in “<a href="https://epubs.siam.org/doi/10.1137/1.9781611972870.6">Practical
Entropy-Compressed Rank/Select Dictionary</a>”, _Proc. of the Workshop on
Algorithm Engineering and Experiments, ALENEX 2007_. SIAM, 2007.

The same bit vector that was used at construction must be passed to
[`select`](DArray::select).

# Examples

```rust
# use succinct::prelude::*;
let bits = bit_vec![0, 1, 1, 0, 0, 1];
let ones = DArray1::new(&bits);
let zeros = DArray0::new(&bits);
assert_eq!(ones.num_positions(), 3);
assert_eq!(ones.select(&bits, 2)?, 5);
assert_eq!(zeros.select(&bits, 1)?, 3);
assert!(zeros.select(&bits, 3).is_err());
# Ok::<(), succinct::error::Error>(())
```

*/
#[derive(Epserde, Debug, Clone, Default, MemDbg, MemSize)]
pub struct DArray<const BIT: bool> {
    /// For dense blocks, the position of the first bit; for sparse blocks,
    /// minus one minus the index of the first position in the overflow array.
    block_inventory: Vec<i64>,
    /// Offsets from the start of the block every 32 positions (`u16::MAX`
    /// for sparse blocks).
    subblock_inventory: Vec<u16>,
    overflow_positions: Vec<u64>,
    num_positions: usize,
}

impl<const BIT: bool> DArray<BIT> {
    const BLOCK_LEN: usize = 1024;
    const SUBBLOCK_LEN: usize = 32;
    const MAX_IN_BLOCK_DISTANCE: u64 = 1 << 16;

    /// Builds the index for the given bit vector.
    pub fn new(bits: &BitVec) -> Self {
        let mut result = Self::default();
        let mut cur_block = Vec::with_capacity(Self::BLOCK_LEN);

        for (word_idx, &word) in bits.as_words().iter().enumerate() {
            let mut word = Self::word(word, word_idx, bits.len());
            while word != 0 {
                let pos = (word_idx * 64) as u64 + word.trailing_zeros() as u64;
                cur_block.push(pos);
                if cur_block.len() == Self::BLOCK_LEN {
                    result.flush_block(&cur_block);
                    cur_block.clear();
                }
                word &= word - 1;
            }
        }
        if !cur_block.is_empty() {
            result.flush_block(&cur_block);
        }

        let num_sparse_blocks = result.block_inventory.iter().filter(|&&b| b < 0).count();
        debug!(
            "Built DArray<{}>: {} positions, {} blocks ({} sparse), {} overflow positions",
            BIT,
            result.num_positions,
            result.block_inventory.len(),
            num_sparse_blocks,
            result.overflow_positions.len()
        );
        result
    }

    /// Returns the `word_idx`-th word of a bit vector of length `len`,
    /// negated if we index zeros; bits beyond the length are cleared.
    #[inline(always)]
    fn word(word: u64, word_idx: usize, len: usize) -> u64 {
        let word = if BIT { word } else { !word };
        let valid = len - word_idx * 64;
        if valid < 64 {
            word & ((1 << valid) - 1)
        } else {
            word
        }
    }

    fn flush_block(&mut self, positions: &[u64]) {
        let first = positions[0];
        let last = positions[positions.len() - 1];
        if last - first < Self::MAX_IN_BLOCK_DISTANCE {
            self.block_inventory.push(first as i64);
            self.subblock_inventory.extend(
                positions
                    .iter()
                    .step_by(Self::SUBBLOCK_LEN)
                    .map(|&pos| (pos - first) as u16),
            );
        } else {
            self.block_inventory
                .push(-(self.overflow_positions.len() as i64) - 1);
            self.overflow_positions.extend_from_slice(positions);
            self.subblock_inventory.extend(
                std::iter::repeat(u16::MAX).take(positions.len().div_ceil(Self::SUBBLOCK_LEN)),
            );
        }
        self.num_positions += positions.len();
    }

    /// Returns the number of bits of value `BIT` in the indexed bit vector.
    #[inline(always)]
    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    /// Returns the position of the bit of value `BIT` of given rank.
    pub fn select(&self, bits: &BitVec, rank: usize) -> Result<usize> {
        if rank >= self.num_positions {
            return Err(Error::RankOutOfRange {
                rank,
                count: self.num_positions,
            });
        }
        Ok(unsafe { self.select_unchecked(bits, rank) })
    }

    /// Returns the position of the bit of value `BIT` of given rank.
    ///
    /// # Safety
    ///
    /// `rank` must be smaller than [`num_positions`](DArray::num_positions)
    /// and `bits` must be the bit vector the index was built on.
    pub unsafe fn select_unchecked(&self, bits: &BitVec, rank: usize) -> usize {
        let block = rank / Self::BLOCK_LEN;
        let block_pos = *self.block_inventory.get_unchecked(block);
        if block_pos < 0 {
            let overflow = (-block_pos - 1) as usize;
            return *self
                .overflow_positions
                .get_unchecked(overflow + rank % Self::BLOCK_LEN) as usize;
        }

        let subblock = rank / Self::SUBBLOCK_LEN;
        let start_pos =
            block_pos as usize + *self.subblock_inventory.get_unchecked(subblock) as usize;
        let mut residual = rank % Self::SUBBLOCK_LEN;
        if residual == 0 {
            return start_pos;
        }

        let words = bits.as_words();
        let mut word_idx = start_pos / 64;
        let mut word = Self::word(*words.get_unchecked(word_idx), word_idx, bits.len())
            & (u64::MAX << (start_pos % 64));
        loop {
            let ones = word.count_ones() as usize;
            if residual < ones {
                break;
            }
            residual -= ones;
            word_idx += 1;
            word = Self::word(*words.get_unchecked(word_idx), word_idx, bits.len());
        }
        word_idx * 64 + select_in_word(word, residual)
    }
}
