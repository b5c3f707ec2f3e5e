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
use crate::traits::*;

/**

A two-level ranking and selection structure.

The bit vector is divided in blocks of 512 bits (eight words). For each block
two words are stored: the number of ones preceding the block, and seven 9-bit
counters containing the number of ones preceding each word of the block, from
the second one on. Ranking needs thus one access to the counters and one
population count.

Selection (of ones or zeros) locates the block containing the required bit by
binary search on the counters, and then the word using the 9-bit counters.
Optionally, at construction time, one can ask to record the block containing
every 1024th one (or zero): in this case the binary search is restricted to
the blocks between two consecutive hints, which makes selection constant-time
on vectors that are not too sparse.

The ranking structure is described by Sebastiano Vigna in “<a
href="https://link.springer.com/chapter/10.1007/978-3-540-68552-4_12">Broadword
Implementation of Rank/Select Queries</a>”, _Proc. of the 7th International
Workshop on Experimental Algorithms, WEA 2008_, volume 5038 of Lecture Notes in
Computer Science, pages 154–168. Springer, 2008.

# Examples

```rust
# use succinct::prelude::*;
let rs = Rank9Sel::new(bit_vec![0, 1, 0, 1, 1, 0]);
assert_eq!(rs.rank(4)?, 2);
assert_eq!(rs.select(2)?, 4);
assert_eq!(rs.select_zero(2)?, 5);
assert_eq!(rs.predecessor1(2)?, Some(1));
assert_eq!(rs.successor0(3)?, Some(5));
assert!(rs.select(3).is_err());
# Ok::<(), succinct::error::Error>(())
```

*/
#[derive(Epserde, Debug, Clone, MemDbg, MemSize)]
pub struct Rank9Sel {
    bits: BitVec,
    counts: Vec<u64>,
    num_ones: usize,
    select_hints: Vec<u64>,
    select_zero_hints: Vec<u64>,
}

impl Rank9Sel {
    const WORDS_PER_BLOCK: usize = 8;
    const BLOCK_BITS: usize = 64 * Self::WORDS_PER_BLOCK;
    const ONES_PER_HINT: usize = 1024;

    /// Creates a new structure without selection hints.
    pub fn new(bits: BitVec) -> Self {
        Self::with_select_hints(bits, false, false)
    }

    /// Creates a new structure, possibly recording hints for selecting ones
    /// and zeros.
    pub fn with_select_hints(bits: BitVec, select: bool, select_zero: bool) -> Self {
        let words = bits.as_words();
        let num_words = words.len();
        let num_blocks = num_words.div_ceil(Self::WORDS_PER_BLOCK);

        // One extra pair so that the number of ones of the whole vector
        // is the count of the block following the last one.
        let mut counts = vec![0_u64; 2 * num_blocks + 2];
        let mut num_ones = 0_u64;

        for (i, pos) in (0..num_words)
            .step_by(Self::WORDS_PER_BLOCK)
            .zip((0..).step_by(2))
        {
            counts[pos] = num_ones;
            num_ones += words[i].count_ones() as u64;
            for j in 1..Self::WORDS_PER_BLOCK {
                counts[pos + 1] |= (num_ones - counts[pos]) << (9 * (j - 1));
                if i + j < num_words {
                    num_ones += words[i + j].count_ones() as u64;
                }
            }
        }
        counts[2 * num_blocks] = num_ones;

        let mut result = Self {
            bits,
            counts,
            num_ones: num_ones as usize,
            select_hints: Vec::new(),
            select_zero_hints: Vec::new(),
        };
        if select {
            result.select_hints = result.build_hints(|b| result.block_rank(b));
        }
        if select_zero {
            result.select_zero_hints = result.build_hints(|b| result.block_rank_zero(b));
        }
        debug!(
            "Built Rank9Sel: {} bits, {} ones, {} select hints, {} select-zero hints",
            result.bits.len(),
            result.num_ones,
            result.select_hints.len(),
            result.select_zero_hints.len()
        );
        result
    }

    /// Hint `i` is the block containing the bit of rank (`i` + 1) · 1024;
    /// the last hint is the number of blocks.
    fn build_hints(&self, block_rank: impl Fn(usize) -> usize) -> Vec<u64> {
        let num_blocks = self.num_blocks();
        let mut hints = Vec::new();
        let mut threshold = Self::ONES_PER_HINT;
        for block in 0..num_blocks {
            while block_rank(block + 1) > threshold {
                hints.push(block as u64);
                threshold += Self::ONES_PER_HINT;
            }
        }
        hints.push(num_blocks as u64);
        hints
    }

    #[inline(always)]
    fn num_blocks(&self) -> usize {
        self.counts.len() / 2 - 1
    }

    /// The number of ones preceding a block.
    #[inline(always)]
    fn block_rank(&self, block: usize) -> usize {
        self.counts[2 * block] as usize
    }

    /// The number of zeros preceding a block, including the padding
    /// of the last word.
    #[inline(always)]
    fn block_rank_zero(&self, block: usize) -> usize {
        block * Self::BLOCK_BITS - self.block_rank(block)
    }

    /// The number of ones preceding the word of index `word` in `block`.
    #[inline(always)]
    fn sub_rank(&self, block: usize, word: usize) -> usize {
        match word {
            0 => 0,
            _ => ((self.counts[2 * block + 1] >> (9 * (word - 1))) & 0x1FF) as usize,
        }
    }

    /// Finds the last block in [`lo`..`hi`) whose rank is at most `rank` by
    /// binary search.
    #[inline]
    fn search_block(
        &self,
        rank: usize,
        mut lo: usize,
        mut hi: usize,
        block_rank: impl Fn(usize) -> usize,
    ) -> usize {
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if block_rank(mid) <= rank {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    #[inline(always)]
    fn hinted_bounds(hints: &[u64], rank: usize, num_blocks: usize) -> (usize, usize) {
        if hints.is_empty() {
            return (0, num_blocks);
        }
        let chunk = rank / Self::ONES_PER_HINT;
        let lo = match chunk {
            0 => 0,
            _ => hints[chunk - 1] as usize,
        };
        (lo, hints[chunk] as usize + 1)
    }

    /// Returns the underlying bit vector.
    pub fn bit_vec(&self) -> &BitVec {
        &self.bits
    }

    /// Returns the bit at the given position.
    pub fn get(&self, pos: usize) -> crate::error::Result<bool> {
        self.bits.get(pos)
    }

    pub fn into_inner(self) -> BitVec {
        self.bits
    }
}

impl BitLength for Rank9Sel {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bits.len()
    }
}

impl NumBits for Rank9Sel {
    #[inline(always)]
    fn num_ones(&self) -> usize {
        self.num_ones
    }
}

impl Rank for Rank9Sel {
    #[inline(always)]
    unsafe fn rank_unchecked(&self, pos: usize) -> usize {
        if pos == self.bits.len() {
            return self.num_ones;
        }
        let word = pos / 64;
        let block = (word / 4) & !1;
        let offset = (word % 8).wrapping_sub(1);
        let counts = self.counts.as_slice();

        // For offset -1 the shift is 63, which yields zero.
        let hint_rank = *counts.get_unchecked(block)
            + (*counts.get_unchecked(block + 1)
                >> ((offset.wrapping_add(offset >> 60 & 0x8)) * 9)
                & 0x1FF);

        let residual = *self.bits.as_words().get_unchecked(word) & ((1 << (pos % 64)) - 1);
        hint_rank as usize + residual.count_ones() as usize
    }
}

impl RankZero for Rank9Sel {}

impl Select for Rank9Sel {
    unsafe fn select_unchecked(&self, rank: usize) -> usize {
        let num_blocks = self.num_blocks();
        let (lo, hi) = Self::hinted_bounds(&self.select_hints, rank, num_blocks);
        let block = self.search_block(rank, lo, hi, |b| self.block_rank(b));

        let residual = rank - self.block_rank(block);
        let mut word = 0;
        while word + 1 < Self::WORDS_PER_BLOCK && self.sub_rank(block, word + 1) <= residual {
            word += 1;
        }
        let word_index = block * Self::WORDS_PER_BLOCK + word;
        word_index * 64
            + select_in_word(
                *self.bits.as_words().get_unchecked(word_index),
                residual - self.sub_rank(block, word),
            )
    }
}

impl SelectZero for Rank9Sel {
    unsafe fn select_zero_unchecked(&self, rank: usize) -> usize {
        let num_blocks = self.num_blocks();
        let (lo, hi) = Self::hinted_bounds(&self.select_zero_hints, rank, num_blocks);
        let block = self.search_block(rank, lo, hi, |b| self.block_rank_zero(b));

        let residual = rank - self.block_rank_zero(block);
        let sub_rank_zero = |word: usize| word * 64 - self.sub_rank(block, word);
        let mut word = 0;
        while word + 1 < Self::WORDS_PER_BLOCK && sub_rank_zero(word + 1) <= residual {
            word += 1;
        }
        let word_index = block * Self::WORDS_PER_BLOCK + word;
        word_index * 64
            + select_in_word(
                !*self.bits.as_words().get_unchecked(word_index),
                residual - sub_rank_zero(word),
            )
    }
}

impl PredSucc for Rank9Sel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last() {
        let bits: BitVec = std::iter::repeat(true).take(1 << 16).collect();
        let rs = Rank9Sel::with_select_hints(bits, true, true);
        assert_eq!(rs.rank(rs.len()).unwrap(), 1 << 16);
        assert_eq!(rs.select((1 << 16) - 1).unwrap(), (1 << 16) - 1);
        assert!(rs.select_zero(0).is_err());
    }

    #[test]
    fn test_hints_end_with_num_blocks() {
        let bits: BitVec = (0..10_000).map(|i| i % 3 == 0).collect();
        let rs = Rank9Sel::with_select_hints(bits, true, true);
        assert_eq!(*rs.select_hints.last().unwrap() as usize, rs.num_blocks());
        assert_eq!(*rs.select_zero_hints.last().unwrap() as usize, rs.num_blocks());
        assert_eq!(rs.select_hints.len(), 3334 / 1024 + 1);
    }
}
