/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use epserde::*;
use log::debug;
use mem_dbg::*;

use crate::bits::BitVec;
use crate::error::{ensure_index, Error, Result};
use crate::rank_sel::Rank9Sel;
use crate::traits::*;

const BLOCK_BITS: usize = 256;
const SUPERBLOCK_BLOCKS: usize = 32;

/// The excess change of each byte, bits being read from the least
/// significant one (a one is an open parenthesis).
static BYTE_EXCESS: [i8; 256] = build_byte_excess();
/// The minimum excess reached after each bit of each byte, relative to the
/// excess before the byte.
static BYTE_MIN_EXCESS: [i8; 256] = build_byte_min_excess();

const fn build_byte_excess() -> [i8; 256] {
    let mut table = [0_i8; 256];
    let mut byte = 0;
    while byte < 256 {
        let ones = (byte as u8).count_ones() as i8;
        table[byte] = 2 * ones - 8;
        byte += 1;
    }
    table
}

const fn build_byte_min_excess() -> [i8; 256] {
    let mut table = [0_i8; 256];
    let mut byte = 0;
    while byte < 256 {
        let mut excess = 0_i8;
        let mut min = i8::MAX;
        let mut bit = 0;
        while bit < 8 {
            excess += if (byte >> bit) & 1 != 0 { 1 } else { -1 };
            if excess < min {
                min = excess;
            }
            bit += 1;
        }
        table[byte] = min;
        byte += 1;
    }
    table
}

#[inline(always)]
fn bit(words: &[u64], pos: usize) -> bool {
    (words[pos / 64] >> (pos % 64)) & 1 != 0
}

/// Returns the byte starting at a position multiple of 8.
#[inline(always)]
fn byte(words: &[u64], pos: usize) -> usize {
    debug_assert!(pos % 8 == 0);
    ((words[pos / 64] >> (pos % 64)) & 0xFF) as usize
}

/// Scans the bits in [`from`..`to`), starting with excess `excess`, and
/// returns the first position `q` > `from` such that the excess before `q`
/// is at most `target`, or the excess at `to`.
fn fwd_scan(
    words: &[u64],
    from: usize,
    to: usize,
    mut excess: i64,
    target: i64,
) -> std::result::Result<usize, i64> {
    let mut pos = from;
    while pos < to {
        if pos % 8 == 0 && pos + 8 <= to {
            let byte = byte(words, pos);
            if excess + BYTE_MIN_EXCESS[byte] as i64 > target {
                excess += BYTE_EXCESS[byte] as i64;
                pos += 8;
                continue;
            }
        }
        excess += if bit(words, pos) { 1 } else { -1 };
        pos += 1;
        if excess <= target {
            return Ok(pos);
        }
    }
    Err(excess)
}

/// Scans backwards the bits in [`from`..`to`), the excess before `to`
/// being `excess`, and returns the last position `q` in (`from`..`to`]
/// such that the excess before `q` is at most `target`, or the excess at
/// `from`.
fn bwd_scan(
    words: &[u64],
    from: usize,
    to: usize,
    mut excess: i64,
    target: i64,
) -> std::result::Result<usize, i64> {
    let mut pos = to;
    while pos > from {
        if pos % 8 == 0 && pos >= from + 8 {
            let byte = byte(words, pos - 8);
            let before = excess - BYTE_EXCESS[byte] as i64;
            if before + BYTE_MIN_EXCESS[byte] as i64 > target {
                excess = before;
                pos -= 8;
                continue;
            }
        }
        if excess <= target {
            return Ok(pos);
        }
        excess -= if bit(words, pos - 1) { 1 } else { -1 };
        pos -= 1;
    }
    Err(excess)
}

/// Returns the minimum excess after each bit in [`from`..`to`), starting
/// with excess `excess`, and the excess at `to`.
fn min_scan(words: &[u64], from: usize, to: usize, mut excess: i64) -> (i64, i64) {
    let mut min = i64::MAX;
    let mut pos = from;
    while pos < to {
        if pos % 8 == 0 && pos + 8 <= to {
            let byte = byte(words, pos);
            min = min.min(excess + BYTE_MIN_EXCESS[byte] as i64);
            excess += BYTE_EXCESS[byte] as i64;
            pos += 8;
        } else {
            excess += if bit(words, pos) { 1 } else { -1 };
            min = min.min(excess);
            pos += 1;
        }
    }
    (min, excess)
}

/**

A balanced sequence of parentheses supporting navigation and range-minimum
queries on excess.

Open parentheses are ones and closed parentheses are zeros. The *excess* at
position `i` is the number of open minus the number of closed parentheses in
the positions up to `i` (included); it is never negative and it is zero at the
last position.

The underlying [`Rank9Sel`] makes the excess before any position available in
constant time. The vector is divided in blocks of 256 bits, for which we store
the minimum excess relative to the start of the block, and blocks are grouped
in superblocks of 32 blocks, whose absolute minimum excess is stored in the
leaves of a complete binary tree of minima. A search for the first (or last)
position reaching a given excess scans at most the current block a byte at a
time with the help of precomputed tables, then skips whole blocks of the same
superblock using their minima, and finally walks the tree to find the
superblock containing the answer.

# Examples

```rust
# use succinct::prelude::*;
// (()(()))
let bp = BpVec::new(bit_vec![1, 1, 0, 1, 1, 0, 0, 0]);
assert_eq!(bp.find_close(0)?, 7);
assert_eq!(bp.find_close(3)?, 6);
assert_eq!(bp.find_open(5)?, 4);
assert_eq!(bp.enclose(4)?, Some(3));
assert_eq!(bp.enclose(0)?, None);
assert_eq!(bp.excess(2)?, 1);
assert_eq!(bp.excess_rmq(1, 5)?, 2);
assert!(bp.find_close(2).is_err());
# Ok::<(), succinct::error::Error>(())
```

*/
#[derive(Epserde, Debug, Clone, MemDbg, MemSize)]
pub struct BpVec {
    bits: Rank9Sel,
    /// The minimum excess in each block, relative to the excess at its start.
    block_excess_min: Vec<i16>,
    /// A complete binary tree of minimum excesses; the leaves, starting at
    /// `superblock_leaves`, are the superblocks.
    superblock_min_tree: Vec<i64>,
    superblock_leaves: usize,
}

impl BpVec {
    /// Creates a new structure without selection hints.
    pub fn new(bits: BitVec) -> Self {
        Self::with_select_hints(bits, false, false)
    }

    /// Creates a new structure, possibly recording selection hints in the
    /// underlying [`Rank9Sel`].
    ///
    /// `bits` must be a balanced sequence of parentheses; this is checked
    /// only when debug assertions are enabled.
    pub fn with_select_hints(bits: BitVec, select: bool, select_zero: bool) -> Self {
        let bits = Rank9Sel::with_select_hints(bits, select, select_zero);
        let len = bits.len();
        let words = bits.bit_vec().as_words();
        let num_blocks = len.div_ceil(BLOCK_BITS);
        let num_superblocks = num_blocks.div_ceil(SUPERBLOCK_BLOCKS);

        let mut block_excess_min = Vec::with_capacity(num_blocks);
        let mut superblock_min = vec![i64::MAX; num_superblocks];
        let mut excess = 0;
        for block in 0..num_blocks {
            let start = block * BLOCK_BITS;
            let end = len.min(start + BLOCK_BITS);
            let (min, end_excess) = min_scan(words, start, end, excess);
            debug_assert!(min >= 0, "negative excess in block {}", block);
            block_excess_min.push((min - excess) as i16);
            let superblock = &mut superblock_min[block / SUPERBLOCK_BLOCKS];
            *superblock = (*superblock).min(min);
            excess = end_excess;
        }
        debug_assert!(excess == 0, "unbalanced parentheses: final excess {}", excess);

        let superblock_leaves = num_superblocks.next_power_of_two();
        let mut superblock_min_tree = vec![i64::MAX; 2 * superblock_leaves];
        superblock_min_tree[superblock_leaves..][..num_superblocks]
            .copy_from_slice(&superblock_min);
        for node in (1..superblock_leaves).rev() {
            superblock_min_tree[node] =
                superblock_min_tree[2 * node].min(superblock_min_tree[2 * node + 1]);
        }

        debug!(
            "Built BpVec: {} parentheses, {} blocks, {} superblocks",
            len, num_blocks, num_superblocks
        );

        Self {
            bits,
            block_excess_min,
            superblock_min_tree,
            superblock_leaves,
        }
    }

    /// Returns the underlying rank/select structure.
    pub fn rank_sel(&self) -> &Rank9Sel {
        &self.bits
    }

    /// Returns the parenthesis at the given position (true for open).
    pub fn get(&self, pos: usize) -> Result<bool> {
        self.bits.get(pos)
    }

    #[inline(always)]
    fn words(&self) -> &[u64] {
        self.bits.bit_vec().as_words()
    }

    #[inline(always)]
    fn num_blocks(&self) -> usize {
        self.block_excess_min.len()
    }

    #[inline(always)]
    fn block_end(&self, block: usize) -> usize {
        self.bits.len().min((block + 1) * BLOCK_BITS)
    }

    #[inline(always)]
    fn superblock_end(&self, superblock: usize) -> usize {
        self.num_blocks().min((superblock + 1) * SUPERBLOCK_BLOCKS)
    }

    /// The excess before `pos`, which must be at most the length.
    #[inline(always)]
    fn excess_before(&self, pos: usize) -> i64 {
        2 * unsafe { self.bits.rank_unchecked(pos) } as i64 - pos as i64
    }

    /// The absolute minimum excess after a bit of a block.
    #[inline(always)]
    fn block_min(&self, block: usize) -> i64 {
        self.excess_before(block * BLOCK_BITS) + self.block_excess_min[block] as i64
    }

    /// Returns the first superblock at or after `superblock` whose minimum
    /// excess is at most `target`.
    fn first_superblock_at_or_after(&self, superblock: usize, target: i64) -> Option<usize> {
        if superblock >= self.superblock_leaves {
            return None;
        }
        let tree = &self.superblock_min_tree;
        let mut node = self.superblock_leaves + superblock;
        loop {
            if tree[node] <= target {
                while node < self.superblock_leaves {
                    node *= 2;
                    if tree[node] > target {
                        node += 1;
                    }
                }
                return Some(node - self.superblock_leaves);
            }
            // move to the subtree on the right
            while node & 1 == 1 {
                node >>= 1;
            }
            if node == 0 {
                return None;
            }
            node += 1;
        }
    }

    /// Returns the last superblock at or before `superblock` whose minimum
    /// excess is at most `target`.
    fn last_superblock_at_or_before(&self, superblock: usize, target: i64) -> Option<usize> {
        let tree = &self.superblock_min_tree;
        let mut node = self.superblock_leaves + superblock;
        loop {
            if tree[node] <= target {
                while node < self.superblock_leaves {
                    node = 2 * node + 1;
                    if tree[node] > target {
                        node -= 1;
                    }
                }
                return Some(node - self.superblock_leaves);
            }
            // move to the subtree on the left
            while node > 1 && node & 1 == 0 {
                node >>= 1;
            }
            if node == 1 {
                return None;
            }
            node -= 1;
        }
    }

    /// The minimum excess of the superblocks in [`from`..`to`).
    fn superblocks_min(&self, from: usize, to: usize) -> i64 {
        let tree = &self.superblock_min_tree;
        let mut min = i64::MAX;
        let mut left = self.superblock_leaves + from;
        let mut right = self.superblock_leaves + to;
        while left < right {
            if left & 1 == 1 {
                min = min.min(tree[left]);
                left += 1;
            }
            if right & 1 == 1 {
                right -= 1;
                min = min.min(tree[right]);
            }
            left >>= 1;
            right >>= 1;
        }
        min
    }

    /// The minimum excess after a bit of the blocks in [`from`..`to`).
    fn blocks_min(&self, from: usize, to: usize) -> i64 {
        let first_superblock = from.div_ceil(SUPERBLOCK_BLOCKS);
        let last_superblock = to / SUPERBLOCK_BLOCKS;
        if first_superblock >= last_superblock {
            return (from..to).map(|b| self.block_min(b)).min().unwrap_or(i64::MAX);
        }
        let head = (from..first_superblock * SUPERBLOCK_BLOCKS).map(|b| self.block_min(b));
        let tail = (last_superblock * SUPERBLOCK_BLOCKS..to).map(|b| self.block_min(b));
        head.chain(tail)
            .min()
            .unwrap_or(i64::MAX)
            .min(self.superblocks_min(first_superblock, last_superblock))
    }

    /// Forward search among the blocks in [`from`..`to`).
    fn fwd_blocks(&self, from: usize, to: usize, target: i64) -> Option<usize> {
        for block in from..to {
            let start = block * BLOCK_BITS;
            let excess = self.excess_before(start);
            if excess + self.block_excess_min[block] as i64 <= target {
                if let Ok(pos) = fwd_scan(self.words(), start, self.block_end(block), excess, target)
                {
                    return Some(pos);
                }
            }
        }
        None
    }

    /// Backward search among the blocks in [`from`..`to`).
    fn bwd_blocks(&self, from: usize, to: usize, target: i64) -> Option<usize> {
        for block in (from..to).rev() {
            let start = block * BLOCK_BITS;
            if self.block_min(block) <= target {
                let end = self.block_end(block);
                if let Ok(pos) = bwd_scan(self.words(), start, end, self.excess_before(end), target)
                {
                    return Some(pos);
                }
            }
        }
        None
    }

    /// Returns the smallest `q` > `pos` such that the excess before `q` is
    /// at most `target`.
    fn fwd_search(&self, pos: usize, target: i64) -> Option<usize> {
        if pos >= self.bits.len() {
            return None;
        }
        let block = pos / BLOCK_BITS;
        let excess = self.excess_before(pos);
        if let Ok(q) = fwd_scan(self.words(), pos, self.block_end(block), excess, target) {
            return Some(q);
        }
        let superblock = block / SUPERBLOCK_BLOCKS;
        if let Some(q) = self.fwd_blocks(block + 1, self.superblock_end(superblock), target) {
            return Some(q);
        }
        let superblock = self.first_superblock_at_or_after(superblock + 1, target)?;
        self.fwd_blocks(
            superblock * SUPERBLOCK_BLOCKS,
            self.superblock_end(superblock),
            target,
        )
    }

    /// Returns the largest `q` ≤ `pos` such that the excess before `q` is at
    /// most `target`.
    fn bwd_search(&self, pos: usize, target: i64) -> Option<usize> {
        if pos > 0 {
            let block = (pos - 1) / BLOCK_BITS;
            let start = block * BLOCK_BITS;
            if let Ok(q) = bwd_scan(self.words(), start, pos, self.excess_before(pos), target) {
                return Some(q);
            }
            let superblock = block / SUPERBLOCK_BLOCKS;
            if let Some(q) = self.bwd_blocks(superblock * SUPERBLOCK_BLOCKS, block, target) {
                return Some(q);
            }
            if superblock > 0 {
                if let Some(s) = self.last_superblock_at_or_before(superblock - 1, target) {
                    if let Some(q) = self.bwd_blocks(
                        s * SUPERBLOCK_BLOCKS,
                        self.superblock_end(s),
                        target,
                    ) {
                        return Some(q);
                    }
                }
            }
        }
        // the excess before the first parenthesis is zero
        (target >= 0).then_some(0)
    }

    /// Returns the minimum excess before the positions in (`from`..`to`].
    fn range_min(&self, from: usize, to: usize) -> i64 {
        debug_assert!(from < to);
        let words = self.words();
        let first_block = from / BLOCK_BITS;
        let last_block = (to - 1) / BLOCK_BITS;
        let excess = self.excess_before(from);
        if first_block == last_block {
            return min_scan(words, from, to, excess).0;
        }
        let (head, _) = min_scan(words, from, (first_block + 1) * BLOCK_BITS, excess);
        let middle = self.blocks_min(first_block + 1, last_block);
        let last_start = last_block * BLOCK_BITS;
        let (tail, _) = min_scan(words, last_start, to, self.excess_before(last_start));
        head.min(middle).min(tail)
    }

    #[inline(always)]
    fn check_parenthesis(&self, pos: usize, open: bool) -> Result<()> {
        ensure_index!(pos, self.bits.len());
        if unsafe { self.bits.bit_vec().get_unchecked(pos) } != open {
            return Err(Error::UnexpectedParenthesis { pos, open });
        }
        Ok(())
    }

    /// Returns the position of the parenthesis closing the open parenthesis
    /// at position `pos`.
    pub fn find_close(&self, pos: usize) -> Result<usize> {
        self.check_parenthesis(pos, true)?;
        self.fwd_search(pos, self.excess_before(pos))
            .map(|q| q - 1)
            .ok_or(Error::MalformedParentheses(pos))
    }

    /// Returns the position of the parenthesis opening the closed parenthesis
    /// at position `pos`.
    pub fn find_open(&self, pos: usize) -> Result<usize> {
        self.check_parenthesis(pos, false)?;
        self.bwd_search(pos, self.excess_before(pos + 1))
            .ok_or(Error::MalformedParentheses(pos))
    }

    /// Returns the position of the open parenthesis of the pair that
    /// encloses the pair containing the parenthesis at position `pos`, or
    /// `None` if the pair is at the outermost level.
    pub fn enclose(&self, pos: usize) -> Result<Option<usize>> {
        ensure_index!(pos, self.bits.len());
        let open = match unsafe { self.bits.bit_vec().get_unchecked(pos) } {
            true => pos,
            false => self.find_open(pos)?,
        };
        Ok(self.bwd_search(open, self.excess_before(open) - 1))
    }

    /// Returns the excess at position `pos`, that is, the number of open
    /// minus the number of closed parentheses in the positions up to `pos`
    /// (included).
    pub fn excess(&self, pos: usize) -> Result<i64> {
        ensure_index!(pos, self.bits.len());
        Ok(self.excess_before(pos + 1))
    }

    /// Returns the leftmost position in [`start`..=`end`] at which the excess
    /// is minimum.
    pub fn excess_rmq(&self, start: usize, end: usize) -> Result<usize> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        ensure_index!(end, self.bits.len());
        let min = self.range_min(start, end + 1);
        self.fwd_search(start, min)
            .map(|q| q - 1)
            .ok_or(Error::MalformedParentheses(start))
    }
}

impl BitLength for BpVec {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bits.len()
    }
}

impl NumBits for BpVec {
    #[inline(always)]
    fn num_ones(&self) -> usize {
        self.bits.num_ones()
    }
}

impl Rank for BpVec {
    #[inline(always)]
    unsafe fn rank_unchecked(&self, pos: usize) -> usize {
        self.bits.rank_unchecked(pos)
    }
}

impl RankZero for BpVec {}

impl Select for BpVec {
    #[inline(always)]
    unsafe fn select_unchecked(&self, rank: usize) -> usize {
        self.bits.select_unchecked(rank)
    }
}

impl SelectZero for BpVec {
    #[inline(always)]
    unsafe fn select_zero_unchecked(&self, rank: usize) -> usize {
        self.bits.select_zero_unchecked(rank)
    }
}

impl PredSucc for BpVec {}
