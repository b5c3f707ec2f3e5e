/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Broadword primitives on 64-bit words.

Bits are numbered from the least significant one. The functions in this module
have preconditions that are checked only when debug assertions are enabled:
violating them is a bug in the caller, and the result is unspecified (but
never undefined behavior).

Selection in a word uses the byte-wise technique described by Sebastiano Vigna
in “<a href="https://link.springer.com/chapter/10.1007/978-3-540-68552-4_12">Broadword
Implementation of Rank/Select Queries</a>”, _Proc. of the 7th International Workshop
on Experimental Algorithms, WEA 2008_, volume 5038 of Lecture Notes in Computer Science, pages
154–168. Springer, 2008, completed by a lookup table on bytes.

*/

const ONES_STEP_4: u64 = 0x1111_1111_1111_1111;
const ONES_STEP_8: u64 = 0x0101_0101_0101_0101;
const MSBS_STEP_8: u64 = 0x80 * ONES_STEP_8;

/// For each byte value `b` and each `r` in `0..8`, the entry `b | r << 8` is
/// the position of the one of rank `r` in `b`, or 8 if there is no such one.
static SELECT_IN_BYTE: [u8; 2048] = build_select_in_byte();

const fn build_select_in_byte() -> [u8; 2048] {
    let mut table = [8_u8; 2048];
    let mut byte = 0;
    while byte < 256 {
        let mut rank = 0;
        let mut bit = 0;
        while bit < 8 {
            if (byte >> bit) & 1 != 0 {
                table[byte | (rank << 8)] = bit as u8;
                rank += 1;
            }
            bit += 1;
        }
        byte += 1;
    }
    table
}

/// Returns the position of the most significant one of `word`.
///
/// # Precondition
///
/// `word` must be nonzero.
#[inline(always)]
pub fn msb(word: u64) -> u32 {
    debug_assert!(word != 0, "msb of a zero word");
    63 ^ word.leading_zeros()
}

/// Returns the position of the least significant one of `word`.
///
/// # Precondition
///
/// `word` must be nonzero.
#[inline(always)]
pub fn lsb(word: u64) -> u32 {
    debug_assert!(word != 0, "lsb of a zero word");
    word.trailing_zeros()
}

/// Returns the number of ones in `word`.
#[inline(always)]
pub fn popcount(word: u64) -> u32 {
    word.count_ones()
}

/// Returns the cumulative number of ones in each byte of `word`, that is, the
/// byte of index `i` of the result is the number of ones in the bytes of index
/// up to `i` (included).
#[inline(always)]
pub fn byte_counts(word: u64) -> u64 {
    let mut counts = word - ((word >> 1) & (0x5 * ONES_STEP_4));
    counts = (counts & (0x3 * ONES_STEP_4)) + ((counts >> 2) & (0x3 * ONES_STEP_4));
    counts = (counts + (counts >> 4)) & (0x0F * ONES_STEP_8);
    counts.wrapping_mul(ONES_STEP_8)
}

/// Returns the position of the one of rank `rank` in `word`.
///
/// # Precondition
///
/// `rank` must be smaller than the number of ones in `word`.
#[inline(always)]
pub fn select_in_word(word: u64, rank: usize) -> usize {
    debug_assert!(
        rank < word.count_ones() as usize,
        "rank {} in a word with {} ones",
        rank,
        word.count_ones()
    );
    let counts = byte_counts(word);
    let rank_step_8 = rank as u64 * ONES_STEP_8;
    let geq_rank_step_8 = ((rank_step_8 | MSBS_STEP_8) - counts) & MSBS_STEP_8;
    let place = (geq_rank_step_8.count_ones() * 8) as usize;
    let byte_rank = rank - (((counts << 8) >> place) & 0xFF) as usize;
    place + SELECT_IN_BYTE[((word >> place) & 0xFF) as usize | (byte_rank << 8)] as usize
}
