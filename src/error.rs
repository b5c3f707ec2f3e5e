/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Error types.

Errors fall in three families:

- *construction* errors, returned by builders when a precondition is violated
  (no partially built structure is ever returned);
- *out-of-range* errors, returned by queries whose arguments are outside the
  valid bounds;
- *I/O* errors, returned by the [storing and loading helpers](crate::utils).

*/

use thiserror::Error;

/// The error type of this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A value smaller than the previous one was pushed to a monotone builder.
    #[error("the values provided are not monotone: {value} < {last}")]
    NotMonotone { value: u64, last: u64 },

    /// More values than declared were pushed to a builder.
    #[error("too many values: {0} declared")]
    TooManyValues(usize),

    /// A builder was finalized before all declared values were pushed.
    #[error("too few values: {declared} declared, {pushed} pushed")]
    TooFewValues { declared: usize, pushed: usize },

    /// A value is not smaller than the universe.
    #[error("value out of universe: {value} >= {universe}")]
    ValueOutOfUniverse { value: u64, universe: u64 },

    /// A positive number of values was declared over an empty universe.
    #[error("cannot store {0} values in an empty universe")]
    EmptyUniverse(usize),

    /// A bit length outside `0..=64`.
    #[error("invalid bit length: {0} > 64")]
    InvalidBitLength(usize),

    /// The offsets of a compressed list do not delimit codes of its payload.
    #[error("invalid code offset {offset} at index {index} (payload length {len})")]
    InvalidCodeOffset { index: usize, offset: u64, len: usize },

    /// A value cannot be represented by the encoding.
    #[error("value too large to encode: {0}")]
    ValueTooLarge(u64),

    /// An index or position is outside the structure.
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A select query for a nonexistent rank.
    #[error("rank out of range: {rank} >= {count}")]
    RankOutOfRange { rank: usize, count: usize },

    /// A range whose left end is after its right end.
    #[error("invalid range: [{start}..={end}]")]
    InvalidRange { start: usize, end: usize },

    /// A parenthesis of the wrong kind was passed to a navigation query.
    #[error("unexpected parenthesis at position {pos} (open expected: {open})")]
    UnexpectedParenthesis { pos: usize, open: bool },

    /// The parenthesis sequence is not balanced around the given position.
    #[error("unbalanced parentheses at position {0}")]
    MalformedParentheses(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] epserde::ser::Error),

    #[error(transparent)]
    Deserialize(#[from] epserde::deser::Error),
}

/// A specialized [`Result`](std::result::Result) type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! ensure_index {
    ($index: expr, $len: expr) => {
        if $index >= $len {
            return Err($crate::error::Error::IndexOutOfBounds {
                index: $index,
                len: $len,
            });
        }
    };
}

pub(crate) use ensure_index;
