/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use epserde::*;
use log::debug;
use mem_dbg::*;

use crate::bits::BitVecBuilder;
use crate::bp::BpVec;
use crate::error::{ensure_index, Error, Result};
use crate::traits::*;

/**

Range-minimum queries in constant time using the shape of a Cartesian tree.

The Cartesian tree of a sequence has the extremal element of the sequence as
root, and the Cartesian trees of the elements on its left and on its right as
subtrees. Only the shape of the tree is stored, as a [`BpVec`] of 2*n* + 2
parentheses, in which the closed parentheses are the elements in the order
of the sequence. The extremal element of a range of the sequence corresponds
to the position of minimum excess between the parentheses of the ends of the
range.

The order is given by a strict comparator: `comp(a, b)` is true if `a` is
more extremal than `b`. Among equal extremal elements, the leftmost one is
returned.

# Examples

```rust
# use succinct::prelude::*;
let values = [3, 1, 4, 1, 5, 9, 2, 6];
let min = CartesianTree::new(&values);
assert_eq!(min.rmq(0, 7)?, 1);
assert_eq!(min.rmq(2, 4)?, 3);
assert_eq!(min.rmq(4, 7)?, 6);

let max = CartesianTree::with_comparator(&values, |a, b| a > b);
assert_eq!(max.rmq(0, 7)?, 5);
assert_eq!(max.rmq(0, 3)?, 2);
assert!(max.rmq(3, 8).is_err());
# Ok::<(), succinct::error::Error>(())
```

*/
#[derive(Epserde, Debug, Clone, MemDbg, MemSize)]
pub struct CartesianTree {
    bp: BpVec,
}

impl CartesianTree {
    /// Builds the tree for range-minimum queries with respect to the natural
    /// order of `T`.
    pub fn new<T: Ord>(values: &[T]) -> Self {
        Self::with_comparator(values, |a, b| a < b)
    }

    /// Builds the tree for range queries with respect to a strict order.
    ///
    /// `comp(a, b)` must be true if and only if `a` is strictly more extremal
    /// than `b`.
    pub fn with_comparator<T>(values: &[T], comp: impl Fn(&T, &T) -> bool) -> Self {
        let len = 2 * values.len() + 2;
        let mut bits = BitVecBuilder::with_len(len);

        // The parentheses are emitted scanning the values from right to
        // left, so the sequence is written backwards: what is closed while
        // scanning is opened in the final sequence.
        let mut emitted = 0;
        let mut stack: Vec<usize> = Vec::with_capacity(values.len());
        let close = |bits: &mut BitVecBuilder, emitted: &mut usize| {
            debug_assert!(*emitted < len);
            // SAFETY: exactly `len` parentheses are emitted
            unsafe { bits.set_unchecked(len - 1 - *emitted, true) };
            *emitted += 1;
        };

        // open the root
        emitted += 1;
        for x in (0..values.len()).rev() {
            while let Some(&top) = stack.last() {
                if comp(&values[top], &values[x]) {
                    break;
                }
                stack.pop();
                close(&mut bits, &mut emitted);
            }
            stack.push(x);
            emitted += 1;
        }
        for _ in stack.drain(..) {
            close(&mut bits, &mut emitted);
        }
        close(&mut bits, &mut emitted);
        debug_assert_eq!(emitted, len);

        debug!("Built CartesianTree: {} values", values.len());

        Self {
            bp: BpVec::with_select_hints(bits.build(), false, true),
        }
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.bp.len() / 2 - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying balanced parentheses.
    pub fn bp(&self) -> &BpVec {
        &self.bp
    }

    /// Returns the index of the extremal value in the positions
    /// [`start`..=`end`]; in case of ties, the leftmost index is returned.
    pub fn rmq(&self, start: usize, end: usize) -> Result<usize> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        ensure_index!(end, self.len());
        if start == end {
            return Ok(start);
        }
        // the first parenthesis is open, so the first closed one is at least 1
        let lo = unsafe { self.bp.select_zero_unchecked(start) } - 1;
        let hi = unsafe { self.bp.select_zero_unchecked(end) };
        let pos = self.bp.excess_rmq(lo, hi)?;
        Ok(unsafe { self.bp.rank_zero_unchecked(pos) })
    }
}
