/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Support for rank and select operations.

[`Rank9Sel`] owns a [`BitVec`](crate::bits::BitVec) and provides ranking,
selection of ones and zeros, and the derived predecessor and successor
operations of [`PredSucc`](crate::traits::PredSucc). It is the structure of
choice for vectors with a reasonably uniform distribution of zeros and ones,
such as the high bits of the [Elias–Fano representation of monotone
sequences](crate::dict::elias_fano::EliasFano) or balanced parentheses.

[`DArray`] provides only selection, of ones ([`DArray1`]) or zeros
([`DArray0`]), on a bit vector that it does not own. Its space overhead is
smaller on sparse vectors.

*/

mod rank9_sel;
pub use rank9_sel::*;

mod darray;
pub use darray::*;
