/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Balanced parentheses and range-minimum queries.

mod bp_vec;
pub use bp_vec::*;

mod cartesian_tree;
pub use cartesian_tree::*;
