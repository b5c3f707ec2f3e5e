/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! [Bit vectors](`mod@bit_vec`) and [broadword primitives](`mod@broadword`).

pub mod broadword;

pub mod bit_vec;
pub use bit_vec::*;

pub use crate::bit_vec;
