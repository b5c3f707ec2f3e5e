/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unconditional_recursion)]

pub mod bits;
pub mod bp;
pub mod dict;
pub mod error;
pub mod rank_sel;
pub mod traits;
pub mod utils;

pub mod prelude {
    pub use crate::bit_vec;
    pub use crate::bits::*;
    pub use crate::bp::*;
    pub use crate::dict::*;
    pub use crate::error::Error;
    pub use crate::rank_sel::*;
    pub use crate::traits::*;
    pub use crate::utils::{load, store};
}
