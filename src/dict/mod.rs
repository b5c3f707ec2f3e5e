/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Monotone sequences and lists of integers.

pub mod elias_fano;
pub use elias_fano::{EliasFano, EliasFanoBuilder, EliasFanoIterator};

pub mod compressed_list;
pub use compressed_list::{CompressedListIter, EliasFanoCompressedList};
