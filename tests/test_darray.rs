/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use succinct::prelude::*;

fn check(bits: &BitVec) -> Result<()> {
    let ones = DArray1::new(bits);
    let zeros = DArray0::new(bits);
    let mut num_ones = 0;
    let mut num_zeros = 0;
    for (pos, bit) in bits.iter().enumerate() {
        if bit {
            assert_eq!(ones.select(bits, num_ones)?, pos);
            num_ones += 1;
        } else {
            assert_eq!(zeros.select(bits, num_zeros)?, pos);
            num_zeros += 1;
        }
    }
    assert_eq!(ones.num_positions(), num_ones);
    assert_eq!(zeros.num_positions(), num_zeros);
    assert!(ones.select(bits, num_ones).is_err());
    assert!(zeros.select(bits, num_zeros).is_err());
    Ok(())
}

#[test]
fn test_random() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for len in [1, 100, 1000, 10_000, 100_000] {
        for density in [0.0001, 0.01, 0.5, 0.99] {
            let bits: BitVec = (0..len).map(|_| rng.random_bool(density)).collect();
            check(&bits)?;
        }
    }
    Ok(())
}

#[test]
fn test_empty() -> Result<()> {
    let bits = BitVec::default();
    check(&bits)?;
    let bits: BitVec = std::iter::repeat(false).take(10_000).collect();
    check(&bits)?;
    assert_eq!(DArray1::new(&bits).num_positions(), 0);
    Ok(())
}

#[test]
fn test_single_bit() -> Result<()> {
    let mut builder = BitVecBuilder::with_len(10_000);
    builder.set(37, true)?;
    let bits = builder.build();
    let darray = DArray1::new(&bits);
    assert_eq!(darray.num_positions(), 1);
    assert_eq!(darray.select(&bits, 0)?, 37);
    let rs = Rank9Sel::new(bits.clone());
    assert_eq!(rs.select(0)?, 37);
    check(&bits)
}

#[test]
fn test_full() -> Result<()> {
    let bits: BitVec = std::iter::repeat(true).take(10_000).collect();
    check(&bits)
}

#[test]
fn test_sparse_blocks() -> Result<()> {
    // Gaps smaller than 1024 but blocks spanning more than 2^16 bits
    let mut rng = SmallRng::seed_from_u64(0);
    let mut builder = BitVecBuilder::new();
    while builder.len() < 1 << 18 {
        let gap = rng.random_range(0..1024);
        builder.extend(std::iter::repeat(false).take(gap));
        builder.push(true);
    }
    let bits = builder.build();
    check(&bits)
}

#[test]
fn test_mixed_blocks() -> Result<()> {
    // Dense runs alternating with very sparse runs
    let mut builder = BitVecBuilder::new();
    for run in 0..6 {
        if run % 2 == 0 {
            builder.extend((0..5000).map(|i| i % 3 == 0));
        } else {
            for _ in 0..1500 {
                builder.extend(std::iter::repeat(false).take(200));
                builder.push(true);
            }
        }
    }
    check(&builder.build())
}
