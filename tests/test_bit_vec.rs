/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use succinct::prelude::*;

#[test]
fn test_builder() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut builder = BitVecBuilder::new();
    let mut expected = Vec::new();
    let mut chunks = Vec::new();

    for _ in 0..10_000 {
        if rng.random_bool(0.5) {
            let bit = rng.random_bool(0.5);
            builder.push(bit);
            expected.push(bit);
        } else {
            let width = rng.random_range(0..=64);
            let value: u64 = rng.random();
            chunks.push((builder.len(), width, value));
            builder.append_bits(value, width)?;
            expected.extend((0..width).map(|i| (value >> i) & 1 != 0));
        }
        assert_eq!(builder.len(), expected.len());
    }

    let bits = builder.build();
    assert_eq!(bits.len(), expected.len());
    assert_eq!(bits.count_ones(), expected.iter().filter(|&&b| b).count());
    for (i, &bit) in expected.iter().enumerate() {
        assert_eq!(bits.get(i)?, bit);
    }
    for (pos, width, value) in chunks {
        let mask = if width == 64 { u64::MAX } else { (1 << width) - 1 };
        assert_eq!(bits.get_bits(pos, width)?, value & mask);
    }
    assert!(bits.get(bits.len()).is_err());
    assert_eq!(bits.iter().collect::<Vec<_>>(), expected);
    Ok(())
}

#[test]
fn test_empty() -> Result<()> {
    let bits = BitVecBuilder::new().build();
    assert_eq!(bits.len(), 0);
    assert_eq!(bits.count_ones(), 0);
    assert!(bits.get(0).is_err());
    assert_eq!(bits.get_bits(0, 0)?, 0);
    assert_eq!(bits.iter().count(), 0);
    assert_eq!(bits, bit_vec![]);
    Ok(())
}

#[test]
fn test_with_len_and_set() -> Result<()> {
    let mut builder = BitVecBuilder::with_len(10_000);
    builder.set(37, true)?;
    builder.set(9_999, true)?;
    assert!(builder.set(10_000, true).is_err());
    builder.push(true);
    let bits = builder.build();
    assert_eq!(bits.len(), 10_001);
    assert_eq!(bits.count_ones(), 3);
    assert!(bits.get(37)?);
    assert!(!bits.get(38)?);
    assert!(bits.get(10_000)?);

    let (words, len) = bits.into_raw_parts();
    assert_eq!(len, 10_001);
    assert_eq!(words.len(), 10_001usize.div_ceil(64));
    assert_eq!(words[0], 1 << 37);
    assert_eq!(words[10_000 / 64], (1 << (9_999 % 64)) | (1 << (10_000 % 64)));
    Ok(())
}

#[test]
fn test_macro_and_collect() -> Result<()> {
    let bits = bit_vec![1, 0, 0, 1, 1];
    let collected: BitVec = [true, false, false, true, true].into_iter().collect();
    assert_eq!(bits, collected);
    assert_eq!(bits.get_bits(0, 5)?, 0b11001);
    assert!(bits.get_bits(1, 5).is_err());
    assert!(bits.get_bits(0, 65).is_err());
    Ok(())
}

#[test]
fn test_iter_from() -> Result<()> {
    let bits: BitVec = (0..1000).map(|i| i % 7 == 0).collect();
    for from in [0, 1, 63, 64, 65, 999, 1000] {
        let values = (&bits).iter_from(from).collect::<Vec<_>>();
        assert_eq!(values.len(), 1000 - from);
        for (i, bit) in values.into_iter().enumerate() {
            assert_eq!(bit, (from + i) % 7 == 0);
        }
    }
    assert_eq!(IndexedSeq::len(&bits), 1000);
    assert!(IndexedSeq::get(&bits, 14)?);
    Ok(())
}

#[test]
#[should_panic]
fn test_iter_from_out_of_bounds() {
    let bits = bit_vec![1, 0];
    let _ = bits.iter_from(3);
}
