/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use succinct::prelude::*;

fn build(universe: u64, values: &[u64]) -> Result<EliasFano> {
    let mut efb = EliasFanoBuilder::new(universe, values.len())?;
    for &value in values {
        efb.push(value)?;
    }
    Ok(efb.build()?)
}

fn check(universe: u64, values: &[u64], ef: &EliasFano) -> Result<()> {
    let n = values.len();
    assert_eq!(ef.len(), n);
    assert_eq!(ef.universe(), universe);

    for (i, &value) in values.iter().enumerate() {
        assert_eq!(ef.get(i)?, value);
        assert_eq!(ef.select(i)?, value);
        assert!(ef.contains(value));
        // the first occurrence of a value has as rank its index
        if i == 0 || values[i - 1] != value {
            assert_eq!(ef.rank(value)?, i);
        }
        let delta = if i == 0 { value } else { value - values[i - 1] };
        assert_eq!(ef.delta(i)?, delta);
    }
    assert!(ef.get(n).is_err());
    assert!(ef.select(n).is_err());
    assert_eq!(ef.rank(universe)?, n);
    if let Some(beyond) = universe.checked_add(1) {
        assert!(ef.rank(beyond).is_err());
    }

    for i in 0..n.saturating_sub(1) {
        assert_eq!(ef.select_range(i)?, (values[i], values[i + 1]));
        if values[i] < values[i + 1] {
            assert_eq!(ef.successor1(values[i] + 1)?, Some(values[i + 1]));
            assert_eq!(ef.predecessor1(values[i + 1] - 1)?, Some(values[i]));
        }
    }
    assert!(ef.select_range(n.saturating_sub(1)).is_err());

    assert_eq!(ef.iter().collect::<Vec<_>>(), values);
    for from in [0, 1, n / 2, n.saturating_sub(1), n] {
        if from <= n {
            assert_eq!(ef.iter_from(from).collect::<Vec<_>>(), &values[from..]);
            assert_eq!(ef.iter_from(from).len(), n - from);
        }
    }
    Ok(())
}

/// Checks predecessor, successor, rank and membership for all values of the
/// universe.
fn check_exhaustive(universe: u64, values: &[u64], ef: &EliasFano) -> Result<()> {
    for x in 0..universe {
        let rank = values.iter().filter(|&&v| v < x).count();
        assert_eq!(ef.rank(x)?, rank);
        assert_eq!(ef.contains(x), values.contains(&x));
        let succ = values.iter().copied().find(|&v| v >= x);
        assert_eq!(ef.successor1(x)?, succ);
        let pred = values.iter().copied().rev().find(|&v| v <= x);
        assert_eq!(ef.predecessor1(x)?, pred);
    }
    assert!(ef.successor1(universe).is_err());
    assert!(ef.predecessor1(universe).is_err());
    assert!(!ef.contains(universe));
    Ok(())
}

#[test]
fn test_bitmaps() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    let len = 10_000;
    for d in 1..8 {
        let density = 1.0 / (1 << d) as f64;
        let bits: BitVec = (0..len).map(|_| rng.random_bool(density)).collect();
        let values: Vec<u64> = bits
            .iter()
            .enumerate()
            .filter(|(_, b)| *b)
            .map(|(i, _)| i as u64)
            .collect();
        let ef = EliasFano::from_bit_vec(&bits);
        assert_eq!(ef.num_ones(), bits.count_ones());
        check(len, &values, &ef)?;
        check_exhaustive(len, &values, &ef)?;
    }
    Ok(())
}

#[test]
fn test_empty() -> Result<()> {
    let ef = build(10_000, &[])?;
    check(10_000, &[], &ef)?;
    check_exhaustive(10_000, &[], &ef)?;

    let ef = build(0, &[])?;
    assert!(ef.is_empty());
    assert_eq!(ef.rank(0)?, 0);
    assert_eq!(ef.iter().next(), None);

    let ef = EliasFano::from_bit_vec(&BitVecBuilder::with_len(10_000).build());
    assert_eq!(ef.num_ones(), 0);

    // no upper bits are allocated for a huge universe
    for universe in [1 << 50, u64::MAX] {
        let ef = build(universe, &[])?;
        check(universe, &[], &ef)?;
        assert_eq!(ef.rank(0)?, 0);
        assert_eq!(ef.rank(universe)?, 0);
        assert_eq!(ef.successor1(5)?, None);
        assert_eq!(ef.predecessor1(5)?, None);
        assert_eq!(ef.predecessor1(universe - 1)?, None);
        assert!(!ef.contains(5));
    }
    Ok(())
}

#[test]
fn test_single_value() -> Result<()> {
    let mut builder = BitVecBuilder::with_len(10_000);
    builder.set(37, true)?;
    let ef = EliasFano::from_bit_vec(&builder.build());
    check(10_000, &[37], &ef)?;
    check_exhaustive(10_000, &[37], &ef)?;
    assert_eq!(ef.delta(0)?, 37);
    Ok(())
}

#[test]
fn test_full() -> Result<()> {
    let bits: BitVec = std::iter::repeat(true).take(10_000).collect();
    let values: Vec<u64> = (0..10_000).collect();
    let ef = EliasFano::from_bit_vec(&bits);
    check(10_000, &values, &ef)?;
    Ok(())
}

#[test]
fn test_random_sequences() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for (n, universe) in [(1, 1), (100, 1000), (1000, 100), (1000, 1 << 40), (10_000, 20_000)] {
        let mut values: Vec<u64> = (0..n).map(|_| rng.random_range(0..universe)).collect();
        values.sort();
        let ef = build(universe, &values)?;
        check(universe, &values, &ef)?;
        if universe <= 1000 {
            check_exhaustive(universe, &values, &ef)?;
        }
    }
    Ok(())
}

#[test]
fn test_large_values() -> Result<()> {
    let values = [0, 1, u64::MAX / 2, u64::MAX - 2, u64::MAX - 1];
    let ef = build(u64::MAX, &values)?;
    check(u64::MAX, &values, &ef)?;
    assert_eq!(ef.successor1(2)?, Some(u64::MAX / 2));
    assert_eq!(ef.predecessor1(u64::MAX - 3)?, Some(u64::MAX / 2));
    Ok(())
}

#[test]
fn test_builder_errors() -> Result<()> {
    assert!(matches!(
        EliasFanoBuilder::new(0, 1),
        Err(Error::EmptyUniverse(1))
    ));

    let mut efb = EliasFanoBuilder::new(100, 3)?;
    efb.push(10)?;
    assert!(matches!(
        efb.push(9),
        Err(Error::NotMonotone { value: 9, last: 10 })
    ));
    assert!(matches!(
        efb.push(100),
        Err(Error::ValueOutOfUniverse {
            value: 100,
            universe: 100
        })
    ));
    efb.push(10)?;
    efb.push(99)?;
    assert!(matches!(efb.push(99), Err(Error::TooManyValues(3))));
    assert_eq!(efb.count(), 3);
    let ef = efb.build()?;
    assert_eq!(ef.iter().collect::<Vec<_>>(), vec![10, 10, 99]);

    let mut efb = EliasFanoBuilder::new(100, 3)?;
    efb.push(1)?;
    assert!(matches!(
        efb.build(),
        Err(Error::TooFewValues {
            declared: 3,
            pushed: 1
        })
    ));
    Ok(())
}

#[test]
fn test_indexed_seq() -> Result<()> {
    fn sum<S: IndexedSeq<Output = u64>>(seq: &S) -> Result<u64> {
        let mut sum = 0;
        for i in 0..seq.len() {
            sum += seq.get(i)?;
        }
        Ok(sum)
    }
    let ef = build(1000, &[1, 10, 100, 999])?;
    assert_eq!(sum(&ef)?, 1110);
    assert_eq!((&ef).iter_from(2).collect::<Vec<_>>(), vec![100, 999]);
    assert_eq!((&ef).into_iter().count(), 4);
    Ok(())
}

#[test]
#[should_panic]
fn test_iter_from_out_of_bounds() {
    let bits = bit_vec![1, 0, 1];
    let ef = EliasFano::from_bit_vec(&bits);
    let _ = ef.iter_from(3);
}
