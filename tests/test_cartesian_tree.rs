/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use succinct::prelude::*;

/// Compares `rmq` with the leftmost minimum computed by a linear sweep from
/// `start`; short ranges are all checked, longer ones are sampled.
fn sweep<T: Ord>(values: &[T], tree: &CartesianTree, start: usize) -> Result<()> {
    let mut min_pos = start;
    for end in start..values.len() {
        if values[end] < values[min_pos] {
            min_pos = end;
        }
        if end - start < 1024 || (end - start) % 37 == 0 || end == values.len() - 1 {
            assert_eq!(tree.rmq(start, end)?, min_pos, "rmq({}, {})", start, end);
        }
    }
    Ok(())
}

#[test]
fn test_empty() -> Result<()> {
    let tree = CartesianTree::new::<i32>(&[]);
    assert!(tree.is_empty());
    assert!(matches!(
        tree.rmq(0, 0),
        Err(Error::IndexOutOfBounds { index: 0, len: 0 })
    ));
    Ok(())
}

#[test]
fn test_single() -> Result<()> {
    let tree = CartesianTree::new(&[42]);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.rmq(0, 0)?, 0);
    assert!(tree.rmq(0, 1).is_err());
    Ok(())
}

#[test]
fn test_monotone() -> Result<()> {
    let len = 20_000;
    let values: Vec<u32> = (0..len).collect();

    let min = CartesianTree::new(&values);
    let max = CartesianTree::with_comparator(&values, |a, b| a > b);
    for a in (0..len as usize).step_by(101) {
        for b in (a..len as usize).step_by(53) {
            assert_eq!(min.rmq(a, b)?, a);
            assert_eq!(max.rmq(a, b)?, b);
        }
    }
    // a path of depth 20000 in the parentheses
    assert_eq!(max.rmq(0, len as usize - 1)?, len as usize - 1);
    assert_eq!(min.rmq(0, len as usize - 1)?, 0);
    Ok(())
}

#[test]
fn test_peak() -> Result<()> {
    let half = 5_000_i64;
    let values: Vec<i64> = (-half..half).map(|x| half - x.abs()).collect();
    let len = values.len();

    let max = CartesianTree::with_comparator(&values, |a, b| a > b);
    assert_eq!(max.rmq(0, len - 1)?, half as usize);
    assert_eq!(max.rmq(0, 100)?, 100);
    assert_eq!(max.rmq(len - 100, len - 1)?, len - 100);

    let min = CartesianTree::new(&values);
    assert_eq!(min.rmq(0, len - 1)?, 0);
    assert_eq!(min.rmq(1, len - 1)?, 1);
    assert_eq!(min.rmq(half as usize, len - 1)?, len - 1);
    sweep(&values, &min, 0)?;
    sweep(&values, &min, half as usize - 1)?;
    Ok(())
}

#[test]
fn test_ties() -> Result<()> {
    let values = [7; 3000];
    let tree = CartesianTree::new(&values);
    for a in (0..values.len()).step_by(7) {
        assert_eq!(tree.rmq(a, values.len() - 1)?, a);
        assert_eq!(tree.rmq(a, a)?, a);
    }
    Ok(())
}

#[test]
fn test_random() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for len in [2, 4, 512, 514, 8190, 8192, 8194, 16384, 16386, 100_000] {
        let values: Vec<u32> = (0..len).map(|_| rng.random_range(0..1024)).collect();
        let tree = CartesianTree::new(&values);
        assert_eq!(tree.len(), len);

        let global_min = (0..len).min_by_key(|&i| values[i]).unwrap_or(0);
        assert_eq!(tree.rmq(0, len - 1)?, global_min);

        let mut starts = vec![0, 1, global_min];
        starts.extend((0..10).map(|_| rng.random_range(0..len)));
        for start in starts {
            sweep(&values, &tree, start)?;
        }
    }
    Ok(())
}

#[test]
fn test_random_max() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(1);
    let len = 10_000;
    let values: Vec<u64> = (0..len).map(|_| rng.random_range(0..100)).collect();
    let tree = CartesianTree::with_comparator(&values, |a, b| a > b);
    for _ in 0..10_000 {
        let a = rng.random_range(0..len);
        let b = rng.random_range(a..len);
        let mut max_pos = a;
        for i in a..=b {
            if values[i] > values[max_pos] {
                max_pos = i;
            }
        }
        assert_eq!(tree.rmq(a, b)?, max_pos);
    }
    assert!(matches!(
        tree.rmq(5, 4),
        Err(Error::InvalidRange { start: 5, end: 4 })
    ));
    Ok(())
}
