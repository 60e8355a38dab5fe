/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use rs_hungarian::assignment::is_perfect;
use rs_hungarian::{hungarian, solve, CostMatrix, Error, Hungarian};

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_costs(rng: &mut ChaCha8Rng, n: usize, max: i64) -> Vec<Vec<i64>> {
    let between = Uniform::from(0..=max);
    (0..n).map(|_| (0..n).map(|_| between.sample(rng)).collect()).collect()
}

fn cost_of(costs: &[Vec<i64>], pairs: &[(usize, usize)]) -> i64 {
    pairs.iter().map(|&(i, j)| costs[i][j]).sum()
}

/// Minimal assignment value over all permutations.
fn brute_force(costs: &[Vec<i64>]) -> i64 {
    fn extend(costs: &[Vec<i64>], i: usize, used: &mut Vec<bool>, value: i64, best: &mut i64) {
        if i == costs.len() {
            *best = (*best).min(value);
            return;
        }
        for j in 0..costs.len() {
            if !used[j] {
                used[j] = true;
                extend(costs, i + 1, used, value + costs[i][j], best);
                used[j] = false;
            }
        }
    }

    let mut best = i64::MAX;
    extend(costs, 0, &mut vec![false; costs.len()], 0, &mut best);
    best
}

#[test]
fn test_diagonal() -> Result<(), Box<dyn error::Error>> {
    init();
    let costs = vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]];
    let a = hungarian(&costs)?;
    assert_eq!(a.pairs(), &[(0, 0), (1, 1), (2, 2)]);
    assert_eq!(a.value(), 0);
    Ok(())
}

#[test]
fn test_two_by_two() -> Result<(), Box<dyn error::Error>> {
    init();
    let a = hungarian(&[[1, 2], [2, 1]])?;
    assert_eq!(a.pairs(), &[(0, 0), (1, 1)]);
    assert_eq!(a.value(), 2);
    Ok(())
}

#[test]
fn test_ties() -> Result<(), Box<dyn error::Error>> {
    init();
    let costs = vec![vec![4, 2, 8], vec![4, 3, 7], vec![3, 1, 6]];
    let pairs = solve(&costs)?;
    assert!(is_perfect(3, &pairs));
    assert_eq!(cost_of(&costs, &pairs), 13);
    Ok(())
}

#[test]
fn test_single() -> Result<(), Box<dyn error::Error>> {
    init();
    let a = hungarian(&[[5]])?;
    assert_eq!(a.pairs(), &[(0, 0)]);
    assert_eq!(a.value(), 5);
    Ok(())
}

#[test]
fn test_invalid_shape() {
    let empty: Vec<Vec<i32>> = vec![];
    assert_eq!(solve(&empty), Err(Error::Empty));
    assert_eq!(
        solve(&[vec![1, 2], vec![3, 4], vec![5, 6]]),
        Err(Error::NotSquare {
            row: 0,
            len: 2,
            expected: 3
        })
    );
    assert_eq!(
        solve(&[vec![1, 2], vec![3]]),
        Err(Error::NotSquare {
            row: 1,
            len: 1,
            expected: 2
        })
    );
}

#[test]
fn test_overflow() {
    init();
    let costs = [[i8::MIN, 0], [0, i8::MIN]];
    assert_eq!(solve(&costs), Ok(vec![(0, 0), (1, 1)]));
    assert_eq!(hungarian(&costs), Err(Error::Overflow { row: 1, col: 1 }));

    let costs = [[i128::MAX, 0], [i128::MIN, i128::MAX]];
    assert!(matches!(solve(&costs), Err(Error::Overflow { .. })));
}

#[test]
fn test_pairs_without_value() -> Result<(), Box<dyn error::Error>> {
    init();
    let costs = [[u8::MAX, 200, 240], [200, u8::MAX, 250], [230, 210, u8::MAX]];
    let pairs = solve(&costs)?;
    assert_eq!(pairs, vec![(0, 2), (1, 0), (2, 1)]);
    assert!(matches!(hungarian(&costs), Err(Error::Overflow { .. })));
    Ok(())
}

#[test]
fn test_optimality() -> Result<(), Box<dyn error::Error>> {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for n in 1..=8 {
        for &max in &[1, 5, 100] {
            for _ in 0..10 {
                let costs = random_costs(&mut rng, n, max);
                let a = hungarian(&costs)?;
                assert!(is_perfect(n, a.pairs()));
                assert_eq!(a.value(), cost_of(&costs, a.pairs()));
                assert_eq!(a.value(), brute_force(&costs), "costs: {:?}", costs);
            }
        }
    }
    Ok(())
}

#[test]
fn test_negative_costs() -> Result<(), Box<dyn error::Error>> {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for n in 1..=6 {
        let costs = random_costs(&mut rng, n, 50)
            .into_iter()
            .map(|row| row.into_iter().map(|c| c - 25).collect())
            .collect::<Vec<Vec<i64>>>();
        let a = hungarian(&costs)?;
        assert_eq!(a.value(), brute_force(&costs));
    }
    Ok(())
}

#[test]
fn test_large() -> Result<(), Box<dyn error::Error>> {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for &n in &[20, 50, 100] {
        let costs = random_costs(&mut rng, n, 1000);
        let a = hungarian(&costs)?;
        assert!(is_perfect(n, a.pairs()));
        assert_eq!(a.value(), cost_of(&costs, a.pairs()));
    }
    Ok(())
}

#[test]
fn test_shift_invariance() -> Result<(), Box<dyn error::Error>> {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for n in 2..=7 {
        let costs = random_costs(&mut rng, n, 20);
        let value = hungarian(&costs)?.value();

        for k in 0..n {
            let mut row_shifted = costs.clone();
            row_shifted[k].iter_mut().for_each(|c| *c += 17);
            assert_eq!(hungarian(&row_shifted)?.value(), value + 17);

            let mut col_shifted = costs.clone();
            col_shifted.iter_mut().for_each(|row| row[k] += 17);
            assert_eq!(hungarian(&col_shifted)?.value(), value + 17);
        }

        let all_shifted = costs
            .iter()
            .map(|row| row.iter().map(|c| c + 3).collect())
            .collect::<Vec<Vec<i64>>>();
        assert_eq!(hungarian(&all_shifted)?.value(), value + 3 * n as i64);
    }
    Ok(())
}

#[test]
fn test_reuse() -> Result<(), Box<dyn error::Error>> {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut solver = Hungarian::new();
    for n in 1..=10 {
        let costs = CostMatrix::from_rows(&random_costs(&mut rng, n, 30))?;
        let first = solver.solve(&costs)?.clone();
        let second = solver.solve(&costs)?;
        assert_eq!(first.value(), second.value());
        assert_eq!(solver.assignment().map(|a| a.len()), Some(n));

        let fresh = Hungarian::new().solve(&costs)?.value();
        assert_eq!(first.value(), fresh);
    }
    Ok(())
}

#[test]
fn test_independent_threads() -> Result<(), Box<dyn error::Error>> {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let instances = (0..4).map(|_| random_costs(&mut rng, 7, 40)).collect::<Vec<_>>();

    let handles = instances
        .iter()
        .cloned()
        .map(|costs| std::thread::spawn(move || hungarian(&costs).map(|a| a.value())))
        .collect::<Vec<_>>();

    for (h, costs) in handles.into_iter().zip(instances.iter()) {
        let value = h.join().map_err(|_| "solver thread panicked")??;
        assert_eq!(value, brute_force(costs));
    }
    Ok(())
}
