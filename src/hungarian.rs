// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! The Hungarian method (Kuhn–Munkres algorithm) for the linear
//! assignment problem.
//!
//! The algorithm works on a reduced copy of the cost matrix. Zero
//! entries are *starred* (part of the current matching) or *primed*
//! (candidate for an augmenting path), rows and columns are *covered*
//! when they have been accounted for. It runs through the following
//! steps until every column is covered by a starred zero:
//!
//! 1. Subtract the row minimum from each row.
//! 2. Star a maximal set of independent zeros greedily.
//! 3. Cover every column containing a star. If all columns are covered,
//!    the stars form an optimal assignment.
//! 4. Prime uncovered zeros. If the row of a primed zero contains a
//!    star, cover the row and uncover the column of the star, otherwise
//!    go to 5. If there is no uncovered zero, go to 6.
//! 5. Build an alternating path of primes and stars starting at the last
//!    prime, swap stars and primes along it, clear all covers and primes
//!    and go to 3.
//! 6. Add the smallest uncovered value to every covered row and
//!    subtract it from every uncovered column, then go to 4.
//!
//! # Example
//!
//! ```
//! use rs_hungarian::hungarian;
//!
//! let costs = vec![vec![4, 2, 8], vec![4, 3, 7], vec![3, 1, 6]];
//! let assignment = hungarian(&costs).unwrap();
//!
//! assert_eq!(assignment.value(), 13);
//! assert_eq!(assignment.len(), 3);
//! assert!(assignment.iter().all(|&(i, j)| i < 3 && j < 3));
//! ```

use crate::assignment::Assignment;
use crate::error::{Error, Result};
use crate::matrix::CostMatrix;

use crate::num::traits::PrimInt;

use log::{debug, trace};
use std::fmt::Debug;

/// The mark of a single entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mark {
    None,
    Star,
    Prime,
}

/// The steps of the algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    Reduce,
    StarZeros,
    CoverStarredColumns,
    PrimeZeros,
    Augment,
    AdjustDuals,
    Done,
}

/// The working data of a single run.
///
/// The reduced costs are kept in a wider integer type than the input,
/// because covered entries may grow beyond the largest input value
/// during the dual adjustments.
struct State {
    n: usize,
    /// The reduced costs, row by row.
    costs: Vec<i128>,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
    marks: Vec<Mark>,
    /// Alternating sequence of primed and starred entries.
    path: Vec<(usize, usize)>,
    /// The primed zero the next augmenting path starts at.
    origin: (usize, usize),
}

impl State {
    /// Create the initial state.
    ///
    /// Fails with [`Error::Overflow`] for entries not representable as
    /// `i128` (only possible for 128 bit cost types).
    fn new<C>(costs: &CostMatrix<C>) -> Result<Self>
    where
        C: PrimInt,
    {
        let n = costs.dim();
        let reduced = costs
            .as_slice()
            .iter()
            .enumerate()
            .map(|(k, c)| c.to_i128().ok_or(Error::Overflow { row: k / n, col: k % n }))
            .collect::<Result<Vec<_>>>()?;
        Ok(State {
            n,
            costs: reduced,
            row_covered: vec![false; n],
            col_covered: vec![false; n],
            marks: vec![Mark::None; n * n],
            path: Vec::with_capacity(2 * n + 1),
            origin: (0, 0),
        })
    }

    fn cost(&self, i: usize, j: usize) -> i128 {
        self.costs[i * self.n + j]
    }

    fn mark(&self, i: usize, j: usize) -> Mark {
        self.marks[i * self.n + j]
    }

    fn set_mark(&mut self, i: usize, j: usize, mark: Mark) {
        self.marks[i * self.n + j] = mark;
    }

    /// Step 1: subtract the smallest entry of each row from the row.
    fn reduce(&mut self) -> Result<Step> {
        let n = self.n;
        for (i, row) in self.costs.chunks_exact_mut(n).enumerate() {
            let minval = row.iter().copied().min().ok_or(Error::Empty)?;
            for (j, c) in row.iter_mut().enumerate() {
                *c = c.checked_sub(minval).ok_or(Error::Overflow { row: i, col: j })?;
            }
        }
        Ok(Step::StarZeros)
    }

    /// Step 2: star zeros greedily, at most one per row and column.
    fn star_zeros(&mut self) -> Result<Step> {
        for i in 0..self.n {
            for j in 0..self.n {
                if self.cost(i, j) == 0 && !self.row_covered[i] && !self.col_covered[j] {
                    self.set_mark(i, j, Mark::Star);
                    self.row_covered[i] = true;
                    self.col_covered[j] = true;
                    break;
                }
            }
        }
        self.clear_covers();
        Ok(Step::CoverStarredColumns)
    }

    /// Step 3: cover the columns of all starred zeros.
    ///
    /// This is the only step that may finish the algorithm.
    fn cover_starred_columns(&mut self) -> Result<Step> {
        let mut count = 0;
        for j in 0..self.n {
            if self.find_star_in_col(j).is_some() {
                self.col_covered[j] = true;
                count += 1;
            }
        }

        if count == self.n {
            Ok(Step::Done)
        } else {
            trace!("{} of {} columns covered", count, self.n);
            Ok(Step::PrimeZeros)
        }
    }

    /// Step 4: prime uncovered zeros until an augmenting path can be started.
    fn prime_zeros(&mut self) -> Result<Step> {
        let (mut row, mut col) = (0, 0);
        while let Some((i, j)) = self.find_uncovered_zero(row, col) {
            self.set_mark(i, j, Mark::Prime);
            match self.find_star_in_row(i) {
                Some(star_col) => {
                    self.row_covered[i] = true;
                    self.col_covered[star_col] = false;
                    row = i;
                    col = star_col;
                }
                None => {
                    self.origin = (i, j);
                    return Ok(Step::Augment);
                }
            }
        }
        Ok(Step::AdjustDuals)
    }

    /// Step 5: augment the matching along the alternating path starting
    /// at the last primed zero.
    fn augment(&mut self) -> Result<Step> {
        self.path.clear();
        self.path.push(self.origin);
        loop {
            let col = self.path[self.path.len() - 1].1;
            let row = match self.find_star_in_col(col) {
                Some(row) => row,
                None => break,
            };
            self.path.push((row, col));
            let col = self.find_prime_in_row(row).ok_or(Error::MissingPrime { row })?;
            self.path.push((row, col));
        }

        trace!("augmenting path of length {}", self.path.len());

        for k in 0..self.path.len() {
            let (i, j) = self.path[k];
            let mark = if self.mark(i, j) == Mark::Star {
                Mark::None
            } else {
                Mark::Star
            };
            self.set_mark(i, j, mark);
        }

        self.clear_covers();
        self.erase_primes();
        Ok(Step::CoverStarredColumns)
    }

    /// Step 6: add the smallest uncovered value to covered rows and
    /// subtract it from uncovered columns.
    fn adjust_duals(&mut self) -> Result<Step> {
        let minval = self.find_smallest().ok_or(Error::NoUncoveredCell)?;
        trace!("dual adjustment by {:?}", minval);

        let n = self.n;
        for i in 0..n {
            for j in 0..n {
                // covered rows in uncovered columns get +minval and -minval,
                // so only the doubly covered and doubly uncovered entries change
                let c = &mut self.costs[i * n + j];
                let adjusted = match (self.row_covered[i], self.col_covered[j]) {
                    (true, true) => c.checked_add(minval),
                    (false, false) => c.checked_sub(minval),
                    _ => continue,
                };
                *c = adjusted.ok_or(Error::Overflow { row: i, col: j })?;
            }
        }
        Ok(Step::PrimeZeros)
    }

    /// Return the first uncovered zero, scanning rows and columns
    /// cyclically starting at `(i0, j0)`.
    fn find_uncovered_zero(&self, i0: usize, j0: usize) -> Option<(usize, usize)> {
        let n = self.n;
        for i in (i0..n).chain(0..i0) {
            if self.row_covered[i] {
                continue;
            }
            for j in (j0..n).chain(0..j0) {
                if !self.col_covered[j] && self.cost(i, j) == 0 {
                    return Some((i, j));
                }
            }
        }
        None
    }

    fn find_star_in_row(&self, i: usize) -> Option<usize> {
        (0..self.n).find(|&j| self.mark(i, j) == Mark::Star)
    }

    fn find_star_in_col(&self, j: usize) -> Option<usize> {
        (0..self.n).find(|&i| self.mark(i, j) == Mark::Star)
    }

    fn find_prime_in_row(&self, i: usize) -> Option<usize> {
        (0..self.n).find(|&j| self.mark(i, j) == Mark::Prime)
    }

    /// Return the smallest uncovered entry.
    fn find_smallest(&self) -> Option<i128> {
        let mut minval: Option<i128> = None;
        for i in (0..self.n).filter(|&i| !self.row_covered[i]) {
            for j in (0..self.n).filter(|&j| !self.col_covered[j]) {
                let c = self.cost(i, j);
                if minval.map(|m| c < m).unwrap_or(true) {
                    minval = Some(c);
                }
            }
        }
        minval
    }

    fn clear_covers(&mut self) {
        self.row_covered.iter_mut().for_each(|c| *c = false);
        self.col_covered.iter_mut().for_each(|c| *c = false);
    }

    fn erase_primes(&mut self) {
        for m in self.marks.iter_mut().filter(|m| **m == Mark::Prime) {
            *m = Mark::None;
        }
    }

    /// Return the starred entry of each row.
    fn starred(&self) -> Result<Vec<(usize, usize)>> {
        let stars = self.marks.iter().filter(|&&m| m == Mark::Star).count();
        (0..self.n)
            .map(|i| {
                self.find_star_in_row(i)
                    .map(|j| (i, j))
                    .ok_or(Error::IncompleteAssignment { stars, expected: self.n })
            })
            .collect()
    }
}

/// The Hungarian method for the linear assignment problem.
///
/// The solver object only keeps its configuration and the result of
/// the last run. Each call to [`Hungarian::solve`] starts from scratch, so
/// the object can be reused for any number of cost matrices.
///
/// # Example
///
/// ```
/// use rs_hungarian::{CostMatrix, Hungarian};
///
/// let mut solver = Hungarian::new();
///
/// let costs = CostMatrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
/// assert_eq!(solver.solve(&costs).unwrap().pairs(), &[(0, 0), (1, 1)]);
/// assert_eq!(solver.value(), Some(2));
///
/// let costs = CostMatrix::from_rows(&[[5]]).unwrap();
/// assert_eq!(solver.solve(&costs).unwrap().pairs(), &[(0, 0)]);
/// assert_eq!(solver.value(), Some(5));
/// ```
pub struct Hungarian<C> {
    /// The maximal number of steps of a single run.
    ///
    /// The algorithm always terminates after `O(n^2)` steps, so this is
    /// only a safeguard. If `None` (the default) there is no limit.
    pub iteration_limit: Option<usize>,

    niter: usize,
    assignment: Option<Assignment<C>>,
}

impl<C> Default for Hungarian<C>
where
    C: PrimInt + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Hungarian<C>
where
    C: PrimInt + Debug,
{
    pub fn new() -> Self {
        Hungarian {
            iteration_limit: None,
            niter: 0,
            assignment: None,
        }
    }

    /// Solve the assignment problem for the given costs.
    ///
    /// Returns the optimal assignment. The cost matrix is not modified.
    pub fn solve(&mut self, costs: &CostMatrix<C>) -> Result<&Assignment<C>> {
        self.assignment = None;
        let pairs = self.run(costs)?;
        let assignment = Assignment::new(costs, pairs)?;
        debug!("Optimal assignment with value {:?}", assignment.value());
        Ok(&*self.assignment.insert(assignment))
    }

    /// Return the assignment found by the last successful run.
    pub fn assignment(&self) -> Option<&Assignment<C>> {
        self.assignment.as_ref()
    }

    /// Return the value of the assignment found by the last successful run.
    pub fn value(&self) -> Option<C> {
        self.assignment.as_ref().map(|a| a.value())
    }

    /// Return the number of steps executed by the last run.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// Run the algorithm and return the starred entries.
    fn run(&mut self, costs: &CostMatrix<C>) -> Result<Vec<(usize, usize)>> {
        debug!("Solve assignment problem with n={}", costs.dim());

        self.niter = 0;
        let mut state = State::new(costs)?;
        let mut step = Step::Reduce;
        while step != Step::Done {
            if let Some(limit) = self.iteration_limit {
                if self.niter >= limit {
                    return Err(Error::IterationLimit(limit));
                }
            }
            self.niter += 1;
            trace!("step {}: {:?}", self.niter, step);

            step = match step {
                Step::Reduce => state.reduce()?,
                Step::StarZeros => state.star_zeros()?,
                Step::CoverStarredColumns => state.cover_starred_columns()?,
                Step::PrimeZeros => state.prime_zeros()?,
                Step::Augment => state.augment()?,
                Step::AdjustDuals => state.adjust_duals()?,
                Step::Done => Step::Done,
            };
        }

        let pairs = state.starred()?;
        debug!("Complete covering found after {} steps", self.niter);
        Ok(pairs)
    }
}

/// Solve the assignment problem and return the optimal assignment.
///
/// `costs` must be a non-empty square matrix given as list of rows.
/// Fails with [`Error::Overflow`] if the optimal value is not
/// representable in `C`; use [`solve`] to obtain the pairs only.
pub fn hungarian<C, R>(costs: &[R]) -> Result<Assignment<C>>
where
    C: PrimInt + Debug,
    R: AsRef<[C]>,
{
    let costs = CostMatrix::from_rows(costs)?;
    let pairs = Hungarian::new().run(&costs)?;
    Assignment::new(&costs, pairs)
}

/// Solve the assignment problem and return the assigned `(row, column)` pairs.
///
/// The pairs are sorted by row. Every row and every column occurs in
/// exactly one pair. The total cost is not computed, so the pairs are
/// returned even if their sum is not representable in `C`.
///
/// # Example
///
/// ```
/// use rs_hungarian::solve;
///
/// let pairs = solve(&[[0, 1, 2], [1, 0, 3], [2, 3, 0]]).unwrap();
/// assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2)]);
///
/// assert!(solve(&[[1, 2, 3], [4, 5, 6]]).is_err());
/// ```
pub fn solve<C, R>(costs: &[R]) -> Result<Vec<(usize, usize)>>
where
    C: PrimInt + Debug,
    R: AsRef<[C]>,
{
    let costs = CostMatrix::from_rows(costs)?;
    Hungarian::new().run(&costs)
}
