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

//! Assignments of rows to columns.

use crate::error::{Error, Result};
use crate::matrix::CostMatrix;

use crate::num::traits::PrimInt;

use std::convert::TryFrom;
use std::slice::Iter as SliceIter;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A perfect assignment of rows to columns together with its value.
///
/// The `(row, column)` pairs are sorted by row, every row and every
/// column occurs exactly once.
///
/// Deserialization checks that the pairs form a perfect assignment. The
/// value cannot be checked without the cost matrix and is taken as is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "RawAssignment<C>"))]
pub struct Assignment<C> {
    pairs: Vec<(usize, usize)>,
    value: C,
}

impl<C> Assignment<C>
where
    C: PrimInt,
{
    /// Create an assignment from a list of `(row, column)` pairs.
    ///
    /// The value is computed with respect to `costs`. Fails with
    /// [`Error::IncompleteAssignment`] if the pairs do not form a perfect
    /// assignment of the rows and columns of `costs`.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_hungarian::{Assignment, CostMatrix};
    ///
    /// let costs = CostMatrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
    /// let a = Assignment::new(&costs, vec![(1, 0), (0, 1)]).unwrap();
    /// assert_eq!(a.pairs(), &[(0, 1), (1, 0)]);
    /// assert_eq!(a.value(), 4);
    ///
    /// assert!(Assignment::new(&costs, vec![(0, 1), (1, 1)]).is_err());
    /// ```
    pub fn new(costs: &CostMatrix<C>, mut pairs: Vec<(usize, usize)>) -> Result<Self> {
        let n = costs.dim();
        if !is_perfect(n, &pairs) {
            return Err(Error::IncompleteAssignment {
                stars: pairs.len(),
                expected: n,
            });
        }
        pairs.sort_unstable();

        let mut value = C::zero();
        for &(i, j) in &pairs {
            value = value
                .checked_add(&costs.get(i, j))
                .ok_or(Error::Overflow { row: i, col: j })?;
        }

        Ok(Assignment { pairs, value })
    }
}

impl<C> Assignment<C>
where
    C: Copy,
{
    /// Return the total cost of the assignment.
    pub fn value(&self) -> C {
        self.value
    }
}

impl<C> Assignment<C> {
    /// Return the `(row, column)` pairs sorted by row.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.pairs
    }

    pub fn iter(&self) -> SliceIter<(usize, usize)> {
        self.pairs.iter()
    }

    /// Return the number of assigned pairs (the dimension of the problem).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Return the column assigned to row `i`.
    pub fn col_of(&self, i: usize) -> Option<usize> {
        self.pairs.get(i).map(|&(_, j)| j)
    }

    /// Return the assigned column of each row.
    pub fn row_to_col(&self) -> Vec<usize> {
        self.pairs.iter().map(|&(_, j)| j).collect()
    }

    /// Return the assigned row of each column.
    pub fn col_to_row(&self) -> Vec<usize> {
        let mut rows = vec![0; self.pairs.len()];
        for &(i, j) in &self.pairs {
            rows[j] = i;
        }
        rows
    }
}

impl<'a, C> IntoIterator for &'a Assignment<C> {
    type Item = &'a (usize, usize);
    type IntoIter = SliceIter<'a, (usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Unchecked representation used for deserialization.
#[doc(hidden)]
#[cfg_attr(feature = "serialize", derive(Deserialize))]
pub struct RawAssignment<C> {
    pairs: Vec<(usize, usize)>,
    value: C,
}

impl<C> TryFrom<RawAssignment<C>> for Assignment<C> {
    type Error = Error;

    fn try_from(raw: RawAssignment<C>) -> Result<Self> {
        let RawAssignment { mut pairs, value } = raw;
        if pairs.is_empty() {
            return Err(Error::Empty);
        }
        if !is_perfect(pairs.len(), &pairs) {
            // the dimension implied by the largest index
            let n = pairs.iter().fold(pairs.len(), |n, &(i, j)| n.max(i + 1).max(j + 1));
            return Err(Error::IncompleteAssignment {
                stars: pairs.len(),
                expected: n,
            });
        }
        pairs.sort_unstable();
        Ok(Assignment { pairs, value })
    }
}

/// Return `true` if `pairs` is a bijection between `0..n` and `0..n`.
pub fn is_perfect(n: usize, pairs: &[(usize, usize)]) -> bool {
    if pairs.len() != n {
        return false;
    }
    let mut rows = vec![false; n];
    let mut cols = vec![false; n];
    for &(i, j) in pairs {
        if i >= n || j >= n || rows[i] || cols[j] {
            return false;
        }
        rows[i] = true;
        cols[j] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{is_perfect, Assignment, RawAssignment};
    use crate::error::Error;
    use crate::matrix::CostMatrix;
    use std::convert::TryFrom;

    #[test]
    fn test_is_perfect() {
        assert!(is_perfect(3, &[(0, 2), (1, 0), (2, 1)]));
        assert!(is_perfect(0, &[]));
        assert!(!is_perfect(3, &[(0, 2), (1, 0)]));
        assert!(!is_perfect(2, &[(0, 1), (1, 1)]));
        assert!(!is_perfect(2, &[(0, 0), (0, 1)]));
        assert!(!is_perfect(2, &[(0, 0), (1, 2)]));
    }

    #[test]
    fn test_maps() {
        let costs = CostMatrix::from_rows(&[[4, 2, 8], [4, 3, 7], [3, 1, 6]]).unwrap();
        let a = Assignment::new(&costs, vec![(2, 1), (0, 2), (1, 0)]).unwrap();
        assert_eq!(a.value(), 8 + 4 + 1);
        assert_eq!(a.pairs(), &[(0, 2), (1, 0), (2, 1)]);
        assert_eq!(a.row_to_col(), vec![2, 0, 1]);
        assert_eq!(a.col_to_row(), vec![1, 2, 0]);
        assert_eq!(a.col_of(1), Some(0));
        assert_eq!(a.col_of(3), None);
        assert_eq!((&a).into_iter().count(), 3);
    }

    #[test]
    fn test_invalid() {
        let costs = CostMatrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(
            Assignment::new(&costs, vec![(0, 0)]),
            Err(Error::IncompleteAssignment { stars: 1, expected: 2 })
        );
    }

    #[test]
    fn test_overflow() {
        let costs = CostMatrix::from_rows(&[[i8::MAX, 0], [0, 1]]).unwrap();
        assert_eq!(
            Assignment::new(&costs, vec![(0, 0), (1, 1)]),
            Err(Error::Overflow { row: 1, col: 1 })
        );
    }

    #[test]
    fn test_raw() {
        let raw = RawAssignment {
            pairs: vec![(2, 0), (0, 1), (1, 2)],
            value: 7,
        };
        let a = Assignment::try_from(raw).unwrap();
        assert_eq!(a.pairs(), &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(a.value(), 7);
        assert_eq!(a.col_to_row(), vec![2, 0, 1]);

        let raw = RawAssignment {
            pairs: vec![(0, 5), (0, 5)],
            value: -1,
        };
        assert_eq!(
            Assignment::try_from(raw),
            Err(Error::IncompleteAssignment { stars: 2, expected: 6 })
        );

        let raw = RawAssignment {
            pairs: vec![(0, 0), (1, 0)],
            value: 0,
        };
        assert!(Assignment::try_from(raw).is_err());

        let raw: RawAssignment<i32> = RawAssignment { pairs: vec![], value: 0 };
        assert_eq!(Assignment::try_from(raw), Err(Error::Empty));
    }

    #[cfg(feature = "serialize")]
    mod serialize {
        use super::Assignment;
        use crate::error::Error;
        use crate::matrix::CostMatrix;
        use serde_json;

        #[test]
        fn test_serde() {
            let costs = CostMatrix::from_rows(&[[1, 2], [2, 1]]).unwrap();
            let a = Assignment::new(&costs, vec![(0, 0), (1, 1)]).unwrap();
            let serialized = serde_json::to_string(&a).unwrap();
            let b: Assignment<i32> = serde_json::from_str(&serialized).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn test_deserialize_invalid() {
            let r = serde_json::from_str::<Assignment<i32>>(r#"{"pairs":[[0,5],[0,5]],"value":-1}"#);
            assert!(r.is_err());

            let r = serde_json::from_str::<Assignment<i32>>(r#"{"pairs":[[1,0],[0,1]],"value":4}"#);
            let a = r.unwrap();
            assert_eq!(a.pairs(), &[(0, 1), (1, 0)]);
            assert_eq!(a.col_to_row(), vec![1, 0]);

            let err = serde_json::from_str::<Assignment<i32>>(r#"{"pairs":[],"value":0}"#).unwrap_err();
            assert!(err.to_string().contains(&Error::Empty.to_string()));
        }
    }
}
