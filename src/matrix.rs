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

//! Square cost matrices.

use crate::error::{Error, Result};

use std::convert::TryFrom;
use std::ops::Index;
use std::slice::ChunksExact;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A square matrix of assignment costs.
///
/// The entries are stored row by row. A `CostMatrix` can only be
/// constructed with at least one row and with each row having exactly as
/// many entries as there are rows.
///
/// # Example
///
/// ```
/// use rs_hungarian::CostMatrix;
///
/// let m = CostMatrix::from_rows(&[[4, 2, 8], [4, 3, 7], [3, 1, 6]]).unwrap();
/// assert_eq!(m.dim(), 3);
/// assert_eq!(m[(1, 2)], 7);
/// assert_eq!(m.row(2), &[3, 1, 6]);
///
/// assert!(CostMatrix::from_rows(&[vec![1, 2], vec![3]]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "RawMatrix<C>"))]
pub struct CostMatrix<C> {
    dim: usize,
    data: Vec<C>,
}

impl<C> CostMatrix<C>
where
    C: Copy,
{
    /// Create a cost matrix from a list of rows.
    ///
    /// Fails with [`Error::Empty`] if there are no rows and with
    /// [`Error::NotSquare`] for the first row whose length differs from
    /// the number of rows.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[C]>,
    {
        let dim = rows.len();
        if dim == 0 {
            return Err(Error::Empty);
        }

        let mut data = Vec::with_capacity(dim * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(Error::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: dim,
                });
            }
            data.extend_from_slice(row);
        }

        Ok(CostMatrix { dim, data })
    }

    /// Create an `n×n` cost matrix with entries given by a function.
    pub fn from_fn<F>(n: usize, cost: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> C,
    {
        if n == 0 {
            return Err(Error::Empty);
        }
        let data = (0..n * n).map(|k| cost(k / n, k % n)).collect();
        Ok(CostMatrix { dim: n, data })
    }

    /// Return the entry in row `i` and column `j`.
    pub fn get(&self, i: usize, j: usize) -> C {
        self.data[i * self.dim + j]
    }
}

impl<C> CostMatrix<C> {
    /// Return the number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the entries of row `i`.
    pub fn row(&self, i: usize) -> &[C] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Return an iterator over the rows.
    pub fn rows(&self) -> ChunksExact<C> {
        self.data.chunks_exact(self.dim)
    }

    /// Return all entries row by row.
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }
}

impl<C> Index<(usize, usize)> for CostMatrix<C> {
    type Output = C;

    fn index(&self, (i, j): (usize, usize)) -> &C {
        &self.data[i * self.dim + j]
    }
}

/// Unchecked representation used for deserialization.
#[doc(hidden)]
#[cfg_attr(feature = "serialize", derive(Deserialize))]
pub struct RawMatrix<C> {
    dim: usize,
    data: Vec<C>,
}

impl<C> TryFrom<RawMatrix<C>> for CostMatrix<C> {
    type Error = Error;

    fn try_from(raw: RawMatrix<C>) -> Result<Self> {
        if raw.dim == 0 {
            return Err(Error::Empty);
        }
        if raw.data.len() != raw.dim * raw.dim {
            return Err(Error::NotSquare {
                row: raw.data.len() / raw.dim,
                len: raw.data.len() % raw.dim,
                expected: raw.dim,
            });
        }
        Ok(CostMatrix {
            dim: raw.dim,
            data: raw.data,
        })
    }
}
