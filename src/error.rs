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

//! Errors raised while building or solving an assignment problem.

use std::error;
use std::fmt;

/// Error when solving an assignment problem.
///
/// `Empty` and `NotSquare` are raised for invalid input before the
/// solver allocates any state. All other variants signal that the
/// computation could not be completed, either because of the value
/// range of the cost type or because an internal invariant has been
/// violated. In no case is a partial assignment returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cost matrix has no rows.
    Empty,
    /// Row `row` has `len` entries, but the matrix has `expected` rows.
    NotSquare { row: usize, len: usize, expected: usize },
    /// An arithmetic operation on entry `(row, col)` overflowed.
    Overflow { row: usize, col: usize },
    /// The augmenting path reached a starred zero in `row` without a primed zero.
    MissingPrime { row: usize },
    /// The dual adjustment has been invoked although every cell is covered.
    NoUncoveredCell,
    /// The final covering does not correspond to a perfect matching.
    IncompleteAssignment { stars: usize, expected: usize },
    /// The configured maximal number of steps has been exceeded.
    IterationLimit(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Empty => write!(fmt, "empty cost matrix"),
            NotSquare { row, len, expected } => write!(
                fmt,
                "cost matrix is not square: row {} has {} entries, expected {}",
                row, len, expected
            ),
            Overflow { row, col } => write!(fmt, "arithmetic overflow at entry ({}, {})", row, col),
            MissingPrime { row } => write!(fmt, "no primed zero in row {} of augmenting path", row),
            NoUncoveredCell => write!(fmt, "no uncovered cell left for dual adjustment"),
            IncompleteAssignment { stars, expected } => write!(
                fmt,
                "incomplete assignment: {} starred zeros, expected {}",
                stars, expected
            ),
            IterationLimit(limit) => write!(fmt, "iteration limit of {} steps exceeded", limit),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
