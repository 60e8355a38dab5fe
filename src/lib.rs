// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

#![forbid(unsafe_code)]

//! The Hungarian method for the linear assignment problem.
//!
//! Given a square matrix of integer costs, find an assignment of rows
//! to columns such that each row is assigned to exactly one column, each
//! column to exactly one row, and the sum of the costs of the assigned
//! entries is minimal.

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod matrix;
pub use self::matrix::CostMatrix;

pub mod assignment;
pub use self::assignment::Assignment;

// # Algorithms

pub mod hungarian;
pub use self::hungarian::{hungarian, solve, Hungarian};

// # File formats

#[cfg(feature = "dimacs")]
pub mod dimacs;
