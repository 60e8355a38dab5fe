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

//! This module implements a read function for the DIMACS assignment
//! format. A DIMACS file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p asn <n> <m>`,
//!    where `<n>` is the (even) number of nodes and `<m>` the number of
//!    arcs.
//! 4. there must be exactly `n/2` node lines `n <node>` declaring the
//!    source nodes (the rows of the cost matrix). The remaining nodes
//!    are the sink nodes (the columns).
//! 5. there must be exactly `m` arc lines `a <u> <v> <c>` from a source
//!    node `<u>` to a sink node `<v>` with cost `<c>`.
//!
//! The rows are ordered as their node lines, the columns by increasing
//! node number. Because only square cost matrices are supported, there
//! must be exactly one arc for each pair of source and sink node, i.e.
//! `m = (n/2)^2`.

use super::{DimacsReader, Error, Result};
use crate::assignment::Assignment;
use crate::matrix::CostMatrix;
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

pub struct Instance<T> {
    /// The cost matrix.
    pub costs: CostMatrix<T>,
    /// The (1-based) node number of each row.
    pub rows: Vec<usize>,
    /// The (1-based) node number of each column.
    pub cols: Vec<usize>,
}

pub fn read<R: Read, T>(r: R) -> Result<Instance<T>>
where
    T: FromStr + Copy,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);

    // Read the problem line.
    let mut pline = reader.expect_line("p")?;
    let pline_number = pline.line;
    pline.expect("asn")?;
    let nnodes: usize = pline.number()?;
    let narcs: usize = pline.number()?;
    pline.end()?;

    if nnodes == 0 || nnodes % 2 != 0 {
        return Err(Error::Data {
            line: pline_number,
            msg: format!("number of nodes must be positive and even, got {}", nnodes),
        });
    }
    let dim = nnodes / 2;
    if narcs != dim * dim {
        return Err(Error::Data {
            line: pline_number,
            msg: format!("number of arcs must be {} for {} nodes, got {}", dim * dim, nnodes, narcs),
        });
    }

    let mut is_row = vec![false; nnodes];
    let mut rows = Vec::with_capacity(dim);
    let mut arcs = Vec::with_capacity(narcs);

    while let Some((d, mut toks)) = reader.read_one_line_of(&["n", "a"])? {
        if d == "n" {
            let u = toks.node(nnodes)?;
            if is_row[u - 1] {
                return Err(Error::Data {
                    line: toks.line,
                    msg: format!("duplicate source node {}", u),
                });
            }
            if rows.len() == dim {
                return Err(Error::Data {
                    line: toks.line,
                    msg: format!("unexpected 'n' line (expected exactly {} source nodes)", dim),
                });
            }
            is_row[u - 1] = true;
            rows.push(u);
        } else {
            let u = toks.node(nnodes)?;
            let v = toks.node(nnodes)?;
            let c: T = toks.number()?;
            if arcs.len() == narcs {
                return Err(Error::Data {
                    line: toks.line,
                    msg: format!("unexpected 'a' line (expected exactly {} arcs)", narcs),
                });
            }
            arcs.push((toks.line, u, v, c));
        }
        toks.end()?;
    }

    if rows.len() != dim {
        return Err(Error::Data {
            line: pline_number,
            msg: format!("expected {} source nodes, got {}", dim, rows.len()),
        });
    }

    let cols = (1..=nnodes).filter(|&u| !is_row[u - 1]).collect::<Vec<_>>();

    // position of each node in `rows` or `cols`
    let mut index = vec![0; nnodes];
    for (i, &u) in rows.iter().enumerate() {
        index[u - 1] = i;
    }
    for (j, &v) in cols.iter().enumerate() {
        index[v - 1] = j;
    }

    let mut grid = vec![None; narcs];
    for (line, u, v, c) in arcs {
        if !is_row[u - 1] {
            return Err(Error::Data {
                line,
                msg: format!("source node {} of arc ({},{}) is not a source", u, u, v),
            });
        }
        if is_row[v - 1] {
            return Err(Error::Data {
                line,
                msg: format!("sink node {} of arc ({},{}) is a source", v, u, v),
            });
        }
        let k = index[u - 1] * dim + index[v - 1];
        if grid[k].is_some() {
            return Err(Error::Data {
                line,
                msg: format!("duplicate arc ({},{})", u, v),
            });
        }
        grid[k] = Some(c);
    }

    if let Some(k) = grid.iter().position(Option::is_none) {
        return Err(Error::Data {
            line: reader.line_number,
            msg: format!("missing arc ({},{})", rows[k / dim], cols[k % dim]),
        });
    }
    let entries = grid.into_iter().flatten().collect::<Vec<T>>();

    let costs = CostMatrix::from_fn(dim, |i, j| entries[i * dim + j]).map_err(|e| Error::Data {
        line: pline_number,
        msg: e.to_string(),
    })?;

    Ok(Instance { costs, rows, cols })
}

pub fn read_from_file<T>(filename: &str) -> Result<Instance<T>>
where
    T: FromStr + Copy,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write an assignment instance.
pub fn write<W, T>(mut w: W, instance: &Instance<T>) -> std::io::Result<()>
where
    W: Write,
    T: Display + Copy,
{
    let dim = instance.costs.dim();
    writeln!(w, "p asn {} {}", 2 * dim, dim * dim)?;
    for u in &instance.rows {
        writeln!(w, "n {}", u)?;
    }
    for (i, row) in instance.costs.rows().enumerate() {
        for (j, c) in row.iter().enumerate() {
            writeln!(w, "a {} {} {}", instance.rows[i], instance.cols[j], c)?;
        }
    }

    Ok(())
}

/// Write an assignment instance to a named file.
pub fn write_to_file<T>(filename: &str, instance: &Instance<T>) -> std::io::Result<()>
where
    T: Display + Copy,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

/// Write a solution of an assignment problem.
///
/// Each assigned pair is written as arc `f <u> <v> 1` with unit flow.
pub fn write_solution<W, T>(mut w: W, instance: &Instance<T>, assignment: &Assignment<T>) -> std::io::Result<()>
where
    W: Write,
    T: Display + Copy,
{
    writeln!(w, "s {}", assignment.value())?;
    for &(i, j) in assignment {
        writeln!(w, "f {} {} 1", instance.rows[i], instance.cols[j])?;
    }

    Ok(())
}

/// Read a solution of an assignment problem.
///
/// Returns the solution value and the assigned `(source, sink)` node pairs.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut pairs = vec![];
    let mut sol = None;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["f", "s"])? {
        if d == "f" {
            let u = toks.number()?;
            let v = toks.number()?;
            toks.expect("1")?;
            pairs.push((u, v));
        } else {
            if sol.is_some() {
                return Err(Error::Format {
                    line: toks.line,
                    msg: "The solution value must be specified exactly once".to_string(),
                });
            }
            sol = Some(toks.number()?);
        }
        toks.end()?;
    }

    Ok((
        sol.ok_or_else(|| Error::Format {
            line: 0,
            msg: "Missing solution value".to_string(),
        })?,
        pairs,
    ))
}
