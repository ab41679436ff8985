//! Column-major sparse matrix with duplicate-summing insertion.

use crate::types::Scalar;
use serde::{Deserialize, Serialize};

/// A sparse `nrows × ncols` matrix stored by column.
///
/// Inserting at an occupied position sums into the existing entry rather
/// than overwriting it; the assemblers rely on this when several deltas
/// land on the same cell. Entries within a column keep insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix<T> {
    nrows: usize,
    ncols: usize,
    columns: Vec<Vec<(usize, T)>>,
}

impl<T: Scalar> SparseMatrix<T> {
    /// An all-zero matrix of the given shape.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            columns: vec![Vec::new(); ncols],
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Add `value` at `(row, col)`, summing into any existing entry.
    ///
    /// # Panics
    /// Panics if the position is out of range.
    pub fn add(&mut self, row: usize, col: usize, value: T) {
        assert!(row < self.nrows, "row {row} out of range");
        let column = &mut self.columns[col];
        match column.iter_mut().find(|(r, _)| *r == row) {
            Some((_, existing)) => *existing += value,
            None => column.push((row, value)),
        }
    }

    /// The value at `(row, col)`, zero when nothing is stored.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.columns[col]
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(T::zero)
    }

    /// The stored entries of one column, as `(row, value)` pairs.
    pub fn column(&self, col: usize) -> &[(usize, T)] {
        &self.columns[col]
    }
}

#[cfg(test)]
#[path = "../unit_tests/market/sparse.rs"]
mod tests;
