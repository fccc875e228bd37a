//! Compressed sparse column (CSC) matrices and sparse vectors.
//!
//! Term-document matrices have one row per vocabulary word and one column per
//! page. Columns are stored contiguously, which makes per-document work
//! (normalization, scoring) a linear scan.

use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SemcrawlError};

/// Column count above which column scans run on the rayon pool.
const PARALLEL_COLUMN_THRESHOLD: usize = 256;

/// A sparse `f64` matrix in compressed sparse column layout.
///
/// Row indices inside each column are strictly increasing and no explicit
/// entry is duplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    col_ptr: Vec<usize>,
    row_indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Create an all-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        SparseMatrix {
            rows,
            cols,
            col_ptr: vec![0; cols + 1],
            row_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed. Out-of-range coordinates are an error.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self> {
        let mut per_column: Vec<Vec<(usize, f64)>> = vec![Vec::new(); cols];

        for (row, col, value) in triplets {
            if row >= rows || col >= cols {
                return Err(SemcrawlError::index(format!(
                    "Entry ({row}, {col}) outside a {rows}x{cols} matrix"
                )));
            }
            per_column[col].push((row, value));
        }

        let mut col_ptr = Vec::with_capacity(cols + 1);
        let mut row_indices = Vec::new();
        let mut values = Vec::new();
        col_ptr.push(0);

        for mut entries in per_column {
            entries.sort_by_key(|&(row, _)| row);
            for (row, value) in entries {
                if row_indices.len() > *col_ptr.last().unwrap_or(&0)
                    && row_indices.last() == Some(&row)
                {
                    if let Some(last) = values.last_mut() {
                        *last += value;
                    }
                } else {
                    row_indices.push(row);
                    values.push(value);
                }
            }
            col_ptr.push(row_indices.len());
        }

        Ok(SparseMatrix {
            rows,
            cols,
            col_ptr,
            row_indices,
            values,
        })
    }

    /// Store a dense matrix in sparse form, keeping every non-zero entry.
    pub fn from_dense(dense: &DMatrix<f64>) -> Self {
        let (rows, cols) = dense.shape();
        let mut col_ptr = Vec::with_capacity(cols + 1);
        let mut row_indices = Vec::new();
        let mut values = Vec::new();
        col_ptr.push(0);

        for column in dense.column_iter() {
            for (row, &value) in column.iter().enumerate() {
                if value != 0.0 {
                    row_indices.push(row);
                    values.push(value);
                }
            }
            col_ptr.push(row_indices.len());
        }

        SparseMatrix {
            rows,
            cols,
            col_ptr,
            row_indices,
            values,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of explicitly stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterate the stored `(row, value)` pairs of column `col`.
    pub fn column(&self, col: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.col_ptr[col]..self.col_ptr[col + 1];
        self.row_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Value at `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.rows || col >= self.cols {
            return 0.0;
        }
        let range = self.col_ptr[col]..self.col_ptr[col + 1];
        match self.row_indices[range.clone()].binary_search(&row) {
            Ok(offset) => self.values[range.start + offset],
            Err(_) => 0.0,
        }
    }

    /// Iterate all stored entries as `(row, col, value)`.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.cols).flat_map(move |col| self.column(col).map(move |(row, v)| (row, col, v)))
    }

    /// Number of stored non-zero entries in every row.
    pub fn row_nonzero_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.rows];
        for (&row, &value) in self.row_indices.iter().zip(&self.values) {
            if value != 0.0 {
                counts[row] += 1;
            }
        }
        counts
    }

    /// Multiply every row `i` by `factors[i]`.
    pub fn scale_rows(&mut self, factors: &[f64]) -> Result<()> {
        if factors.len() != self.rows {
            return Err(SemcrawlError::index(format!(
                "Expected {} row factors, got {}",
                self.rows,
                factors.len()
            )));
        }
        for (value, &row) in self.values.iter_mut().zip(&self.row_indices) {
            *value *= factors[row];
        }
        Ok(())
    }

    /// Euclidean norm of every column.
    pub fn column_norms(&self) -> Vec<f64> {
        let norm = |col: usize| self.column(col).map(|(_, v)| v * v).sum::<f64>().sqrt();
        if self.cols >= PARALLEL_COLUMN_THRESHOLD {
            (0..self.cols).into_par_iter().map(norm).collect()
        } else {
            (0..self.cols).map(norm).collect()
        }
    }

    /// Scale every column to unit L2 norm. All-zero columns stay zero.
    pub fn normalize_columns(&mut self) {
        let norms = self.column_norms();
        for (col, &norm) in norms.iter().enumerate() {
            if norm > 0.0 {
                let range = self.col_ptr[col]..self.col_ptr[col + 1];
                for value in &mut self.values[range] {
                    *value /= norm;
                }
            }
        }
    }

    /// Compute `vᵗ · M`: the dot product of `vector` with every column.
    pub fn transpose_dot(&self, vector: &SparseVector) -> Result<Vec<f64>> {
        if vector.dimension() != self.rows {
            return Err(SemcrawlError::query(format!(
                "Vector of dimension {} does not match {} matrix rows",
                vector.dimension(),
                self.rows
            )));
        }

        let dense = vector.to_dense();
        let dot = |col: usize| self.column(col).map(|(row, v)| dense[row] * v).sum::<f64>();

        Ok(if self.cols >= PARALLEL_COLUMN_THRESHOLD {
            (0..self.cols).into_par_iter().map(dot).collect()
        } else {
            (0..self.cols).map(dot).collect()
        })
    }

    /// Materialize as a dense nalgebra matrix.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.rows, self.cols);
        for (row, col, value) in self.triplets() {
            dense[(row, col)] = value;
        }
        dense
    }
}

/// A sparse vector with sorted, unique indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// An all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        SparseVector {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs; duplicate indices are summed.
    pub fn from_entries(
        dimension: usize,
        entries: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<Self> {
        let mut entries: Vec<(usize, f64)> = entries.into_iter().collect();
        if let Some(&(index, _)) = entries.iter().find(|&&(index, _)| index >= dimension) {
            return Err(SemcrawlError::query(format!(
                "Index {index} outside a vector of dimension {dimension}"
            )));
        }
        entries.sort_by_key(|&(index, _)| index);

        let mut indices: Vec<usize> = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            if indices.last() == Some(&index) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(index);
                values.push(value);
            }
        }

        Ok(SparseVector {
            dimension,
            indices,
            values,
        })
    }

    /// Length of the vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Stored `(index, value)` pairs in index order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit L2 norm; a zero vector stays zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    /// Expand to a dense `Vec`.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (index, value) in self.entries() {
            dense[index] = value;
        }
        dense
    }
}
