//! Truncated SVD of the weighted term-document matrix.
//!
//! The decomposition solves the symmetric eigenproblem of the smaller Gram
//! matrix (`MᵗM` for tall matrices, `MMᵗ` for wide ones). Singular values are
//! the square roots of its eigenvalues, and the partner singular vectors are
//! recovered by one multiplication with `M`.

use log::debug;
use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::{Result, SemcrawlError};
use crate::matrix::sparse::SparseMatrix;

/// Singular values at or below this fraction of the largest are treated as zero.
const RELATIVE_SINGULAR_TOLERANCE: f64 = 1e-10;

/// Rank-k approximation `U · diag(Σ) · Vᵗ` of a matrix.
#[derive(Debug, Clone)]
pub struct LowRankApproximation {
    u: DMatrix<f64>,
    sigma: DVector<f64>,
    v_t: DMatrix<f64>,
    reconstruction: SparseMatrix,
}

impl LowRankApproximation {
    /// Check that `rank` is usable for a matrix of `shape`.
    ///
    /// The rank must be at least 1 and strictly below both dimensions.
    pub fn validate_rank(shape: (usize, usize), rank: usize) -> Result<()> {
        let (rows, cols) = shape;
        let limit = rows.min(cols);

        if rank == 0 {
            return Err(SemcrawlError::invalid_argument("SVD rank must be at least 1"));
        }
        if rank >= limit {
            return Err(SemcrawlError::invalid_argument(format!(
                "SVD rank {rank} must be strictly less than min({rows}, {cols}) = {limit}"
            )));
        }
        Ok(())
    }

    /// Decompose `matrix` and keep its `rank` dominant singular triplets.
    pub fn compute(matrix: &SparseMatrix, rank: usize) -> Result<Self> {
        Self::validate_rank(matrix.shape(), rank)?;

        let dense = matrix.to_dense();
        let (rows, cols) = dense.shape();
        let tall = cols <= rows;

        let gram = if tall {
            dense.tr_mul(&dense)
        } else {
            &dense * dense.transpose()
        };
        let gram_dim = gram.nrows();
        let eigen = SymmetricEigen::new(gram);

        let mut order: Vec<usize> = (0..gram_dim).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
        order.truncate(rank);

        let mut sigma =
            DVector::from_iterator(rank, order.iter().map(|&i| eigen.eigenvalues[i].max(0.0).sqrt()));
        let cutoff = sigma.max() * RELATIVE_SINGULAR_TOLERANCE;
        for value in sigma.iter_mut() {
            if *value <= cutoff {
                *value = 0.0;
            }
        }

        let basis = DMatrix::from_fn(gram_dim, rank, |r, c| eigen.eigenvectors[(r, order[c])]);

        let (u, v) = if tall {
            let u = partner_vectors(&dense * &basis, &sigma);
            (u, basis)
        } else {
            let v = partner_vectors(dense.tr_mul(&basis), &sigma);
            (basis, v)
        };
        let v_t = v.transpose();

        let reconstructed = &u * DMatrix::from_diagonal(&sigma) * &v_t;
        let reconstruction = SparseMatrix::from_dense(&reconstructed);

        debug!(
            "Computed rank-{rank} approximation of a {rows}x{cols} matrix (σ₁ = {:.4})",
            sigma.max()
        );

        Ok(LowRankApproximation {
            u,
            sigma,
            v_t,
            reconstruction,
        })
    }

    /// Number of singular triplets kept.
    pub fn rank(&self) -> usize {
        self.sigma.len()
    }

    /// Left singular vectors, one column per kept direction.
    pub fn u(&self) -> &DMatrix<f64> {
        &self.u
    }

    /// Singular values in descending order.
    pub fn sigma(&self) -> &DVector<f64> {
        &self.sigma
    }

    /// Transposed right singular vectors, one row per kept direction.
    pub fn v_t(&self) -> &DMatrix<f64> {
        &self.v_t
    }

    /// The reconstructed matrix, same shape as the input.
    pub fn reconstruction(&self) -> &SparseMatrix {
        &self.reconstruction
    }
}

/// Divide column `j` of `projected` by `sigma[j]`; zero singular values give zero columns.
fn partner_vectors(mut projected: DMatrix<f64>, sigma: &DVector<f64>) -> DMatrix<f64> {
    for (j, mut column) in projected.column_iter_mut().enumerate() {
        if sigma[j] > 0.0 {
            column /= sigma[j];
        } else {
            column.fill(0.0);
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix {
        SparseMatrix::from_dense(&DMatrix::from_row_slice(
            4,
            3,
            &[
                3.0, 1.0, 0.0, //
                1.0, 3.0, 0.0, //
                0.0, 0.0, 1.0, //
                1.0, 0.0, 2.0,
            ],
        ))
    }

    fn reference_singular_values(matrix: &SparseMatrix) -> Vec<f64> {
        let mut values: Vec<f64> = matrix
            .to_dense()
            .svd(false, false)
            .singular_values
            .iter()
            .copied()
            .collect();
        values.sort_by(|a, b| b.total_cmp(a));
        values
    }

    #[test]
    fn test_rank_validation() {
        let m = sample();
        assert!(LowRankApproximation::compute(&m, 0).is_err());
        assert!(LowRankApproximation::compute(&m, 3).is_err());
        assert!(LowRankApproximation::compute(&m, 4).is_err());
        assert!(LowRankApproximation::compute(&m, 2).is_ok());

        let err = LowRankApproximation::validate_rank((5, 2), 2).unwrap_err();
        assert!(matches!(err, SemcrawlError::InvalidArgument(_)));
        assert!(LowRankApproximation::validate_rank((0, 0), 1).is_err());
    }

    #[test]
    fn test_singular_values_descending_and_correct() {
        let m = sample();
        let approx = LowRankApproximation::compute(&m, 2).unwrap();
        let expected = reference_singular_values(&m);

        assert_eq!(approx.rank(), 2);
        assert!(approx.sigma()[0] >= approx.sigma()[1]);
        for k in 0..2 {
            assert!((approx.sigma()[k] - expected[k]).abs() < 1e-8);
        }
    }

    #[test]
    fn test_reconstruction_error_matches_dropped_singular_value() {
        let m = sample();
        let approx = LowRankApproximation::compute(&m, 2).unwrap();
        let expected = reference_singular_values(&m);

        let diff = m.to_dense() - approx.reconstruction().to_dense();
        assert!((diff.norm() - expected[2]).abs() < 1e-8);
        assert_eq!(approx.reconstruction().shape(), m.shape());
    }

    #[test]
    fn test_wide_matrix_exact_for_rank_one_input() {
        // Rank-1 wide matrix: rows are multiples of each other.
        let m = SparseMatrix::from_dense(&DMatrix::from_row_slice(
            2,
            4,
            &[1.0, 2.0, 0.0, 1.0, 2.0, 4.0, 0.0, 2.0],
        ));
        let approx = LowRankApproximation::compute(&m, 1).unwrap();

        assert_eq!(approx.u().shape(), (2, 1));
        assert_eq!(approx.v_t().shape(), (1, 4));
        let diff = m.to_dense() - approx.reconstruction().to_dense();
        assert!(diff.norm() < 1e-9);
    }

    #[test]
    fn test_tall_and_wide_paths_agree() {
        let tall = sample();
        let wide = SparseMatrix::from_dense(&tall.to_dense().transpose());

        let from_tall = LowRankApproximation::compute(&tall, 2).unwrap();
        let from_wide = LowRankApproximation::compute(&wide, 2).unwrap();
        for k in 0..2 {
            assert!((from_tall.sigma()[k] - from_wide.sigma()[k]).abs() < 1e-8);
        }

        let diff = from_tall.reconstruction().to_dense().transpose()
            - from_wide.reconstruction().to_dense();
        assert!(diff.norm() < 1e-8);
    }

    #[test]
    fn test_zero_matrix_gets_zero_vectors() {
        let m = SparseMatrix::zeros(3, 3);
        let approx = LowRankApproximation::compute(&m, 1).unwrap();

        assert_eq!(approx.sigma()[0], 0.0);
        assert!(approx.u().iter().all(|&x| x == 0.0));
        assert_eq!(approx.reconstruction().nnz(), 0);
    }
}
