//! Term-document matrices and the numerical stages applied to them.
//!
//! - [`sparse`] - compressed sparse column storage and vectors
//! - [`weighting`] - IDF re-weighting and column normalization
//! - [`low_rank`] - truncated SVD and its rank-k reconstruction

pub mod low_rank;
pub mod sparse;
pub mod weighting;

pub use low_rank::LowRankApproximation;
pub use sparse::{SparseMatrix, SparseVector};
