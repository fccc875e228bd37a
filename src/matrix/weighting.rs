//! IDF re-weighting and document normalization.

use log::debug;

use crate::error::Result;
use crate::matrix::sparse::SparseMatrix;

/// Inverse document frequency of every term row.
///
/// `idf(t) = ln(D / df(t))` where `D` is the number of documents. A row with
/// no documents uses `df = D`, giving a weight of zero.
pub fn inverse_document_frequencies(counts: &SparseMatrix) -> Vec<f64> {
    let documents = counts.cols() as f64;

    counts
        .row_nonzero_counts()
        .into_iter()
        .map(|df| {
            let df = if df == 0 { documents } else { df as f64 };
            if documents == 0.0 {
                0.0
            } else {
                (documents / df).ln()
            }
        })
        .collect()
}

/// Turn raw counts into the weighted, column-normalized matrix.
///
/// When `use_idf` is set every row is scaled by its IDF first. Each column
/// then has unit L2 norm, or stays all-zero.
pub fn weight(counts: &SparseMatrix, use_idf: bool) -> Result<SparseMatrix> {
    let mut weighted = counts.clone();

    if use_idf {
        let idf = inverse_document_frequencies(counts);
        weighted.scale_rows(&idf)?;
        debug!("Applied IDF to {} terms", idf.len());
    }

    weighted.normalize_columns();
    Ok(weighted)
}
