//! Parity-check matrices for quasi-cyclic LDPC codes.
//!
//! A QC-LDPC code is described by an exponent matrix `E` and a lifting
//! factor `N`. Every entry of `E` expands into an `N x N` block of the
//! parity-check matrix `H`: the zero block for the sentinel `-1`, otherwise
//! the identity matrix with each row circularly shifted right by the entry.

pub mod assembler;
pub mod circulant;
pub mod code;
pub mod dense_matrix;
pub mod exponent;
pub mod mod2convert;
pub mod sparse_matrix;

// Re-export main types
pub use assembler::{build_pcm, build_pcm_from, build_pcm_sparse};
pub use circulant::{circulant, Circulant};
pub use code::QcLdpcCode;
pub use dense_matrix::{DenseError, Mod2Dense};
pub use exponent::{ExponentMatrix, FourCycle, SENTINEL};
pub use sparse_matrix::{Mod2Sparse, SparseError};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QcLdpcError {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error("Sparse matrix error: {0}")]
    SparseMatrix(#[from] SparseError),
    #[error("Dense matrix error: {0}")]
    DenseMatrix(#[from] DenseError),
}

impl QcLdpcError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        QcLdpcError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the offending argument for `InvalidArgument` errors.
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            QcLdpcError::InvalidArgument { name, .. } => Some(*name),
            _ => None,
        }
    }
}

/// Reject a lifting factor below one.
pub(crate) fn check_lifting(n: usize) -> Result<(), QcLdpcError> {
    if n == 0 {
        return Err(QcLdpcError::invalid(
            "N",
            "lifting factor N must be an integer >= 1, got 0",
        ));
    }
    Ok(())
}

/// `n * blocks`, the row or column count of H for `blocks` block rows or
/// columns, rejecting a lifting factor too large to index.
pub(crate) fn lifted_len(n: usize, blocks: usize) -> Result<usize, QcLdpcError> {
    n.checked_mul(blocks).ok_or_else(|| {
        QcLdpcError::invalid(
            "N",
            format!(
                "lifting factor {} times {} blocks overflows the matrix size",
                n, blocks
            ),
        )
    })
}
