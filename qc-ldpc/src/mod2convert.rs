use crate::{Mod2Dense, Mod2Sparse, QcLdpcError};

pub fn sparse_to_dense(sparse: &Mod2Sparse) -> Result<Mod2Dense, QcLdpcError> {
    let mut dense = Mod2Dense::allocate(sparse.rows(), sparse.cols())?;

    for row in 0..sparse.rows() {
        for col in sparse.entries_in_row(row) {
            dense.set(row, col, true)?;
        }
    }

    Ok(dense)
}

pub fn dense_to_sparse(dense: &Mod2Dense) -> Result<Mod2Sparse, QcLdpcError> {
    let mut sparse = Mod2Sparse::allocate(dense.rows(), dense.cols())?;

    for row in 0..dense.rows() {
        for col in dense.ones_in_row(row) {
            sparse.insert(row, col)?;
        }
    }

    Ok(sparse)
}

/// True when both forms hold the same shape and the same set of 1s.
pub fn matrices_equal(sparse: &Mod2Sparse, dense: &Mod2Dense) -> bool {
    if sparse.rows() != dense.rows() || sparse.cols() != dense.cols() {
        return false;
    }

    (0..sparse.rows()).all(|row| sparse.entries_in_row(row).eq(dense.ones_in_row(row)))
}
