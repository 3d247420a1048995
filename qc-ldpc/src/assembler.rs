//! Expansion of an exponent matrix into the full parity-check matrix.

use crate::{
    check_lifting, circulant, lifted_len, Circulant, ExponentMatrix, Mod2Dense, Mod2Sparse,
    QcLdpcError, SENTINEL,
};
use tracing::{debug, trace};

/// Build the parity-check matrix H of shape `(n * rows(E), n * cols(E))`.
///
/// Entry `-1` becomes an `n x n` zero block, any other entry `e` becomes
/// [`circulant`]`(n, e)`. Every shift is checked against `n` before any
/// block is generated.
pub fn build_pcm(exponents: &[Vec<i64>], n: usize) -> Result<Mod2Dense, QcLdpcError> {
    check_lifting(n)?;
    let exponents = ExponentMatrix::from_slice(exponents)?;
    build_pcm_from(&exponents, n)
}

/// [`build_pcm`] for an exponent matrix whose shape is already validated.
pub fn build_pcm_from(exponents: &ExponentMatrix, n: usize) -> Result<Mod2Dense, QcLdpcError> {
    exponents.check_lifting(n)?;

    let zero = Mod2Dense::allocate(n, n)?;
    let mut block_rows = Vec::with_capacity(exponents.rows());

    for r in 0..exponents.rows() {
        let blocks = exponents
            .row(r)
            .iter()
            .map(|&e| match e {
                SENTINEL => Ok(zero.clone()),
                shift => circulant(n, shift),
            })
            .collect::<Result<Vec<_>, _>>()?;

        block_rows.push(Mod2Dense::hstack(&blocks)?);
        trace!(block_row = r, "assembled block row");
    }

    let h = Mod2Dense::vstack(&block_rows)?;
    debug!(
        rows = h.rows(),
        cols = h.cols(),
        lifting = n,
        ones = h.count_ones(),
        "built parity-check matrix"
    );
    Ok(h)
}

/// Sparse form of [`build_pcm_from`], entry for entry the same matrix.
pub fn build_pcm_sparse(exponents: &ExponentMatrix, n: usize) -> Result<Mod2Sparse, QcLdpcError> {
    exponents.check_lifting(n)?;

    let mut h = Mod2Sparse::allocate(
        lifted_len(n, exponents.rows())?,
        lifted_len(n, exponents.cols())?,
    )?;
    for (r, c, shift) in exponents.iter_blocks() {
        let block = Circulant::new(n, shift as i64)?;
        for i in 0..n {
            h.insert(r * n + i, c * n + block.column_of(i))?;
        }
    }

    debug!(
        rows = h.rows(),
        cols = h.cols(),
        lifting = n,
        ones = h.count_ones(),
        "built sparse parity-check matrix"
    );
    Ok(h)
}
