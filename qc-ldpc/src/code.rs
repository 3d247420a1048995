use crate::{
    assembler, check_lifting, lifted_len, ExponentMatrix, Mod2Dense, Mod2Sparse, QcLdpcError,
};

/// A QC-LDPC code: block length, dimension, lifting factor and exponent matrix.
///
/// The parity-check matrix is not stored; it is rebuilt from the exponent
/// matrix on request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CodeParameters", into = "CodeParameters")
)]
pub struct QcLdpcCode {
    name: String,
    n_bits: usize,
    k_message_bits: usize,
    lifting: usize,
    exponents: ExponentMatrix,
}

impl QcLdpcCode {
    /// Describe a code of length `n_bits` and dimension `k_message_bits`.
    ///
    /// `n_bits` must equal `lifting * cols(E)`. With `m = lifting * rows(E)`
    /// checks the dimension must lie in `[n - m, n - 1]`, the upper end
    /// allowing for redundant checks.
    pub fn new(
        name: impl Into<String>,
        n_bits: usize,
        k_message_bits: usize,
        lifting: usize,
        exponents: ExponentMatrix,
    ) -> Result<Self, QcLdpcError> {
        check_lifting(lifting)?;
        exponents.check_lifting(lifting)?;

        if n_bits != lifted_len(lifting, exponents.cols())? {
            return Err(QcLdpcError::invalid(
                "n",
                format!(
                    "code length {} does not match N * cols(E) = {} * {}",
                    n_bits,
                    lifting,
                    exponents.cols()
                ),
            ));
        }

        let m_checks = lifted_len(lifting, exponents.rows())?;
        let min_k = n_bits.saturating_sub(m_checks);
        if k_message_bits < min_k || k_message_bits >= n_bits {
            return Err(QcLdpcError::invalid(
                "k",
                format!(
                    "dimension {} must lie in [{}, {}] for {} checks on {} bits",
                    k_message_bits,
                    min_k,
                    n_bits - 1,
                    m_checks,
                    n_bits
                ),
            ));
        }

        Ok(Self {
            name: name.into(),
            n_bits,
            k_message_bits,
            lifting,
            exponents,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }
    pub fn k_message_bits(&self) -> usize {
        self.k_message_bits
    }
    /// `lifting * rows(E)`, known to fit since construction.
    pub fn m_checks(&self) -> usize {
        self.lifting * self.exponents.rows()
    }
    pub fn lifting(&self) -> usize {
        self.lifting
    }
    pub fn exponents(&self) -> &ExponentMatrix {
        &self.exponents
    }
    pub fn rate(&self) -> f64 {
        (self.k_message_bits as f64) / (self.n_bits as f64)
    }

    pub fn parity_check_matrix(&self) -> Result<Mod2Dense, QcLdpcError> {
        assembler::build_pcm_from(&self.exponents, self.lifting)
    }

    pub fn parity_check_matrix_sparse(&self) -> Result<Mod2Sparse, QcLdpcError> {
        assembler::build_pcm_sparse(&self.exponents, self.lifting)
    }

    /// Number of parity checks the 0/1 word fails.
    ///
    /// Evaluated block by block from the exponent matrix, so H is never
    /// materialized.
    pub fn unsatisfied_checks(&self, word: &[u8]) -> Result<usize, QcLdpcError> {
        if word.len() != self.n_bits {
            return Err(QcLdpcError::invalid(
                "word",
                format!(
                    "word length {} doesn't match code length {}",
                    word.len(),
                    self.n_bits
                ),
            ));
        }
        if let Some(pos) = word.iter().position(|&bit| bit > 1) {
            return Err(QcLdpcError::invalid(
                "word",
                format!("bit {} is {}, expected 0 or 1", pos, word[pos]),
            ));
        }

        let n = self.lifting;
        let mut syndrome = vec![0u8; self.m_checks()];
        for (r, c, shift) in self.exponents.iter_blocks() {
            for i in 0..n {
                syndrome[r * n + i] ^= word[c * n + (i + shift) % n];
            }
        }

        Ok(syndrome.iter().filter(|&&bit| bit != 0).count())
    }
}

/// Unvalidated field layout used to (de)serialize [`QcLdpcCode`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CodeParameters {
    name: String,
    n: usize,
    k: usize,
    lifting: usize,
    exponents: ExponentMatrix,
}

#[cfg(feature = "serde")]
impl TryFrom<CodeParameters> for QcLdpcCode {
    type Error = QcLdpcError;

    fn try_from(p: CodeParameters) -> Result<Self, Self::Error> {
        QcLdpcCode::new(p.name, p.n, p.k, p.lifting, p.exponents)
    }
}

#[cfg(feature = "serde")]
impl From<QcLdpcCode> for CodeParameters {
    fn from(code: QcLdpcCode) -> Self {
        CodeParameters {
            name: code.name,
            n: code.n_bits,
            k: code.k_message_bits,
            lifting: code.lifting,
            exponents: code.exponents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_code() -> QcLdpcCode {
        let exponents = ExponentMatrix::new(vec![vec![0, 1, 2, -1], vec![2, -1, 0, 1]]).unwrap();
        QcLdpcCode::new("small", 12, 6, 3, exponents).unwrap()
    }

    #[test]
    fn test_code_parameters() {
        let code = small_code();
        assert_eq!(code.name(), "small");
        assert_eq!(code.n_bits(), 12);
        assert_eq!(code.m_checks(), 6);
        assert_eq!(code.k_message_bits(), 6);
        assert_eq!(code.lifting(), 3);
        assert_eq!(code.rate(), 0.5);
        assert_eq!(code.exponents().cols(), 4);
    }

    #[test]
    fn test_invalid_parameters() {
        let e = ExponentMatrix::new(vec![vec![0, 1, 2, -1], vec![2, -1, 0, 1]]).unwrap();
        let err = QcLdpcCode::new("bad n", 13, 6, 3, e.clone()).unwrap_err();
        assert_eq!(err.argument(), Some("n"));

        let err = QcLdpcCode::new("bad k", 12, 5, 3, e.clone()).unwrap_err();
        assert_eq!(err.argument(), Some("k"));
        let err = QcLdpcCode::new("bad k", 12, 12, 3, e.clone()).unwrap_err();
        assert_eq!(err.argument(), Some("k"));

        let err = QcLdpcCode::new("bad N", 8, 4, 2, e.clone()).unwrap_err();
        assert_eq!(err.argument(), Some("E"));
        let err = QcLdpcCode::new("zero N", 0, 0, 0, e).unwrap_err();
        assert_eq!(err.argument(), Some("N"));
    }

    #[test]
    fn test_oversized_lifting_rejected() {
        let e = ExponentMatrix::new(vec![vec![0, 0]]).unwrap();
        let err = QcLdpcCode::new("huge", 0, 0, usize::MAX / 2 + 1, e).unwrap_err();
        assert_eq!(err.argument(), Some("N"));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_matrix_forms_agree() {
        let code = small_code();
        let dense = code.parity_check_matrix().unwrap();
        let sparse = code.parity_check_matrix_sparse().unwrap();
        assert_eq!((dense.rows(), dense.cols()), (6, 12));
        assert!(crate::mod2convert::matrices_equal(&sparse, &dense));
    }

    #[test]
    fn test_unsatisfied_checks() {
        let code = small_code();
        let h = code.parity_check_matrix().unwrap();

        assert_eq!(code.unsatisfied_checks(&[0u8; 12]).unwrap(), 0);

        // A single flipped bit fails exactly the checks in its column.
        for bit in 0..12 {
            let mut word = vec![0u8; 12];
            word[bit] = 1;
            assert_eq!(code.unsatisfied_checks(&word).unwrap(), h.col_weight(bit));
        }

        assert_eq!(code.unsatisfied_checks(&[0u8; 11]).unwrap_err().argument(), Some("word"));
        let mut bad = vec![0u8; 12];
        bad[3] = 2;
        assert_eq!(code.unsatisfied_checks(&bad).unwrap_err().argument(), Some("word"));
    }
}
