use crate::{check_lifting, Mod2Dense, QcLdpcError};

/// Circulant permutation matrix of a given size and right shift.
///
/// Row `i` holds its single 1 at column `(i + shift) mod size`. The value is
/// kept in this compact form and only expanded by [`Circulant::to_dense`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Circulant {
    size: usize,
    shift: usize,
}

impl Circulant {
    /// Validate `n >= 1` and `0 <= e <= n - 1`.
    pub fn new(n: usize, e: i64) -> Result<Self, QcLdpcError> {
        check_lifting(n)?;

        let shift = usize::try_from(e)
            .ok()
            .filter(|&shift| shift < n)
            .ok_or_else(|| {
                QcLdpcError::invalid(
                    "e",
                    format!("shift e must be an integer in [0, {}], got {}", n - 1, e),
                )
            })?;

        Ok(Self { size: n, shift })
    }

    pub fn identity(n: usize) -> Result<Self, QcLdpcError> {
        Self::new(n, 0)
    }

    pub fn size(&self) -> usize {
        self.size
    }
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Column of the 1 in `row`.
    pub fn column_of(&self, row: usize) -> usize {
        add_mod(row % self.size, self.shift, self.size)
    }

    /// Row of the 1 in `col`.
    pub fn row_of(&self, col: usize) -> usize {
        add_mod(col % self.size, self.transpose().shift, self.size)
    }

    pub fn to_dense(&self) -> Result<Mod2Dense, QcLdpcError> {
        let mut matrix = Mod2Dense::allocate(self.size, self.size)?;
        for row in 0..self.size {
            matrix.set(row, self.column_of(row), true)?;
        }
        Ok(matrix)
    }

    /// Product `self * other`. Shifts add modulo the size.
    pub fn compose(&self, other: &Circulant) -> Result<Circulant, QcLdpcError> {
        if self.size != other.size {
            return Err(QcLdpcError::invalid(
                "other",
                format!(
                    "cannot multiply circulants of size {} and {}",
                    self.size, other.size
                ),
            ));
        }
        Ok(Circulant {
            size: self.size,
            shift: add_mod(self.shift, other.shift, self.size),
        })
    }

    /// Transpose, which for a permutation is also the inverse.
    pub fn transpose(&self) -> Circulant {
        Circulant {
            size: self.size,
            shift: (self.size - self.shift) % self.size,
        }
    }
}

/// `(a + b) mod size` for `a, b < size` without overflowing `usize`.
pub(crate) fn add_mod(a: usize, b: usize, size: usize) -> usize {
    if a >= size - b {
        a - (size - b)
    } else {
        a + b
    }
}

/// The `n x n` identity matrix circularly shifted right by `e` positions.
pub fn circulant(n: usize, e: i64) -> Result<Mod2Dense, QcLdpcError> {
    Circulant::new(n, e)?.to_dense()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_by_one() {
        let cpm = circulant(4, 1).unwrap();
        assert_eq!(
            cpm.to_rows(),
            vec![
                vec![0, 1, 0, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 0, 1],
                vec![1, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn test_zero_shift_is_identity() {
        for n in [1, 2, 7, 65] {
            let cpm = circulant(n, 0).unwrap();
            assert_eq!(cpm.count_ones(), n);
            assert!((0..n).all(|i| cpm.get(i, i)));
        }
    }

    #[test]
    fn test_single_entry_block() {
        assert_eq!(circulant(1, 0).unwrap().to_rows(), vec![vec![1]]);
    }

    #[test]
    fn test_invalid_arguments() {
        let err = circulant(0, 0).unwrap_err();
        assert_eq!(err.argument(), Some("N"));

        for e in [-1, 4, 100, i64::MIN] {
            let err = circulant(4, e).unwrap_err();
            assert_eq!(err.argument(), Some("e"));
            assert!(err.to_string().contains("[0, 3]"));
        }
    }

    #[test]
    fn test_row_and_column_lookup() {
        let cpm = Circulant::new(5, 3).unwrap();
        for row in 0..5 {
            assert_eq!(cpm.row_of(cpm.column_of(row)), row);
        }
        assert_eq!(cpm.column_of(4), 2);
        assert_eq!(cpm.row_of(0), 2);
    }

    #[test]
    fn test_compose_follows_rows() {
        let a = Circulant::new(6, 4).unwrap();
        let b = Circulant::new(6, 5).unwrap();

        // Row i of a*b picks row column_of_a(i) of b.
        let composed = a.compose(&b).unwrap();
        assert_eq!(composed.shift(), 3);
        for i in 0..6 {
            assert_eq!(composed.column_of(i), b.column_of(a.column_of(i)));
        }

        let other = Circulant::new(7, 1).unwrap();
        assert_eq!(a.compose(&other).unwrap_err().argument(), Some("other"));
    }

    #[test]
    fn test_transpose_is_inverse() {
        let cpm = Circulant::new(9, 2).unwrap();
        let dense = cpm.to_dense().unwrap();
        let transposed = cpm.transpose().to_dense().unwrap();

        for i in 0..9 {
            for j in 0..9 {
                assert_eq!(transposed.get(i, j), dense.get(j, i));
            }
        }
        assert_eq!(cpm.compose(&cpm.transpose()).unwrap(), Circulant::identity(9).unwrap());
        assert_eq!(Circulant::identity(9).unwrap().transpose().shift(), 0);
    }

    #[test]
    fn test_index_arithmetic_near_usize_max() {
        let cpm = Circulant::new(usize::MAX, i64::MAX).unwrap();
        let shift = i64::MAX as usize;
        let row = usize::MAX - 1;

        let col = cpm.column_of(row);
        assert_eq!(col, row - (usize::MAX - shift));
        assert_eq!(cpm.row_of(col), row);
        assert_eq!(cpm.compose(&cpm).unwrap().shift(), usize::MAX - 1);
    }
}
