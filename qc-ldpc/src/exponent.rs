use crate::circulant::add_mod;
use crate::{check_lifting, lifted_len, QcLdpcError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Exponent matrix entry marking an all-zero block.
pub const SENTINEL: i64 = -1;

/// Upper bound on redraw passes when removing 4-cycles.
const MAX_CYCLE_PASSES: usize = 10;

/// Rectangular exponent (base) matrix of a QC-LDPC code.
///
/// Entries are either [`SENTINEL`] or a non-negative circulant shift. The
/// shape and entry range are checked on construction; whether the shifts
/// fit a particular lifting factor is checked by [`ExponentMatrix::check_lifting`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")
)]
pub struct ExponentMatrix {
    n_rows: usize,
    n_cols: usize,
    entries: Vec<i64>,
}

/// Four present blocks at the corners of a rectangle whose shifts cancel
/// modulo the lifting factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCycle {
    pub rows: (usize, usize),
    pub cols: (usize, usize),
}

impl ExponentMatrix {
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, QcLdpcError> {
        Self::from_slice(&rows)
    }

    /// Validate and copy borrowed rows.
    pub fn from_slice(rows: &[Vec<i64>]) -> Result<Self, QcLdpcError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(QcLdpcError::invalid(
                "E",
                "exponent matrix must have at least one row and one column",
            ));
        }

        let mut entries = Vec::with_capacity(n_rows * n_cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(QcLdpcError::invalid(
                    "E",
                    format!("row {} has {} entries, expected {}", r, row.len(), n_cols),
                ));
            }
            if let Some((c, &value)) = row.iter().enumerate().find(|&(_, &v)| v < SENTINEL) {
                return Err(QcLdpcError::invalid(
                    "E",
                    format!(
                        "entry ({}, {}) is {}; all entries in E must be integers >= -1",
                        r, c, value
                    ),
                ));
            }
            entries.extend_from_slice(row);
        }

        Ok(Self {
            n_rows,
            n_cols,
            entries,
        })
    }

    pub fn rows(&self) -> usize {
        self.n_rows
    }
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Raw entries of row `r`, sentinels included.
    pub fn row(&self, r: usize) -> &[i64] {
        &self.entries[r * self.n_cols..(r + 1) * self.n_cols]
    }

    /// Shift at (`r`, `c`), or `None` for an empty block or out-of-range index.
    pub fn shift(&self, r: usize, c: usize) -> Option<usize> {
        if r >= self.n_rows || c >= self.n_cols {
            return None;
        }
        usize::try_from(self.entries[r * self.n_cols + c]).ok()
    }

    /// Present blocks as `(row, col, shift)`, row-major.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.entries.iter().enumerate().filter_map(move |(i, &e)| {
            usize::try_from(e)
                .ok()
                .map(|shift| (i / self.n_cols, i % self.n_cols, shift))
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.entries
            .chunks(self.n_cols)
            .map(<[i64]>::to_vec)
            .collect()
    }

    /// Place `other` to the right of `self`.
    pub fn hstack(&self, other: &ExponentMatrix) -> Result<ExponentMatrix, QcLdpcError> {
        if self.n_rows != other.n_rows {
            return Err(QcLdpcError::invalid(
                "E",
                format!(
                    "cannot join exponent matrices with {} and {} rows",
                    self.n_rows, other.n_rows
                ),
            ));
        }

        let entries = (0..self.n_rows)
            .flat_map(|r| self.row(r).iter().chain(other.row(r)).copied())
            .collect();
        Ok(ExponentMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols + other.n_cols,
            entries,
        })
    }

    pub fn max_shift(&self) -> Option<usize> {
        self.iter_blocks().map(|(_, _, shift)| shift).max()
    }

    /// Smallest lifting factor every shift fits into.
    pub fn min_lifting(&self) -> usize {
        self.max_shift().map_or(1, |shift| shift + 1)
    }

    /// Fail unless every shift lies in `[0, n - 1]` and the lifted matrix
    /// dimensions fit in `usize`.
    pub fn check_lifting(&self, n: usize) -> Result<(), QcLdpcError> {
        check_lifting(n)?;
        lifted_len(n, self.n_rows)?;
        lifted_len(n, self.n_cols)?;
        match self.iter_blocks().find(|&(_, _, shift)| shift >= n) {
            Some((r, c, shift)) => Err(QcLdpcError::invalid(
                "E",
                format!(
                    "entry ({}, {}) = {} is not a valid shift for N = {}; shifts must be in [0, {}]",
                    r,
                    c,
                    shift,
                    n,
                    n - 1
                ),
            )),
            None => Ok(()),
        }
    }

    /// Present blocks per row, the row weight of each block row of H.
    pub fn row_degrees(&self) -> Vec<usize> {
        (0..self.n_rows)
            .map(|r| self.row(r).iter().filter(|&&e| e != SENTINEL).count())
            .collect()
    }

    /// Present blocks per column, the column weight of each block column of H.
    pub fn col_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.n_cols];
        for (_, c, _) in self.iter_blocks() {
            degrees[c] += 1;
        }
        degrees
    }

    /// `(j, k)` when every column has `j` present blocks and every row has `k`.
    pub fn regularity(&self) -> Option<(usize, usize)> {
        let rows = self.row_degrees();
        let cols = self.col_degrees();
        let k = rows[0];
        let j = cols[0];
        (rows.iter().all(|&d| d == k) && cols.iter().all(|&d| d == j)).then_some((j, k))
    }

    /// Rectangles of present blocks that become length-4 cycles in the
    /// Tanner graph of H once lifted by `n`.
    pub fn four_cycles(&self, n: usize) -> Vec<FourCycle> {
        let mut cycles = Vec::new();
        if n == 0 {
            return cycles;
        }

        for r1 in 0..self.n_rows {
            for r2 in r1 + 1..self.n_rows {
                for c1 in 0..self.n_cols {
                    for c2 in c1 + 1..self.n_cols {
                        let corners = (
                            self.shift(r1, c1),
                            self.shift(r1, c2),
                            self.shift(r2, c1),
                            self.shift(r2, c2),
                        );
                        if let (Some(a), Some(b), Some(c), Some(d)) = corners {
                            if add_mod(a % n, d % n, n) == add_mod(b % n, c % n, n) {
                                cycles.push(FourCycle {
                                    rows: (r1, r2),
                                    cols: (c1, c2),
                                });
                            }
                        }
                    }
                }
            }
        }

        cycles
    }

    /// Random fully populated exponent matrix with shifts in `[0, n - 1]`.
    ///
    /// The lifted code is (`n_rows`, `n_cols`)-regular. With `no_4cycle` the
    /// corner closing each 4-cycle is redrawn for a bounded number of
    /// passes; cycles can remain when `n` is too small to avoid them. The
    /// same seed always produces the same matrix.
    pub fn random_regular(
        n_rows: usize,
        n_cols: usize,
        n: usize,
        seed: u64,
        no_4cycle: bool,
    ) -> Result<Self, QcLdpcError> {
        check_lifting(n)?;
        if n_rows == 0 || n_cols == 0 {
            return Err(QcLdpcError::invalid(
                "E",
                "exponent matrix must have at least one row and one column",
            ));
        }
        let bound = i64::try_from(n).map_err(|_| {
            QcLdpcError::invalid("N", format!("lifting factor {} does not fit a shift", n))
        })?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(10).wrapping_add(1));
        let mut matrix = ExponentMatrix {
            n_rows,
            n_cols,
            entries: (0..n_rows * n_cols)
                .map(|_| rng.gen_range(0..bound))
                .collect(),
        };

        if no_4cycle {
            let mut redrawn = 0;
            for _pass in 0..MAX_CYCLE_PASSES {
                let cycles = matrix.four_cycles(n);
                if cycles.is_empty() {
                    break;
                }
                for cycle in cycles {
                    let (r, c) = (cycle.rows.1, cycle.cols.1);
                    matrix.entries[r * n_cols + c] = rng.gen_range(0..bound);
                    redrawn += 1;
                }
            }

            let remaining = matrix.four_cycles(n).len();
            if remaining > 0 {
                warn!(remaining, lifting = n, "could not remove all cycles of length four");
            }
            debug!(redrawn, "redrew shifts to break cycles of length four");
        }

        Ok(matrix)
    }
}

impl TryFrom<Vec<Vec<i64>>> for ExponentMatrix {
    type Error = QcLdpcError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        ExponentMatrix::new(rows)
    }
}

impl From<ExponentMatrix> for Vec<Vec<i64>> {
    fn from(matrix: ExponentMatrix) -> Self {
        matrix.to_rows()
    }
}
