use thiserror::Error;

const WORD_BITS: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseError {
    #[error("Invalid matrix dimensions")]
    InvalidDimensions,
    #[error("Shape mismatch: {0}x{1} against {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),
    #[error("Index out of bounds")]
    IndexOutOfBounds,
}

/// Dense matrix over GF(2).
///
/// Rows are packed into `u64` words, least significant bit first. Bits past
/// `n_cols` in the last word of a row are always zero, so derived equality
/// compares matrices by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mod2Dense {
    n_rows: usize,
    n_cols: usize,
    words_per_row: usize,
    data: Vec<u64>,
}

impl Mod2Dense {
    /// Allocate an all-zero `n_rows` x `n_cols` matrix.
    pub fn allocate(n_rows: usize, n_cols: usize) -> Result<Self, DenseError> {
        if n_rows == 0 || n_cols == 0 {
            return Err(DenseError::InvalidDimensions);
        }

        let words_per_row = n_cols.div_ceil(WORD_BITS);
        Ok(Self {
            n_rows,
            n_cols,
            words_per_row,
            data: vec![0u64; n_rows * words_per_row],
        })
    }

    pub fn rows(&self) -> usize {
        self.n_rows
    }
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Out-of-range positions read as zero.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.n_rows || col >= self.n_cols {
            return false;
        }
        let (word, mask) = self.locate(row, col);
        self.data[word] & mask != 0
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), DenseError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(DenseError::IndexOutOfBounds);
        }
        let (word, mask) = self.locate(row, col);
        if value {
            self.data[word] |= mask;
        } else {
            self.data[word] &= !mask;
        }
        Ok(())
    }

    fn locate(&self, row: usize, col: usize) -> (usize, u64) {
        (
            row * self.words_per_row + col / WORD_BITS,
            1u64 << (col % WORD_BITS),
        )
    }

    fn row_words(&self, row: usize) -> &[u64] {
        let start = row * self.words_per_row;
        &self.data[start..start + self.words_per_row]
    }

    /// Columns holding a 1 in `row`, in increasing order.
    pub fn ones_in_row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row_words(row)
            .iter()
            .enumerate()
            .flat_map(|(index, &word)| {
                let mut bits = word;
                std::iter::from_fn(move || {
                    if bits == 0 {
                        return None;
                    }
                    let bit = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(index * WORD_BITS + bit)
                })
            })
    }

    pub fn row_weight(&self, row: usize) -> usize {
        self.row_words(row)
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    pub fn col_weight(&self, col: usize) -> usize {
        (0..self.n_rows).filter(|&row| self.get(row, col)).count()
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// The whole matrix as rows of 0/1 integers.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.n_rows)
            .map(|row| (0..self.n_cols).map(|col| self.get(row, col) as u8).collect())
            .collect()
    }

    /// Concatenate blocks left to right. All blocks must share a row count.
    pub fn hstack(blocks: &[Mod2Dense]) -> Result<Mod2Dense, DenseError> {
        let first = blocks.first().ok_or(DenseError::InvalidDimensions)?;
        let n_cols = blocks.iter().map(Mod2Dense::cols).sum();
        let mut result = Mod2Dense::allocate(first.n_rows, n_cols)?;

        let mut offset = 0;
        for block in blocks {
            if block.n_rows != first.n_rows {
                return Err(DenseError::ShapeMismatch(
                    first.n_rows,
                    first.n_cols,
                    block.n_rows,
                    block.n_cols,
                ));
            }
            for row in 0..block.n_rows {
                for col in block.ones_in_row(row) {
                    result.set(row, offset + col, true)?;
                }
            }
            offset += block.n_cols;
        }

        Ok(result)
    }

    /// Concatenate blocks top to bottom. All blocks must share a column count.
    pub fn vstack(blocks: &[Mod2Dense]) -> Result<Mod2Dense, DenseError> {
        let first = blocks.first().ok_or(DenseError::InvalidDimensions)?;
        let n_rows = blocks.iter().map(Mod2Dense::rows).sum();
        let mut result = Mod2Dense::allocate(n_rows, first.n_cols)?;

        let mut offset = 0;
        for block in blocks {
            if block.n_cols != first.n_cols {
                return Err(DenseError::ShapeMismatch(
                    first.n_rows,
                    first.n_cols,
                    block.n_rows,
                    block.n_cols,
                ));
            }
            // Same column count means same row stride, so whole rows copy over.
            let start = offset * result.words_per_row;
            result.data[start..start + block.data.len()].copy_from_slice(&block.data);
            offset += block.n_rows;
        }

        Ok(result)
    }

    /// Copy out the `n_rows` x `n_cols` sub-matrix whose top-left corner is
    /// at (`row0`, `col0`).
    pub fn block(
        &self,
        row0: usize,
        col0: usize,
        n_rows: usize,
        n_cols: usize,
    ) -> Result<Mod2Dense, DenseError> {
        let fits = |start: usize, len: usize, limit: usize| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };
        if !fits(row0, n_rows, self.n_rows) || !fits(col0, n_cols, self.n_cols) {
            return Err(DenseError::IndexOutOfBounds);
        }

        let mut result = Mod2Dense::allocate(n_rows, n_cols)?;
        for row in 0..n_rows {
            for col in self.ones_in_row(row0 + row) {
                if (col0..col0 + n_cols).contains(&col) {
                    result.set(row, col - col0, true)?;
                }
            }
        }
        Ok(result)
    }
}
