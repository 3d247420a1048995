use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseError {
    #[error("Invalid matrix dimensions")]
    InvalidDimensions,
    #[error("Row or column index out of bounds")]
    IndexOutOfBounds,
}

/// Sparse matrix over GF(2), indexed both by row and by column.
///
/// Each row keeps its column indices sorted and each column keeps its row
/// indices sorted, so iteration order depends only on the set of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mod2Sparse {
    n_rows: usize,
    n_cols: usize,
    row_entries: Vec<Vec<usize>>,
    col_entries: Vec<Vec<usize>>,
}

impl Mod2Sparse {
    pub fn allocate(n_rows: usize, n_cols: usize) -> Result<Self, SparseError> {
        if n_rows == 0 || n_cols == 0 {
            return Err(SparseError::InvalidDimensions);
        }

        Ok(Self {
            n_rows,
            n_cols,
            row_entries: vec![Vec::new(); n_rows],
            col_entries: vec![Vec::new(); n_cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.n_rows
    }
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    pub fn find(&self, row: usize, col: usize) -> bool {
        self.row_entries
            .get(row)
            .is_some_and(|cols| cols.binary_search(&col).is_ok())
    }

    /// Insert a 1 at (`row`, `col`). Inserting an existing entry is a no-op.
    pub fn insert(&mut self, row: usize, col: usize) -> Result<(), SparseError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(SparseError::IndexOutOfBounds);
        }

        if let Err(pos) = self.row_entries[row].binary_search(&col) {
            self.row_entries[row].insert(pos, col);
            let col_pos = self.col_entries[col]
                .binary_search(&row)
                .unwrap_or_else(|x| x);
            self.col_entries[col].insert(col_pos, row);
        }

        Ok(())
    }

    /// Column indices of the entries in `row`, ascending.
    pub fn entries_in_row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row_entries[row].iter().copied()
    }

    /// Row indices of the entries in `col`, ascending.
    pub fn entries_in_col(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        self.col_entries[col].iter().copied()
    }

    pub fn row_weight(&self, row: usize) -> usize {
        self.row_entries[row].len()
    }

    pub fn col_weight(&self, col: usize) -> usize {
        self.col_entries[col].len()
    }

    pub fn count_ones(&self) -> usize {
        self.row_entries.iter().map(Vec::len).sum()
    }
}
