use crate::alignment::engine::AlignError;
use crate::utils::validation::MAX_MATRIX_CELLS;

/// Predecessor chosen for a cell of the pointer matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Direction {
    /// Never written; boundary cells keep this value
    #[default]
    Unset = 0,
    /// Match or mismatch, consumes one position of each sequence
    Diag = 1,
    /// Consumes a position of the column sequence (sequence 1)
    Left = 2,
    /// Consumes a position of the row sequence (sequence 2)
    Up = 3,
}

/// Dense row-major 2D grid
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Allocate a `rows × cols` matrix with every cell set to `fill`
    ///
    /// # Errors
    ///
    /// Returns `AlignError::Allocation` if the cell count overflows, exceeds
    /// `MAX_MATRIX_CELLS`, or the memory cannot be reserved.
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Self, AlignError> {
        let allocation_error = || AlignError::Allocation { rows, cols };

        let cells = rows.checked_mul(cols).ok_or_else(allocation_error)?;
        if cells > MAX_MATRIX_CELLS {
            return Err(allocation_error());
        }

        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| allocation_error())?;
        data.resize(cells, fill);

        Ok(Self { data, rows, cols })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Score matrix cell type
pub type ScoreMatrix = Matrix<i32>;

/// Pointer matrix, one byte per cell
pub type PointerMatrix = Matrix<Direction>;

/// Build a zero-initialized score matrix for sequences of length `len1`
/// (columns) and `len2` (rows): `(len2 + 1) × (len1 + 1)` cells.
///
/// # Errors
///
/// Returns `AlignError::Allocation` if the matrix cannot be allocated.
pub fn build_score_matrix(len1: usize, len2: usize) -> Result<ScoreMatrix, AlignError> {
    let (rows, cols) = dimensions(len1, len2)?;
    Matrix::new(rows, cols, 0)
}

/// Build a pointer matrix of the same shape, every cell `Direction::Unset`
///
/// # Errors
///
/// Returns `AlignError::Allocation` if the matrix cannot be allocated.
pub fn build_pointer_matrix(len1: usize, len2: usize) -> Result<PointerMatrix, AlignError> {
    let (rows, cols) = dimensions(len1, len2)?;
    Matrix::new(rows, cols, Direction::Unset)
}

fn dimensions(len1: usize, len2: usize) -> Result<(usize, usize), AlignError> {
    match (len2.checked_add(1), len1.checked_add(1)) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(AlignError::Allocation {
            rows: len2,
            cols: len1,
        }),
    }
}
