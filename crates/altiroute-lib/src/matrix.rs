//! Flat, dimension-checked square matrices backing the all-pairs tables.

use serde::Serialize;

use crate::graph::{LocationId, Weight};

/// `N×N` matrix stored row-major in a single buffer with an explicit stride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquareMatrix<T> {
    dimension: usize,
    cells: Vec<T>,
}

/// Best known distance per pair; `None` means no finite path is known.
pub type DistanceMatrix = SquareMatrix<Option<Weight>>;

/// Location preceding the destination on the best known path; `None` means
/// no predecessor is known.
pub type PredecessorMatrix = SquareMatrix<Option<LocationId>>;

impl<T: Clone> SquareMatrix<T> {
    /// Allocate a `dimension × dimension` matrix filled with `value`.
    pub fn filled(dimension: usize, value: T) -> Self {
        Self {
            dimension,
            cells: vec![value; dimension * dimension],
        }
    }
}

impl<T> SquareMatrix<T> {
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether `(row, col)` addresses a cell of this matrix.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.dimension && col < self.dimension
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if self.contains(row, col) {
            self.cells.get(self.offset(row, col))
        } else {
            None
        }
    }

    /// Borrow one row of the matrix.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.dimension;
        &self.cells[start..start + self.dimension]
    }

    /// Iterate every row of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.dimension.max(1))
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.dimension + col
    }
}

impl<T> std::ops::Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {0}x{0} matrix",
            self.dimension
        );
        &self.cells[self.offset(row, col)]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for SquareMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {0}x{0} matrix",
            self.dimension
        );
        let index = self.offset(row, col);
        &mut self.cells[index]
    }
}
