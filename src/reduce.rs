//! In-place reduction of a [`Matrix`] to reduced row
//! echelon form by Gauss-Jordan elimination.

use crate::Matrix;

impl Matrix {
    // Among rows `pivot..nrows`, the row holding the
    // largest-magnitude entry in column `pivot`.
    fn pivot_search(&self, pivot: usize) -> usize {
        let mut best = pivot;
        let mut best_magnitude = self.data[pivot * self.ncols + pivot].abs();
        for row in pivot + 1..self.nrows {
            let magnitude = self.data[row * self.ncols + pivot].abs();
            if magnitude > best_magnitude {
                best = row;
                best_magnitude = magnitude;
            }
        }
        best
    }

    fn divide_row(&mut self, row: usize, divisor: f64) {
        for value in self.row_mut(row) {
            *value /= divisor;
        }
    }

    // dst -= ratio * src, element-wise across all columns.
    fn sub_scaled_row(&mut self, dst: usize, src: usize, ratio: f64) {
        if ratio == 0.0 {
            return;
        }
        for col in 0..self.ncols {
            let value = self.data[src * self.ncols + col];
            self.data[dst * self.ncols + col] -= ratio * value;
        }
    }

    /// Reduce this matrix, in place, to reduced row echelon
    /// form.
    ///
    /// The algorithm is Gauss-Jordan elimination over the
    /// main diagonal with partial pivoting:
    ///
    /// 1. For each pivot position `i` up to
    ///    `min(nrows, ncols)`, the row with the
    ///    largest-magnitude entry in column `i` (among rows
    ///    `i..`) is swapped into place, the pivot row is
    ///    divided by its pivot entry, and every row below
    ///    has its column-`i` entry eliminated.  A pivot
    ///    column whose remaining entries are all exactly
    ///    zero is left as is.
    /// 2. Working back up, every entry above each pivot is
    ///    eliminated.  For rows past the last column (a tall
    ///    matrix), the pivot column is clamped to the last
    ///    column.
    /// 3. All-zero rows are moved to the bottom via
    ///    [`move_zero_rows_to_end`](Matrix::move_zero_rows_to_end).
    ///
    /// Pivots are taken on the main diagonal.  A matrix
    /// whose pivot columns do not line up with the diagonal
    /// (for example, a leading column of zeros) may not
    /// reach the canonical reduced form; within the
    /// diagonal-pivot family this is the complete
    /// reduction.
    ///
    /// All zero tests compare exactly against `0.0`; there
    /// is no epsilon anywhere.  Arithmetic is plain IEEE
    /// double precision.
    ///
    /// # Examples
    ///
    /// A matrix needing a row interchange to expose its
    /// pivots:
    ///
    /// ```
    /// let mut m = rref::Matrix::from_rows(vec![
    ///     vec![0.0, -1.0],
    ///     vec![1.0, 0.0],
    /// ]).unwrap();
    /// m.rref();
    /// assert_eq!(m.row(0), [1.0, 0.0]);
    /// assert_eq!(m.row(1), [0.0, 1.0]);
    /// ```
    ///
    /// A wide system:
    ///
    /// ```
    /// let mut m = rref::Matrix::from_rows(vec![
    ///     vec![2.0, 0.0, 5.0],
    ///     vec![0.0, 1.0, 6.0],
    /// ]).unwrap();
    /// m.rref();
    /// assert_eq!(m.row(0), [1.0, 0.0, 2.5]);
    /// assert_eq!(m.row(1), [0.0, 1.0, 6.0]);
    /// ```
    pub fn rref(&mut self) {
        let pivots = self.nrows.min(self.ncols);

        // Forward elimination.
        for i in 0..pivots {
            let best = self.pivot_search(i);
            self.swap_rows_unchecked(i, best);

            let diagonal = self.data[i * self.ncols + i];
            if diagonal != 0.0 {
                self.divide_row(i, diagonal);
            }

            for j in i + 1..self.nrows {
                let ratio = self.data[j * self.ncols + i];
                self.sub_scaled_row(j, i, ratio);
            }
        }

        // Backward elimination.  The pivot column is clamped
        // for rows past the last column.
        for i in (1..self.nrows).rev() {
            let pivot_col = i.min(self.ncols - 1);
            for j in 0..i {
                let ratio = self.data[j * self.ncols + pivot_col];
                self.sub_scaled_row(j, i, ratio);
            }
        }

        self.move_zero_rows_to_end();
    }
}
