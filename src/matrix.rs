use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// A dense matrix of [`f64`](std::primitive::f64) values.
///
/// Storage is a single owned buffer in row-major order:
/// element `(row, col)` lives at `row * ncols + col`.
/// Both dimensions are guaranteed non-zero for every value
/// of this type, and the buffer length always equals
/// `nrows * ncols`.
///
/// A `Matrix` never shares its buffer.  Duplication is
/// explicit, either via [`Clone`] or via
/// [`copy_from`](Matrix::copy_from), which requires the
/// shapes to agree.
///
/// # Examples
///
/// ## Using rust code
///
/// ```
/// let mut m = rref::Matrix::new(2, 2).unwrap();
/// m.set(0, 1, -1.0).unwrap();
/// m.set(1, 0, 1.0).unwrap();
/// assert_eq!(m.get(0, 1).unwrap(), -1.0);
/// ```
///
/// ## In `YAML` input
///
/// ```
/// let yaml = "
/// nrows: 2
/// ncols: 3
/// data: [2, 0, 5,
///        0, 1, 6]
/// ";
/// let m = rref::loads(yaml).unwrap();
/// assert_eq!(m.get(0, 2).unwrap(), 5.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixTrampoline")]
#[serde(into = "MatrixTrampoline")]
pub struct Matrix {
    pub(crate) data: Vec<f64>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

impl Matrix {
    /// Create a matrix of the given shape, filled with `0.0`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidDimensions`] if either `nrows`
    /// or `ncols` is zero.  No allocation occurs in that case.
    pub fn new(nrows: usize, ncols: usize) -> Result<Self, MatrixError> {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::InvalidDimensions(format!(
                "cannot create a matrix with dimensions {nrows} x {ncols}"
            )));
        }
        Ok(Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        })
    }

    /// Create a matrix from nested row vectors.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidDimensions`] if `rows` is empty
    /// or its first row is empty;
    /// [`MatrixError::ShapeMismatch`] if the rows have
    /// unequal lengths.
    ///
    /// # Example
    ///
    /// ```
    /// let m = rref::Matrix::from_rows(vec![
    ///     vec![2.0, 0.0, 5.0],
    ///     vec![0.0, 1.0, 6.0],
    /// ]).unwrap();
    /// assert_eq!((m.nrows(), m.ncols()), (2, 3));
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::InvalidDimensions(format!(
                "cannot create a matrix with dimensions {nrows} x {ncols}"
            )));
        }
        let mut data = Vec::with_capacity(nrows * ncols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(MatrixError::ShapeMismatch(format!(
                    "row {index} has {} columns, expected {ncols}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self { data, nrows, ncols })
    }

    /// The number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// The number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// View the row-major buffer as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.nrows {
            return Err(MatrixError::IndexOutOfRange(format!(
                "row index {row} is out of range for {} rows",
                self.nrows
            )));
        }
        if col >= self.ncols {
            return Err(MatrixError::IndexOutOfRange(format!(
                "column index {col} is out of range for {} columns",
                self.ncols
            )));
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<(), MatrixError> {
        if row >= self.nrows {
            return Err(MatrixError::IndexOutOfRange(format!(
                "row index {row} is out of range for {} rows",
                self.nrows
            )));
        }
        Ok(())
    }

    /// Read the element at `(row, col)`.
    ///
    /// Bounds are strict: `row == nrows` or `col == ncols`
    /// is already out of range.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is
    /// at or past the matrix extent.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.ncols + col])
    }

    /// Write `value` to the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is
    /// at or past the matrix extent.  The matrix is not
    /// modified in that case.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        self.check_index(row, col)?;
        self.data[row * self.ncols + col] = value;
        Ok(())
    }

    /// Read the element at `(row, col)` with no bounds check.
    ///
    /// This is the unchecked access mode: it compiles to a
    /// bare load.
    ///
    /// # Safety
    ///
    /// `row < self.nrows()` and `col < self.ncols()` must
    /// hold.  Violating either is undefined behavior.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        *self.data.get_unchecked(row * self.ncols + col)
    }

    /// Write `value` to `(row, col)` with no bounds check.
    ///
    /// # Safety
    ///
    /// `row < self.nrows()` and `col < self.ncols()` must
    /// hold.  Violating either is undefined behavior.
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        *self.data.get_unchecked_mut(row * self.ncols + col) = value;
    }

    /// View one row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.ncols;
        let end = start + self.ncols;
        &self.data[start..end]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.ncols;
        let end = start + self.ncols;
        &mut self.data[start..end]
    }

    // Callers have already validated both indices.
    pub(crate) fn swap_rows_unchecked(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.ncols {
            self.data.swap(a * self.ncols + col, b * self.ncols + col);
        }
    }

    /// Exchange the contents of rows `a` and `b`.
    ///
    /// Swapping a row with itself is a no-op.  Applying the
    /// same swap twice restores the matrix bit for bit.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either row index
    /// is at or past the row count.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<(), MatrixError> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.swap_rows_unchecked(a, b);
        Ok(())
    }

    // Exact comparison against 0.0, no tolerance.
    pub(crate) fn is_zero_row(&self, row: usize) -> bool {
        self.row(row).iter().all(|value| *value == 0.0)
    }

    /// Relocate all-zero rows to the bottom of the matrix.
    ///
    /// Scanning from the top, each zero row is swapped with
    /// the first non-zero row below it; the scan stops as
    /// soon as a zero row has nothing non-zero below it.
    /// Non-zero rows keep their relative order.  A row is
    /// "zero" only if every element compares exactly equal
    /// to `0.0`.
    ///
    /// # Example
    ///
    /// ```
    /// let mut m = rref::Matrix::from_rows(vec![
    ///     vec![0.0, 0.0],
    ///     vec![3.0, 4.0],
    /// ]).unwrap();
    /// m.move_zero_rows_to_end();
    /// assert_eq!(m.row(0), [3.0, 4.0]);
    /// assert_eq!(m.row(1), [0.0, 0.0]);
    /// ```
    pub fn move_zero_rows_to_end(&mut self) {
        let mut top = 0;
        while top < self.nrows {
            if self.is_zero_row(top) {
                match (top + 1..self.nrows).find(|&row| !self.is_zero_row(row)) {
                    Some(row) => self.swap_rows_unchecked(top, row),
                    // This row and everything below it are zero.
                    None => break,
                }
            }
            top += 1;
        }
    }

    /// Overwrite this matrix with the values of `source`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::ShapeMismatch`] unless both dimensions
    /// agree exactly.  The destination is untouched in that
    /// case.
    pub fn copy_from(&mut self, source: &Matrix) -> Result<(), MatrixError> {
        if self.nrows != source.nrows || self.ncols != source.ncols {
            return Err(MatrixError::ShapeMismatch(format!(
                "cannot copy a {} x {} matrix into a {} x {} matrix",
                source.nrows, source.ncols, self.nrows, self.ncols
            )));
        }
        self.data.copy_from_slice(&source.data);
        Ok(())
    }

    /// Return a representation of the matrix as a string.
    ///
    /// The format is in YAML: a mapping of `nrows`, `ncols`,
    /// and the row-major `data` sequence.
    ///
    /// # Error
    ///
    /// Will return an error if `serde_yaml::to_string`
    /// returns an error.
    pub fn as_string(&self) -> Result<String, MatrixError> {
        match serde_yaml::to_string(self) {
            Ok(string) => Ok(string),
            Err(e) => Err(e.into()),
        }
    }

    /// Return a representation of the matrix as a string.
    ///
    /// The format is in JSON: an object of `nrows`, `ncols`,
    /// and the row-major `data` array.
    ///
    /// # Error
    ///
    /// Will return an error if `serde_json::to_string`
    /// returns an error.
    #[cfg(feature = "json")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
    pub fn as_json_string(&self) -> Result<String, MatrixError> {
        match serde_json::to_string(self) {
            Ok(string) => Ok(string),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Display for Matrix {
    /// Render a bordered grid, one line per row, each cell
    /// right-aligned in fixed point with 5 decimal digits.
    ///
    /// The layout is a display convenience, not a machine
    /// contract; only the numeric values are meaningful.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.nrows {
            let (left, right) = if self.nrows == 1 {
                ('│', '│')
            } else if row == 0 {
                ('┌', '┐')
            } else if row == self.nrows - 1 {
                ('└', '┘')
            } else {
                ('│', '│')
            };
            write!(f, "{left}")?;
            for value in self.row(row) {
                write!(f, " {value:>9.5}")?;
            }
            writeln!(f, " {right}")?;
        }
        Ok(())
    }
}

/// The raw serialized form of a [`Matrix`].
///
/// Deserializing through this type lets us re-validate the
/// shape invariant before a `Matrix` can exist.
#[derive(Clone, Serialize, Deserialize)]
struct MatrixTrampoline {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixTrampoline> for Matrix {
    type Error = MatrixError;

    fn try_from(value: MatrixTrampoline) -> Result<Self, Self::Error> {
        if value.nrows == 0 || value.ncols == 0 {
            return Err(MatrixError::InvalidDimensions(format!(
                "cannot create a matrix with dimensions {} x {}",
                value.nrows, value.ncols
            )));
        }
        if value.data.len() != value.nrows * value.ncols {
            return Err(MatrixError::ShapeMismatch(format!(
                "a {} x {} matrix requires {} values, got {}",
                value.nrows,
                value.ncols,
                value.nrows * value.ncols,
                value.data.len()
            )));
        }
        Ok(Self {
            data: value.data,
            nrows: value.nrows,
            ncols: value.ncols,
        })
    }
}

impl From<Matrix> for MatrixTrampoline {
    fn from(value: Matrix) -> Self {
        Self {
            nrows: value.nrows,
            ncols: value.ncols,
            data: value.data,
        }
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::*;

    #[test]
    fn every_cell_is_addressable() {
        let mut m = Matrix::new(3, 4).unwrap();
        for row in 0..3 {
            for col in 0..4 {
                m.set(row, col, (row * 4 + col) as f64).unwrap();
            }
        }
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(m.get(row, col).unwrap(), (row * 4 + col) as f64);
            }
        }
        assert_eq!(m.as_slice().len(), 12);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            Matrix::new(0, 5),
            Err(MatrixError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Matrix::new(5, 0),
            Err(MatrixError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Matrix::new(0, 0),
            Err(MatrixError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn one_past_the_end_is_out_of_range() {
        let mut m = Matrix::new(2, 3).unwrap();
        assert!(matches!(
            m.get(2, 0),
            Err(MatrixError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            m.get(0, 3),
            Err(MatrixError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            m.set(2, 0, 1.0),
            Err(MatrixError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            m.set(0, 3, 1.0),
            Err(MatrixError::IndexOutOfRange(_))
        ));
        // A rejected write leaves the matrix untouched.
        assert!(m.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn unchecked_access_in_bounds() {
        let mut m = Matrix::new(2, 2).unwrap();
        unsafe {
            m.set_unchecked(1, 0, 7.0);
            assert_eq!(m.get_unchecked(1, 0), 7.0);
        }
        assert_eq!(m.get(1, 0).unwrap(), 7.0);
    }

    #[test]
    fn swap_rows_is_an_involution() {
        let mut m = Matrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        let original = m.clone();
        m.swap_rows(0, 2).unwrap();
        assert_ne!(m, original);
        m.swap_rows(0, 2).unwrap();
        assert_eq!(m, original);
    }

    #[test]
    fn swap_row_with_itself_is_a_noop() {
        let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let original = m.clone();
        m.swap_rows(1, 1).unwrap();
        assert_eq!(m, original);
    }

    #[test]
    fn swap_rows_bad_index() {
        let mut m = Matrix::new(2, 2).unwrap();
        assert!(matches!(
            m.swap_rows(0, 2),
            Err(MatrixError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn zero_row_relocation_is_stable() {
        let mut m = Matrix::from_rows(vec![
            vec![0.0, 0.0],
            vec![1.0, 2.0],
            vec![0.0, 0.0],
            vec![3.0, 4.0],
        ])
        .unwrap();
        m.move_zero_rows_to_end();
        assert_eq!(m.row(0), [1.0, 2.0]);
        assert_eq!(m.row(1), [3.0, 4.0]);
        assert!(m.is_zero_row(2));
        assert!(m.is_zero_row(3));
    }

    #[test]
    fn relocation_of_all_zero_matrix() {
        let mut m = Matrix::new(3, 3).unwrap();
        m.move_zero_rows_to_end();
        assert!(m.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn a_row_one_ulp_from_zero_is_not_a_zero_row() {
        use float_next_after::NextAfter;
        let tiny = 0.0_f64.next_after(f64::INFINITY);
        let mut m = Matrix::new(2, 2).unwrap();
        m.set(0, 0, tiny).unwrap();
        assert!(!m.is_zero_row(0));
        assert!(m.is_zero_row(1));
        m.move_zero_rows_to_end();
        assert_eq!(m.get(0, 0).unwrap(), tiny);
    }

    #[test]
    fn copy_requires_matching_shapes() {
        let source = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let mut dest = Matrix::new(2, 2).unwrap();
        dest.copy_from(&source).unwrap();
        assert_eq!(dest, source);

        let mut wrong = Matrix::new(2, 3).unwrap();
        assert!(matches!(
            wrong.copy_from(&source),
            Err(MatrixError::ShapeMismatch(_))
        ));
        // Failed copy leaves the destination untouched.
        assert!(wrong.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(matches!(
            Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MatrixError::ShapeMismatch(_))
        ));
        assert!(matches!(
            Matrix::from_rows(vec![]),
            Err(MatrixError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn display_renders_every_value() {
        let m = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let rendered = m.to_string();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.starts_with('┌'));
        assert!(rendered.contains("1.00000"));
        assert!(rendered.contains("0.00000"));
        assert!(rendered.contains('└'));
    }

    #[test]
    fn display_single_row() {
        let m = Matrix::from_rows(vec![vec![1.5, -2.0]]).unwrap();
        let rendered = m.to_string();
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.contains("1.50000"));
        assert!(rendered.contains("-2.00000"));
    }
}
