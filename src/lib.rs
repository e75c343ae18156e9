//! # Dense matrices and reduced row echelon form.
//!
//! This crate provides a small, dependency-light
//! linear-algebra primitive: a dense row-major matrix of
//! `f64` values ([`Matrix`]), element accessors with a
//! checked and an unchecked mode, row primitives, and
//! in-place reduction to reduced row echelon form
//! ([`Matrix::rref`]) by Gauss-Jordan elimination with
//! partial pivoting.
//!
//! It is meant to be embedded by callers who need to solve
//! small linear systems, compute rank, or extract a basis,
//! not to be a general numerical computing framework.
//!
//! ```
//! let mut m = rref::Matrix::from_rows(vec![
//!     vec![0.0, -1.0],
//!     vec![1.0, 0.0],
//! ]).unwrap();
//! m.rref();
//! assert_eq!(m.row(0), [1.0, 0.0]);
//! assert_eq!(m.row(1), [0.0, 1.0]);
//! ```
//!
//! Matrices round-trip through YAML (and, with the `json`
//! feature, JSON):
//!
//! ```
//! let yaml = "
//! nrows: 2
//! ncols: 2
//! data: [1, 0,
//!        0, 1]
//! ";
//! let m = rref::loads(yaml).unwrap();
//! assert_eq!(m.get(1, 1).unwrap(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

mod error;
mod matrix;
mod reduce;

pub use error::MatrixError;
pub use matrix::Matrix;

/// Build a [`Matrix`] from a YAML string.
///
/// The expected input is a mapping of `nrows`, `ncols`, and
/// a row-major `data` sequence of `nrows * ncols` values.
///
/// # Errors
///
/// [`MatrixError::YamlError`] for malformed YAML, and also
/// when the parsed fields do not describe a valid matrix
/// (zero dimensions, or a `data` length disagreeing with
/// `nrows * ncols`) — the shape validation runs inside
/// deserialization, so its message is carried by the YAML
/// error.
pub fn loads(yaml: &str) -> Result<Matrix, MatrixError> {
    let matrix: Matrix = serde_yaml::from_str(yaml)?;
    Ok(matrix)
}

/// Build a [`Matrix`] from a YAML reader.
///
/// # Errors
///
/// As for [`loads`].
pub fn load<T: std::io::Read>(reader: T) -> Result<Matrix, MatrixError> {
    let matrix: Matrix = serde_yaml::from_reader(reader)?;
    Ok(matrix)
}

/// Build a [`Matrix`] from a JSON string.
///
/// # Errors
///
/// [`MatrixError::JsonError`] for malformed JSON and for
/// parsed fields that do not describe a valid matrix, as
/// with [`loads`].
#[cfg(feature = "json")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
pub fn loads_json(json: &str) -> Result<Matrix, MatrixError> {
    let matrix: Matrix = serde_json::from_str(json)?;
    Ok(matrix)
}
