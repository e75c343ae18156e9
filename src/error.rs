use thiserror::Error;

/// Error type for this crate.
///
/// The first three variants correspond to the ways a
/// [Matrix](crate::Matrix) operation can be asked to do
/// something geometrically impossible.  The remaining
/// variants wrap serialization errors.
///
/// # Example
///
/// A matrix must have at least one row and one column:
///
/// ```
/// assert!(matches!(
///     rref::Matrix::new(0, 3),
///     Err(rref::MatrixError::InvalidDimensions(_))
/// ));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MatrixError {
    /// Zero rows or zero columns requested at construction.
    #[error("{0:?}")]
    InvalidDimensions(String),
    /// Two matrices (or a matrix and raw input data) whose
    /// shapes were required to agree did not.
    #[error("{0:?}")]
    ShapeMismatch(String),
    /// A row or column index at or past the matrix extent,
    /// caught by a checked accessor or row operation.
    #[error("{0:?}")]
    IndexOutOfRange(String),
    #[error(transparent)]
    /// Errors coming from `serde_yaml`.
    YamlError(#[from] serde_yaml::Error),
    #[cfg(feature = "json")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "json")))]
    #[error(transparent)]
    /// Errors coming from `serde_json`.
    JsonError(#[from] serde_json::Error),
}
