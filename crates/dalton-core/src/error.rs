//! Error types for the correction engine.

use crate::pipeline::element::ElementAccessError;

/// Errors raised by matrix algebra, value construction and configuration
/// of a correction.
///
/// Apart from [`CorrectionError::ParseColor`] and
/// [`CorrectionError::ElementAccess`], which describe host data, every
/// variant signals a programming error in the caller and is propagated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorrectionError {
    #[error("dimension mismatch in {op}: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("invalid matrix shape {rows}x{cols} for {len} entries")]
    InvalidShape {
        rows: usize,
        cols: usize,
        len: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown colorblindness profile: {0}")]
    UnknownProfile(String),

    #[error("cannot parse color {input:?}: {reason}")]
    ParseColor { input: String, reason: String },

    #[error(transparent)]
    ElementAccess(#[from] ElementAccessError),
}
