//! Brightness adjustment by linear interpolation toward black or white.

use crate::color::Color;
use crate::error::CorrectionError;
use crate::matrix::Matrix;

/// Shift `color` toward black (`factor < 0`) or white (`factor > 0`).
///
/// ```text
/// factor <  0: out = round(c × (1 + factor))
/// factor >= 0: out = round(c + (255 − c) × factor)
/// ```
///
/// `factor = -1` is black, `0` is identity, `1` is white. Alpha passes
/// through. A factor outside `[-1, 1]` (or NaN) is rejected rather than
/// clamped.
pub fn apply_brightness(color: Color, factor: f64) -> Result<Color, CorrectionError> {
    validate_factor(factor)?;

    let original = color.to_row();
    let shifted = if factor < 0.0 {
        original.scale(1.0 + factor)
    } else {
        let white = Matrix::from_rows([[255.0; 3]]);
        let headroom = white.subtract(&original)?;
        original.add(&headroom.scale(factor))?
    };

    Color::from_vector(&shifted, color.alpha())
}

/// Check that a brightness factor lies in `[-1, 1]`.
pub fn validate_factor(factor: f64) -> Result<(), CorrectionError> {
    if (-1.0..=1.0).contains(&factor) {
        Ok(())
    } else {
        Err(CorrectionError::InvalidArgument(format!(
            "brightness factor {factor} is outside [-1, 1]"
        )))
    }
}
