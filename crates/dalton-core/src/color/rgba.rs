//! Immutable RGBA color with clamped channels.

use std::fmt;
use std::str::FromStr;

use crate::error::CorrectionError;
use crate::matrix::Matrix;

/// An 8-bit-per-channel RGB color with a fractional alpha.
///
/// Channels are clamped when the value is built, so a `Color` is always in
/// range: `red`, `green`, `blue` in `0..=255` and `alpha` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Build a color from arbitrary numeric channels.
    ///
    /// ```text
    /// red/green/blue → clamp(round(x), 0, 255)
    /// alpha          → clamp(x, 0, 1)
    /// ```
    ///
    /// NaN maps to the lower bound of its range.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
            alpha: clamp_alpha(alpha),
        }
    }

    /// Opaque color from exact channel values.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Exact channel values with an alpha (clamped).
    pub fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: clamp_alpha(alpha),
        }
    }

    /// Rebuild a color from a 3-entry row or column vector, as produced by
    /// the matrix transforms. Entries go through the same clamping as
    /// [`Color::new`].
    pub fn from_vector(vector: &Matrix, alpha: f64) -> Result<Self, CorrectionError> {
        match (vector.shape(), vector.as_slice()) {
            ((3, 1) | (1, 3), &[r, g, b]) => Ok(Self::new(r, g, b, alpha)),
            (shape, _) => Err(CorrectionError::DimensionMismatch {
                op: "from_vector",
                lhs: shape,
                rhs: (3, 1),
            }),
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Same RGB with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: clamp_alpha(alpha),
            ..self
        }
    }

    /// `[r, g, b]` as floats, in the 0–255 range.
    pub fn channels(&self) -> [f64; 3] {
        [self.red as f64, self.green as f64, self.blue as f64]
    }

    /// RGB as a `1 × 3` row vector.
    pub fn to_row(&self) -> Matrix {
        Matrix::from_rows([self.channels()])
    }

    /// RGB as a `3 × 1` column vector.
    pub fn to_column(&self) -> Matrix {
        let [r, g, b] = self.channels();
        Matrix::from_rows([[r], [g], [b]])
    }

    /// `#rrggbb`, lowercase, each channel zero-padded to two digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// `rgba(r,g,b,a)`, or `rgba(r,g,b)` when the color is fully opaque.
    pub fn to_rgba(&self) -> String {
        if self.alpha == 1.0 {
            format!("rgba({},{},{})", self.red, self.green, self.blue)
        } else {
            format!(
                "rgba({},{},{},{})",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgba())
    }
}

impl FromStr for Color {
    type Err = CorrectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse::parse_color(s)
    }
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

fn clamp_alpha(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
