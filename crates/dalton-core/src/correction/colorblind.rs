//! Colorblindness profiles: one constant 3×3 matrix per deficiency.
//!
//! Simulation matrices are the full-severity dichromat models from
//! Machado, Oliveira & Fernandes (2009). Correction matrices daltonize
//! them: the error a dichromat cannot see is redistributed into the
//! channels they can still tell apart.
//!
//! ```text
//! correction = I + E × (I − S)
//! ```
//!
//! where `S` is the simulation matrix and `E` the error-shift matrix of the
//! profile. The results are stored as literal constants below.
//!
//! # Reference
//! - Machado, Oliveira & Fernandes (2009), A Physiologically-based Model
//!   for Simulation of Color Vision Deficiency
//! - Fidaner, Lin & Ozguven (2005), Analysis of Color Blindness (daltonize)

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CorrectionError;
use crate::matrix::Matrix;

/// A dichromatic color-vision deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorblindnessType {
    /// Missing M cones (green-blind).
    Deuteranopia,
    /// Missing L cones (red-blind).
    Protanopia,
    /// Missing S cones (blue-blind).
    Tritanopia,
}

impl ColorblindnessType {
    /// Canonical upper-case name, as used in configuration.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Deuteranopia => "DEUTERANOPIA",
            Self::Protanopia => "PROTANOPIA",
            Self::Tritanopia => "TRITANOPIA",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Deuteranopia => "Deuteranopia (green-blind)",
            Self::Protanopia => "Protanopia (red-blind)",
            Self::Tritanopia => "Tritanopia (blue-blind)",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [ColorblindnessType; 3] = [
            ColorblindnessType::Deuteranopia,
            ColorblindnessType::Protanopia,
            ColorblindnessType::Tritanopia,
        ];
        &ALL
    }

    /// The constant correction matrix for this profile.
    pub fn correction_matrix(&self) -> &'static Matrix {
        &self.matrices().correction
    }

    /// The constant simulation matrix for this profile.
    pub fn simulation_matrix(&self) -> &'static Matrix {
        &self.matrices().simulation
    }

    fn matrices(&self) -> &'static ProfileMatrices {
        match self {
            Self::Deuteranopia => &DEUTERANOPIA,
            Self::Protanopia => &PROTANOPIA,
            Self::Tritanopia => &TRITANOPIA,
        }
    }
}

impl fmt::Display for ColorblindnessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorblindnessType {
    type Err = CorrectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CorrectionError::UnknownProfile(s.to_string()))
    }
}

impl TryFrom<String> for ColorblindnessType {
    type Error = CorrectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorblindnessType> for String {
    fn from(kind: ColorblindnessType) -> Self {
        kind.name().to_string()
    }
}

/// Apply the correction matrix of `kind` to the RGB channels of `color`.
///
/// Alpha is preserved; the result is clamped like any constructed color.
pub fn apply_profile(kind: ColorblindnessType, color: Color) -> Result<Color, CorrectionError> {
    transform(kind.correction_matrix(), color)
}

/// Apply the simulation matrix of `kind`: how a dichromat sees `color`.
pub fn simulate_profile(kind: ColorblindnessType, color: Color) -> Result<Color, CorrectionError> {
    transform(kind.simulation_matrix(), color)
}

fn transform(matrix: &Matrix, color: Color) -> Result<Color, CorrectionError> {
    let out = matrix.multiply(&color.to_column())?;
    Color::from_vector(&out, color.alpha())
}

// ---------------------------------------------------------------------------
// Constant data
// ---------------------------------------------------------------------------

struct ProfileMatrices {
    simulation: Matrix,
    correction: Matrix,
}

impl ProfileMatrices {
    fn new(simulation: [[f64; 3]; 3], correction: [[f64; 3]; 3]) -> Self {
        Self {
            simulation: Matrix::from_rows(simulation),
            correction: Matrix::from_rows(correction),
        }
    }
}

static DEUTERANOPIA: LazyLock<ProfileMatrices> =
    LazyLock::new(|| ProfileMatrices::new(DEUTERANOPIA_SIMULATION, DEUTERANOPIA_CORRECTION));
static PROTANOPIA: LazyLock<ProfileMatrices> =
    LazyLock::new(|| ProfileMatrices::new(PROTANOPIA_SIMULATION, PROTANOPIA_CORRECTION));
static TRITANOPIA: LazyLock<ProfileMatrices> =
    LazyLock::new(|| ProfileMatrices::new(TRITANOPIA_SIMULATION, TRITANOPIA_CORRECTION));

const DEUTERANOPIA_SIMULATION: [[f64; 3]; 3] = [
    [0.367322, 0.860646, -0.227968],
    [0.280085, 0.672501, 0.047413],
    [-0.011820, 0.042940, 0.968881],
];

const PROTANOPIA_SIMULATION: [[f64; 3]; 3] = [
    [0.152286, 1.052583, -0.204868],
    [0.114503, 0.786281, 0.099216],
    [-0.003882, -0.048116, 1.051998],
];

const TRITANOPIA_SIMULATION: [[f64; 3]; 3] = [
    [1.255528, -0.076749, -0.178779],
    [-0.078411, 0.930809, 0.147602],
    [0.004733, 0.691367, 0.303900],
];

// Green error goes to red and blue.
const DEUTERANOPIA_CORRECTION: [[f64; 3]; 3] = [
    [1.4366185, -0.6313967, 0.1947789],
    [0.0, 1.0, 0.0],
    [-0.1842395, 0.1863093, 0.9979299],
];

// Red error goes to green and blue.
const PROTANOPIA_CORRECTION: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.4788968, 0.4769109, 0.0441916],
    [0.5972818, -0.6886921, 1.0914096],
];

// Blue error goes to red and green.
const TRITANOPIA_CORRECTION: [[f64; 3]; 3] = [
    [0.7411589, -0.4072079, 0.666049],
    [0.0750979, 0.5852341, 0.339668],
    [0.0, 0.0, 1.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn error_shift(kind: ColorblindnessType) -> Matrix {
        match kind {
            ColorblindnessType::Deuteranopia => {
                Matrix::from_rows([[1.0, 0.7, 0.0], [0.0, 0.0, 0.0], [0.0, 0.7, 1.0]])
            }
            ColorblindnessType::Protanopia => {
                Matrix::from_rows([[0.0, 0.0, 0.0], [0.7, 1.0, 0.0], [0.7, 0.0, 1.0]])
            }
            ColorblindnessType::Tritanopia => {
                Matrix::from_rows([[1.0, 0.0, 0.7], [0.0, 1.0, 0.7], [0.0, 0.0, 0.0]])
            }
        }
    }

    #[test]
    fn test_correction_matches_daltonize_derivation() {
        let identity = Matrix::identity(3).unwrap();
        for &kind in ColorblindnessType::all() {
            let lost = identity.subtract(kind.simulation_matrix()).unwrap();
            let derived = identity
                .add(&error_shift(kind).multiply(&lost).unwrap())
                .unwrap();
            for (i, (d, c)) in derived
                .as_slice()
                .iter()
                .zip(kind.correction_matrix().as_slice())
                .enumerate()
            {
                assert!((d - c).abs() < EPSILON, "{kind} entry {i}: {d} vs {c}");
            }
        }
    }

    #[test]
    fn test_matrices_are_three_by_three_and_shared() {
        for &kind in ColorblindnessType::all() {
            assert_eq!(kind.correction_matrix().shape(), (3, 3));
            assert_eq!(kind.simulation_matrix().shape(), (3, 3));
            assert!(std::ptr::eq(
                kind.correction_matrix(),
                kind.correction_matrix()
            ));
        }
    }

    #[test]
    fn test_neutral_colors_survive_correction() {
        for &kind in ColorblindnessType::all() {
            for color in [Color::BLACK, Color::WHITE, Color::rgb(128, 128, 128)] {
                assert_eq!(apply_profile(kind, color).unwrap(), color, "{kind}");
            }
        }
    }

    #[test]
    fn test_deuteranopia_known_values() {
        let kind = ColorblindnessType::Deuteranopia;
        assert_eq!(
            apply_profile(kind, Color::rgb(100, 150, 200)).unwrap(),
            Color::rgb(88, 150, 209)
        );
        assert_eq!(
            apply_profile(kind, Color::rgb(200, 100, 50)).unwrap(),
            Color::rgb(234, 100, 32)
        );
    }

    #[test]
    fn test_apply_is_deterministic_and_keeps_alpha() {
        let color = Color::rgba(12, 34, 56, 0.3);
        for &kind in ColorblindnessType::all() {
            let first = apply_profile(kind, color).unwrap();
            let second = apply_profile(kind, color).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.alpha(), 0.3);
        }
    }

    #[test]
    fn test_simulation_collapses_red_green() {
        // Protanopes and deuteranopes cannot tell these apart well: the
        // simulated red/green channels land much closer together.
        let red = Color::rgb(200, 60, 60);
        let green = Color::rgb(60, 140, 60);
        let kind = ColorblindnessType::Deuteranopia;
        let sr = simulate_profile(kind, red).unwrap();
        let sg = simulate_profile(kind, green).unwrap();
        let before = (red.red() as i32 - green.red() as i32).abs();
        let after = (sr.red() as i32 - sg.red() as i32).abs();
        assert!(
            after < before,
            "simulated red gap {after} vs original {before}"
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "deuteranopia".parse::<ColorblindnessType>().unwrap(),
            ColorblindnessType::Deuteranopia
        );
        assert_eq!(
            " Tritanopia ".parse::<ColorblindnessType>().unwrap(),
            ColorblindnessType::Tritanopia
        );
        assert_eq!(
            "ACHROMATOPSIA".parse::<ColorblindnessType>().unwrap_err(),
            CorrectionError::UnknownProfile("ACHROMATOPSIA".to_string())
        );
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&ColorblindnessType::Protanopia).unwrap();
        assert_eq!(json, "\"PROTANOPIA\"");
        let back: ColorblindnessType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ColorblindnessType::Protanopia);

        let err = serde_json::from_str::<ColorblindnessType>("\"MONOCHROMACY\"").unwrap_err();
        assert!(err.to_string().contains("unknown colorblindness profile"));
    }
}
