//! The correction a pipeline applies, and how the result is written out.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::correction::brightness::{apply_brightness, validate_factor};
use crate::correction::colorblind::{ColorblindnessType, apply_profile, simulate_profile};
use crate::error::CorrectionError;

/// One correction, chosen by configuration and fixed for a pipeline's
/// lifetime.
///
/// Serialized with a `kind` tag:
///
/// ```text
/// {"kind": "Brightness", "factor": 0.5}
/// {"kind": "Colorblind", "type": "DEUTERANOPIA"}
/// {"kind": "Simulate",   "type": "TRITANOPIA"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CorrectionStrategy {
    /// Interpolate toward black (`factor < 0`) or white (`factor > 0`).
    Brightness { factor: f64 },
    /// Compensate for a deficiency with its correction matrix.
    Colorblind {
        #[serde(rename = "type")]
        profile: ColorblindnessType,
    },
    /// Show how a dichromat would see the color.
    Simulate {
        #[serde(rename = "type")]
        profile: ColorblindnessType,
    },
}

impl CorrectionStrategy {
    /// Validated brightness strategy.
    pub fn brightness(factor: f64) -> Result<Self, CorrectionError> {
        validate_factor(factor)?;
        Ok(Self::Brightness { factor })
    }

    pub const fn colorblind(profile: ColorblindnessType) -> Self {
        Self::Colorblind { profile }
    }

    pub const fn simulate(profile: ColorblindnessType) -> Self {
        Self::Simulate { profile }
    }

    /// Reject parameters [`CorrectionStrategy::apply`] would refuse.
    ///
    /// Deserialized strategies bypass the constructors, so config loading
    /// and pipeline construction call this up front.
    pub fn validate(&self) -> Result<(), CorrectionError> {
        match self {
            Self::Brightness { factor } => validate_factor(*factor),
            Self::Colorblind { .. } | Self::Simulate { .. } => Ok(()),
        }
    }

    /// Apply this correction to one color.
    pub fn apply(&self, color: Color) -> Result<Color, CorrectionError> {
        match *self {
            Self::Brightness { factor } => apply_brightness(color, factor),
            Self::Colorblind { profile } => apply_profile(profile, color),
            Self::Simulate { profile } => simulate_profile(profile, color),
        }
    }
}

/// Text form written back to an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `#rrggbb`
    #[default]
    Hex,
    /// `rgba(r,g,b)` or `rgba(r,g,b,a)`
    Rgba,
}

impl OutputFormat {
    pub fn render(&self, color: &Color) -> String {
        match self {
            Self::Hex => color.to_hex(),
            Self::Rgba => color.to_rgba(),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CorrectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgba" => Ok(Self::Rgba),
            other => Err(CorrectionError::InvalidArgument(format!(
                "unknown output format {other:?} (expected \"hex\" or \"rgba\")"
            ))),
        }
    }
}
