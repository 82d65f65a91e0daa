//! Dalton Core: color-vision correction engine.
//!
//! This crate contains the matrix primitive, the RGBA color value type,
//! the brightness and colorblindness transforms, and the pipeline that
//! rewrites element colors. No rendering or document dependencies: hosts
//! plug in through the [`VisualElement`] trait.

pub mod color;
pub mod config;
pub mod correction;
pub mod error;
pub mod matrix;
pub mod pipeline;

// Re-exports for convenience.
pub use color::Color;
pub use color::parse::parse_color;
pub use config::{ConfigError, CorrectionConfig};
pub use correction::colorblind::ColorblindnessType;
pub use correction::strategy::{CorrectionStrategy, OutputFormat};
pub use error::CorrectionError;
pub use matrix::Matrix;
pub use pipeline::element::{ElementAccessError, StyledElement, VisualElement};
pub use pipeline::runner::{CorrectionPipeline, ElementFailure, ReadyEvent, RunReport};
