//! Color corrections: brightness interpolation, colorblindness profiles,
//! and the strategy that selects between them.

pub mod brightness;
pub mod colorblind;
pub mod strategy;
