//! Color values: the RGBA type, its serialized forms, and text parsing.

pub mod parse;
mod rgba;

pub use rgba::Color;
