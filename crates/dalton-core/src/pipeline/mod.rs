//! Correction pipeline: element abstraction and the traversal that
//! rewrites element colors.

pub mod element;
pub mod runner;
