//! Core data models for playlist analysis.

mod ids;
mod video;

pub use ids::*;
pub use video::*;
