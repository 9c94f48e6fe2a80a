//! Core data structures: designs and intensity tables

mod design;
mod intensity;

pub use design::{Condition, Design};
pub use intensity::IntensityMatrix;
