//! Coordinate and geometry types shared across the loader and UI layers.
//!
//! Canonical space:
//! - Right-handed, +Z up
//! - Dimensionless f64 coordinates; consumers assign units

mod angle;
mod vector;

pub use angle::Angle;
pub use vector::Vector;
