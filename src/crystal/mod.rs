//! Crystal orientation primitives
//!
//! This module contains:
//! - Unit quaternion orientations and misorientation
//! - Crystal symmetry families and their operator tables

/// Quaternion type and misorientation routines
pub mod quat;
/// Symmetry families and operator tables
pub mod symmetry;

pub use quat::Quat;
pub use symmetry::CrystalSymmetry;
