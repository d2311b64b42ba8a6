//! Grid data structures
//!
//! This module contains:
//! - The validated orientation grid
//! - Boundary detection and the boundary mask
//! - The grain label grid and its sentinels

/// Boundary detection and boundary mask
pub mod boundary;
/// Label grid and sentinel decoding
pub mod labels;
/// Orientation grid construction and access
pub mod orientation;

pub use boundary::{BoundaryDetector, BoundaryMap, detect_boundaries};
pub use labels::{Label, LabelMap};
pub use orientation::OrientationMap;
