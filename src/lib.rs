//! Grain segmentation for crystal orientation maps
//!
//! Detects orientation-discontinuity boundaries on a regular grid of unit
//! quaternions, flood-fills the grid into grains, and computes symmetry-aware
//! per-grain average orientations and misorientation statistics.

#![forbid(unsafe_code)]

/// Quaternion orientations and crystal symmetry tables
pub mod crystal;
/// Input/output operations, configuration and error handling
pub mod io;
/// Orientation, boundary and label grids
pub mod map;
/// Summary statistics over scalar samples
pub mod math;
/// Flood-fill segmentation, grain aggregates and post-filters
pub mod segmentation;
/// Seeded synthetic microstructures for demos and benchmarks
pub mod synthetic;

pub use crystal::{CrystalSymmetry, Quat};
pub use io::error::{ErrorKind, GrainError, Result};
pub use map::{BoundaryMap, LabelMap, OrientationMap, detect_boundaries};
pub use segmentation::{
    EbsdMap, Grain, Segmentation, filter_small_grains, segment_grains,
};
