//! Grain segmentation
//!
//! This module contains:
//! - Flood-fill labelling of the boundary-marked grid
//! - The grain aggregate and its orientation statistics
//! - Small-grain filtering
//! - A staged workflow over a single orientation map

/// Staged orientation map workflow
pub mod ebsd_map;
/// Small-grain removal and renumbering
pub mod filter;
/// Breadth-first flood fill and the segmentation result
pub mod flood_fill;
/// Grain aggregate, average orientation and misorientation
pub mod grain;

pub use ebsd_map::EbsdMap;
pub use filter::filter_small_grains;
pub use flood_fill::{
    Segmentation, SegmentationProgress, segment_grains, segment_grains_with_progress,
};
pub use grain::{Grain, MisorientationStats, calc_grain_misorientations};
