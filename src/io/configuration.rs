//! Algorithm constants and runtime configuration defaults

use crate::crystal::CrystalSymmetry;
use crate::io::error::{Result, invalid_parameter};

// Label grid sentinels
/// Cell not yet claimed by any grain
pub const UNASSIGNED_LABEL: i32 = 0;
/// Cell flagged by the boundary detector and not yet claimed
pub const BOUNDARY_LABEL: i32 = -1;
/// Cell belonging to a grain discarded by the small-grain filter
pub const IGNORED_LABEL: i32 = -2;

/// Default misorientation above which neighbouring cells form a boundary (degrees)
pub const DEFAULT_BOUNDARY_THRESHOLD_DEG: f64 = 10.0;

/// Default minimum number of points a grain needs to survive filtering
pub const DEFAULT_MIN_GRAIN_SIZE: usize = 10;

// Euler angles are typically stored as f32, so norms drift past f64 epsilon
/// Accepted deviation of a quaternion norm from 1
pub const UNIT_NORM_TOLERANCE: f64 = 1e-3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Default values for the synthetic microstructure
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default synthetic grid rows
pub const DEFAULT_ROWS: usize = 128;
/// Default synthetic grid columns
pub const DEFAULT_COLS: usize = 128;
/// Default number of synthetic grain seeds
pub const DEFAULT_GRAIN_SEEDS: usize = 40;
/// Default per-pixel orientation noise (degrees)
pub const DEFAULT_NOISE_DEG: f64 = 0.5;

/// Parameters controlling boundary detection and grain segmentation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentationConfig {
    /// Crystal symmetry family of the material
    pub symmetry: CrystalSymmetry,
    /// Boundary misorientation threshold in degrees
    pub boundary_threshold_deg: f64,
    /// Compare neighbours with the full symmetry table instead of the raw dot product
    pub symmetry_corrected_boundaries: bool,
    /// Grains with fewer points are discarded (0 keeps everything)
    pub min_grain_size: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            symmetry: CrystalSymmetry::Cubic,
            boundary_threshold_deg: DEFAULT_BOUNDARY_THRESHOLD_DEG,
            symmetry_corrected_boundaries: false,
            min_grain_size: DEFAULT_MIN_GRAIN_SIZE,
        }
    }
}

impl SegmentationConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold is not a finite angle in (0, 180]
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.boundary_threshold_deg)
    }
}

/// Check a boundary threshold angle
///
/// # Errors
///
/// Returns `InvalidParameter` if the threshold is not a finite angle in (0, 180]
pub fn validate_threshold(threshold_deg: f64) -> Result<()> {
    if !threshold_deg.is_finite() || threshold_deg <= 0.0 || threshold_deg > 180.0 {
        return Err(invalid_parameter(
            "boundary_threshold_deg",
            &threshold_deg,
            &"must be a finite angle in (0, 180] degrees",
        ));
    }
    Ok(())
}
