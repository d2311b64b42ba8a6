//! Staged orientation map workflow
//!
//! Holds the orientation grid and the products derived from it. Each stage
//! checks that its inputs exist and fails with `PreconditionNotLoaded`
//! otherwise. Reloading orientations discards every derived product.

use log::debug;

use crate::crystal::CrystalSymmetry;
use crate::io::configuration::SegmentationConfig;
use crate::io::error::{GrainError, Result};
use crate::map::boundary::{BoundaryDetector, BoundaryMap};
use crate::map::orientation::OrientationMap;
use crate::segmentation::filter::filter_small_grains;
use crate::segmentation::flood_fill::{
    Segmentation, SegmentationProgress, segment_grains_with_progress,
};
use crate::segmentation::grain::calc_grain_misorientations;

/// Orientation map with its boundary and grain products
#[derive(Debug, Clone)]
pub struct EbsdMap {
    symmetry: CrystalSymmetry,
    orientations: Option<OrientationMap>,
    boundaries: Option<BoundaryMap>,
    segmentation: Option<Segmentation>,
}

impl EbsdMap {
    /// Empty map for a material of the given symmetry
    pub const fn new(symmetry: CrystalSymmetry) -> Self {
        Self {
            symmetry,
            orientations: None,
            boundaries: None,
            segmentation: None,
        }
    }

    /// Symmetry family of the material
    pub const fn symmetry(&self) -> CrystalSymmetry {
        self.symmetry
    }

    /// Replace the orientation data, discarding derived products
    pub fn load_orientations(&mut self, orientations: OrientationMap) {
        debug!(
            "loaded {}x{} orientation grid",
            orientations.rows(),
            orientations.cols()
        );
        self.orientations = Some(orientations);
        self.boundaries = None;
        self.segmentation = None;
    }

    /// Load row-major Bunge Euler angles in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the angle count does not match the dimensions
    pub fn load_euler_angles(&mut self, rows: usize, cols: usize, eulers: &[[f64; 3]]) -> Result<()> {
        let orientations = OrientationMap::from_euler_angles(rows, cols, eulers)?;
        self.load_orientations(orientations);
        Ok(())
    }

    /// Orientation grid
    ///
    /// # Errors
    ///
    /// Returns `PreconditionNotLoaded` before orientations are loaded
    pub fn orientations(&self) -> Result<&OrientationMap> {
        self.orientations
            .as_ref()
            .ok_or(GrainError::PreconditionNotLoaded {
                stage: "orientation data",
            })
    }

    /// Boundary map from the last [`EbsdMap::find_boundaries`] call
    ///
    /// # Errors
    ///
    /// Returns `PreconditionNotLoaded` before boundaries are found
    pub fn boundaries(&self) -> Result<&BoundaryMap> {
        self.boundaries
            .as_ref()
            .ok_or(GrainError::PreconditionNotLoaded {
                stage: "boundary map",
            })
    }

    /// Segmentation from the last [`EbsdMap::find_grains`] call
    ///
    /// # Errors
    ///
    /// Returns `PreconditionNotLoaded` before grains are found
    pub fn segmentation(&self) -> Result<&Segmentation> {
        self.segmentation
            .as_ref()
            .ok_or(GrainError::PreconditionNotLoaded {
                stage: "grain segmentation",
            })
    }

    /// Detect boundaries with the raw neighbour comparison
    ///
    /// # Errors
    ///
    /// Returns an error if orientations are not loaded or the threshold is invalid
    pub fn find_boundaries(&mut self, threshold_deg: f64) -> Result<&BoundaryMap> {
        let detector = BoundaryDetector::new(self.symmetry).threshold(threshold_deg)?;
        self.find_boundaries_with(&detector)
    }

    /// Detect boundaries with a configured detector
    ///
    /// # Errors
    ///
    /// Returns `PreconditionNotLoaded` if orientations are not loaded
    pub fn find_boundaries_with(&mut self, detector: &BoundaryDetector) -> Result<&BoundaryMap> {
        let boundaries = detector.detect(self.orientations()?);
        self.segmentation = None;
        Ok(self.boundaries.insert(boundaries))
    }

    /// Flood fill the boundary map into grains, then drop grains below `min_grain_size`
    ///
    /// # Errors
    ///
    /// Returns an error if boundaries have not been found or segmentation
    /// fails its post-condition checks
    pub fn find_grains(&mut self, min_grain_size: usize) -> Result<&Segmentation> {
        self.find_grains_with_progress(min_grain_size, |_| {})
    }

    /// [`EbsdMap::find_grains`] reporting progress after each grain
    ///
    /// # Errors
    ///
    /// Returns an error if boundaries have not been found or segmentation
    /// fails its post-condition checks
    pub fn find_grains_with_progress<F>(
        &mut self,
        min_grain_size: usize,
        observer: F,
    ) -> Result<&Segmentation>
    where
        F: FnMut(SegmentationProgress),
    {
        let orientations = self.orientations()?;
        let boundaries = self.boundaries()?;
        let segmentation =
            segment_grains_with_progress(boundaries, orientations, self.symmetry, observer)?;
        let filtered = filter_small_grains(segmentation, min_grain_size)?;
        Ok(self.segmentation.insert(filtered))
    }

    /// Run boundary detection and segmentation with one configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, orientations are
    /// not loaded, or segmentation fails
    pub fn run<F>(&mut self, config: &SegmentationConfig, observer: F) -> Result<&Segmentation>
    where
        F: FnMut(SegmentationProgress),
    {
        config.validate()?;
        self.symmetry = config.symmetry;
        let detector = BoundaryDetector::new(config.symmetry)
            .threshold(config.boundary_threshold_deg)?
            .symmetry_corrected(config.symmetry_corrected_boundaries);
        self.find_boundaries_with(&detector)?;
        self.find_grains_with_progress(config.min_grain_size, observer)
    }

    /// Compute average orientation and misorientation list for every grain
    ///
    /// # Errors
    ///
    /// Returns `PreconditionNotLoaded` before grains are found
    pub fn calc_grain_misorientations(&self) -> Result<()> {
        calc_grain_misorientations(self.segmentation()?.grains());
        Ok(())
    }
}
