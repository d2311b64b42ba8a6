//! Boundary detection from neighbour misorientation
//!
//! Sweeps the grid comparing each cell with its positive-x (`col + 1`) and
//! positive-y (`row + 1`) neighbour. A cell whose outgoing misorientation
//! exceeds the threshold is flagged as a boundary. The default comparison is
//! the raw quaternion dot product; the full symmetry reduction is opt-in.

use bitvec::prelude::*;
use log::debug;
use ndarray::Array2;

use crate::crystal::{CrystalSymmetry, Quat};
use crate::io::configuration::{
    BOUNDARY_LABEL, DEFAULT_BOUNDARY_THRESHOLD_DEG, UNASSIGNED_LABEL, validate_threshold,
};
use crate::io::error::{GrainError, Result};
use crate::map::orientation::OrientationMap;

/// Boundary mask plus the per-edge misorientation maps used for diagnostics
#[derive(Debug, Clone)]
pub struct BoundaryMap {
    rows: usize,
    cols: usize,
    mask: BitVec,
    misorientation_x: Array2<f64>,
    misorientation_y: Array2<f64>,
}

impl BoundaryMap {
    /// Build from an externally supplied mask (`true` = boundary)
    ///
    /// Diagnostic misorientation maps are left at zero.
    pub fn from_mask(mask: &Array2<bool>) -> Self {
        let (rows, cols) = mask.dim();
        let mut bits = bitvec![0; rows * cols];
        for ((row, col), &flagged) in mask.indexed_iter() {
            if flagged {
                bits.set(row * cols + col, true);
            }
        }
        Self {
            rows,
            cols,
            mask: bits,
            misorientation_x: Array2::zeros((rows, cols)),
            misorientation_y: Array2::zeros((rows, cols)),
        }
    }

    /// Grid dimensions (rows, cols)
    pub const fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether `[row, col]` is flagged; `false` outside the grid
    pub fn is_boundary(&self, row: usize, col: usize) -> bool {
        row < self.rows
            && col < self.cols
            && self.mask.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Number of boundary cells
    pub fn count(&self) -> usize {
        self.mask.count_ones()
    }

    /// Boundary coordinates `[row, col]` in row-major order
    pub fn boundary_coords(&self) -> Vec<[usize; 2]> {
        self.mask
            .iter_ones()
            .map(|index| [index / self.cols, index % self.cols])
            .collect()
    }

    /// Misorientation with the positive-x neighbour (degrees)
    ///
    /// Cells at the right border and cells above threshold hold zero.
    pub const fn misorientation_x(&self) -> &Array2<f64> {
        &self.misorientation_x
    }

    /// Misorientation with the positive-y neighbour (degrees)
    ///
    /// Cells at the bottom border and cells above threshold hold zero.
    pub const fn misorientation_y(&self) -> &Array2<f64> {
        &self.misorientation_y
    }

    /// Initial label grid: boundary cells carry the boundary sentinel, all others are unassigned
    pub fn to_label_array(&self) -> Array2<i32> {
        Array2::from_shape_fn((self.rows, self.cols), |(row, col)| {
            if self.is_boundary(row, col) {
                BOUNDARY_LABEL
            } else {
                UNASSIGNED_LABEL
            }
        })
    }

    fn flag(&mut self, row: usize, col: usize) {
        self.mask.set(row * self.cols + col, true);
    }
}

/// Configurable boundary detector
#[derive(Debug, Clone, Copy)]
pub struct BoundaryDetector {
    symmetry: CrystalSymmetry,
    threshold_deg: f64,
    symmetry_corrected: bool,
}

impl BoundaryDetector {
    /// Detector with the default threshold and raw dot-product comparison
    pub const fn new(symmetry: CrystalSymmetry) -> Self {
        Self {
            symmetry,
            threshold_deg: DEFAULT_BOUNDARY_THRESHOLD_DEG,
            symmetry_corrected: false,
        }
    }

    /// Set the misorientation threshold in degrees
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold is not a finite angle in (0, 180]
    pub fn threshold(mut self, threshold_deg: f64) -> Result<Self> {
        validate_threshold(threshold_deg)?;
        self.threshold_deg = threshold_deg;
        Ok(self)
    }

    /// Compare neighbours through the full symmetry table of the family
    #[must_use]
    pub const fn symmetry_corrected(mut self, enabled: bool) -> Self {
        self.symmetry_corrected = enabled;
        self
    }

    /// Run the sweep over an orientation grid
    pub fn detect(&self, orientations: &OrientationMap) -> BoundaryMap {
        let (rows, cols) = orientations.dim();
        let quats = orientations.as_array();
        let comparison = if self.symmetry_corrected {
            self.symmetry
        } else {
            CrystalSymmetry::Triclinic
        };

        let mut boundaries = BoundaryMap {
            rows,
            cols,
            mask: bitvec![0; rows * cols],
            misorientation_x: Array2::zeros((rows, cols)),
            misorientation_y: Array2::zeros((rows, cols)),
        };

        for ((row, col), q) in quats.indexed_iter() {
            let x_angle = quats
                .get([row, col + 1])
                .map(|neighbour| edge_angle(q, neighbour, comparison));
            let y_angle = quats
                .get([row + 1, col])
                .map(|neighbour| edge_angle(q, neighbour, comparison));

            let mut flagged = false;
            if let Some(angle) = x_angle {
                flagged |= self.record(&mut boundaries.misorientation_x, row, col, angle);
            }
            if let Some(angle) = y_angle {
                flagged |= self.record(&mut boundaries.misorientation_y, row, col, angle);
            }
            if flagged {
                boundaries.flag(row, col);
            }
        }

        debug!(
            "boundary sweep over {rows}x{cols} grid at {:.2} deg ({}): {} boundary cells",
            self.threshold_deg,
            comparison,
            boundaries.count()
        );

        boundaries
    }

    // Stores the angle unless it crosses the threshold; returns whether it did
    fn record(&self, angles: &mut Array2<f64>, row: usize, col: usize, angle: f64) -> bool {
        let exceeds = angle > self.threshold_deg;
        if let Some(cell) = angles.get_mut([row, col]) {
            *cell = if exceeds { 0.0 } else { angle };
        }
        exceeds
    }
}

fn edge_angle(a: &Quat, b: &Quat, symmetry: CrystalSymmetry) -> f64 {
    a.misorientation_unchecked(b, symmetry)
}

/// Flag cells whose misorientation with a positive-x or positive-y
/// neighbour exceeds `threshold_deg`
///
/// Uses the raw dot product as a cheap local-difference test; see
/// [`BoundaryDetector::symmetry_corrected`] for the symmetry-reduced variant.
///
/// # Errors
///
/// Returns `InvalidParameter` if the threshold is not a finite angle in (0, 180]
pub fn detect_boundaries(
    orientations: &OrientationMap,
    symmetry: CrystalSymmetry,
    threshold_deg: f64,
) -> Result<BoundaryMap> {
    Ok(BoundaryDetector::new(symmetry)
        .threshold(threshold_deg)?
        .detect(orientations))
}

/// Fail unless the boundary map and orientation grid share a shape
///
/// # Errors
///
/// Returns `DimensionMismatch` when the shapes differ
pub fn ensure_same_shape(boundaries: &BoundaryMap, orientations: &OrientationMap) -> Result<()> {
    if boundaries.dim() == orientations.dim() {
        Ok(())
    } else {
        Err(GrainError::DimensionMismatch {
            expected: orientations.dim(),
            found: boundaries.dim(),
        })
    }
}
