//! Dense orientation grid
//!
//! Row-major `(rows, cols)` array of unit quaternions, indexed `[row, col]`.
//! Built once from external data and read-only afterwards.

use ndarray::Array2;

use crate::crystal::Quat;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{GrainError, Result, invalid_parameter};

/// Validated grid of per-pixel orientations
#[derive(Debug, Clone)]
pub struct OrientationMap {
    quats: Array2<Quat>,
}

impl OrientationMap {
    /// Wrap an existing quaternion array
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds [`MAX_GRID_DIMENSION`]
    /// - Any quaternion is not unit norm
    pub fn new(quats: Array2<Quat>) -> Result<Self> {
        let (rows, cols) = quats.dim();
        check_dimensions(rows, cols)?;

        for ((row, col), q) in quats.indexed_iter() {
            if !q.is_unit() {
                return Err(GrainError::NonUnitQuaternion {
                    position: Some([row, col]),
                    norm: q.norm(),
                });
            }
        }

        Ok(Self { quats })
    }

    /// Build from a row-major list of quaternions
    ///
    /// # Errors
    ///
    /// Returns an error if the list length is not `rows * cols`, or for any
    /// reason listed on [`OrientationMap::new`]
    pub fn from_quats(rows: usize, cols: usize, quats: Vec<Quat>) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let found = quats.len();
        let array = Array2::from_shape_vec((rows, cols), quats).map_err(|_shape_error| {
            GrainError::InvalidInput {
                reason: format!("expected {} quaternions, found {found}", rows * cols),
            }
        })?;
        Self::new(array)
    }

    /// Build from row-major Bunge Euler angle triplets in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the list length is not `rows * cols` or the
    /// dimensions are invalid
    pub fn from_euler_angles(rows: usize, cols: usize, eulers: &[[f64; 3]]) -> Result<Self> {
        let quats = eulers
            .iter()
            .map(|&[phi1, big_phi, phi2]| Quat::from_euler(phi1, big_phi, phi2))
            .collect();
        Self::from_quats(rows, cols, quats)
    }

    /// Grid filled with a single orientation
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or `q` is not unit norm
    pub fn uniform(rows: usize, cols: usize, q: Quat) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Self::new(Array2::from_elem((rows, cols), q))
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.quats.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.quats.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.quats.dim()
    }

    /// Orientation at `[row, col]`, `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&Quat> {
        self.quats.get([row, col])
    }

    /// Underlying array
    pub const fn as_array(&self) -> &Array2<Quat> {
        &self.quats
    }
}

// Runs before any grid-sized allocation
pub(crate) fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(GrainError::InvalidInput {
            reason: format!("orientation grid must be non-empty, got {rows}x{cols}"),
        });
    }
    if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            "grid_dimensions",
            &format!("{rows}x{cols}"),
            &format!("each dimension must be at most {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
