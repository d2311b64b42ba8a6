//! Grain aggregate with lazily computed orientation statistics
//!
//! A grain owns the ordered list of points claimed by one flood fill. The
//! average orientation and misorientation list are computed on first use and
//! cached; adding a point clears both caches.

use std::sync::OnceLock;

use rayon::prelude::*;

use crate::crystal::{CrystalSymmetry, Quat};
use crate::io::error::Result;
use crate::math::statistics::mean;

/// Misorientation of every grain point relative to the grain average
#[derive(Debug, Clone, PartialEq)]
pub struct MisorientationStats {
    /// Angles in degrees, index-aligned with the grain's points
    pub angles: Vec<f64>,
    /// Mean of `angles`
    pub mean: f64,
}

impl MisorientationStats {
    /// Largest angle in the list
    pub fn max(&self) -> f64 {
        self.angles.iter().copied().fold(0.0, f64::max)
    }
}

/// Axis-aligned extent of a grain in grid coordinates (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrainExtent {
    /// Smallest `[row, col]`
    pub min: [usize; 2],
    /// Largest `[row, col]`
    pub max: [usize; 2],
}

/// Connected region of the grid treated as one crystal
#[derive(Debug, Clone)]
pub struct Grain {
    id: u32,
    symmetry: CrystalSymmetry,
    coords: Vec<[usize; 2]>,
    orientations: Vec<Quat>,
    average: OnceLock<Quat>,
    misorientation: OnceLock<MisorientationStats>,
}

impl Grain {
    /// Start a grain from its seed point
    ///
    /// # Errors
    ///
    /// Returns `NonUnitQuaternion` if `orientation` is not unit norm
    pub fn new(
        id: u32,
        symmetry: CrystalSymmetry,
        seed: [usize; 2],
        orientation: Quat,
    ) -> Result<Self> {
        orientation.ensure_unit()?;
        Ok(Self {
            id,
            symmetry,
            coords: vec![seed],
            orientations: vec![orientation],
            average: OnceLock::new(),
            misorientation: OnceLock::new(),
        })
    }

    /// Append a point, invalidating cached statistics
    ///
    /// # Errors
    ///
    /// Returns `NonUnitQuaternion` if `orientation` is not unit norm; the
    /// grain is left unchanged
    pub fn add_point(&mut self, coord: [usize; 2], orientation: Quat) -> Result<()> {
        orientation.ensure_unit()?;
        self.coords.push(coord);
        self.orientations.push(orientation);
        self.average.take();
        self.misorientation.take();
        Ok(())
    }

    /// 1-based grain ID as stored in the label grid
    pub const fn id(&self) -> u32 {
        self.id
    }

    pub(crate) const fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Symmetry family used for averaging
    pub const fn symmetry(&self) -> CrystalSymmetry {
        self.symmetry
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always false; a grain holds at least its seed
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Point coordinates `[row, col]` in claim order
    pub fn coords(&self) -> &[[usize; 2]] {
        &self.coords
    }

    /// Point orientations, index-aligned with [`Grain::coords`]
    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    /// Whether `[row, col]` belongs to this grain
    pub fn contains(&self, coord: [usize; 2]) -> bool {
        self.coords.contains(&coord)
    }

    /// Inclusive bounding box of the grain's points
    pub fn extent(&self) -> GrainExtent {
        let mut min = [usize::MAX; 2];
        let mut max = [0; 2];
        for &[row, col] in &self.coords {
            min = [min[0].min(row), min[1].min(col)];
            max = [max[0].max(row), max[1].max(col)];
        }
        GrainExtent { min, max }
    }

    /// Symmetry-aware average orientation
    ///
    /// Folds the points in claim order: each orientation is replaced by its
    /// symmetry equivalent closest to the running average, added to it, and
    /// the sum renormalised. The result depends on point order; it is an
    /// approximation of the mean, not the geodesic mean.
    pub fn average_orientation(&self) -> Quat {
        *self.average.get_or_init(|| {
            let mut points = self.orientations.iter();
            let Some(&first) = points.next() else {
                return Quat::IDENTITY;
            };
            points.fold(first, |mut average, q| {
                average += q.closest_equivalent_unchecked(&average, self.symmetry);
                average.normalise();
                average
            })
        })
    }

    /// Misorientation of each point relative to the average orientation
    pub fn misorientation_list(&self) -> &MisorientationStats {
        self.misorientation.get_or_init(|| {
            let average = self.average_orientation();
            let angles: Vec<f64> = self
                .orientations
                .iter()
                .map(|q| q.misorientation_unchecked(&average, self.symmetry))
                .collect();
            let mean = mean(&angles).unwrap_or(0.0);
            MisorientationStats { angles, mean }
        })
    }
}

/// Finalize average orientation and misorientation for every grain in parallel
pub fn calc_grain_misorientations(grains: &[Grain]) {
    grains.par_iter().for_each(|grain| {
        let _ = grain.misorientation_list();
    });
}
