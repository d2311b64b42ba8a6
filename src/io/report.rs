//! Plain-text summary of a segmentation

use std::fmt;

use crate::crystal::Quat;
use crate::map::labels::Label;
use crate::math::statistics::{mean, min_max, percentile};
use crate::segmentation::{Grain, Segmentation};

/// One line of the per-grain table
#[derive(Debug, Clone, PartialEq)]
pub struct GrainSummary {
    /// Grain ID
    pub id: u32,
    /// Number of points
    pub size: usize,
    /// Average orientation
    pub average: Quat,
    /// Mean misorientation to the average (degrees)
    pub mean_misorientation: f64,
    /// Largest misorientation to the average (degrees)
    pub max_misorientation: f64,
}

impl GrainSummary {
    /// Summarise one grain, computing its statistics if needed
    pub fn from_grain(grain: &Grain) -> Self {
        let stats = grain.misorientation_list();
        Self {
            id: grain.id(),
            size: grain.len(),
            average: grain.average_orientation(),
            mean_misorientation: stats.mean,
            max_misorientation: stats.max(),
        }
    }
}

/// Aggregate view of a segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationReport {
    /// Grid dimensions (rows, cols)
    pub dimensions: (usize, usize),
    /// Number of grains
    pub grain_count: usize,
    /// Cells belonging to discarded grains
    pub ignored_cells: usize,
    /// Boundary cells no grain reached
    pub unclaimed_boundary_cells: usize,
    /// Mean grain size in points
    pub mean_grain_size: f64,
    /// Median grain size in points
    pub median_grain_size: f64,
    /// Smallest and largest grain sizes
    pub grain_size_range: (f64, f64),
    /// Mean over grains of the per-grain mean misorientation (degrees)
    pub mean_misorientation: f64,
    /// Largest grains, biggest first
    pub largest: Vec<GrainSummary>,
}

impl SegmentationReport {
    /// Build a report listing the `top` largest grains
    pub fn new(segmentation: &Segmentation, top: usize) -> Self {
        let grains = segmentation.grains();
        let sizes: Vec<f64> = grains.iter().map(|grain| grain.len() as f64).collect();
        let mean_misorientations: Vec<f64> = grains
            .iter()
            .map(|grain| grain.misorientation_list().mean)
            .collect();

        let mut by_size: Vec<&Grain> = grains.iter().collect();
        by_size.sort_by(|a, b| b.len().cmp(&a.len()).then(a.id().cmp(&b.id())));
        let largest = by_size
            .into_iter()
            .take(top)
            .map(GrainSummary::from_grain)
            .collect();

        Self {
            dimensions: segmentation.labels().dim(),
            grain_count: grains.len(),
            ignored_cells: segmentation.labels().count(Label::Ignored),
            unclaimed_boundary_cells: segmentation.unclaimed_boundary_count(),
            mean_grain_size: mean(&sizes).unwrap_or(0.0),
            median_grain_size: percentile(&sizes, 50.0).unwrap_or(0.0),
            grain_size_range: min_max(&sizes).unwrap_or((0.0, 0.0)),
            mean_misorientation: mean(&mean_misorientations).unwrap_or(0.0),
            largest,
        }
    }
}

impl fmt::Display for SegmentationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {}x{}: {} grains, {} ignored cells, {} unclaimed boundary cells",
            self.dimensions.0,
            self.dimensions.1,
            self.grain_count,
            self.ignored_cells,
            self.unclaimed_boundary_cells
        )?;
        writeln!(
            f,
            "Grain size: mean {:.1}, median {:.1}, range {:.0}-{:.0}",
            self.mean_grain_size,
            self.median_grain_size,
            self.grain_size_range.0,
            self.grain_size_range.1
        )?;
        writeln!(
            f,
            "Mean intragranular misorientation: {:.3} deg",
            self.mean_misorientation
        )?;

        if self.largest.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>6} {:>8} {:>36} {:>10} {:>10}",
            "ID", "Size", "Average orientation", "Mean", "Max"
        )?;
        for summary in &self.largest {
            writeln!(
                f,
                "{:>6} {:>8} {:>36} {:>10.3} {:>10.3}",
                summary.id,
                summary.size,
                summary.average.to_string(),
                summary.mean_misorientation,
                summary.max_misorientation
            )?;
        }
        Ok(())
    }
}
