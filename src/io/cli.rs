//! Command-line interface running the segmentation pipeline on a synthetic microstructure

use crate::crystal::CrystalSymmetry;
use crate::io::configuration::{
    DEFAULT_BOUNDARY_THRESHOLD_DEG, DEFAULT_COLS, DEFAULT_GRAIN_SEEDS, DEFAULT_MIN_GRAIN_SIZE,
    DEFAULT_NOISE_DEG, DEFAULT_ROWS, DEFAULT_SEED, SegmentationConfig,
};
use crate::io::error::Result;
use crate::io::progress::SegmentationProgressBar;
use crate::io::report::SegmentationReport;
use crate::segmentation::EbsdMap;
use crate::synthetic::{MicrostructureParams, generate};
use clap::Parser;
use log::info;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "grainseg")]
#[command(
    author,
    version,
    about = "Segment a synthetic orientation map into grains"
)]
/// Command-line arguments for the segmentation tool
pub struct Cli {
    /// Grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Number of Voronoi grain seeds
    #[arg(short, long, default_value_t = DEFAULT_GRAIN_SEEDS)]
    pub grains: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum per-pixel orientation noise in degrees
    #[arg(short, long, default_value_t = DEFAULT_NOISE_DEG)]
    pub noise: f64,

    /// Crystal symmetry family (triclinic, tetragonal, cubic, hexagonal)
    #[arg(short = 'S', long, default_value = "cubic")]
    pub symmetry: CrystalSymmetry,

    /// Boundary misorientation threshold in degrees
    #[arg(short, long, default_value_t = DEFAULT_BOUNDARY_THRESHOLD_DEG)]
    pub threshold: f64,

    /// Compare neighbours with the full symmetry table
    #[arg(long)]
    pub symmetry_corrected: bool,

    /// Discard grains with fewer points
    #[arg(short, long, default_value_t = DEFAULT_MIN_GRAIN_SIZE)]
    pub min_grain_size: usize,

    /// Number of largest grains listed in the report
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Segmentation parameters selected on the command line
    pub const fn segmentation_config(&self) -> SegmentationConfig {
        SegmentationConfig {
            symmetry: self.symmetry,
            boundary_threshold_deg: self.threshold,
            symmetry_corrected_boundaries: self.symmetry_corrected,
            min_grain_size: self.min_grain_size,
        }
    }

    /// Synthetic microstructure parameters selected on the command line
    pub const fn microstructure_params(&self) -> MicrostructureParams {
        MicrostructureParams {
            rows: self.rows,
            cols: self.cols,
            grains: self.grains,
            noise_deg: self.noise,
            seed: self.seed,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates generation, segmentation and reporting
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Generate the microstructure, segment it and build the report
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation, generation or segmentation fails
    pub fn run(&self) -> Result<SegmentationReport> {
        let start_time = Instant::now();
        let config = self.cli.segmentation_config();
        config.validate()?;

        let microstructure = generate(&self.cli.microstructure_params())?;
        info!(
            "generated {}x{} microstructure from {} seeds in {:.2?}",
            self.cli.rows,
            self.cli.cols,
            microstructure.seed_orientations.len(),
            start_time.elapsed()
        );

        let mut map = EbsdMap::new(config.symmetry);
        map.load_orientations(microstructure.orientations);

        let progress = self
            .cli
            .should_show_progress()
            .then(|| SegmentationProgressBar::new(self.cli.rows * self.cli.cols));

        map.run(&config, |snapshot| {
            if let Some(bar) = &progress {
                bar.update(&snapshot);
            }
        })?;
        if let Some(bar) = &progress {
            bar.finish();
        }

        map.calc_grain_misorientations()?;
        let segmentation = map.segmentation()?;
        info!(
            "found {} grains in {:.2?}",
            segmentation.len(),
            start_time.elapsed()
        );

        Ok(SegmentationReport::new(segmentation, self.cli.top))
    }
}
