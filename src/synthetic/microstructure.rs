//! Seeded Voronoi microstructures
//!
//! Scatters grain seeds over the grid, gives each seed a uniformly random
//! orientation, assigns every pixel the orientation of its nearest seed and
//! perturbs it by a small random rotation. The same parameters always produce
//! the same grid.

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::crystal::Quat;
use crate::io::configuration::{
    DEFAULT_COLS, DEFAULT_GRAIN_SEEDS, DEFAULT_NOISE_DEG, DEFAULT_ROWS, DEFAULT_SEED,
};
use crate::io::error::{Result, invalid_parameter};
use crate::map::orientation::{OrientationMap, check_dimensions};

/// Generator parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicrostructureParams {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Number of Voronoi seeds
    pub grains: usize,
    /// Maximum per-pixel perturbation angle in degrees
    pub noise_deg: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for MicrostructureParams {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            grains: DEFAULT_GRAIN_SEEDS,
            noise_deg: DEFAULT_NOISE_DEG,
            seed: DEFAULT_SEED,
        }
    }
}

/// Generated grid with its ground truth
#[derive(Debug, Clone)]
pub struct Microstructure {
    /// Per-pixel orientations
    pub orientations: OrientationMap,
    /// Index of the nearest Voronoi seed for every pixel
    pub seed_map: Array2<usize>,
    /// Unperturbed orientation of every seed
    pub seed_orientations: Vec<Quat>,
}

/// Uniformly distributed random orientation (Shoemake's method)
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();
    let u3: f64 = rng.random();
    let tau = std::f64::consts::TAU;

    let (s2, c2) = (tau * u2).sin_cos();
    let (s3, c3) = (tau * u3).sin_cos();
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();

    let q = Quat::new(b * c3, a * s2, a * c2, b * s3);
    if q.w < 0.0 { -q } else { q }
}

/// Random rotation of at most `max_angle_deg` about a random axis
pub fn random_perturbation<R: Rng + ?Sized>(rng: &mut R, max_angle_deg: f64) -> Quat {
    let axis = [
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
    ];
    let angle = max_angle_deg.to_radians() * rng.random::<f64>();
    Quat::from_axis_angle(axis, angle)
}

/// Generate a Voronoi microstructure
///
/// # Errors
///
/// Returns an error if:
/// - `grains` is zero
/// - `noise_deg` is negative or not finite
/// - Either grid dimension is zero or exceeds `MAX_GRID_DIMENSION`
pub fn generate(params: &MicrostructureParams) -> Result<Microstructure> {
    if params.grains == 0 {
        return Err(invalid_parameter(
            "grains",
            &params.grains,
            &"at least one seed is required",
        ));
    }
    if !params.noise_deg.is_finite() || params.noise_deg < 0.0 {
        return Err(invalid_parameter(
            "noise_deg",
            &params.noise_deg,
            &"must be a finite non-negative angle",
        ));
    }

    check_dimensions(params.rows, params.cols)?;

    let mut rng = StdRng::seed_from_u64(params.seed);

    let seeds: Vec<(f64, f64)> = (0..params.grains)
        .map(|_| {
            (
                rng.random::<f64>() * params.rows as f64,
                rng.random::<f64>() * params.cols as f64,
            )
        })
        .collect();
    let seed_orientations: Vec<Quat> = (0..params.grains)
        .map(|_| random_orientation(&mut rng))
        .collect();

    let seed_map = Array2::from_shape_fn((params.rows, params.cols), |(row, col)| {
        nearest_seed(&seeds, row as f64 + 0.5, col as f64 + 0.5)
    });

    let mut quats = Vec::with_capacity(params.rows * params.cols);
    for &index in &seed_map {
        let base = seed_orientations.get(index).copied().unwrap_or_default();
        let noise = random_perturbation(&mut rng, params.noise_deg);
        quats.push((base * noise).normalised());
    }

    let orientations = OrientationMap::from_quats(params.rows, params.cols, quats)?;

    Ok(Microstructure {
        orientations,
        seed_map,
        seed_orientations,
    })
}

fn nearest_seed(seeds: &[(f64, f64)], row: f64, col: f64) -> usize {
    seeds
        .iter()
        .enumerate()
        .map(|(index, &(seed_row, seed_col))| {
            let distance = (seed_row - row).mul_add(seed_row - row, (seed_col - col).powi(2));
            (index, distance)
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map_or(0, |(index, _)| index)
}
