//! Tests for the seeded Voronoi generator

#[cfg(test)]
mod tests {
    use crate::assert_same_orientation;
    use grainseg::io::configuration::MAX_GRID_DIMENSION;
    use grainseg::synthetic::microstructure::{random_orientation, random_perturbation};
    use grainseg::synthetic::{MicrostructureParams, generate};
    use grainseg::{CrystalSymmetry, GrainError};
    use rand::{SeedableRng, rngs::StdRng};

    fn params(seed: u64, noise_deg: f64) -> MicrostructureParams {
        MicrostructureParams {
            rows: 20,
            cols: 30,
            grains: 6,
            noise_deg,
            seed,
        }
    }

    // The same parameters reproduce the same grid
    // Verified by seeding from entropy
    #[test]
    fn test_deterministic() {
        let a = generate(&params(7, 1.0)).unwrap();
        let b = generate(&params(7, 1.0)).unwrap();
        let c = generate(&params(8, 1.0)).unwrap();

        assert_eq!(a.orientations.as_array(), b.orientations.as_array());
        assert_eq!(a.seed_map, b.seed_map);
        assert_ne!(a.orientations.as_array(), c.orientations.as_array());
    }

    // Without noise every pixel carries its seed orientation
    // Verified by perturbing with a fixed minimum angle
    #[test]
    fn test_zero_noise_matches_seeds() {
        let microstructure = generate(&params(3, 0.0)).unwrap();
        assert_eq!(microstructure.orientations.dim(), (20, 30));
        assert_eq!(microstructure.seed_orientations.len(), 6);

        for ((row, col), &index) in microstructure.seed_map.indexed_iter() {
            assert!(index < 6);
            let pixel = microstructure.orientations.get(row, col).unwrap();
            let seed = microstructure.seed_orientations.get(index).unwrap();
            assert_same_orientation(pixel, seed, CrystalSymmetry::Triclinic);
        }
    }

    // Random orientations are unit and canonical
    // Verified by dropping the hemisphere flip
    #[test]
    fn test_random_orientation() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let q = random_orientation(&mut rng);
            assert!(q.is_unit());
            assert!(q.w >= 0.0);
        }
    }

    // Perturbations never exceed the requested angle
    // Verified by scaling the angle by two
    #[test]
    fn test_random_perturbation_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let q = random_perturbation(&mut rng, 2.0);
            assert!(q.is_unit());
            assert!(q.angle_deg() <= 2.0 + 1e-9);
        }
    }

    // Invalid parameters are rejected
    // Verified by clamping negative noise to zero
    #[test]
    fn test_invalid_params() {
        let mut invalid = params(1, 0.5);
        invalid.grains = 0;
        assert!(matches!(
            generate(&invalid).unwrap_err(),
            GrainError::InvalidParameter {
                parameter: "grains",
                ..
            }
        ));
        assert!(generate(&params(1, -1.0)).is_err());
        assert!(generate(&params(1, f64::NAN)).is_err());

        let mut empty = params(1, 0.5);
        empty.rows = 0;
        assert!(generate(&empty).is_err());
    }

    // Oversized grids are rejected before any grid is allocated
    // Verified by checking dimensions only after filling the seed map
    #[test]
    fn test_oversized_grid_rejected() {
        let mut tall = params(1, 0.5);
        tall.rows = MAX_GRID_DIMENSION + 1;
        assert!(matches!(
            generate(&tall).unwrap_err(),
            GrainError::InvalidParameter {
                parameter: "grid_dimensions",
                ..
            }
        ));

        let mut huge = params(1, 0.5);
        huge.rows = usize::MAX / 4;
        huge.cols = 8;
        assert!(matches!(
            generate(&huge).unwrap_err(),
            GrainError::InvalidParameter { .. }
        ));
    }
}
