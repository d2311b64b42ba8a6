//! Tests for quaternion algebra and symmetry-aware misorientation

#[cfg(test)]
mod tests {
    use crate::quarter_turn_z;
    use grainseg::crystal::quat::dot_to_degrees;
    use grainseg::synthetic::microstructure::random_orientation;
    use grainseg::{CrystalSymmetry, ErrorKind, GrainError, Quat};
    use rand::{SeedableRng, rngs::StdRng};

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    // Zero Euler angles describe the reference orientation
    // Verified by dropping the sign flip into the northern hemisphere
    #[test]
    fn test_from_euler_zero_is_identity() {
        let q = Quat::from_euler(0.0, 0.0, 0.0);
        assert!(close(q.w, 1.0, 1e-12));
        assert!(close(q.x, 0.0, 1e-12));
        assert!(close(q.y, 0.0, 1e-12));
        assert!(close(q.z, 0.0, 1e-12));
    }

    // Euler conversion yields unit quaternions in the northern hemisphere
    // Verified by removing the hemisphere flip
    #[test]
    fn test_from_euler_is_unit_and_canonical() {
        for &(phi1, big_phi, phi2) in &[(0.3, 0.5, 1.1), (3.0, 2.5, 4.0), (6.0, 0.1, 5.9)] {
            let q = Quat::from_euler(phi1, big_phi, phi2);
            assert!(q.is_unit());
            assert!(q.w >= 0.0);
        }
    }

    // Bunge rotation about Z by phi1 alone is a rotation of the same angle
    // Verified by halving the wrong angle sum
    #[test]
    fn test_from_euler_single_rotation_angle() {
        let q = Quat::from_euler(0.6, 0.0, 0.0);
        assert!(close(q.angle_deg(), 0.6_f64.to_degrees(), 1e-9));
    }

    // Hamilton product follows i * j = k
    // Verified by swapping the sign of the cross term
    #[test]
    fn test_hamilton_product() {
        let i = Quat::new(0.0, 1.0, 0.0, 0.0);
        let j = Quat::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, Quat::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(j * i, Quat::new(0.0, 0.0, 0.0, -1.0));
    }

    // A unit quaternion times its conjugate is the identity
    // Verified by not negating the vector part in conjugate
    #[test]
    fn test_conjugate_inverts() {
        let q = Quat::from_euler(1.0, 0.4, 2.0);
        let product = q * q.conjugate();
        assert!(close(product.w, 1.0, 1e-12));
        assert!(close(product.x.abs() + product.y.abs() + product.z.abs(), 0.0, 1e-12));
    }

    // Normalisation rescales and leaves a zero quaternion alone
    // Verified by skipping the epsilon guard
    #[test]
    fn test_normalise() {
        let q = Quat::new(2.0, 0.0, 0.0, 0.0).normalised();
        assert_eq!(q, Quat::IDENTITY);

        let zero = Quat::new(0.0, 0.0, 0.0, 0.0).normalised();
        assert_eq!(zero, Quat::new(0.0, 0.0, 0.0, 0.0));
    }

    // Dot values past 1 are clamped before acos
    // Verified by removing the clamp
    #[test]
    fn test_dot_to_degrees_clamps_drift() {
        assert!(close(dot_to_degrees(1.000_000_1), 0.0, 1e-12));
        assert!(close(dot_to_degrees(0.0), 180.0, 1e-9));
    }

    // Misorientation of an orientation with itself is zero for every family
    // Verified by starting the maximum search at the first operator only
    #[test]
    fn test_misorientation_identity_case() {
        let q = Quat::from_euler(0.3, 0.5, 1.1);
        for symmetry in CrystalSymmetry::ALL {
            let angle = q.misorientation(&q, symmetry).unwrap();
            assert!(angle < 1e-4, "{symmetry}: {angle}");
        }
    }

    // A quarter turn about c reduces differently per family
    // Verified by ignoring the symmetry table
    #[test]
    fn test_misorientation_respects_family() {
        let q = quarter_turn_z();
        let identity = Quat::IDENTITY;
        let angle = |symmetry| q.misorientation(&identity, symmetry).unwrap();

        assert!(close(angle(CrystalSymmetry::Triclinic), 90.0, 1e-9));
        assert!(close(angle(CrystalSymmetry::Tetragonal), 0.0, 1e-4));
        assert!(close(angle(CrystalSymmetry::Cubic), 0.0, 1e-4));
        assert!(close(angle(CrystalSymmetry::Hexagonal), 30.0, 1e-9));
    }

    // Misorientation is symmetric in its arguments
    // Verified by applying symmetry operators on the left
    #[test]
    fn test_misorientation_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for symmetry in CrystalSymmetry::ALL {
            for _ in 0..50 {
                let a = random_orientation(&mut rng);
                let b = random_orientation(&mut rng);
                let ab = a.misorientation(&b, symmetry).unwrap();
                let ba = b.misorientation(&a, symmetry).unwrap();
                assert!(close(ab, ba, 1e-6), "{symmetry}: {ab} vs {ba}");
            }
        }
    }

    // Applying any symmetry operator to the crystal leaves misorientation unchanged
    // Verified by removing an operator from the cubic table
    #[test]
    fn test_misorientation_invariant_under_symmetry() {
        let mut rng = StdRng::seed_from_u64(11);
        for symmetry in CrystalSymmetry::ALL {
            let a = random_orientation(&mut rng);
            let b = random_orientation(&mut rng);
            let reference = a.misorientation(&b, symmetry).unwrap();
            for &op in symmetry.operators() {
                let equivalent = (op * a).normalised();
                let angle = equivalent.misorientation(&b, symmetry).unwrap();
                assert!(close(angle, reference, 1e-6), "{symmetry}: {angle} vs {reference}");
            }
        }
    }

    // Negated quaternions are the same orientation
    // Verified by dropping the absolute value of the dot product
    #[test]
    fn test_misorientation_double_cover() {
        let q = Quat::from_euler(2.0, 1.0, 0.5);
        let angle = q.misorientation(&-q, CrystalSymmetry::Triclinic).unwrap();
        assert!(angle < 1e-4);
    }

    // Closest equivalent lands on the reference hemisphere
    // Verified by returning the raw product without the sign flip
    #[test]
    fn test_closest_equivalent_aligns_with_reference() {
        let reference = Quat::from_euler(0.2, 0.3, 0.4);
        let rotated = quarter_turn_z() * reference;
        let equivalent = (-rotated)
            .closest_equivalent(&reference, CrystalSymmetry::Cubic)
            .unwrap();

        assert!(equivalent.dot(&reference) > 0.999);
    }

    // Non-unit inputs are rejected as invalid input
    // Verified by skipping the norm check
    #[test]
    fn test_non_unit_quaternion_rejected() {
        let bad = Quat::new(2.0, 0.0, 0.0, 0.0);
        let err = bad
            .misorientation(&Quat::IDENTITY, CrystalSymmetry::Cubic)
            .unwrap_err();
        assert!(matches!(err, GrainError::NonUnitQuaternion { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        assert!(
            Quat::IDENTITY
                .closest_equivalent(&bad, CrystalSymmetry::Cubic)
                .is_err()
        );
    }

    // Axis-angle construction normalises the axis and handles a zero axis
    // Verified by not dividing by the axis length
    #[test]
    fn test_from_axis_angle() {
        let q = Quat::from_axis_angle([0.0, 0.0, 5.0], std::f64::consts::PI);
        assert!(close(q.z, 1.0, 1e-12));
        assert!(q.is_unit());

        assert_eq!(Quat::from_axis_angle([0.0; 3], 1.0), Quat::IDENTITY);
    }
}
