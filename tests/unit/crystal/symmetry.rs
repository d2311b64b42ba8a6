//! Tests for crystal symmetry families and operator tables

#[cfg(test)]
mod tests {
    use grainseg::{CrystalSymmetry, ErrorKind, Quat};

    // Each family carries the proper rotation count of its point group
    // Verified by dropping a row from the hexagonal table
    #[test]
    fn test_operator_counts() {
        assert_eq!(CrystalSymmetry::Triclinic.operators().len(), 1);
        assert_eq!(CrystalSymmetry::Tetragonal.operators().len(), 8);
        assert_eq!(CrystalSymmetry::Cubic.operators().len(), 24);
        assert_eq!(CrystalSymmetry::Hexagonal.operators().len(), 12);
    }

    // Tables start with the identity and contain only unit quaternions
    // Verified by mistyping a table constant
    #[test]
    fn test_operators_are_unit_and_identity_first() {
        for symmetry in CrystalSymmetry::ALL {
            let operators = symmetry.operators();
            assert_eq!(operators.first(), Some(&Quat::IDENTITY));
            for op in operators {
                assert!((op.norm() - 1.0).abs() < 1e-9, "{symmetry}: {op}");
            }
        }
    }

    // The product of two operators is again an operator, up to sign
    // Verified by replacing a 3-fold operator with an unrelated rotation
    #[test]
    fn test_operators_form_group() {
        for symmetry in CrystalSymmetry::ALL {
            let operators = symmetry.operators();
            for &a in operators {
                for &b in operators {
                    let product = a * b;
                    let closed = operators
                        .iter()
                        .any(|op| (op.dot(&product).abs() - 1.0).abs() < 1e-9);
                    assert!(closed, "{symmetry}: {a} * {b} = {product} not in table");
                }
            }
        }
    }

    // Family names parse case-insensitively with surrounding whitespace
    // Verified by removing the trim
    #[test]
    fn test_parse_names() {
        assert_eq!("cubic".parse::<CrystalSymmetry>(), Ok(CrystalSymmetry::Cubic));
        assert_eq!(
            " Hexagonal ".parse::<CrystalSymmetry>(),
            Ok(CrystalSymmetry::Hexagonal)
        );
        for symmetry in CrystalSymmetry::ALL {
            assert_eq!(symmetry.to_string().parse::<CrystalSymmetry>(), Ok(symmetry));
        }
    }

    // Unknown families are invalid input
    // Verified by defaulting unknown names to cubic
    #[test]
    fn test_unknown_family_rejected() {
        let err = "orthorhombic".parse::<CrystalSymmetry>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("orthorhombic"));
    }
}
