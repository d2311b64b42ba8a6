//! Crystal symmetry families and their rotation tables
//!
//! Each family maps to an immutable table of proper rotations that carry
//! the lattice onto itself. Only one of `±q` is stored per operator; callers
//! compare through `|dot|`.

use std::fmt;
use std::str::FromStr;

use crate::crystal::quat::Quat;
use crate::io::error::GrainError;

const R: f64 = std::f64::consts::FRAC_1_SQRT_2;
const S3: f64 = 0.866_025_403_784_438_6;

static TRICLINIC: [Quat; 1] = [Quat::IDENTITY];

static TETRAGONAL: [Quat; 8] = [
    Quat::IDENTITY,
    // 4-fold about c
    Quat::new(R, 0.0, 0.0, R),
    Quat::new(0.0, 0.0, 0.0, 1.0),
    Quat::new(R, 0.0, 0.0, -R),
    // 2-folds in the basal plane
    Quat::new(0.0, 1.0, 0.0, 0.0),
    Quat::new(0.0, 0.0, 1.0, 0.0),
    Quat::new(0.0, R, R, 0.0),
    Quat::new(0.0, -R, R, 0.0),
];

static CUBIC: [Quat; 24] = [
    Quat::IDENTITY,
    // 4-folds about <100>
    Quat::new(R, R, 0.0, 0.0),
    Quat::new(0.0, 1.0, 0.0, 0.0),
    Quat::new(R, -R, 0.0, 0.0),
    Quat::new(R, 0.0, R, 0.0),
    Quat::new(0.0, 0.0, 1.0, 0.0),
    Quat::new(R, 0.0, -R, 0.0),
    Quat::new(R, 0.0, 0.0, R),
    Quat::new(0.0, 0.0, 0.0, 1.0),
    Quat::new(R, 0.0, 0.0, -R),
    // 2-folds about <110>
    Quat::new(0.0, R, R, 0.0),
    Quat::new(0.0, -R, R, 0.0),
    Quat::new(0.0, 0.0, R, R),
    Quat::new(0.0, 0.0, -R, R),
    Quat::new(0.0, R, 0.0, R),
    Quat::new(0.0, -R, 0.0, R),
    // 3-folds about <111>
    Quat::new(0.5, 0.5, 0.5, 0.5),
    Quat::new(0.5, -0.5, -0.5, -0.5),
    Quat::new(0.5, -0.5, 0.5, 0.5),
    Quat::new(0.5, 0.5, -0.5, -0.5),
    Quat::new(0.5, 0.5, -0.5, 0.5),
    Quat::new(0.5, -0.5, 0.5, -0.5),
    Quat::new(0.5, 0.5, 0.5, -0.5),
    Quat::new(0.5, -0.5, -0.5, 0.5),
];

static HEXAGONAL: [Quat; 12] = [
    Quat::IDENTITY,
    // 6-fold about c
    Quat::new(S3, 0.0, 0.0, 0.5),
    Quat::new(0.5, 0.0, 0.0, S3),
    Quat::new(0.0, 0.0, 0.0, 1.0),
    Quat::new(0.5, 0.0, 0.0, -S3),
    Quat::new(S3, 0.0, 0.0, -0.5),
    // 2-folds in the basal plane, every 30 degrees
    Quat::new(0.0, 1.0, 0.0, 0.0),
    Quat::new(0.0, S3, 0.5, 0.0),
    Quat::new(0.0, 0.5, S3, 0.0),
    Quat::new(0.0, 0.0, 1.0, 0.0),
    Quat::new(0.0, -0.5, S3, 0.0),
    Quat::new(0.0, -S3, 0.5, 0.0),
];

/// Crystal symmetry family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrystalSymmetry {
    /// No rotational symmetry beyond the identity
    Triclinic,
    /// Point group 422
    Tetragonal,
    /// Point group 432
    #[default]
    Cubic,
    /// Point group 622
    Hexagonal,
}

impl CrystalSymmetry {
    /// Every supported family
    pub const ALL: [Self; 4] = [
        Self::Triclinic,
        Self::Tetragonal,
        Self::Cubic,
        Self::Hexagonal,
    ];

    /// Symmetry operators, identity first
    pub fn operators(self) -> &'static [Quat] {
        match self {
            Self::Triclinic => &TRICLINIC,
            Self::Tetragonal => &TETRAGONAL,
            Self::Cubic => &CUBIC,
            Self::Hexagonal => &HEXAGONAL,
        }
    }

    /// Lower-case family name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Triclinic => "triclinic",
            Self::Tetragonal => "tetragonal",
            Self::Cubic => "cubic",
            Self::Hexagonal => "hexagonal",
        }
    }
}

impl FromStr for CrystalSymmetry {
    type Err = GrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| family.name() == lowered)
            .ok_or_else(|| GrainError::UnknownSymmetry { name: s.to_string() })
    }
}

impl fmt::Display for CrystalSymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
