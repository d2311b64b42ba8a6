//! Unit quaternion orientations with symmetry-aware misorientation
//!
//! A quaternion and its negation describe the same rotation, so every
//! comparison goes through the absolute value of the dot product.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg};

use crate::crystal::symmetry::CrystalSymmetry;
use crate::io::configuration::UNIT_NORM_TOLERANCE;
use crate::io::error::{GrainError, Result};

/// Quaternion `w + xi + yj + zk` describing a crystal orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    /// Scalar part
    pub w: f64,
    /// Coefficient of i
    pub x: f64,
    /// Coefficient of j
    pub y: f64,
    /// Coefficient of k
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Create a quaternion from its components (no normalisation)
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Build an orientation from Bunge (ZXZ) Euler angles in radians
    ///
    /// The result is placed in the northern hemisphere (`w >= 0`).
    pub fn from_euler(phi1: f64, big_phi: f64, phi2: f64) -> Self {
        let (sin_half, cos_half) = (big_phi / 2.0).sin_cos();
        let (sin_sum, cos_sum) = f64::midpoint(phi1, phi2).sin_cos();
        let (sin_diff, cos_diff) = ((phi1 - phi2) / 2.0).sin_cos();

        let q = Self::new(
            cos_half * cos_sum,
            -sin_half * cos_diff,
            -sin_half * sin_diff,
            -cos_half * sin_sum,
        );
        if q.w < 0.0 { -q } else { q }
    }

    /// Rotation by `angle` radians about `axis` (normalised internally)
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Self {
        let length = axis[2].mul_add(axis[2], axis[0].mul_add(axis[0], axis[1] * axis[1])).sqrt();
        if length <= f64::EPSILON {
            return Self::IDENTITY;
        }
        let (s, c) = (angle / 2.0).sin_cos();
        let k = s / length;
        Self::new(c, axis[0] * k, axis[1] * k, axis[2] * k)
    }

    /// Four-component dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.z.mul_add(
            other.z,
            self.y
                .mul_add(other.y, self.w.mul_add(other.w, self.x * other.x)),
        )
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Whether the norm is within [`UNIT_NORM_TOLERANCE`] of 1
    pub fn is_unit(&self) -> bool {
        (self.norm() - 1.0).abs() <= UNIT_NORM_TOLERANCE
    }

    /// Scale to unit length in place; a zero quaternion is left untouched
    pub fn normalise(&mut self) {
        let norm = self.norm();
        if norm > f64::EPSILON {
            self.w /= norm;
            self.x /= norm;
            self.y /= norm;
            self.z /= norm;
        }
    }

    /// Unit-length copy
    #[must_use]
    pub fn normalised(mut self) -> Self {
        self.normalise();
        self
    }

    /// Conjugate (inverse for unit quaternions)
    #[must_use]
    pub const fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotation angle of this orientation in degrees, in [0, 180]
    pub fn angle_deg(&self) -> f64 {
        dot_to_degrees(self.w.abs())
    }

    /// Fail unless this quaternion is unit norm
    ///
    /// # Errors
    ///
    /// Returns `NonUnitQuaternion` when the norm is outside tolerance
    pub fn ensure_unit(&self) -> Result<()> {
        if self.is_unit() {
            Ok(())
        } else {
            Err(GrainError::NonUnitQuaternion {
                position: None,
                norm: self.norm(),
            })
        }
    }

    /// Misorientation angle in degrees between `self` and `other`
    ///
    /// Minimum rotation over every symmetry-equivalent representation of
    /// `self` in the given family.
    ///
    /// # Errors
    ///
    /// Returns `NonUnitQuaternion` if either input is not unit norm
    pub fn misorientation(&self, other: &Self, symmetry: CrystalSymmetry) -> Result<f64> {
        self.ensure_unit()?;
        other.ensure_unit()?;
        Ok(self.misorientation_unchecked(other, symmetry))
    }

    /// Symmetry equivalent of `self` best aligned with `reference`
    ///
    /// The result shares a hemisphere with `reference` so it can be summed
    /// into a running average.
    ///
    /// # Errors
    ///
    /// Returns `NonUnitQuaternion` if either input is not unit norm
    pub fn closest_equivalent(&self, reference: &Self, symmetry: CrystalSymmetry) -> Result<Self> {
        self.ensure_unit()?;
        reference.ensure_unit()?;
        Ok(self.closest_equivalent_unchecked(reference, symmetry))
    }

    pub(crate) fn misorientation_unchecked(&self, other: &Self, symmetry: CrystalSymmetry) -> f64 {
        let best = symmetry
            .operators()
            .iter()
            .map(|op| (*op * *self).dot(other).abs())
            .fold(0.0, f64::max);
        dot_to_degrees(best)
    }

    pub(crate) fn closest_equivalent_unchecked(
        &self,
        reference: &Self,
        symmetry: CrystalSymmetry,
    ) -> Self {
        let mut best = *self;
        let mut best_dot = -1.0;
        for op in symmetry.operators() {
            let candidate = *op * *self;
            let dot = candidate.dot(reference).abs();
            if dot > best_dot {
                best_dot = dot;
                best = candidate;
            }
        }
        if best.dot(reference) < 0.0 { -best } else { best }
    }
}

/// Convert `|q1 · q2|` into a rotation angle in degrees
///
/// Values drifting past 1 are clamped before `acos`.
pub fn dot_to_degrees(dot: f64) -> f64 {
    360.0 * dot.clamp(-1.0, 1.0).acos() / std::f64::consts::PI
}

impl Mul for Quat {
    type Output = Self;

    // Hamilton product
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl Add for Quat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl AddAssign for Quat {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Neg for Quat {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}, {:.4}, {:.4}]",
            self.w, self.x, self.y, self.z
        )
    }
}
