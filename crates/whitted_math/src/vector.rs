//! Affine point and vector types.

use glam::DVec3;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3(DVec3);

/// A direction or displacement in world space.
///
/// All operations are pure: `normalize` and negation return new values and
/// never touch the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3(DVec3);

impl Point3 {
    pub const ORIGIN: Point3 = Point3(DVec3::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Linear interpolation: `alpha = 0` yields `self`, `alpha = 1` yields `target`.
    #[inline]
    pub fn lerp(self, target: Point3, alpha: f64) -> Point3 {
        Point3(self.0.lerp(target.0, alpha))
    }

    #[inline]
    pub fn distance_squared(self, other: Point3) -> f64 {
        self.0.distance_squared(other.0)
    }

    /// Component-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(self, other: Point3, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3(DVec3::ZERO);
    pub const X: Vector3 = Vector3(DVec3::X);
    pub const Y: Vector3 = Vector3(DVec3::Y);
    pub const Z: Vector3 = Vector3(DVec3::Z);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.0.length_squared()
    }

    /// Unit vector with the same direction.
    ///
    /// The caller must guarantee a non-zero length; use [`Vector3::try_normalize`]
    /// when that is not known.
    #[inline]
    pub fn normalize(self) -> Vector3 {
        debug_assert!(self.length_squared() > 0.0, "normalize called on a zero-length vector");
        Vector3(self.0 / self.0.length())
    }

    /// Unit vector with the same direction, or `None` for zero-length or
    /// non-finite input.
    #[inline]
    pub fn try_normalize(self) -> Option<Vector3> {
        self.0.try_normalize().map(Vector3)
    }

    #[inline]
    pub fn dot(self, other: Vector3) -> f64 {
        self.0.dot(other.0)
    }

    #[inline]
    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3(self.0.cross(other.0))
    }

    #[inline]
    pub fn lerp(self, target: Vector3, alpha: f64) -> Vector3 {
        Vector3(self.0.lerp(target.0, alpha))
    }

    /// Mirror `self` about the plane with unit normal `normal`: `v - 2(v·n)n`.
    #[inline]
    pub fn reflect(self, normal: Vector3) -> Vector3 {
        self - 2.0 * self.dot(normal) * normal
    }

    /// Component-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(self, other: Vector3, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

// =============================================================================
// Affine operators
// =============================================================================

impl Sub for Point3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3(self.0 - rhs.0)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vector3) -> Point3 {
        Point3(self.0 + rhs.0)
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Point3 {
        Point3(self.0 - rhs.0)
    }
}

impl Add<Point3> for Vector3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3(self.0 + rhs.0)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3(self.0 + rhs.0)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3(self.0 - rhs.0)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    #[inline]
    fn neg(self) -> Vector3 {
        Vector3(-self.0)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3(self.0 * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    #[inline]
    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3(self * rhs.0)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    #[inline]
    fn div(self, rhs: f64) -> Vector3 {
        Vector3(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_normalize_unit_length_and_idempotent() {
        let samples = [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-1.0, 2.0, 7.5),
            Vector3::new(1e-3, -1e-3, 2e-3),
            Vector3::new(1e6, 1.0, -1e5),
        ];

        for v in samples {
            let n = v.normalize();
            assert!((n.length() - 1.0).abs() < EPS);
            assert!(n.normalize().abs_diff_eq(n, EPS));
        }
    }

    #[test]
    fn test_try_normalize_zero() {
        assert!(Vector3::ZERO.try_normalize().is_none());
        assert_eq!(Vector3::new(0.0, 0.0, 2.0).try_normalize(), Some(Vector3::Z));
    }

    #[test]
    fn test_cross_anticommutative_dot_commutative() {
        let a = Vector3::new(1.0, -2.0, 0.5);
        let b = Vector3::new(4.0, 0.25, -3.0);

        assert!(a.cross(b).abs_diff_eq(-b.cross(a), EPS));
        assert_eq!(a.dot(b), b.dot(a));
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
    }

    #[test]
    fn test_reflect() {
        let incoming = Vector3::new(1.0, -1.0, 0.0);
        let reflected = incoming.reflect(Vector3::Y);
        assert_eq!(reflected, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_lerp() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, -10.0, 4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point3::new(5.0, -5.0, 2.0));

        let v = Vector3::X.lerp(Vector3::Y, 0.25);
        assert!(v.abs_diff_eq(Vector3::new(0.75, 0.25, 0.0), EPS));
    }

    #[test]
    fn test_scalar_multiplication_both_sides() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(2.0 * v, v * 2.0);
        assert_eq!(v / 2.0, Vector3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_distance_squared() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(2.0, 3.0, 3.0);
        assert_eq!(a.distance_squared(b), 9.0);
        assert_eq!((b - a).length_squared(), 9.0);
    }
}
