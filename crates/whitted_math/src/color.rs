//! Linear radiance values.

use crate::Interval;
use glam::DVec3;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Linear, unclamped RGB radiance.
///
/// Channels may exceed 1.0 while light is accumulated; they are clamped to
/// `[0, 1]` only when a pixel is written out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayColor(DVec3);

impl RayColor {
    pub const BLACK: RayColor = RayColor(DVec3::ZERO);
    pub const WHITE: RayColor = RayColor(DVec3::ONE);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b))
    }

    /// Same value in all three channels.
    #[inline]
    pub const fn gray(v: f64) -> Self {
        Self(DVec3::splat(v))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// True when every channel is exactly zero.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.0 == DVec3::ZERO
    }

    #[inline]
    pub fn lerp(self, target: RayColor, alpha: f64) -> RayColor {
        RayColor(self.0.lerp(target.0, alpha))
    }

    /// Sum of the absolute channel values.
    #[inline]
    pub fn abs_channel_sum(&self) -> f64 {
        self.0.abs().element_sum()
    }

    /// Clamp each channel to `[0, 1]`. Output boundary only.
    pub fn clamped(self) -> RayColor {
        RayColor::new(
            Interval::UNIT.clamp(self.r()),
            Interval::UNIT.clamp(self.g()),
            Interval::UNIT.clamp(self.b()),
        )
    }

    /// Clamp and quantize to 8 bits per channel.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (255.0 * c.r()).round() as u8,
            (255.0 * c.g()).round() as u8,
            (255.0 * c.b()).round() as u8,
        ]
    }

    /// Component-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(self, other: RayColor, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Add for RayColor {
    type Output = RayColor;

    #[inline]
    fn add(self, rhs: RayColor) -> RayColor {
        RayColor(self.0 + rhs.0)
    }
}

impl AddAssign for RayColor {
    #[inline]
    fn add_assign(&mut self, rhs: RayColor) {
        self.0 += rhs.0;
    }
}

impl Sub for RayColor {
    type Output = RayColor;

    #[inline]
    fn sub(self, rhs: RayColor) -> RayColor {
        RayColor(self.0 - rhs.0)
    }
}

/// Component-wise product (filtering one color by another).
impl Mul for RayColor {
    type Output = RayColor;

    #[inline]
    fn mul(self, rhs: RayColor) -> RayColor {
        RayColor(self.0 * rhs.0)
    }
}

impl Mul<f64> for RayColor {
    type Output = RayColor;

    #[inline]
    fn mul(self, rhs: f64) -> RayColor {
        RayColor(self.0 * rhs)
    }
}

impl Div<f64> for RayColor {
    type Output = RayColor;

    #[inline]
    fn div(self, rhs: f64) -> RayColor {
        RayColor(self.0 / rhs)
    }
}

impl Sum for RayColor {
    fn sum<I: Iterator<Item = RayColor>>(iter: I) -> RayColor {
        iter.fold(RayColor::BLACK, |acc, c| acc + c)
    }
}
