use glam::Vec2;
use std::f32::consts::TAU;
use std::ops::{Add, AddAssign, Neg, Sub};

use crate::radian_to_bam;

/// A direction in radians, always wrapped in to `[0, TAU)`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Angle(f32);

impl Angle {
    /// Will always wrap < 0 to > PI
    #[inline]
    pub const fn new(mut radians: f32) -> Self {
        radians = radians % TAU;
        if radians < 0.0 {
            radians += TAU;
        }
        Angle(radians)
    }

    #[inline]
    pub const fn from_degrees(degrees: f32) -> Self {
        Angle::new(degrees.to_radians())
    }

    #[inline]
    const fn inner_wrap(&mut self) {
        self.0 = self.0 % TAU;
        if self.0 < 0.0 {
            self.0 += TAU;
        }
    }

    #[inline]
    pub const fn rad(&self) -> f32 {
        self.0
    }

    #[inline]
    pub const fn deg(&self) -> f32 {
        self.0.to_degrees()
    }

    /// Binary angle measure, a full turn spread over the `u32` range.
    #[inline]
    pub fn bam(&self) -> u32 {
        radian_to_bam(self.0)
    }

    #[inline]
    pub fn sin(&self) -> f32 {
        self.0.sin()
    }

    #[inline]
    pub fn cos(&self) -> f32 {
        self.0.cos()
    }

    #[inline]
    pub fn sin_cos(&self) -> (f32, f32) {
        self.0.sin_cos()
    }

    #[inline(always)]
    pub fn unit(&self) -> Vec2 {
        let (y, x) = self.sin_cos();
        Vec2::new(x, y)
    }

    pub fn from_vector(input: Vec2) -> Self {
        Angle::new(input.y.atan2(input.x))
    }
}

impl Add for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, other: Angle) -> Angle {
        Angle::new(self.0 + other.0)
    }
}

impl Add<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, other: f32) -> Angle {
        Angle::new(self.0 + other)
    }
}

impl AddAssign<f32> for Angle {
    #[inline]
    fn add_assign(&mut self, other: f32) {
        self.0 += other;
        self.inner_wrap();
    }
}

impl Sub for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, other: Angle) -> Angle {
        Angle::new(self.0 - other.0)
    }
}

impl Sub<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, other: f32) -> Angle {
        Angle::new(self.0 - other)
    }
}

impl Neg for Angle {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Angle::new(-self.0)
    }
}

/// Angle of `point1` as seen from `point2`
#[inline]
pub fn point_to_angle_2(point1: Vec2, point2: Vec2) -> Angle {
    let x = point1.x - point2.x;
    let y = point1.y - point2.y;
    Angle::new(y.atan2(x))
}

#[cfg(test)]
mod tests {
    use super::{Angle, point_to_angle_2};
    use glam::Vec2;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn wraps_negative() {
        let a = Angle::new(-FRAC_PI_2);
        assert!((a.rad() - 3.0 * FRAC_PI_2).abs() < 1e-5);
        let a = Angle::new(TAU + 0.5);
        assert!((a.rad() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn sub_wraps_through_zero() {
        let a = Angle::from_degrees(10.0) - Angle::from_degrees(20.0);
        assert!((a.deg() - 350.0).abs() < 1e-3);
        let mut b = Angle::from_degrees(350.0);
        b += 20f32.to_radians();
        assert!((b.deg() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn neg_stays_in_range() {
        let a = -Angle::from_degrees(45.0);
        assert!((a.deg() - 315.0).abs() < 1e-3);
    }

    #[test]
    fn angle_between_points() {
        let a = point_to_angle_2(Vec2::new(0.0, 5.0), Vec2::ZERO);
        assert!((a.rad() - FRAC_PI_2).abs() < 1e-5);
        let a = point_to_angle_2(Vec2::new(-5.0, 0.0), Vec2::ZERO);
        assert!((a.rad() - PI).abs() < 1e-5);
    }

    #[test]
    fn bam_quarters() {
        assert_eq!(Angle::new(0.0).bam(), 0);
        assert_eq!(Angle::new(FRAC_PI_2).bam(), 0x4000_0000);
        assert_eq!(Angle::new(PI).bam(), 0x8000_0000);
    }
}
