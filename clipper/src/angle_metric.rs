//! Conversion of points and true angles in to clip angles.
//!
//! A clip angle only has to order directions the same way the true angle
//! does, so the default metric avoids `atan2` entirely. Both metrics put 0 on
//! the +X axis and increase counter-clockwise, and both spread one full turn
//! over the whole `u32` range so that wrapping arithmetic is the seam.

use std::fmt::{self, Debug};

use glam::Vec2;
use math::Angle;

/// Scale of one pseudo-angle unit (a quarter turn)
const PSEUDO_UNIT: f64 = (1u64 << 30) as f64;

/// A direction around the clipper origin in a monotonic, wrapping encoding.
#[derive(Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipAngle(u32);

impl ClipAngle {
    /// Also the sentinel returned for a point coincident with the origin
    pub const ZERO: ClipAngle = ClipAngle(0);
    pub const QUARTER: ClipAngle = ClipAngle(0x4000_0000);
    pub const HALF: ClipAngle = ClipAngle(0x8000_0000);
    pub const MAX: ClipAngle = ClipAngle(u32::MAX);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        ClipAngle(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position on the `0..=2^32` line used by the range set
    #[inline]
    pub(crate) const fn pos(self) -> u64 {
        self.0 as u64
    }

    /// From the floating pseudo-angle domain `[0, 4)`. Values outside wrap in
    /// to the domain, non-finite values give [`ClipAngle::ZERO`].
    #[inline]
    pub fn from_unit(value: f32) -> Self {
        if !value.is_finite() {
            return ClipAngle::ZERO;
        }
        let wrapped = (value as f64).rem_euclid(4.0);
        ClipAngle((wrapped * PSEUDO_UNIT) as u64 as u32)
    }

    /// Back to the floating `[0, 4)` domain
    #[inline]
    pub fn as_unit(self) -> f32 {
        (self.0 as f64 / PSEUDO_UNIT) as f32
    }

    /// Counter-clockwise distance from `other` to `self`
    #[inline]
    pub const fn span_from(self, other: ClipAngle) -> u32 {
        self.0.wrapping_sub(other.0)
    }
}

impl Debug for ClipAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClipAngle({:#010x})", self.0)
    }
}

/// Maps directions around an origin on to [`ClipAngle`]s.
///
/// Implementations must agree with true angular ordering. A single clipper
/// must only ever use one metric since only relative order is meaningful.
pub trait AngleMetric: Copy + Default + Debug {
    const NAME: &'static str;

    /// Clip angle of `point` as seen from `origin`. A zero offset or a
    /// non-finite coordinate returns [`ClipAngle::ZERO`].
    fn point_to_clip_angle(origin: Vec2, point: Vec2) -> ClipAngle;

    /// Clip angle of a true direction
    fn angle_to_clip_angle(angle: Angle) -> ClipAngle;
}

/// `dy / (|dx| + |dy|)` with a quadrant offset, no transcendental calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct PseudoAngle;

impl PseudoAngle {
    #[inline]
    fn from_offset(d: Vec2) -> ClipAngle {
        if !d.is_finite() || (d.x == 0.0 && d.y == 0.0) {
            return ClipAngle::ZERO;
        }
        let mut result = d.y / (d.x.abs() + d.y.abs());
        if d.x < 0.0 {
            result = 2.0 - result;
        }
        ClipAngle::from_unit(result)
    }
}

impl AngleMetric for PseudoAngle {
    const NAME: &'static str = "pseudo";

    #[inline]
    fn point_to_clip_angle(origin: Vec2, point: Vec2) -> ClipAngle {
        Self::from_offset(point - origin)
    }

    #[inline]
    fn angle_to_clip_angle(angle: Angle) -> ClipAngle {
        Self::from_offset(angle.unit())
    }
}

/// `atan2` in degrees, scaled to a BAM.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealAngle;

impl AngleMetric for RealAngle {
    const NAME: &'static str = "real";

    #[inline]
    fn point_to_clip_angle(origin: Vec2, point: Vec2) -> ClipAngle {
        let d = point - origin;
        if !d.is_finite() || (d.x == 0.0 && d.y == 0.0) {
            return ClipAngle::ZERO;
        }
        ClipAngle(Angle::from_vector(d).bam())
    }

    #[inline]
    fn angle_to_clip_angle(angle: Angle) -> ClipAngle {
        ClipAngle(angle.bam())
    }
}

#[cfg(not(feature = "real_angle"))]
pub type DefaultMetric = PseudoAngle;
#[cfg(feature = "real_angle")]
pub type DefaultMetric = RealAngle;
