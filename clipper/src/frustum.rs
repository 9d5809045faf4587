//! The view frustum the clipper keeps alongside its angular set.
//!
//! Left and right planes are what frustum seeding turns in to clip ranges,
//! top and bottom are the vertical component tested against boxes.

use glam::Vec3;
use math::Angle;

use crate::bbox::BBox;

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;
pub const BOTTOM: usize = 2;
pub const TOP: usize = 3;

/// Widest vertical half angle kept as a real plane
const MAX_HALF_FOV_Y: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Yaw, pitch and roll of a viewpoint. Roll does not change which
/// directions are inside a horizontal field of view and is ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub yaw: Angle,
    /// Radians, positive looks up
    pub pitch: f32,
    pub roll: f32,
}

impl ViewAngles {
    pub fn new(yaw: Angle, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            roll: 0.0,
        }
    }

    /// Unit vector along the line of sight
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cy * cp, sy * cp, sp)
    }

    /// Unit vector to the right, always horizontal
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(sy, -cy, 0.0)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

/// `normal · p + distance = 0`, normal pointing in to the kept half-space
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn through(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Signed distance, positive is inside
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Every corner of `bbox` is strictly outside
    #[inline]
    pub fn aabb_outside(&self, bbox: &BBox) -> bool {
        // Corner furthest along the normal
        let p = Vec3::new(
            if self.normal.x >= 0.0 { bbox.max.x } else { bbox.min.x },
            if self.normal.y >= 0.0 { bbox.max.y } else { bbox.min.y },
            if self.normal.z >= 0.0 { bbox.max.z } else { bbox.min.z },
        );
        self.distance_to_point(p) < 0.0
    }
}

/// Four planes through the eye: left, right, bottom, top.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 4],
}

impl Frustum {
    /// `fov_x` and `fov_y` are full angles in radians
    pub fn from_view(origin: Vec3, view: ViewAngles, fov_x: f32, fov_y: f32) -> Self {
        let forward = view.forward();
        let right = view.right();
        let up = view.up();

        let (sx, cx) = (fov_x * 0.5).sin_cos();
        let (sy, cy) = (fov_y * 0.5).clamp(0.0, MAX_HALF_FOV_Y).sin_cos();

        let mut planes = [Plane::default(); 4];
        planes[LEFT] = Plane::through(origin, right * cx + forward * sx);
        planes[RIGHT] = Plane::through(origin, -right * cx + forward * sx);
        planes[BOTTOM] = Plane::through(origin, up * cy + forward * sy);
        planes[TOP] = Plane::through(origin, -up * cy + forward * sy);
        Self { planes }
    }

    /// Box is entirely above the top plane or below the bottom one
    pub fn aabb_outside_vertical(&self, bbox: &BBox) -> bool {
        self.planes[BOTTOM].aabb_outside(bbox) || self.planes[TOP].aabb_outside(bbox)
    }

    /// Point inside all four planes
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|p| p.distance_to_point(point) >= 0.0)
    }
}
