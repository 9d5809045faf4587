use std::marker::PhantomData;

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use glam::{Vec2, Vec3};
use log::trace;
use math::Angle;

use crate::angle_metric::{AngleMetric, ClipAngle, DefaultMetric};
use crate::bbox::BBox;
use crate::config::ClipperConfig;
use crate::frustum::Frustum;
use crate::level::LevelHandle;
use crate::range_set::ClipRangeSet;

/// Tracks which directions around an origin are already hidden behind
/// nearer solid geometry.
///
/// One clipper belongs to one view (a camera, or a light for shadow passes)
/// and is reused frame after frame through [`Clipper::clear_clip_nodes`].
pub struct Clipper<M: AngleMetric = DefaultMetric> {
    pub(crate) ranges: ClipRangeSet,
    pub(crate) origin: Vec3,
    pub(crate) radius: f32,
    pub(crate) level: Option<LevelHandle>,
    pub(crate) config: ClipperConfig,
    pub(crate) frustum: Option<Frustum>,
    /// Test boxes against the frustum top and bottom planes
    pub(crate) vertical_planes: bool,
    _metric: PhantomData<M>,
}

impl<M: AngleMetric> Clipper<M> {
    pub fn new(config: ClipperConfig) -> Self {
        Self {
            ranges: ClipRangeSet::new(config.initial_capacity, config.max_ranges),
            origin: Vec3::ZERO,
            radius: 0.0,
            level: None,
            config,
            frustum: None,
            vertical_planes: false,
            _metric: PhantomData,
        }
    }

    /// Start a new frame from `origin`. A `radius` above zero limits
    /// visibility to that distance, as for a light.
    pub fn clear_clip_nodes(&mut self, origin: Vec3, level: LevelHandle, radius: f32) {
        self.ranges.clear();
        self.origin = origin;
        self.level = Some(level);
        self.radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        self.vertical_planes = false;
        trace!(
            "Clipper reset at {origin} for {level:?}, radius {}, metric {}",
            self.radius,
            M::NAME
        );
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn level(&self) -> Option<LevelHandle> {
        self.level
    }

    #[inline]
    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    #[inline]
    pub fn ranges(&self) -> &ClipRangeSet {
        &self.ranges
    }

    /// Every direction is hidden, nothing further can be seen
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.ranges.is_full()
    }

    #[inline]
    pub fn get_frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = Some(frustum);
    }

    #[inline]
    pub fn point_to_clip_angle(&self, point: Vec2) -> ClipAngle {
        M::point_to_clip_angle(self.origin.truncate(), point)
    }

    #[inline]
    pub fn angle_to_clip_angle(&self, angle: Angle) -> ClipAngle {
        M::angle_to_clip_angle(angle)
    }

    /// Mark `[from, to)` counter-clockwise as hidden. Returns true if
    /// anything changed.
    pub fn add_clip_range(&mut self, from: ClipAngle, to: ClipAngle) -> bool {
        #[cfg(feature = "hprof")]
        profile!("add_clip_range");
        if !self.config.angular_clipping {
            return false;
        }
        self.ranges.add(from, to)
    }

    /// Open `[from, to)` again, e.g. once a door has moved out of the way
    pub fn remove_clip_range(&mut self, from: ClipAngle, to: ClipAngle) -> bool {
        #[cfg(feature = "hprof")]
        profile!("remove_clip_range");
        if !self.config.angular_clipping {
            return false;
        }
        self.ranges.remove(from, to)
    }

    /// True if any direction in `[from, to)` is not yet hidden
    pub fn is_range_visible(&self, from: ClipAngle, to: ClipAngle) -> bool {
        #[cfg(feature = "hprof")]
        profile!("is_range_visible");
        if !self.config.angular_clipping {
            return true;
        }
        self.ranges.is_visible(from, to)
    }

    /// Add the range swept counter-clockwise from `from` to `to`. A point on
    /// top of the origin has no direction and adds nothing.
    pub fn add_clip_range_points(&mut self, from: Vec2, to: Vec2) -> bool {
        match self.project_points(from, to) {
            Some((a1, a2)) => self.add_clip_range(a1, a2),
            None => false,
        }
    }

    pub fn remove_clip_range_points(&mut self, from: Vec2, to: Vec2) -> bool {
        match self.project_points(from, to) {
            Some((a1, a2)) => self.remove_clip_range(a1, a2),
            None => false,
        }
    }

    pub fn is_range_visible_points(&self, from: Vec2, to: Vec2) -> bool {
        match self.project_points(from, to) {
            Some((a1, a2)) => self.is_range_visible(a1, a2),
            None => true,
        }
    }

    /// Hide whatever the line `v1`-`v2` covers, whichever way round it is
    /// given. The narrower of the two arcs is used; a line seen edge-on or
    /// passing through the origin covers nothing.
    pub fn clip_add_line(&mut self, v1: Vec3, v2: Vec3) -> bool {
        let Some((a1, a2)) = self.project_points(v1.truncate(), v2.truncate()) else {
            return false;
        };
        let ccw = a2.span_from(a1);
        if ccw == 0 || ccw == ClipAngle::HALF.raw() {
            return false;
        }
        if ccw < ClipAngle::HALF.raw() {
            self.add_clip_range(a1, a2)
        } else {
            self.add_clip_range(a2, a1)
        }
    }

    fn project_points(&self, from: Vec2, to: Vec2) -> Option<(ClipAngle, ClipAngle)> {
        let eye = self.origin.truncate();
        if from == eye || to == eye {
            return None;
        }
        Some((
            self.point_to_clip_angle(from),
            self.point_to_clip_angle(to),
        ))
    }

    /// Could anything inside `bbox` still be seen?
    ///
    /// An origin inside the box in plan view always answers true. Otherwise
    /// the two corners that make up the box outline from the origin bound the
    /// angular range that is checked.
    pub fn clip_is_bbox_visible(&self, bbox: &BBox) -> bool {
        #[cfg(feature = "hprof")]
        profile!("clip_is_bbox_visible");
        let eye = self.origin.truncate();
        let lt = bbox.left_top();
        let rb = bbox.right_bottom();

        let boxx = if eye.x <= lt.x {
            0
        } else if eye.x < rb.x {
            1
        } else {
            2
        };
        let boxy = if eye.y >= lt.y {
            0
        } else if eye.y > rb.y {
            1
        } else {
            2
        };

        let boxpos = (boxy << 2) + boxx;
        if boxpos == 5 {
            return true;
        }

        if self.radius > 0.0 && bbox.distance_to(self.origin) > self.radius {
            return false;
        }
        if self.vertical_planes
            && self
                .frustum
                .as_ref()
                .is_some_and(|f| f.aabb_outside_vertical(bbox))
        {
            return false;
        }

        // Left-most then right-most outline corner as seen from the origin
        let (v1, v2) = match boxpos {
            0 => (Vec2::new(rb.x, lt.y), Vec2::new(lt.x, rb.y)),
            1 => (Vec2::new(rb.x, lt.y), lt),
            2 => (rb, lt),
            4 => (lt, Vec2::new(lt.x, rb.y)),
            6 => (rb, Vec2::new(rb.x, lt.y)),
            8 => (lt, rb),
            9 => (Vec2::new(lt.x, rb.y), rb),
            10 => (Vec2::new(lt.x, rb.y), Vec2::new(rb.x, lt.y)),
            _ => return true,
        };

        let angle1 = self.point_to_clip_angle(v1);
        let angle2 = self.point_to_clip_angle(v2);
        self.is_range_visible(angle2, angle1)
    }
}
