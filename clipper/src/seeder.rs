//! Frame start: pre-fill everything the camera cannot see.

use std::f32::consts::{PI, TAU};

use log::{debug, warn};

use crate::angle_metric::{AngleMetric, ClipAngle};
use crate::clipper::Clipper;
use crate::frustum::{Frustum, ViewAngles};

/// A field of view this wide leaves nothing behind the camera
const FULL_TURN: f32 = TAU - 1.0e-5;

impl<M: AngleMetric> Clipper<M> {
    /// Hide every direction outside the horizontal field of view and keep a
    /// frustum for vertical box tests. `fov_x` and `fov_y` are full angles in
    /// radians. A field of view of zero or less hides everything. At half a
    /// turn or wider the top and bottom planes are not used, as they lean
    /// towards `forward` and would cull boxes off to the side.
    ///
    /// Expects a freshly cleared clipper; existing ranges are dropped.
    pub fn clip_init_frustum_range(&mut self, view: ViewAngles, fov_x: f32, fov_y: f32) {
        if !self.config.frustum_clipping {
            return;
        }
        self.ensure_empty("clip_init_frustum_range");

        self.frustum = Some(Frustum::from_view(self.origin, view, fov_x, fov_y));
        self.vertical_planes = fov_x < PI;

        if !fov_x.is_finite() || fov_x >= FULL_TURN {
            return;
        }
        let half = fov_x.max(0.0) * 0.5;
        let left = self.angle_to_clip_angle(view.yaw + half);
        let right = self.angle_to_clip_angle(view.yaw - half);
        if left == right {
            self.add_clip_range(ClipAngle::ZERO, ClipAngle::HALF);
            self.add_clip_range(ClipAngle::HALF, ClipAngle::ZERO);
        } else {
            // Counter-clockwise from the left edge round the back to the right edge
            self.add_clip_range(left, right);
        }
        debug!(
            "Frustum seeded: yaw {:.1}, fov {:.1}, {} range(s)",
            view.yaw.deg(),
            fov_x.to_degrees(),
            self.ranges.len()
        );
    }

    /// Hide everything except `[from, to)`. Equal bounds leave the whole
    /// circle visible.
    pub fn clip_init_visible_range(&mut self, from: ClipAngle, to: ClipAngle) {
        self.ensure_empty("clip_init_visible_range");
        self.add_clip_range(to, from);
    }

    /// Stop testing boxes against the top and bottom frustum planes. The
    /// angular ranges stay as they are.
    pub fn clip_reset_frustum_planes(&mut self) {
        self.vertical_planes = false;
    }

    fn ensure_empty(&mut self, caller: &str) {
        if !self.ranges.is_empty() {
            warn!(
                "{caller} on a clipper holding {} range(s), clearing",
                self.ranges.len()
            );
            self.ranges.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::angle_metric::{ClipAngle, PseudoAngle, RealAngle};
    use crate::bbox::BBox;
    use crate::clipper::Clipper;
    use crate::config::ClipperConfig;
    use crate::frustum::ViewAngles;
    use crate::level::LevelHandle;
    use glam::Vec3;
    use math::Angle;
    use std::f32::consts::{FRAC_PI_2, TAU};

    fn seeded<M: crate::AngleMetric>(yaw: f32, fov: f32) -> Clipper<M> {
        let mut c = Clipper::new(ClipperConfig::default());
        c.clear_clip_nodes(Vec3::ZERO, LevelHandle::new(7), 0.0);
        c.clip_init_frustum_range(
            ViewAngles::new(Angle::from_degrees(yaw), 0.0),
            fov.to_radians(),
            FRAC_PI_2,
        );
        c
    }

    fn visible<M: crate::AngleMetric>(c: &Clipper<M>, from: f32, to: f32) -> bool {
        c.is_range_visible(
            c.angle_to_clip_angle(Angle::from_degrees(from)),
            c.angle_to_clip_angle(Angle::from_degrees(to)),
        )
    }

    #[test]
    fn behind_is_hidden_ahead_is_visible() {
        let c = seeded::<PseudoAngle>(0.0, 90.0);
        assert!(!visible(&c, 170.0, 190.0));
        assert!(visible(&c, 350.0, 10.0));
        assert!(visible(&c, 0.0, 1.0));
        // Just past each edge
        assert!(!visible(&c, 50.0, 60.0));
        assert!(!visible(&c, 300.0, 310.0));
        assert!(visible(&c, 40.0, 60.0));
    }

    #[test]
    fn real_metric_agrees() {
        let c = seeded::<RealAngle>(0.0, 90.0);
        assert!(!visible(&c, 170.0, 190.0));
        assert!(visible(&c, 355.0, 5.0));
    }

    #[test]
    fn rotated_view() {
        let c = seeded::<PseudoAngle>(180.0, 90.0);
        assert!(visible(&c, 170.0, 190.0));
        assert!(!visible(&c, 350.0, 10.0));
        let c = seeded::<PseudoAngle>(90.0, 60.0);
        assert!(visible(&c, 80.0, 100.0));
        assert!(!visible(&c, 130.0, 140.0));
    }

    #[test]
    fn full_turn_fov_hides_nothing() {
        let c = seeded::<PseudoAngle>(0.0, 360.0);
        assert!(c.ranges().is_empty());
        let mut c: Clipper<PseudoAngle> = Clipper::new(ClipperConfig::default());
        c.clip_init_frustum_range(ViewAngles::default(), TAU * 2.0, FRAC_PI_2);
        assert!(c.ranges().is_empty());
    }

    #[test]
    fn zero_fov_hides_everything() {
        let c = seeded::<PseudoAngle>(30.0, 0.0);
        assert!(c.is_blocked());
        assert!(!visible(&c, 0.0, 1.0));
        assert!(!visible(&c, 29.0, 31.0));
        let c = seeded::<RealAngle>(0.0, -10.0);
        assert!(c.is_blocked());
    }

    #[test]
    fn wide_fov_skips_vertical_planes() {
        let mut c = seeded::<PseudoAngle>(0.0, 270.0);
        // Eye height, 120 degrees off the view axis
        let side = BBox::new(Vec3::new(-60.0, 76.0, -10.0), Vec3::new(-40.0, 96.0, 10.0));
        assert!(c.clip_is_bbox_visible(&side));
        let behind = BBox::new(Vec3::new(-120.0, -10.0, -10.0), Vec3::new(-100.0, 10.0, 10.0));
        assert!(!c.clip_is_bbox_visible(&behind));

        c.clear_clip_nodes(Vec3::ZERO, LevelHandle::new(7), 0.0);
        c.clip_init_frustum_range(ViewAngles::default(), FRAC_PI_2, FRAC_PI_2);
        let overhead = BBox::new(Vec3::new(100.0, -10.0, 900.0), Vec3::new(120.0, 10.0, 1000.0));
        assert!(!c.clip_is_bbox_visible(&overhead));
    }

    #[test]
    fn seeding_clears_leftovers() {
        let mut c = seeded::<PseudoAngle>(0.0, 90.0);
        c.add_clip_range(ClipAngle::new(10), ClipAngle::new(20));
        c.clip_init_frustum_range(ViewAngles::default(), FRAC_PI_2, FRAC_PI_2);
        assert_eq!(c.ranges().len(), 1);
        assert!(c.is_range_visible(ClipAngle::new(10), ClipAngle::new(20)));
    }

    #[test]
    fn disabled_frustum_clipping_is_noop() {
        let config = ClipperConfig {
            frustum_clipping: false,
            ..ClipperConfig::default()
        };
        let mut c: Clipper<PseudoAngle> = Clipper::new(config);
        c.clip_init_frustum_range(ViewAngles::default(), FRAC_PI_2, FRAC_PI_2);
        assert!(c.ranges().is_empty());
        assert!(c.get_frustum().is_none());
    }

    #[test]
    fn explicit_visible_window() {
        let mut c: Clipper<PseudoAngle> = Clipper::new(ClipperConfig::default());
        c.clear_clip_nodes(Vec3::ZERO, LevelHandle::new(7), 0.0);
        c.clip_init_visible_range(ClipAngle::new(1000), ClipAngle::new(2000));
        assert!(c.is_range_visible(ClipAngle::new(1500), ClipAngle::new(1600)));
        assert!(!c.is_range_visible(ClipAngle::new(2000), ClipAngle::new(999)));
        assert!(c.is_range_visible(ClipAngle::new(900), ClipAngle::new(1001)));
    }

    #[test]
    fn vertical_planes_toggle() {
        let mut c = seeded::<PseudoAngle>(0.0, 90.0);
        let overhead = BBox::new(Vec3::new(100.0, -10.0, 900.0), Vec3::new(120.0, 10.0, 1000.0));
        assert!(!c.clip_is_bbox_visible(&overhead));
        c.clip_reset_frustum_planes();
        assert!(c.clip_is_bbox_visible(&overhead));
        assert_eq!(c.ranges().len(), 1);
    }
}
