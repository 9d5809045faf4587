#[cfg(test)]
mod scenario_tests {
    use crate::{
        AngleMetric, BBox, ClipAngle, ClipLevel, ClipMap, ClipSeg, Clipper, ClipperConfig,
        LevelHandle, PseudoAngle, RealAngle, SectorHeights, ViewAngles,
    };
    use glam::{Vec2, Vec3};
    use math::Angle;
    use std::f32::consts::FRAC_PI_2;

    const ROOM: SectorHeights = SectorHeights::new(0.0, 128.0);
    const LEVEL: LevelHandle = LevelHandle::new(11);

    fn clipper<M: AngleMetric>(config: ClipperConfig) -> Clipper<M> {
        let mut c = Clipper::new(config);
        c.clear_clip_nodes(Vec3::new(0.0, 0.0, 41.0), LEVEL, 0.0);
        c
    }

    fn deg<M: AngleMetric>(d: f32) -> ClipAngle {
        M::angle_to_clip_angle(Angle::from_degrees(d))
    }

    /// Wall at x = `x` facing the origin, covering `y0..y1`
    fn east_wall(x: f32, y0: f32, y1: f32) -> ClipSeg {
        ClipSeg::solid(Vec2::new(x, y1), Vec2::new(x, y0), ROOM)
    }

    /// Solid square pillar, faces pointing outwards
    fn pillar(min: Vec2, max: Vec2) -> [ClipSeg; 4] {
        let (a, b) = (min, Vec2::new(max.x, min.y));
        let (c, d) = (max, Vec2::new(min.x, max.y));
        [
            ClipSeg::solid(a, b, ROOM),
            ClipSeg::solid(b, c, ROOM),
            ClipSeg::solid(c, d, ROOM),
            ClipSeg::solid(d, a, ROOM),
        ]
    }

    fn wraparound<M: AngleMetric>() {
        let mut c: Clipper<M> = clipper(ClipperConfig::default());
        assert!(c.add_clip_range(deg::<M>(350.0), deg::<M>(10.0)));
        assert!(!c.is_range_visible(deg::<M>(355.0), deg::<M>(5.0)));
        assert!(!c.is_range_visible(deg::<M>(0.0), deg::<M>(9.0)));
        assert!(c.is_range_visible(deg::<M>(100.0), deg::<M>(110.0)));
        assert!(c.is_range_visible(deg::<M>(340.0), deg::<M>(355.0)));
        assert_eq!(c.ranges().len(), 2);
        assert!(c.ranges().check_invariants().is_ok());
    }

    #[test]
    fn test_wraparound_pseudo() {
        wraparound::<PseudoAngle>();
    }

    #[test]
    fn test_wraparound_real() {
        wraparound::<RealAngle>();
    }

    #[test]
    fn test_frustum_then_walk() {
        let mut map = ClipMap::new(LEVEL);
        let near = map.add_subsector(pillar(Vec2::new(50.0, -10.0), Vec2::new(60.0, 10.0)));
        let far = map.add_subsector([
            east_wall(200.0, 20.0, 250.0),
            east_wall(200.0, -20.0, 20.0),
            east_wall(200.0, -250.0, -20.0),
        ]);
        let behind = map.add_subsector([ClipSeg::solid(
            Vec2::new(-200.0, -100.0),
            Vec2::new(-200.0, 100.0),
            ROOM,
        )]);

        let mut c: Clipper<PseudoAngle> = clipper(ClipperConfig::default());
        c.clip_init_frustum_range(ViewAngles::default(), FRAC_PI_2, FRAC_PI_2);
        assert!(!c.is_range_visible(deg::<PseudoAngle>(179.0), deg::<PseudoAngle>(181.0)));
        assert!(c.is_range_visible(deg::<PseudoAngle>(0.0), deg::<PseudoAngle>(1.0)));

        let stats = c.clip_subsector(&map, near);
        assert_eq!(stats.occluders, 1);
        assert_eq!(stats.back_facing, 3);

        let stats = c.clip_subsector(&map, far);
        assert_eq!(stats.hidden, 1);
        assert_eq!(stats.occluders, 2);

        assert!(!c.clip_is_bbox_visible(&map.subsectors()[behind].bbox));
        let stats = c.clip_subsector(&map, behind);
        assert_eq!(stats.hidden, 1);

        // The far wall closes off the whole field of view
        assert!(!c.is_range_visible(deg::<PseudoAngle>(315.0), deg::<PseudoAngle>(45.0)));
        assert!(c.ranges().check_invariants().is_ok());
    }

    #[test]
    fn test_polyobject_door() {
        let mut map = ClipMap::new(LEVEL);
        let door = map.add_polyobject(vec![east_wall(32.0, -16.0, 16.0)], false);
        let target = east_wall(128.0, -8.0, 8.0);

        let mut c: Clipper<RealAngle> = clipper(ClipperConfig::default());
        c.clip_polyobject(&map, door);
        assert!(!c.is_seg_visible(&target));

        map.set_polyobject_open(door, true);
        c.clip_polyobject(&map, door);
        assert!(c.is_seg_visible(&target));
    }

    #[test]
    fn test_bbox_containing_origin() {
        let mut c: Clipper<PseudoAngle> = clipper(ClipperConfig::default());
        c.add_clip_range(ClipAngle::ZERO, ClipAngle::HALF);
        c.add_clip_range(ClipAngle::HALF, ClipAngle::ZERO);
        assert!(c.is_blocked());
        assert!(c.clip_is_bbox_visible(&BBox::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 64.0)
        )));
        assert!(!c.clip_is_bbox_visible(&BBox::new(
            Vec3::new(10.0, -1.0, 0.0),
            Vec3::new(12.0, 1.0, 64.0)
        )));
    }

    #[test]
    fn test_full_cover_short_circuit() {
        let mut c: Clipper<PseudoAngle> = clipper(ClipperConfig::default());
        c.clip_add_line(Vec3::new(10.0, -10.0, 0.0), Vec3::new(10.0, 10.0, 0.0));
        c.clip_add_line(Vec3::new(10.0, 10.0, 0.0), Vec3::new(-10.0, 10.0, 0.0));
        c.clip_add_line(Vec3::new(-10.0, 10.0, 0.0), Vec3::new(-10.0, -10.0, 0.0));
        assert!(!c.is_blocked());
        c.clip_add_line(Vec3::new(-10.0, -10.0, 0.0), Vec3::new(10.0, -10.0, 0.0));
        assert!(c.is_blocked());
        assert!(!c.add_clip_range(ClipAngle::new(5), ClipAngle::new(6)));
        assert!(!c.is_range_visible(ClipAngle::new(5), ClipAngle::new(6)));
        assert!(!c.is_range_visible(ClipAngle::new(7), ClipAngle::new(7)));
        assert!(!c.is_seg_visible(&east_wall(100.0, -5.0, 5.0)));
    }

    #[test]
    fn test_pool_cap_fails_open() {
        let config = ClipperConfig {
            max_ranges: 2,
            initial_capacity: 1,
            ..ClipperConfig::default()
        };
        let mut c: Clipper<PseudoAngle> = clipper(config);
        assert!(c.add_clip_range(deg::<PseudoAngle>(10.0), deg::<PseudoAngle>(20.0)));
        assert!(c.add_clip_range(deg::<PseudoAngle>(100.0), deg::<PseudoAngle>(110.0)));
        assert!(!c.add_clip_range(deg::<PseudoAngle>(200.0), deg::<PseudoAngle>(210.0)));
        assert!(c.is_range_visible(deg::<PseudoAngle>(202.0), deg::<PseudoAngle>(205.0)));
        // Merging needs no new slot
        assert!(c.add_clip_range(deg::<PseudoAngle>(15.0), deg::<PseudoAngle>(105.0)));
        assert_eq!(c.ranges().len(), 1);
        assert!(c.ranges().check_invariants().is_ok());
    }

    #[test]
    fn test_clippers_are_independent() {
        let mut camera: Clipper<PseudoAngle> = clipper(ClipperConfig::default());
        let mut light: Clipper<RealAngle> = Clipper::new(ClipperConfig::default());
        light.clear_clip_nodes(Vec3::new(300.0, 0.0, 64.0), LEVEL, 512.0);

        let wall = east_wall(100.0, -50.0, 50.0);
        camera.clip_add_line(wall.v1.extend(0.0), wall.v2.extend(0.0));
        assert!(!camera.is_seg_visible(&east_wall(150.0, -10.0, 10.0)));
        // Same wall seen from the far side by the light
        assert!(light.ranges().is_empty());
        assert!(light.is_range_visible_points(Vec2::new(100.0, 0.0), Vec2::new(100.0, 10.0)));
    }

    #[test]
    fn test_frame_reuse() {
        let mut map = ClipMap::new(LEVEL);
        let ss = map.add_subsector([east_wall(50.0, -50.0, 50.0)]);
        let mut c: Clipper<PseudoAngle> = clipper(ClipperConfig::default());
        for frame in 0..4 {
            let origin = Vec3::new(frame as f32 * 5.0, 0.0, 41.0);
            c.clear_clip_nodes(origin, LEVEL, 0.0);
            assert_eq!(c.clip_subsector(&map, ss).occluders, 1, "frame {frame}");
            // The wall straddles +X, so it is held as one span either side
            assert_eq!(c.ranges().len(), 2);
            assert!(!c.is_range_visible(deg::<PseudoAngle>(330.0), deg::<PseudoAngle>(30.0)));
            assert!(c.is_range_visible(deg::<PseudoAngle>(90.0), deg::<PseudoAngle>(270.0)));
        }
    }
}
