use clipper::glam::Vec3;
use clipper::log::debug;
use clipper::{AngleMetric, ClipLevel, Clipper, ClipperConfig, FeedStats, ViewAngles};

use crate::scene::Scene;

#[derive(Debug, Clone, Copy)]
pub struct View {
    pub eye: Vec3,
    pub angles: ViewAngles,
    /// Full angles in radians
    pub fov_x: f32,
    pub fov_y: f32,
    pub frustum: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WalkReport {
    pub subsectors: usize,
    /// Subsectors whose boxes were already hidden
    pub culled: usize,
    /// Subsectors whose segs went through the clipper
    pub fed: usize,
    pub stats: FeedStats,
    pub ranges: usize,
    pub blocked: bool,
}

/// Feed the door, then every subsector nearest first, skipping whatever
/// is already hidden.
pub fn walk<M: AngleMetric>(scene: &Scene, view: &View, config: ClipperConfig) -> WalkReport {
    let map = &scene.map;
    let mut clipper: Clipper<M> = Clipper::new(config);
    clipper.clear_clip_nodes(view.eye, map.handle(), 0.0);
    if view.frustum {
        clipper.clip_init_frustum_range(view.angles, view.fov_x, view.fov_y);
    }

    let mut report = WalkReport {
        subsectors: map.subsectors().len(),
        ..WalkReport::default()
    };
    report.stats += clipper.clip_polyobject(map, scene.door);

    let mut order: Vec<(usize, f32)> = map
        .subsectors()
        .iter()
        .enumerate()
        .map(|(i, ss)| (i, ss.bbox.distance_to(view.eye)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (n, &(id, _)) in order.iter().enumerate() {
        if clipper.is_blocked() {
            report.culled += order.len() - n;
            break;
        }
        if !clipper.clip_is_bbox_visible(&map.subsectors()[id].bbox) {
            report.culled += 1;
            continue;
        }
        report.stats += clipper.clip_subsector(map, id);
        report.fed += 1;
    }

    report.ranges = clipper.ranges().len();
    report.blocked = clipper.is_blocked();
    clipper.ranges().dump();
    debug!(
        "Walk with {} metric: fed {}, culled {}, {:?}",
        M::NAME,
        report.fed,
        report.culled,
        report.stats
    );
    report
}
