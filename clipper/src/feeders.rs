//! Turning level segs into clip ranges.

use std::ops::AddAssign;

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use log::{trace, warn};
use math::{Trace, point_on_side};

use crate::angle_metric::{AngleMetric, ClipAngle};
use crate::clipper::Clipper;
use crate::level::{ClipLevel, ClipSeg};

/// What a feed did with the segs it was given
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    /// Facing away from the origin, or seen edge-on
    pub back_facing: usize,
    /// Already fully behind earlier occluders
    pub hidden: usize,
    /// Closed segs added to the clipper
    pub occluders: usize,
    /// Visible segs that can be seen through
    pub portals: usize,
    /// Spans re-opened by open polyobjects
    pub opened: usize,
}

impl FeedStats {
    /// Segs that were at least partly visible
    pub fn visible(&self) -> usize {
        self.occluders + self.portals
    }
}

impl AddAssign for FeedStats {
    fn add_assign(&mut self, rhs: Self) {
        self.back_facing += rhs.back_facing;
        self.hidden += rhs.hidden;
        self.occluders += rhs.occluders;
        self.portals += rhs.portals;
        self.opened += rhs.opened;
    }
}

enum SegView {
    BackFacing,
    EdgeOn,
    Span(ClipAngle, ClipAngle),
}

impl<M: AngleMetric> Clipper<M> {
    /// Project `seg` from the origin. The front is the right hand side going
    /// `v1` to `v2`, so a front facing seg covers `[angle(v2), angle(v1))`.
    fn seg_view(&self, seg: &ClipSeg) -> SegView {
        let eye = self.origin.truncate();
        if point_on_side(Trace::from_points(seg.v1, seg.v2), eye) != 0 {
            return SegView::BackFacing;
        }
        let a1 = self.point_to_clip_angle(seg.v1);
        let a2 = self.point_to_clip_angle(seg.v2);
        let span = a1.span_from(a2);
        if span == 0 || span >= ClipAngle::HALF.raw() {
            return SegView::EdgeOn;
        }
        SegView::Span(a2, a1)
    }

    /// Front facing and not yet fully hidden
    pub fn is_seg_visible(&self, seg: &ClipSeg) -> bool {
        match self.seg_view(seg) {
            SegView::Span(from, to) => self.is_range_visible(from, to),
            _ => false,
        }
    }

    /// Feed every seg of a subsector: closed segs become occluders, open ones
    /// are reported as portals. Feed subsectors nearest first.
    pub fn clip_subsector<L: ClipLevel + ?Sized>(&mut self, level: &L, id: usize) -> FeedStats {
        #[cfg(feature = "hprof")]
        profile!("clip_subsector");
        let mut stats = FeedStats::default();
        if !self.level_matches(level, "clip_subsector") {
            return stats;
        }
        if id >= level.subsectors().len() {
            warn!("clip_subsector: no subsector {id} in {:?}", level.handle());
            return stats;
        }

        for seg in level.subsector_segs(id) {
            match self.seg_view(seg) {
                SegView::BackFacing | SegView::EdgeOn => stats.back_facing += 1,
                SegView::Span(from, to) => {
                    if !self.is_range_visible(from, to) {
                        stats.hidden += 1;
                    } else if seg.is_closed() {
                        self.add_clip_range(from, to);
                        stats.occluders += 1;
                    } else {
                        stats.portals += 1;
                    }
                }
            }
        }
        trace!("Subsector {id}: {stats:?}");
        stats
    }

    /// Closed polyobjects hide what is behind them. Open ones clear their
    /// spans again, undoing a provisional add from an earlier feed.
    pub fn clip_polyobject<L: ClipLevel + ?Sized>(&mut self, level: &L, id: usize) -> FeedStats {
        let mut stats = FeedStats::default();
        if !self.level_matches(level, "clip_polyobject") {
            return stats;
        }
        let Some(poly) = level.polyobjects().get(id) else {
            warn!("clip_polyobject: no polyobject {id} in {:?}", level.handle());
            return stats;
        };

        for seg in &poly.segs {
            let SegView::Span(from, to) = self.seg_view(seg) else {
                stats.back_facing += 1;
                continue;
            };
            if poly.open {
                if self.remove_clip_range(from, to) {
                    stats.opened += 1;
                }
            } else if self.add_clip_range(from, to) {
                stats.occluders += 1;
            } else {
                stats.hidden += 1;
            }
        }
        trace!("Polyobject {id} (open: {}): {stats:?}", poly.open);
        stats
    }

    fn level_matches<L: ClipLevel + ?Sized>(&self, level: &L, caller: &str) -> bool {
        if self.level == Some(level.handle()) {
            return true;
        }
        warn!(
            "{caller}: clipper was cleared for {:?}, fed {:?}; skipped",
            self.level,
            level.handle()
        );
        false
    }
}
