//! The slice of level geometry the clipper is fed from.
//!
//! Only what decides occlusion is kept: seg endpoints, the floor and
//! ceiling heights either side, and which segs make up each subsector or
//! polyobject.

use glam::{Vec2, Vec3};

use crate::bbox::BBox;

/// Opaque id tying a clipper frame to the level it was cleared for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelHandle(u32);

impl LevelHandle {
    pub const fn new(id: u32) -> Self {
        LevelHandle(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SectorHeights {
    pub floor: f32,
    pub ceiling: f32,
}

impl SectorHeights {
    pub const fn new(floor: f32, ceiling: f32) -> Self {
        Self { floor, ceiling }
    }
}

/// A wall segment. The front is on the right going from `v1` to `v2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSeg {
    pub v1: Vec2,
    pub v2: Vec2,
    pub front: SectorHeights,
    /// `None` for a one-sided wall
    pub back: Option<SectorHeights>,
}

impl ClipSeg {
    pub fn solid(v1: Vec2, v2: Vec2, front: SectorHeights) -> Self {
        Self {
            v1,
            v2,
            front,
            back: None,
        }
    }

    pub fn two_sided(v1: Vec2, v2: Vec2, front: SectorHeights, back: SectorHeights) -> Self {
        Self {
            v1,
            v2,
            front,
            back: Some(back),
        }
    }

    /// Nothing can be seen through this seg: one-sided, or a two-sided seg
    /// whose opening has shut (closed door, lift at the ceiling).
    pub fn is_closed(&self) -> bool {
        match self.back {
            None => true,
            Some(back) => {
                back.ceiling <= self.front.floor
                    || back.floor >= self.front.ceiling
                    || back.ceiling <= back.floor
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubSector {
    pub start_seg: usize,
    pub seg_count: usize,
    pub bbox: BBox,
}

/// A movable group of segs such as a sliding or swinging door
#[derive(Debug, Clone, PartialEq)]
pub struct PolyObject {
    pub segs: Vec<ClipSeg>,
    /// Open polyobjects let the view through where they stand
    pub open: bool,
}

/// Level geometry as seen by the feeders
pub trait ClipLevel {
    fn handle(&self) -> LevelHandle;
    fn segments(&self) -> &[ClipSeg];
    fn subsectors(&self) -> &[SubSector];
    fn polyobjects(&self) -> &[PolyObject];

    fn subsector_segs(&self, id: usize) -> &[ClipSeg] {
        let ss = &self.subsectors()[id];
        &self.segments()[ss.start_seg..ss.start_seg + ss.seg_count]
    }
}

/// In-memory [`ClipLevel`]
#[derive(Debug, Clone)]
pub struct ClipMap {
    handle: LevelHandle,
    segments: Vec<ClipSeg>,
    subsectors: Vec<SubSector>,
    polyobjects: Vec<PolyObject>,
}

impl ClipMap {
    pub fn new(handle: LevelHandle) -> Self {
        Self {
            handle,
            segments: Vec::new(),
            subsectors: Vec::new(),
            polyobjects: Vec::new(),
        }
    }

    /// Append a subsector made of `segs`, returning its index. The box spans
    /// the seg endpoints between the lowest floor and highest ceiling.
    pub fn add_subsector(&mut self, segs: impl IntoIterator<Item = ClipSeg>) -> usize {
        let start_seg = self.segments.len();
        self.segments.extend(segs);
        let added = &self.segments[start_seg..];
        let bbox = BBox::from_points(added.iter().flat_map(|s| {
            [
                s.v1.extend(s.front.floor),
                s.v2.extend(s.front.ceiling),
                s.v1.extend(s.front.ceiling),
                s.v2.extend(s.front.floor),
            ]
        }))
        .unwrap_or(BBox::new(Vec3::ZERO, Vec3::ZERO));
        self.subsectors.push(SubSector {
            start_seg,
            seg_count: added.len(),
            bbox,
        });
        self.subsectors.len() - 1
    }

    pub fn add_polyobject(&mut self, segs: Vec<ClipSeg>, open: bool) -> usize {
        self.polyobjects.push(PolyObject { segs, open });
        self.polyobjects.len() - 1
    }

    pub fn set_polyobject_open(&mut self, id: usize, open: bool) {
        if let Some(po) = self.polyobjects.get_mut(id) {
            po.open = open;
        }
    }
}

impl ClipLevel for ClipMap {
    fn handle(&self) -> LevelHandle {
        self.handle
    }

    fn segments(&self) -> &[ClipSeg] {
        &self.segments
    }

    fn subsectors(&self) -> &[SubSector] {
        &self.subsectors
    }

    fn polyobjects(&self) -> &[PolyObject] {
        &self.polyobjects
    }
}
