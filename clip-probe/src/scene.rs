//! A synthetic level: concentric rings of wall chords around the origin,
//! pillars between them, and a door just ahead on +X.

use std::f32::consts::TAU;

use clipper::glam::Vec2;
use clipper::{ClipMap, ClipSeg, LevelHandle, SectorHeights};
use math::Angle;

pub const LEVEL: LevelHandle = LevelHandle::new(1);

/// Distance between rings
const RING_STEP: f32 = 256.0;
/// Wall chords making up one ring
const CHORDS: u32 = 32;
const PILLAR_HALF: f32 = 16.0;
const DOOR_X: f32 = 96.0;
const DOOR_HALF: f32 = 24.0;

const ROOM: SectorHeights = SectorHeights::new(0.0, 128.0);
const WINDOW: SectorHeights = SectorHeights::new(48.0, 96.0);

pub struct Scene {
    pub map: ClipMap,
    pub door: usize,
}

fn ring_point(radius: f32, step: u32) -> Vec2 {
    let a = Angle::new(TAU * (step % CHORDS) as f32 / CHORDS as f32);
    a.unit() * radius
}

/// The outermost ring is solid. Inner rings alternate solid chords,
/// windows and open doorways.
fn chord_back(ring: u32, rings: u32, chord: u32) -> Option<SectorHeights> {
    if ring + 1 == rings {
        return None;
    }
    match (chord + ring) % 4 {
        0 => None,
        2 => Some(WINDOW),
        _ => Some(ROOM),
    }
}

fn pillar(centre: Vec2) -> [ClipSeg; 4] {
    let a = centre - Vec2::splat(PILLAR_HALF);
    let c = centre + Vec2::splat(PILLAR_HALF);
    let b = Vec2::new(c.x, a.y);
    let d = Vec2::new(a.x, c.y);
    // Counter-clockwise so every face points away from the pillar
    [
        ClipSeg::solid(a, b, ROOM),
        ClipSeg::solid(b, c, ROOM),
        ClipSeg::solid(c, d, ROOM),
        ClipSeg::solid(d, a, ROOM),
    ]
}

pub fn build(rings: u32, pillars: u32, door_open: bool) -> Scene {
    let mut map = ClipMap::new(LEVEL);

    for ring in 0..rings {
        let radius = RING_STEP * (ring + 1) as f32;
        for chord in 0..CHORDS {
            // Clockwise so the front faces the centre
            let v1 = ring_point(radius, chord + 1);
            let v2 = ring_point(radius, chord);
            let seg = ClipSeg {
                v1,
                v2,
                front: ROOM,
                back: chord_back(ring, rings, chord),
            };
            map.add_subsector([seg]);
        }

        let pillar_radius = radius - RING_STEP * 0.5;
        for p in 0..pillars {
            let turn = (p as f32 + 0.5) / pillars as f32;
            let dir = Angle::new(TAU * turn + ring as f32 * 0.1);
            map.add_subsector(pillar(dir.unit() * pillar_radius));
        }
    }

    let near = Vec2::new(DOOR_X, DOOR_HALF);
    let far = Vec2::new(DOOR_X, -DOOR_HALF);
    let door = map.add_polyobject(
        vec![ClipSeg::solid(near, far, ROOM), ClipSeg::solid(far, near, ROOM)],
        door_open,
    );

    Scene { map, door }
}
