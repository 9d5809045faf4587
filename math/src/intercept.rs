use glam::Vec2;

/// An infinite line through `xy` with direction `dxy`.
/// Is divline + trace types
#[derive(Debug, Clone, Copy)]
pub struct Trace {
    pub xy: Vec2,
    pub dxy: Vec2,
}

impl Trace {
    #[inline]
    pub const fn new(xyz: Vec2, dxyz: Vec2) -> Self {
        Self { xy: xyz, dxy: dxyz }
    }

    /// The line running from `v1` through `v2`
    #[inline]
    pub fn from_points(v1: Vec2, v2: Vec2) -> Self {
        Self::new(v1, v2 - v1)
    }
}

/// Determine which side of the trace the vector point is on.
///
/// 0 is the front (right hand side looking along the trace), 1 is the back.
/// A point exactly on the line is counted as front.
#[inline]
pub fn point_on_side(trace: Trace, v2: Vec2) -> usize {
    let dx = v2.x - trace.xy.x;
    let dy = v2.y - trace.xy.y;

    if (dy * trace.dxy.x) <= (trace.dxy.y * dx) {
        // Front side
        return 0;
    }
    // Backside
    1
}
