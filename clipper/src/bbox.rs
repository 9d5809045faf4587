use glam::{Vec2, Vec3};

/// Axis aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BBox {
    /// Corners may be given in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box around `points`, `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(BBox::new(first, first), |b, p| BBox {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    /// Top-left, in map terms (min x, max y)
    #[inline]
    pub fn left_top(&self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }

    /// Right-bottom, in map terms (max x, min y)
    #[inline]
    pub fn right_bottom(&self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }

    /// Distance from `p` to the nearest point of the box, 0 inside
    #[inline]
    pub fn distance_to(&self, p: Vec3) -> f32 {
        (p.clamp(self.min, self.max) - p).length()
    }
}

/// `[min x, min y, min z, max x, max y, max z]`
impl From<[f32; 6]> for BBox {
    fn from(b: [f32; 6]) -> Self {
        BBox::new(Vec3::new(b[0], b[1], b[2]), Vec3::new(b[3], b[4], b[5]))
    }
}
