use std::fmt::{self, Debug};

/// Exclusive end of the clip angle line. One past `u32::MAX` so that a span
/// reaching the seam stays representable.
pub const CLIP_DOMAIN: u64 = 1 << 32;

/// Index of a [`ClipInterval`] slot in the node pool
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One occluded span `[from, to)` and its list links.
///
/// Only the range set links these together; a node that is on the pool's
/// free list reuses `next` as the free list link.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ClipInterval {
    pub from: u64,
    pub to: u64,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}
