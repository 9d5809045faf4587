use std::ops::{Index, IndexMut};

use crate::interval::{ClipInterval, NodeId};

/// Recycles [`ClipInterval`] slots for one clipper.
///
/// `reset` keeps the backing storage, so after the first few frames adding
/// and removing ranges never touches the allocator. Growth stops at `max`.
#[derive(Debug)]
pub struct ClipNodePool {
    nodes: Vec<ClipInterval>,
    free: Option<NodeId>,
    live: usize,
    max: usize,
}

impl ClipNodePool {
    pub fn new(initial_capacity: usize, max: usize) -> Self {
        let max = max.clamp(1, u32::MAX as usize);
        Self {
            nodes: Vec::with_capacity(initial_capacity.min(max)),
            free: None,
            live: 0,
            max,
        }
    }

    /// Take a slot for `[from, to)`, unlinked. `None` once the cap is hit.
    pub fn alloc(&mut self, from: u64, to: u64) -> Option<NodeId> {
        let node = ClipInterval {
            from,
            to,
            prev: None,
            next: None,
        };
        if let Some(id) = self.free {
            self.free = self.nodes[id.index()].next;
            self.nodes[id.index()] = node;
            self.live += 1;
            return Some(id);
        }
        if self.nodes.len() >= self.max {
            return None;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        self.live += 1;
        Some(id)
    }

    /// Return a slot. It must already be unlinked from any list.
    pub fn free(&mut self, id: NodeId) {
        debug_assert!(self.live > 0);
        let node = &mut self.nodes[id.index()];
        node.prev = None;
        node.next = self.free;
        self.free = Some(id);
        self.live -= 1;
    }

    /// Forget every slot while keeping the storage
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.free = None;
        self.live = 0;
    }

    /// Slots currently handed out
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Index<NodeId> for ClipNodePool {
    type Output = ClipInterval;

    #[inline]
    fn index(&self, id: NodeId) -> &ClipInterval {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for ClipNodePool {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut ClipInterval {
        &mut self.nodes[id.index()]
    }
}
