//! The ordered set of occluded angular spans.
//!
//! Spans live in a doubly linked list threaded through the node pool. Read
//! from head to tail the list is strictly ordered by `from`, and no two spans
//! overlap or touch: touching or overlapping spans are merged as they are
//! added. Every query leans on that: the first span ending past the start of
//! a query is the only one that can cover it.

use std::fmt::{self, Debug};

use log::{trace, warn};

use crate::angle_metric::ClipAngle;
use crate::interval::{CLIP_DOMAIN, NodeId};
use crate::pool::ClipNodePool;

pub struct ClipRangeSet {
    pool: ClipNodePool,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    /// Set when the list is exactly `[0, CLIP_DOMAIN)`
    full: bool,
    /// A pool exhaustion has been reported since the last clear
    exhausted: bool,
}

impl ClipRangeSet {
    pub fn new(initial_capacity: usize, max_ranges: usize) -> Self {
        Self {
            pool: ClipNodePool::new(initial_capacity, max_ranges),
            head: None,
            tail: None,
            full: false,
            exhausted: false,
        }
    }

    /// Drop every span, keeping the pool storage
    pub fn clear(&mut self) {
        self.pool.reset();
        self.head = None;
        self.tail = None;
        self.full = false;
        self.exhausted = false;
    }

    /// Every direction is occluded
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of disjoint spans
    #[inline]
    pub fn len(&self) -> usize {
        self.pool.live()
    }

    #[inline]
    pub fn pool(&self) -> &ClipNodePool {
        &self.pool
    }

    /// Spans from head to tail as `(from, to)` on the `0..=2^32` line
    pub fn iter(&self) -> Spans<'_> {
        Spans {
            set: self,
            cursor: self.head,
        }
    }

    /// Mark `[from, to)` as occluded, wrapping through the seam when
    /// `from > to`. Returns true if the covered set changed.
    pub fn add(&mut self, from: ClipAngle, to: ClipAngle) -> bool {
        if from == to {
            return false;
        }
        if from < to {
            return self.add_span(from.pos(), to.pos());
        }
        let high = self.add_span(from.pos(), CLIP_DOMAIN);
        let low = self.add_span(0, to.pos());
        high | low
    }

    /// Open `[from, to)` back up. Wraps like [`ClipRangeSet::add`].
    pub fn remove(&mut self, from: ClipAngle, to: ClipAngle) -> bool {
        if from == to {
            return false;
        }
        if from < to {
            return self.remove_span(from.pos(), to.pos());
        }
        let high = self.remove_span(from.pos(), CLIP_DOMAIN);
        let low = self.remove_span(0, to.pos());
        high | low
    }

    /// True if any part of `[from, to)` is not occluded. A zero width query
    /// is visible unless the angle is strictly inside a span.
    pub fn is_visible(&self, from: ClipAngle, to: ClipAngle) -> bool {
        if self.full {
            return false;
        }
        if from == to {
            return self.point_visible(from.pos());
        }
        if from < to {
            return self.span_visible(from.pos(), to.pos());
        }
        self.span_visible(from.pos(), CLIP_DOMAIN) || self.span_visible(0, to.pos())
    }

    fn add_span(&mut self, from: u64, to: u64) -> bool {
        let (from, to) = clamp_span(from, to);
        if from >= to || self.full {
            return false;
        }

        // First span ending at or past `from`; touching counts
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if self.pool[id].to >= from {
                break;
            }
            cursor = self.pool[id].next;
        }

        let Some(id) = cursor.filter(|&id| self.pool[id].from <= to) else {
            // Nothing to merge with, slot in before `cursor`
            return match self.pool.alloc(from, to) {
                Some(node) => {
                    self.link_before(node, cursor);
                    self.update_full();
                    true
                }
                None => {
                    self.fail_open(from, to);
                    false
                }
            };
        };

        let mut changed = false;
        if from < self.pool[id].from {
            self.pool[id].from = from;
            changed = true;
        }
        if to > self.pool[id].to {
            let mut reach = to;
            let mut next = self.pool[id].next;
            while let Some(n) = next {
                if self.pool[n].from > reach {
                    break;
                }
                reach = reach.max(self.pool[n].to);
                next = self.pool[n].next;
                self.unlink(n);
                self.pool.free(n);
            }
            self.pool[id].to = reach;
            changed = true;
        }
        if changed {
            self.update_full();
        }
        changed
    }

    fn remove_span(&mut self, from: u64, to: u64) -> bool {
        let (from, to) = clamp_span(from, to);
        if from >= to {
            return false;
        }

        let mut changed = false;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.pool[id];
            if node.from >= to {
                break;
            }
            cursor = node.next;
            if node.to <= from {
                continue;
            }
            changed = true;
            match (node.from < from, node.to > to) {
                (false, false) => {
                    self.unlink(id);
                    self.pool.free(id);
                }
                (true, false) => self.pool[id].to = from,
                (false, true) => self.pool[id].from = to,
                (true, true) => {
                    // Hole punched through the middle
                    self.pool[id].to = from;
                    match self.pool.alloc(to, node.to) {
                        Some(right) => self.link_before(right, node.next),
                        None => self.fail_open(to, node.to),
                    }
                    break;
                }
            }
        }
        if changed {
            self.full = false;
        }
        changed
    }

    fn span_visible(&self, from: u64, to: u64) -> bool {
        let (from, to) = clamp_span(from, to);
        if from >= to {
            return false;
        }
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.pool[id];
            if node.to > from {
                // Spans never touch, so a gap follows `node.to`
                return !(node.from <= from && node.to >= to);
            }
            cursor = node.next;
        }
        true
    }

    fn point_visible(&self, at: u64) -> bool {
        if at == 0 {
            // Zero is interior when spans meet across the seam
            let starts = self.head.is_some_and(|id| self.pool[id].from == 0);
            let ends = self.tail.is_some_and(|id| self.pool[id].to == CLIP_DOMAIN);
            return !(starts && ends);
        }
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.pool[id];
            if node.to > at {
                return node.from >= at;
            }
            cursor = node.next;
        }
        true
    }

    /// Insert an unlinked node before `before`, or at the tail for `None`
    fn link_before(&mut self, node: NodeId, before: Option<NodeId>) {
        match before {
            Some(b) => {
                let prev = self.pool[b].prev;
                self.pool[node].prev = prev;
                self.pool[node].next = Some(b);
                self.pool[b].prev = Some(node);
                match prev {
                    Some(p) => self.pool[p].next = Some(node),
                    None => self.head = Some(node),
                }
            }
            None => {
                self.pool[node].prev = self.tail;
                self.pool[node].next = None;
                match self.tail {
                    Some(t) => self.pool[t].next = Some(node),
                    None => self.head = Some(node),
                }
                self.tail = Some(node);
            }
        }
    }

    fn unlink(&mut self, node: NodeId) {
        let prev = self.pool[node].prev;
        let next = self.pool[node].next;
        match prev {
            Some(p) => self.pool[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.pool[n].prev = prev,
            None => self.tail = prev,
        }
    }

    fn update_full(&mut self) {
        self.full = match self.head {
            Some(h) if self.head == self.tail => {
                self.pool[h].from == 0 && self.pool[h].to == CLIP_DOMAIN
            }
            _ => false,
        };
    }

    fn fail_open(&mut self, from: u64, to: u64) {
        if !self.exhausted {
            warn!(
                "Clip range pool exhausted at {} ranges, leaving [{from:#x}, {to:#x}) open",
                self.pool.max()
            );
            self.exhausted = true;
        }
    }

    /// Walk the list and confirm ordering, links and the full flag
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut count = 0;
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.pool[id];
            if node.prev != prev {
                return Err(format!("{id:?} has prev {:?}, expected {prev:?}", node.prev));
            }
            if node.from >= node.to || node.to > CLIP_DOMAIN {
                return Err(format!("{id:?} is malformed: [{}, {})", node.from, node.to));
            }
            if let Some(p) = prev {
                if self.pool[p].to >= node.from {
                    return Err(format!("{p:?} overlaps or touches {id:?}"));
                }
            }
            count += 1;
            prev = Some(id);
            cursor = node.next;
        }
        if self.tail != prev {
            return Err(format!("tail is {:?}, list ends at {prev:?}", self.tail));
        }
        if count != self.pool.live() {
            return Err(format!("{count} linked spans but {} live nodes", self.pool.live()));
        }
        let covers_all = count == 1 && self.iter().next() == Some((0, CLIP_DOMAIN));
        if covers_all != self.full {
            return Err(format!("full flag {} does not match the list", self.full));
        }
        Ok(())
    }

    /// Trace-log every span
    pub fn dump(&self) {
        trace!("Clip ranges: {} (full: {})", self.len(), self.full);
        for (from, to) in self.iter() {
            trace!("  [{from:#011x}, {to:#011x})");
        }
    }
}

impl Debug for ClipRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipRangeSet")
            .field("full", &self.full)
            .field("spans", &self.iter().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

pub struct Spans<'a> {
    set: &'a ClipRangeSet,
    cursor: Option<NodeId>,
}

impl Iterator for Spans<'_> {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = &self.set.pool[id];
        self.cursor = node.next;
        Some((node.from, node.to))
    }
}

/// Out of domain spans are clamped rather than allowed in to the list
#[inline]
fn clamp_span(from: u64, to: u64) -> (u64, u64) {
    debug_assert!(from <= CLIP_DOMAIN && to <= CLIP_DOMAIN);
    (from.min(CLIP_DOMAIN), to.min(CLIP_DOMAIN))
}
