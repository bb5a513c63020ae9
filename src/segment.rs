use std::fmt::Write as _;

use crate::arena::{Arena, HEADER};
use crate::error::{self, AllocatorError};

/// An index into a [`Segment`]'s node slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

enum Slot {
  Occupied {
    header: usize,
    prev: Option<NodeId>,
    next: Option<NodeId>,
  },
  Vacant {
    next_free: Option<NodeId>,
  },
}

/// A doubly linked list of references to chunk headers.
///
/// Nodes live in an index-addressed slab (`Vec<Slot>`) with a free-slot
/// list for recycling, rather than as individually heap-allocated,
/// pointer-linked nodes. This keeps the module free of `unsafe` while
/// preserving O(1) push/unlink and head-first iteration order.
pub(crate) struct Segment {
  name: &'static str,
  cap: usize,
  slots: Vec<Slot>,
  head: Option<NodeId>,
  free_slot: Option<NodeId>,
  count: usize,
}

impl Segment {
  pub(crate) fn new(name: &'static str, cap: usize) -> Self {
    Self {
      name,
      cap,
      slots: Vec::new(),
      head: None,
      free_slot: None,
      count: 0,
    }
  }

  pub(crate) fn count(&self) -> usize {
    self.count
  }

  fn header_of(&self, id: NodeId) -> usize {
    match self.slots[id.0] {
      Slot::Occupied { header, .. } => header,
      Slot::Vacant { .. } => unreachable!("dangling node id"),
    }
  }

  fn next_of(&self, id: NodeId) -> Option<NodeId> {
    match self.slots[id.0] {
      Slot::Occupied { next, .. } => next,
      Slot::Vacant { .. } => unreachable!("dangling node id"),
    }
  }

  fn prev_of(&self, id: NodeId) -> Option<NodeId> {
    match self.slots[id.0] {
      Slot::Occupied { prev, .. } => prev,
      Slot::Vacant { .. } => unreachable!("dangling node id"),
    }
  }

  fn alloc_slot(&mut self, header: usize, next: Option<NodeId>) -> NodeId {
    let slot = Slot::Occupied { header, prev: None, next };
    if let Some(id) = self.free_slot {
      let next_free = match self.slots[id.0] {
        Slot::Vacant { next_free } => next_free,
        Slot::Occupied { .. } => unreachable!("free list points at occupied slot"),
      };
      self.free_slot = next_free;
      self.slots[id.0] = slot;
      id
    } else {
      self.slots.push(slot);
      NodeId(self.slots.len() - 1)
    }
  }

  /// Prepends a new node naming `header`.
  pub(crate) fn push_front(&mut self, header: usize) -> NodeId {
    if self.count >= self.cap {
      error::fatal(AllocatorError::SegmentFull {
        segment: self.name,
        count: self.count + 1,
        cap: self.cap,
      });
    }

    let id = self.alloc_slot(header, self.head);
    if let Some(old_head) = self.head {
      if let Slot::Occupied { prev, .. } = &mut self.slots[old_head.0] {
        *prev = Some(id);
      }
    }
    self.head = Some(id);
    self.count += 1;
    id
  }

  /// Detaches `id` from the list and recycles its slot.
  pub(crate) fn unlink(&mut self, id: NodeId) {
    let prev = self.prev_of(id);
    let next = self.next_of(id);

    match prev {
      Some(p) => {
        if let Slot::Occupied { next: p_next, .. } = &mut self.slots[p.0] {
          *p_next = next;
        }
      }
      None => self.head = next,
    }
    if let Some(n) = next {
      if let Slot::Occupied { prev: n_prev, .. } = &mut self.slots[n.0] {
        *n_prev = prev;
      }
    }

    self.slots[id.0] = Slot::Vacant { next_free: self.free_slot };
    self.free_slot = Some(id);
    self.count -= 1;
  }

  /// Repoints `id` at a different chunk header without moving it in the
  /// list. Used when a freed node's chunk is absorbed into a new
  /// location during right-side coalescing.
  pub(crate) fn retarget(&mut self, id: NodeId, header: usize) {
    if let Slot::Occupied { header: h, .. } = &mut self.slots[id.0] {
      *h = header;
    }
  }

  /// Linear scan for the node whose chunk header address equals `start`.
  pub(crate) fn find_by_start(&self, start: usize) -> Option<NodeId> {
    let mut cur = self.head;
    while let Some(id) = cur {
      if self.header_of(id) == start {
        return Some(id);
      }
      cur = self.next_of(id);
    }
    None
  }

  /// First-fit: the head-most node whose payload size is `>= min`.
  /// Returns the node and its header offset.
  pub(crate) fn find_by_min_size(&self, arena: &Arena, min: usize) -> Option<(NodeId, usize)> {
    let mut cur = self.head;
    while let Some(id) = cur {
      let header = self.header_of(id);
      if arena.header_size(header) >= min {
        return Some((id, header));
      }
      cur = self.next_of(id);
    }
    None
  }

  /// Inserts a newly freed chunk `(start, size)`, eagerly coalescing
  /// with any physically adjacent neighbours already in this segment.
  ///
  /// Because adjacency cannot persist across calls (I4), there is at
  /// most one left neighbour and one right neighbour at any time, and
  /// both are found in a single pass.
  pub(crate) fn coalesce_insert(&mut self, arena: &mut Arena, start: usize, size: usize) {
    let mut left = None;
    let mut right = None;
    let mut cur = self.head;
    while let Some(id) = cur {
      let h = self.header_of(id);
      if arena.chunk_end(h) == start {
        left = Some(id);
      } else if h == start + HEADER + size {
        right = Some(id);
      }
      cur = self.next_of(id);
    }

    match (left, right) {
      (Some(l), Some(r)) => {
        let lh = self.header_of(l);
        let rh = self.header_of(r);
        let r_size = arena.header_size(rh);
        let merged = arena.header_size(lh) + HEADER + size + HEADER + r_size;
        arena.set_header_size(lh, merged);
        self.unlink(r);
      }
      (Some(l), None) => {
        let lh = self.header_of(l);
        let merged = arena.header_size(lh) + HEADER + size;
        arena.set_header_size(lh, merged);
      }
      (None, Some(r)) => {
        let rh = self.header_of(r);
        let r_size = arena.header_size(rh);
        arena.write_header(start, size + HEADER + r_size);
        self.retarget(r, start);
      }
      (None, None) => {
        self.push_front(start);
      }
    }
  }

  /// Appends a human-readable listing of this segment's chunks to `out`.
  pub(crate) fn dump(&self, arena: &Arena, out: &mut String) {
    let _ = writeln!(out, "{}\t#{}", self.name, self.count);
    if self.count == 0 {
      out.push_str("   - no chunk found\n");
      return;
    }
    let mut cur = self.head;
    while let Some(id) = cur {
      let h = self.header_of(id);
      let size = arena.header_size(h);
      let _ = writeln!(
        out,
        "   - meta: {}, start: {}, end: {}, size: {}",
        h,
        h + HEADER,
        h + HEADER + size,
        size
      );
      cur = self.next_of(id);
    }
  }
}
