#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! A fixed-capacity arena allocator.
//!
//! An [`Allocator`] owns one contiguous byte buffer and two chunk lists
//! (allocated and freed). Requests are served first-fit out of the freed
//! list, splitting the remainder back in when there is enough room for
//! another header; frees eagerly coalesce with both physical neighbours.
//!
//! There is no internal synchronization: an [`Allocator`] is meant to be
//! owned by a single thread. For a process-style `malloc`/`free` surface
//! backed by one instance per thread, see [`global`].

mod arena;
mod error;
mod options;
mod segment;

pub mod global;

pub use arena::HEADER;
pub use error::AllocatorError;
pub use options::{AllocatorOptions, ARENA_CAP, SEGMENT_CAP};

use arena::Arena;
use segment::Segment;

/// An opaque handle to a live or freed allocation's payload.
///
/// `Ptr` never exposes the arena offset it wraps; the only way to reach
/// the bytes it names is through [`Allocator::read`] and
/// [`Allocator::write`]. [`Ptr::NULL`] is the sentinel returned by
/// [`Allocator::alloc`] for a zero-size request and accepted as a no-op
/// by [`Allocator::free`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ptr(Option<usize>);

impl Ptr {
  /// The null sentinel: names no chunk.
  pub const NULL: Ptr = Ptr(None);

  /// Returns `true` if this is the null sentinel.
  pub fn is_null(&self) -> bool {
    self.0.is_none()
  }

  fn header(offset: usize) -> Self {
    Ptr(Some(offset))
  }
}

/// A fixed-capacity arena allocator.
///
/// See the crate-level documentation for the model this implements.
pub struct Allocator {
  arena: Arena,
  allocated: Segment,
  freed: Segment,
}

impl Default for Allocator {
  fn default() -> Self {
    Self::new()
  }
}

impl Allocator {
  /// Creates an allocator using [`AllocatorOptions::default`].
  pub fn new() -> Self {
    Self::with_options(AllocatorOptions::default())
  }

  /// Creates an allocator with an explicit capacity configuration.
  pub fn with_options(opts: AllocatorOptions) -> Self {
    Self {
      arena: Arena::new(opts.arena_capacity),
      allocated: Segment::new("allocated", opts.segment_capacity),
      freed: Segment::new("freed", opts.segment_capacity),
    }
  }

  /// Requests `len` bytes of payload.
  ///
  /// Returns [`Ptr::NULL`] without any state change if `len == 0`.
  /// Panics (via the crate's fatal-error path) if the arena or the
  /// allocated segment is exhausted.
  pub fn alloc(&mut self, len: usize) -> Ptr {
    if len == 0 {
      return Ptr::NULL;
    }

    if let Some((node, header)) = self.freed.find_by_min_size(&self.arena, len) {
      let old = self.arena.header_size(header);
      let leftover = old - len;

      if leftover >= HEADER {
        self.arena.set_header_size(header, len);
        let residue = header + HEADER + len;
        self.arena.write_header(residue, leftover - HEADER);
        self.freed.retarget(node, residue);
        tracing::trace!(requested = len, residue, residue_size = leftover - HEADER, "split free chunk");
      } else {
        // leftover == 0 (exact fit) or too small to host another header:
        // hand over the whole chunk and drop it from the freed list.
        self.freed.unlink(node);
        if leftover > 0 {
          tracing::trace!(requested = len, granted = old, "oversized reuse without split");
        } else {
          tracing::trace!(requested = len, header, "exact-size reuse");
        }
      }

      self.allocated.push_front(header);
      return Ptr::header(header + HEADER);
    }

    let header = self.arena.carve(len);
    self.allocated.push_front(header);
    tracing::trace!(requested = len, header, "fresh carve");
    Ptr::header(header + HEADER)
  }

  /// Releases a previously allocated pointer, coalescing with any
  /// physically adjacent free chunks.
  ///
  /// A no-op if `p` is [`Ptr::NULL`]. Panics (via the crate's fatal-error
  /// path) if `p` does not name a chunk currently in the allocated set.
  pub fn free(&mut self, p: Ptr) {
    let Some(user) = p.0 else {
      return;
    };
    let header = user - HEADER;

    let Some(node) = self.allocated.find_by_start(header) else {
      error::fatal(AllocatorError::UnknownPointer { header });
    };
    self.allocated.unlink(node);
    let size = self.arena.header_size(header);

    self.freed.coalesce_insert(&mut self.arena, header, size);
    tracing::trace!(header, size, "freed");
  }

  /// Returns `true` if `p` currently names a chunk in the freed set.
  ///
  /// Panics if `p` is [`Ptr::NULL`].
  pub fn is_freed(&self, p: Ptr) -> bool {
    let Some(user) = p.0 else {
      error::fatal(AllocatorError::NullQuery);
    };
    self.freed.find_by_start(user - HEADER).is_some()
  }

  /// Asserts that `p` names a live allocation of at least `len` bytes,
  /// or that `p` is [`Ptr::NULL`] when `len == 0`.
  ///
  /// Panics (via the crate's fatal-error path) if the assertion fails.
  pub fn check_pointer(&self, p: Ptr, len: usize) {
    match (p.0, len) {
      (None, 0) => {}
      (Some(_), 0) => error::fatal(AllocatorError::SizeMismatch { expected: 0, actual: 0 }),
      (None, n) => error::fatal(AllocatorError::SizeMismatch { expected: n, actual: 0 }),
      (Some(user), n) => {
        let actual = self.arena.header_size(user - HEADER);
        if actual < n {
          error::fatal(AllocatorError::SizeMismatch { expected: n, actual });
        }
      }
    }
  }

  /// The number of chunks currently allocated.
  pub fn count_allocated(&self) -> usize {
    self.allocated.count()
  }

  /// The number of chunks currently freed.
  pub fn count_freed(&self) -> usize {
    self.freed.count()
  }

  /// Reads the live payload named by `p`.
  ///
  /// Returns an empty slice if `p` is [`Ptr::NULL`].
  pub fn read(&self, p: Ptr) -> &[u8] {
    match p.0 {
      None => &[],
      Some(user) => self.arena.payload(user - HEADER),
    }
  }

  /// Mutably accesses the live payload named by `p`.
  ///
  /// Returns an empty slice if `p` is [`Ptr::NULL`].
  pub fn write(&mut self, p: Ptr) -> &mut [u8] {
    match p.0 {
      None => &mut [],
      Some(user) => self.arena.payload_mut(user - HEADER),
    }
  }

  /// A diagnostic dump of both segments. Format is not part of the
  /// public contract; intended for logs and test failure messages.
  pub fn dump(&self) -> String {
    let mut out = String::new();
    out.push_str("----------------------------------\n");
    self.allocated.dump(&self.arena, &mut out);
    self.freed.dump(&self.arena, &mut out);
    out.push_str("----------------------------------\n");
    out
  }
}

#[cfg(test)]
mod tests;
