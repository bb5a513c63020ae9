/// Default arena capacity in bytes, matching the reference allocator's
/// fixed byte area.
pub const ARENA_CAP: usize = 640_000;

/// Default maximum chunk count per segment (allocated or freed).
pub const SEGMENT_CAP: usize = 1024;

/// Construction-time sizing for an [`Allocator`](crate::Allocator).
///
/// `Default` reproduces the reference allocator's fixed sizes
/// ([`ARENA_CAP`], [`SEGMENT_CAP`]); tests that want to exercise
/// exhaustion or splitting without a 640 000-byte arena can override
/// either field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorOptions {
  /// Total bytes available to carve chunks from.
  pub arena_capacity: usize,
  /// Maximum number of chunks either segment may hold at once.
  pub segment_capacity: usize,
}

impl Default for AllocatorOptions {
  fn default() -> Self {
    Self {
      arena_capacity: ARENA_CAP,
      segment_capacity: SEGMENT_CAP,
    }
  }
}

impl AllocatorOptions {
  /// Starts from the defaults.
  pub fn new() -> Self {
    Self::default()
  }

  /// Overrides the arena capacity.
  pub fn with_arena_capacity(mut self, cap: usize) -> Self {
    self.arena_capacity = cap;
    self
  }

  /// Overrides the per-segment chunk capacity.
  pub fn with_segment_capacity(mut self, cap: usize) -> Self {
    self.segment_capacity = cap;
    self
  }
}
