use thiserror::Error;

/// Every fatal condition this crate can raise.
///
/// An `AllocatorError` is never returned to a caller: per the crate's
/// "fail loudly" contract, every variant here reaches a caller only as
/// the message of a panic raised by [`fatal`], after being logged as a
/// structured [`tracing::error!`] event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocatorError {
  /// Carving `requested` more bytes would exceed the arena's capacity.
  #[error("out of arena: requested {requested} bytes, {remaining} remaining of {capacity}")]
  OutOfArena {
    /// The payload size that was requested.
    requested: usize,
    /// Bytes left before the watermark reaches capacity.
    remaining: usize,
    /// The arena's total capacity.
    capacity: usize,
  },

  /// A segment's node count would exceed its configured capacity.
  #[error("segment '{segment}' capacity exceeded: {count} chunks, cap is {cap}")]
  SegmentFull {
    /// Which segment overflowed (`"allocated"` or `"freed"`).
    segment: &'static str,
    /// The count that would have resulted.
    count: usize,
    /// The configured capacity.
    cap: usize,
  },

  /// `free` was called with a pointer whose header is not in the
  /// allocated segment (double free or a foreign pointer).
  #[error("free of unknown pointer: header at offset {header}")]
  UnknownPointer {
    /// The arena offset of the chunk header that could not be found.
    header: usize,
  },

  /// `check_pointer` observed a size other than the one expected.
  #[error("size mismatch: expected {expected}, got {actual}")]
  SizeMismatch {
    /// The size the caller asserted.
    expected: usize,
    /// The size actually recorded.
    actual: usize,
  },

  /// `is_freed` was called with [`crate::Ptr::NULL`].
  #[error("is_freed called on a null pointer")]
  NullQuery,
}

/// Logs `err` as a structured error event and panics with its message.
///
/// This is the crate's single fatal-error choke point: every unrecoverable
/// condition funnels through here so the logged diagnostic and the panic
/// message can never drift apart.
pub(crate) fn fatal(err: AllocatorError) -> ! {
  tracing::error!(error = %err, "fixarena: fatal allocator error");
  panic!("{err}");
}
