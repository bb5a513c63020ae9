use crate::error::{self, AllocatorError};

/// Width in bytes of a chunk header: one 64-bit word, regardless of host
/// pointer width, so header layout is deterministic across targets.
pub const HEADER: usize = core::mem::size_of::<u64>();

/// The fixed-capacity byte region chunks are carved from.
///
/// `Arena` is the only module that touches raw bytes: header encoding and
/// payload slicing both live here, so offset arithmetic never leaks into
/// the segment or allocator modules.
pub(crate) struct Arena {
  bytes: Box<[u8]>,
  watermark: usize,
}

impl Arena {
  pub(crate) fn new(capacity: usize) -> Self {
    Self {
      bytes: vec![0u8; capacity].into_boxed_slice(),
      watermark: 0,
    }
  }

  pub(crate) fn capacity(&self) -> usize {
    self.bytes.len()
  }

  /// Carves a fresh chunk of `len` payload bytes from the watermark and
  /// returns its header offset.
  ///
  /// Fatal if the arena does not have `HEADER + len` bytes remaining.
  pub(crate) fn carve(&mut self, len: usize) -> usize {
    let footprint = HEADER + len;
    let remaining = self.capacity() - self.watermark;
    if footprint > remaining {
      error::fatal(AllocatorError::OutOfArena {
        requested: len,
        remaining,
        capacity: self.capacity(),
      });
    }

    let header = self.watermark;
    self.write_header(header, len);
    self.watermark += footprint;
    header
  }

  /// Writes `size` into the header at `offset`. Used both for fresh
  /// carves and for installing a residue header during a split.
  pub(crate) fn write_header(&mut self, offset: usize, size: usize) {
    self.set_header_size(offset, size);
  }

  pub(crate) fn header_size(&self, offset: usize) -> usize {
    let bytes: [u8; HEADER] = self.bytes[offset..offset + HEADER].try_into().unwrap();
    u64::from_ne_bytes(bytes) as usize
  }

  pub(crate) fn set_header_size(&mut self, offset: usize, size: usize) {
    self.bytes[offset..offset + HEADER].copy_from_slice(&(size as u64).to_ne_bytes());
  }

  /// The first byte past this chunk's footprint, i.e. where a physically
  /// adjacent next chunk's header would begin.
  pub(crate) fn chunk_end(&self, offset: usize) -> usize {
    offset + HEADER + self.header_size(offset)
  }

  pub(crate) fn payload(&self, offset: usize) -> &[u8] {
    let size = self.header_size(offset);
    &self.bytes[offset + HEADER..offset + HEADER + size]
  }

  pub(crate) fn payload_mut(&mut self, offset: usize) -> &mut [u8] {
    let size = self.header_size(offset);
    &mut self.bytes[offset + HEADER..offset + HEADER + size]
  }
}
