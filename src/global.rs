//! A `malloc`/`free`-style surface backed by one [`Allocator`] per thread.
//!
//! The reference model calls for a single process-wide instance,
//! initialised empty at start and never torn down. Rust's ownership
//! rules do not let a plain mutable value be shared across threads
//! without adding synchronization — and this crate declares internal
//! synchronization out of scope (see the crate-level docs). A
//! `thread_local!` instance gives every thread its own allocator,
//! matching the single-threaded contract exactly within a thread while
//! staying safe.

use std::cell::RefCell;

use crate::{Allocator, Ptr};

thread_local! {
  static INSTANCE: RefCell<Allocator> = RefCell::new(Allocator::new());
}

/// Requests `len` bytes from this thread's allocator. See
/// [`Allocator::alloc`].
pub fn alloc(len: usize) -> Ptr {
  INSTANCE.with(|a| a.borrow_mut().alloc(len))
}

/// Releases `p` back to this thread's allocator. See [`Allocator::free`].
pub fn free(p: Ptr) {
  INSTANCE.with(|a| a.borrow_mut().free(p));
}

/// See [`Allocator::is_freed`].
pub fn is_freed(p: Ptr) -> bool {
  INSTANCE.with(|a| a.borrow().is_freed(p))
}

/// See [`Allocator::check_pointer`].
pub fn check_pointer(p: Ptr, len: usize) {
  INSTANCE.with(|a| a.borrow().check_pointer(p, len));
}

/// See [`Allocator::count_allocated`].
pub fn count_allocated() -> usize {
  INSTANCE.with(|a| a.borrow().count_allocated())
}

/// See [`Allocator::count_freed`].
pub fn count_freed() -> usize {
  INSTANCE.with(|a| a.borrow().count_freed())
}

/// See [`Allocator::dump`].
pub fn dump() -> String {
  INSTANCE.with(|a| a.borrow().dump())
}

/// Reads the live payload named by `p` via this thread's allocator.
///
/// Copies out rather than borrowing, since the thread-local instance
/// cannot hand back a reference tied to the caller's stack frame.
pub fn read(p: Ptr) -> Vec<u8> {
  INSTANCE.with(|a| a.borrow().read(p).to_vec())
}

/// Writes `bytes` into the live payload named by `p` via this thread's
/// allocator, truncated to the payload's length.
pub fn write(p: Ptr, bytes: &[u8]) {
  INSTANCE.with(|a| {
    let mut a = a.borrow_mut();
    let dst = a.write(p);
    let n = dst.len().min(bytes.len());
    dst[..n].copy_from_slice(&bytes[..n]);
  });
}
