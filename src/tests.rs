use super::*;

fn small_allocator() -> Allocator {
  Allocator::with_options(AllocatorOptions::new().with_arena_capacity(4096).with_segment_capacity(64))
}

#[test]
fn s1_zero_allocation_is_a_full_no_op() {
  let mut a = small_allocator();
  let p = a.alloc(0);
  assert!(p.is_null());
  a.free(p);
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 0);
}

#[test]
fn s2_alphabet_round_trips_through_the_pointer() {
  let mut a = small_allocator();
  let p = a.alloc(26);
  {
    let buf = a.write(p);
    for (i, b) in buf.iter_mut().enumerate() {
      *b = b'A' + i as u8;
    }
  }
  assert_eq!(a.read(p), (b'A'..=b'Z').collect::<Vec<u8>>().as_slice());
  a.free(p);
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 1);
}

#[test]
fn s3_continuous_allocation_then_free_all() {
  let mut a = small_allocator();
  let mut ptrs = Vec::new();
  for i in 0..10 {
    ptrs.push(a.alloc(i));
  }
  assert!(ptrs[0].is_null());
  for p in &ptrs[1..] {
    assert!(!p.is_null());
  }
  assert_eq!(a.count_allocated(), 9);
  assert_eq!(a.count_freed(), 0);

  for p in ptrs {
    a.free(p);
  }
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 1);
}

#[test]
fn s4_freeing_every_other_allocation_leaves_a_checkerboard() {
  let mut a = small_allocator();
  let mut ptrs = Vec::new();
  for i in 0..10 {
    let p = a.alloc(i);
    ptrs.push(p);
    if i % 2 == 0 && !p.is_null() {
      a.free(p);
    }
  }
  // i=1,3,5,7,9 stay live; i=0 was never allocated (null); i=2,4,6,8
  // were each carved and immediately freed with nothing yet on their
  // right to coalesce with, so none of the four freed chunks merge.
  assert_eq!(a.count_allocated(), 5);
  assert_eq!(a.count_freed(), 4);
}

#[test]
fn s5_and_l4_coalesce_by_prev() {
  let mut a = small_allocator();
  let p0 = a.alloc(10);
  let p1 = a.alloc(10);
  a.free(p0);
  a.free(p1);
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 1);
}

#[test]
fn l5_coalesce_by_next() {
  let mut a = small_allocator();
  let p0 = a.alloc(10);
  let p1 = a.alloc(10);
  a.free(p1);
  a.free(p0);
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 1);
}

#[test]
fn s6_and_l6_two_sided_coalesce_absorbs_a_middle_gap() {
  let mut a = small_allocator();
  let mut ptrs = Vec::new();
  for i in 0..10 {
    ptrs.push(a.alloc(i));
  }
  assert_eq!(a.count_allocated(), 9);
  assert_eq!(a.count_freed(), 0);

  for i in (0..10).step_by(2) {
    if !ptrs[i].is_null() {
      a.free(ptrs[i]);
    }
  }
  assert_eq!(a.count_allocated(), 5);
  assert_eq!(a.count_freed(), 4);

  a.free(ptrs[3]);
  assert_eq!(a.count_allocated(), 4);
  assert_eq!(a.count_freed(), 3);
  assert!(!a.is_freed(ptrs[3]));
}

#[test]
fn l1_free_of_null_is_a_no_op() {
  let mut a = small_allocator();
  a.free(Ptr::NULL);
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 0);
}

#[test]
fn l2_single_alloc_then_free_leaves_one_freed_chunk() {
  let mut a = small_allocator();
  let p = a.alloc(40);
  a.free(p);
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 1);
}

#[test]
fn l3_exact_size_reuse_returns_the_same_pointer() {
  let mut a = small_allocator();
  let p = a.alloc(32);
  a.free(p);
  let q = a.alloc(32);
  assert_eq!(p, q);
  assert_eq!(a.count_allocated(), 1);
  assert_eq!(a.count_freed(), 0);
}

#[test]
fn split_leaves_a_reusable_residue() {
  let mut a = small_allocator();
  let p = a.alloc(64);
  a.free(p);
  let q = a.alloc(16);
  assert_eq!(p, q, "split must carve from the front of the free chunk");
  assert_eq!(a.count_allocated(), 1);
  assert_eq!(a.count_freed(), 1, "the residue stays on the free list");
}

#[test]
fn p5_check_pointer_holds_for_a_live_allocation() {
  let mut a = small_allocator();
  let p = a.alloc(12);
  a.check_pointer(p, 12);
  a.free(p);
}

#[test]
fn check_pointer_accepts_null_for_zero_size() {
  let a = small_allocator();
  a.check_pointer(Ptr::NULL, 0);
}

#[test]
#[should_panic(expected = "size mismatch")]
fn check_pointer_rejects_undersized_claim() {
  let mut a = small_allocator();
  let p = a.alloc(4);
  a.check_pointer(p, 100);
}

#[test]
#[should_panic(expected = "free of unknown pointer")]
fn double_free_is_fatal() {
  let mut a = small_allocator();
  let p = a.alloc(8);
  a.free(p);
  a.free(p);
}

#[test]
#[should_panic(expected = "is_freed called on a null pointer")]
fn is_freed_on_null_is_fatal() {
  let a = small_allocator();
  a.is_freed(Ptr::NULL);
}

#[test]
#[should_panic(expected = "out of arena")]
fn alloc_beyond_capacity_is_fatal() {
  let mut a = Allocator::with_options(AllocatorOptions::new().with_arena_capacity(16));
  a.alloc(1024);
}

#[test]
#[should_panic(expected = "capacity exceeded")]
fn exceeding_segment_capacity_is_fatal() {
  let mut a = Allocator::with_options(
    AllocatorOptions::new().with_arena_capacity(4096).with_segment_capacity(2),
  );
  a.alloc(8);
  a.alloc(8);
  a.alloc(8);
}

#[test]
fn dump_lists_both_segments() {
  let mut a = small_allocator();
  let p = a.alloc(8);
  let text = a.dump();
  assert!(text.contains("allocated"));
  assert!(text.contains("freed"));
  a.free(p);
  assert!(a.dump().contains("freed\t#1"));
}

#[test]
fn default_uses_reference_capacities() {
  let a = Allocator::new();
  // A fresh allocator has nothing carved yet; both segments are empty.
  assert_eq!(a.count_allocated(), 0);
  assert_eq!(a.count_freed(), 0);
}
