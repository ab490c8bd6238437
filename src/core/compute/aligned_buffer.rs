//! Aligned, zero-initialised scratch buffers
//!
//! Per-position counters and skip masks are streamed through vector loads and
//! stores. The loads tolerate any address, but starting every buffer on a
//! `SCRATCH_ALIGNMENT` boundary keeps each vector access inside a single
//! cache line. Buffers are owned by the statistics object that uses them and
//! freed when it is dropped.

use std::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::defaults::SCRATCH_ALIGNMENT;

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
}

/// Element types for which the all-zero bit pattern is a valid value.
pub trait ScratchElement: Copy + private::Sealed {}
impl ScratchElement for u8 {}
impl ScratchElement for u32 {}
impl ScratchElement for f32 {}

/// Heap buffer of `len` elements whose first element sits on a
/// `SCRATCH_ALIGNMENT`-byte boundary.
pub struct AlignedBuffer<T: ScratchElement> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

impl<T: ScratchElement> AlignedBuffer<T> {
    /// Allocate `len` zeroed elements.
    pub fn zeroed(len: usize) -> Self {
        let bytes = len
            .checked_mul(std::mem::size_of::<T>())
            .expect("AlignedBuffer: capacity overflow");
        // Zero-sized allocations are not allowed; reserve one aligned block
        let layout = Layout::from_size_align(bytes.max(SCRATCH_ALIGNMENT), SCRATCH_ALIGNMENT)
            .expect("AlignedBuffer: capacity overflow");

        let raw = unsafe { alloc_zeroed(layout) } as *mut T;
        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        };

        Self { ptr, len, layout }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reset every element to zero.
    #[inline]
    pub fn clear(&mut self) {
        unsafe { std::ptr::write_bytes(self.ptr.as_ptr(), 0, self.len) };
    }
}

impl<T: ScratchElement> Deref for AlignedBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: ScratchElement> DerefMut for AlignedBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: ScratchElement> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
    }
}

impl<T: ScratchElement + std::fmt::Debug> std::fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &self.layout.align())
            .finish()
    }
}

// The buffer uniquely owns its allocation, like a Vec<T>.
unsafe impl<T: ScratchElement + Send> Send for AlignedBuffer<T> {}
unsafe impl<T: ScratchElement + Sync> Sync for AlignedBuffer<T> {}
