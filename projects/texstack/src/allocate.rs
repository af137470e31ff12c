//! Helper methods around memory allocation.
//!
//! All pixel storage in this crate goes through a single aligned
//! allocator pair so that buffers handed to SIMD-friendly consumers meet
//! their alignment requirements.

use core::alloc::{Layout, LayoutError};
use safe_allocator_api::allocator_api::*;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Allocates `num_bytes` bytes aligned to `alignment`.
///
/// `alignment` must be a power of two. The allocation is freed with the
/// matching aligned deallocator when the returned [`RawAlloc`] drops.
pub fn allocate_aligned(alignment: usize, num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, alignment)?;
    Ok(RawAlloc::new(layout)?)
}

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    #[error("invalid layout: alignment must be a power of two and the size must not overflow. {0}")]
    LayoutError(#[from] LayoutError),

    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}
