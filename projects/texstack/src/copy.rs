//! Clipped rectangular region copy between planes.

use crate::error::{ImageError, ImageResult};
use crate::plane::PlaneDesc;

/// Copies a 3D region of pixel blocks from one plane to another.
///
/// `dst`/`src` are plane-local buffers (each plane's `offset` is not
/// applied). Offsets may be negative or out of range; the region is
/// clipped against both planes and a fully clipped copy is a successful
/// no-op. Both formats must share the same block byte size, and the X/Y
/// offsets must be aligned to the respective pixel block dimensions.
///
/// `src_extent` is measured in source pixels.
pub fn copy_content(
    dst_desc: &PlaneDesc,
    dst: &mut [u8],
    dst_offset: (i32, i32, i32),
    src_desc: &PlaneDesc,
    src: &[u8],
    src_offset: (i32, i32, i32),
    src_extent: (u32, u32, u32),
) -> ImageResult<()> {
    if !dst_desc.valid() || !src_desc.valid() {
        return Err(ImageError::InvalidDescriptor("copy needs valid planes"));
    }
    let src_ld = src_desc.format.layout_desc();
    let dst_ld = dst_desc.format.layout_desc();
    let block_bytes = src_ld.block_bytes as usize;
    if src_ld.block_bytes != dst_ld.block_bytes {
        return Err(ImageError::InvalidDescriptor(
            "copy needs matching block byte sizes",
        ));
    }
    if src_offset.0 % src_ld.block_width as i32 != 0
        || src_offset.1 % src_ld.block_height as i32 != 0
        || dst_offset.0 % dst_ld.block_width as i32 != 0
        || dst_offset.1 % dst_ld.block_height as i32 != 0
    {
        return Err(ImageError::InvalidDescriptor(
            "copy offsets must be pixel-block aligned",
        ));
    }
    if src.len() < src_desc.size as usize {
        return Err(ImageError::BufferTooSmall {
            required: src_desc.size as usize,
            actual: src.len(),
        });
    }
    if dst.len() < dst_desc.size as usize {
        return Err(ImageError::BufferTooSmall {
            required: dst_desc.size as usize,
            actual: dst.len(),
        });
    }

    // Everything below is in block units (Z stays in slices).
    let src_blocks = (
        src_desc.extent.w.div_ceil(src_ld.block_width as u32) as i64,
        src_desc.extent.h.div_ceil(src_ld.block_height as u32) as i64,
        src_desc.extent.d as i64,
    );
    let dst_blocks = (
        dst_desc.extent.w.div_ceil(dst_ld.block_width as u32) as i64,
        dst_desc.extent.h.div_ceil(dst_ld.block_height as u32) as i64,
        dst_desc.extent.d as i64,
    );
    let mut sx = src_offset.0 as i64 / src_ld.block_width as i64;
    let mut sy = src_offset.1 as i64 / src_ld.block_height as i64;
    let mut sz = src_offset.2 as i64;
    let mut dx = dst_offset.0 as i64 / dst_ld.block_width as i64;
    let mut dy = dst_offset.1 as i64 / dst_ld.block_height as i64;
    let mut dz = dst_offset.2 as i64;
    let mut w = src_extent.0.div_ceil(src_ld.block_width as u32) as i64;
    let mut h = src_extent.1.div_ceil(src_ld.block_height as u32) as i64;
    let mut d = src_extent.2 as i64;

    // Clamp against the source, translating the destination by the same
    // amount, then the reverse; finally bound the extent by both planes.
    clamp_axis(&mut sx, &mut dx, &mut w, src_blocks.0);
    clamp_axis(&mut sy, &mut dy, &mut h, src_blocks.1);
    clamp_axis(&mut sz, &mut dz, &mut d, src_blocks.2);
    clamp_axis(&mut dx, &mut sx, &mut w, dst_blocks.0);
    clamp_axis(&mut dy, &mut sy, &mut h, dst_blocks.1);
    clamp_axis(&mut dz, &mut sz, &mut d, dst_blocks.2);
    w = w.min(src_blocks.0 - sx).min(dst_blocks.0 - dx);
    h = h.min(src_blocks.1 - sy).min(dst_blocks.1 - dy);
    d = d.min(src_blocks.2 - sz).min(dst_blocks.2 - dz);
    if w <= 0 || h <= 0 || d <= 0 {
        return Ok(());
    }

    let row_bytes = w as usize * block_bytes;
    for z in 0..d {
        for y in 0..h {
            let src_at = (sz + z) as usize * src_desc.slice as usize
                + (sy + y) as usize * src_desc.pitch as usize
                + sx as usize * src_desc.step as usize;
            let dst_at = (dz + z) as usize * dst_desc.slice as usize
                + (dy + y) as usize * dst_desc.pitch as usize
                + dx as usize * dst_desc.step as usize;
            debug_assert!(src_at + row_bytes <= src_desc.size as usize);
            debug_assert!(dst_at + row_bytes <= dst_desc.size as usize);
            dst[dst_at..dst_at + row_bytes].copy_from_slice(&src[src_at..src_at + row_bytes]);
        }
    }
    Ok(())
}

/// Clamps `a` to `[0, bound)`, translating `b` and shrinking `len` by
/// the clip amount.
fn clamp_axis(a: &mut i64, b: &mut i64, len: &mut i64, bound: i64) {
    if *a < 0 {
        *b -= *a;
        *len += *a;
        *a = 0;
    }
    if *a > bound {
        *len -= *a - bound;
        *a = bound;
    }
}
