//! Geometry and spacing of a single 1D/2D/3D image plane.

use crate::error::{ImageError, ImageResult};
use crate::pixel::{Float4, Rgba8};
use crate::pixel_format::PixelFormat;
use alloc::vec::Vec;

/// Width, height and depth of a plane, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Extent3D {
    pub w: u32,
    pub h: u32,
    pub d: u32,
}

impl Extent3D {
    pub const fn new(w: u32, h: u32, d: u32) -> Self {
        Self { w, h, d }
    }

    pub const fn new_2d(w: u32, h: u32) -> Self {
        Self::new(w, h, 1)
    }

    pub fn empty(self) -> bool {
        self.w == 0 || self.h == 0 || self.d == 0
    }
}

pub(crate) const fn next_multiple(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

pub(crate) const fn next_multiple_u64(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

/// Describes one image plane: pixel format, extent and byte spacing.
///
/// A `PlaneDesc` is pure metadata; pixel bytes are owned by the
/// enclosing [`crate::Image`]. All spacing is measured in whole pixel
/// blocks: `step` separates horizontally adjacent blocks, `pitch`
/// separates block rows, `slice` separates Z slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneDesc {
    /// Pixel format.
    pub format: PixelFormat,
    /// Extent of the plane in pixels.
    pub extent: Extent3D,
    /// Bytes from one pixel block to the next. At least the block size.
    pub step: u32,
    /// Bytes from one block row to the next, aligned to `alignment`.
    pub pitch: u32,
    /// Bytes from one Z slice to the next, aligned to `alignment`.
    pub slice: u32,
    /// Bytes of the whole plane (`slice × depth`).
    pub size: u32,
    /// Byte offset of this plane inside the owning image.
    pub offset: u32,
    /// Row/slice alignment. Always a power of two.
    pub alignment: u32,
}

impl Default for PlaneDesc {
    fn default() -> Self {
        Self {
            format: PixelFormat::UNKNOWN,
            extent: Extent3D::default(),
            step: 0,
            pitch: 0,
            slice: 0,
            size: 0,
            offset: 0,
            alignment: Self::DEFAULT_ALIGNMENT,
        }
    }
}

impl PlaneDesc {
    /// Default row alignment in bytes.
    pub const DEFAULT_ALIGNMENT: u32 = 4;

    /// Creates a plane descriptor with default spacing and alignment.
    pub fn new(format: PixelFormat, extent: Extent3D) -> Self {
        Self::make(format, extent, 0, 0, 0, Self::DEFAULT_ALIGNMENT)
    }

    /// Creates a plane descriptor.
    ///
    /// Zero extents normalize to 1. `step`/`pitch`/`slice` are raised to
    /// their minimums and `pitch`/`slice` rounded up to `alignment`,
    /// which must be a power of two. An invalid format or alignment
    /// yields the empty descriptor.
    pub fn make(
        format: PixelFormat,
        extent: Extent3D,
        step: u32,
        pitch: u32,
        slice: u32,
        alignment: u32,
    ) -> Self {
        if !format.valid() {
            log::error!("invalid pixel format: {:#010x}", format.to_u32());
            return Self::default();
        }
        if alignment == 0 || !alignment.is_power_of_two() {
            log::error!("plane alignment ({alignment}) must be a power of two");
            return Self::default();
        }

        let ld = format.layout_desc();
        let extent = Extent3D::new(extent.w.max(1), extent.h.max(1), extent.d.max(1));
        let blocks_per_row = extent.w.div_ceil(ld.block_width as u32);
        let blocks_per_col = extent.h.div_ceil(ld.block_height as u32);

        let step = step.max(ld.block_bytes as u32);
        let pitch = next_multiple(pitch.max(step * blocks_per_row), alignment);
        let slice = next_multiple(slice.max(pitch * blocks_per_col), alignment);

        let plane = Self {
            format,
            extent,
            step,
            pitch,
            slice,
            size: slice * extent.d,
            offset: 0,
            alignment,
        };
        debug_assert!(plane.valid());
        plane
    }

    /// True when this descriptor carries no format. Never valid.
    pub fn empty(&self) -> bool {
        self.format.empty()
    }

    /// Checks all spacing and alignment invariants. Never true for the
    /// empty descriptor.
    pub fn valid(&self) -> bool {
        if !self.format.valid() {
            return false;
        }
        if self.extent.empty() {
            return false;
        }
        if self.alignment == 0 || !self.alignment.is_power_of_two() {
            return false;
        }
        let ld = self.format.layout_desc();
        let blocks_per_row = self.extent.w.div_ceil(ld.block_width as u32);
        let blocks_per_col = self.extent.h.div_ceil(ld.block_height as u32);
        self.step >= ld.block_bytes as u32
            && self.pitch >= self.step * blocks_per_row
            && self.pitch % self.alignment == 0
            && self.slice >= self.pitch * blocks_per_col
            && self.slice % self.alignment == 0
            && self.size >= self.slice * self.extent.d
    }

    /// Byte offset of pixel `(x, y, z)` from the start of the owning
    /// image's buffer.
    ///
    /// `x`/`y` must be aligned to the pixel block and inside the extent.
    pub fn pixel(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < self.extent.w && y < self.extent.h && z < self.extent.d);
        let ld = self.format.layout_desc();
        debug_assert!(x % ld.block_width as u32 == 0 && y % ld.block_height as u32 == 0);
        let r = z as usize * self.slice as usize
            + (y / ld.block_height as u32) as usize * self.pitch as usize
            + (x / ld.block_width as u32) as usize * self.step as usize;
        debug_assert!(r < self.size as usize);
        r + self.offset as usize
    }

    /// Decodes the whole plane to four-float pixels in `(z, y, x)`
    /// row-major order.
    ///
    /// `pixels` is the owning image's buffer (this plane's `offset`
    /// applies). Fails on block formats.
    pub fn to_float4(&self, pixels: &[u8]) -> ImageResult<Vec<Float4>> {
        if self.empty() {
            return Err(ImageError::InvalidDescriptor("empty plane"));
        }
        self.check_per_pixel()?;
        self.check_buffer(pixels.len())?;
        let Extent3D { w, h, d } = self.extent;
        let bytes = self.format.bytes_per_block() as usize;
        let mut colors = Vec::with_capacity((w * h * d) as usize);
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let at = self.pixel(x, y, z);
                    colors.push(self.format.store_to_float4(&pixels[at..at + bytes])?);
                }
            }
        }
        Ok(colors)
    }

    /// Decodes the whole plane to RGBA8 in `(z, y, x)` row-major order.
    pub fn to_rgba8(&self, pixels: &[u8]) -> ImageResult<Vec<Rgba8>> {
        if self.empty() {
            return Err(ImageError::InvalidDescriptor("empty plane"));
        }
        self.check_per_pixel()?;
        self.check_buffer(pixels.len())?;
        let Extent3D { w, h, d } = self.extent;
        let bytes = self.format.bytes_per_block() as usize;
        let rgba8_shortcut = self.format == PixelFormat::RGBA8;
        let mut colors = Vec::with_capacity((w * h * d) as usize);
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let at = self.pixel(x, y, z);
                    let src = &pixels[at..at + bytes];
                    colors.push(if rgba8_shortcut {
                        Rgba8::new(src[0], src[1], src[2], src[3])
                    } else {
                        Rgba8::from_float4(self.format.store_to_float4(src)?)
                    });
                }
            }
        }
        Ok(colors)
    }

    /// Encodes one Z slice of the plane from a contiguous `w × h`
    /// four-float buffer.
    pub fn from_float4(&self, dst: &mut [u8], dst_z: u32, src: &[Float4]) -> ImageResult<()> {
        if self.empty() {
            return Err(ImageError::InvalidDescriptor("empty plane"));
        }
        self.check_per_pixel()?;
        let Extent3D { w, h, .. } = self.extent;
        let needed = (w * h) as usize;
        if src.len() < needed {
            return Err(ImageError::BufferTooSmall {
                required: needed * core::mem::size_of::<Float4>(),
                actual: src.len() * core::mem::size_of::<Float4>(),
            });
        }
        let bytes = self.format.bytes_per_block() as usize;
        for y in 0..h {
            for x in 0..w {
                let at = self.pixel(x, y, dst_z);
                if at + bytes > dst.len() {
                    return Err(ImageError::BufferTooSmall {
                        required: at + bytes,
                        actual: dst.len(),
                    });
                }
                let packed = self
                    .format
                    .load_from_float4(src[(y * w + x) as usize])?;
                dst[at..at + bytes].copy_from_slice(&packed.to_bytes()[..bytes]);
            }
        }
        Ok(())
    }

    fn check_per_pixel(&self) -> ImageResult<()> {
        let ld = self.format.layout_desc();
        if ld.block_width != 1 || ld.block_height != 1 {
            return Err(crate::error::ConvertError::CompressedFormat.into());
        }
        Ok(())
    }

    fn check_buffer(&self, actual: usize) -> ImageResult<()> {
        let required = self.offset as usize + self.size as usize;
        if actual < required {
            return Err(ImageError::BufferTooSmall { required, actual });
        }
        Ok(())
    }
}
