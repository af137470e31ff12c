//! Image storage: a descriptor plus an aligned pixel buffer.

use crate::allocate::allocate_aligned;
use crate::error::ImageResult;
use crate::image_desc::{ImageDesc, PlaneCoord};
use crate::plane::PlaneDesc;
use safe_allocator_api::RawAlloc;

/// Owns an [`ImageDesc`] and a pixel buffer of `desc.size` bytes aligned
/// to `desc.alignment`.
///
/// Moves are O(1). There is deliberately no `Clone` impl; duplicating an
/// image allocates and copies the whole buffer, so that cost is spelled
/// out as [`Image::try_clone`] at the call site.
#[derive(Debug)]
pub struct Image {
    desc: ImageDesc,
    data: Option<RawAlloc>,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            desc: ImageDesc::default(),
            data: None,
        }
    }
}

impl Image {
    /// Allocates zeroed storage for `desc`. An empty descriptor yields
    /// an empty image without touching the allocator.
    ///
    /// Zeroing matters: padding bytes between pixels, rows and planes
    /// are never written by the conversion paths but are serialized
    /// verbatim by the containers.
    pub fn new(desc: ImageDesc) -> ImageResult<Self> {
        if desc.empty() {
            return Ok(Self::default());
        }
        let mut data = allocate_aligned(desc.alignment as usize, desc.size as usize)?;
        data.as_mut_slice().fill(0);
        Ok(Self {
            desc,
            data: Some(data),
        })
    }

    /// Allocates storage and copies `min(desc.size, initial.len())`
    /// bytes of initial content. A size mismatch is logged but not an
    /// error.
    pub fn with_content(desc: ImageDesc, initial: &[u8]) -> ImageResult<Self> {
        if desc.empty() && !initial.is_empty() {
            log::warn!("constructing an empty image with a non-empty content buffer");
        }
        let mut image = Self::new(desc)?;
        if let Some(data) = image.data.as_mut() {
            if initial.len() != data.len() {
                log::warn!(
                    "initial content is {} bytes but the image needs {}",
                    initial.len(),
                    data.len()
                );
            }
            let n = initial.len().min(data.len());
            data.as_mut_slice()[..n].copy_from_slice(&initial[..n]);
        }
        Ok(image)
    }

    /// Releases the buffer and resets to the empty image.
    pub fn clear(&mut self) {
        self.data = None;
        self.desc.clear();
    }

    pub fn empty(&self) -> bool {
        self.desc.empty()
    }

    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    /// Total size in bytes.
    pub fn size(&self) -> u64 {
        self.desc.size
    }

    /// The pixel buffer; empty for the empty image.
    pub fn data(&self) -> &[u8] {
        self.data.as_ref().map(|d| d.as_slice()).unwrap_or(&[])
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data
            .as_mut()
            .map(|d| d.as_mut_slice())
            .unwrap_or(&mut [])
    }

    pub fn plane(&self, coord: PlaneCoord) -> &PlaneDesc {
        self.desc.plane(coord)
    }

    /// Byte offset of a pixel within the buffer.
    pub fn pixel(&self, coord: PlaneCoord, x: u32, y: u32, z: u32) -> usize {
        self.desc.pixel(coord, x, y, z)
    }

    /// Bytes of one pixel block.
    pub fn at(&self, coord: PlaneCoord, x: u32, y: u32, z: u32) -> &[u8] {
        let start = self.pixel(coord, x, y, z);
        let bytes = self.plane(coord).format.bytes_per_block() as usize;
        &self.data()[start..start + bytes]
    }

    /// Borrows the image as a `(desc, bytes)` pair.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            desc: &self.desc,
            data: self.data(),
        }
    }

    /// Deep copy: allocates a fresh aligned buffer and copies all pixel
    /// bytes.
    pub fn try_clone(&self) -> ImageResult<Self> {
        Self::with_content(self.desc.clone(), self.data())
    }
}

/// A borrowed image: descriptor plus pixel bytes, no ownership.
#[derive(Clone, Copy)]
pub struct ImageView<'a> {
    pub desc: &'a ImageDesc,
    pub data: &'a [u8],
}

impl<'a> ImageView<'a> {
    pub fn new(desc: &'a ImageDesc, data: &'a [u8]) -> Self {
        Self { desc, data }
    }

    pub fn empty(&self) -> bool {
        self.desc.empty()
    }

    pub fn size(&self) -> u64 {
        self.desc.size
    }

    pub fn plane(&self, coord: PlaneCoord) -> &'a PlaneDesc {
        &self.desc.planes[self.desc.index(coord)]
    }

    /// Bytes of one pixel block.
    pub fn at(&self, coord: PlaneCoord, x: u32, y: u32, z: u32) -> &'a [u8] {
        let start = self.desc.pixel(coord, x, y, z);
        let bytes = self.plane(coord).format.bytes_per_block() as usize;
        &self.data[start..start + bytes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;
    use crate::plane::{Extent3D, PlaneDesc};
    use crate::ConstructionOrder;
    use alloc::vec;

    fn small_desc() -> ImageDesc {
        ImageDesc::new_2d(PixelFormat::RGBA8, 2, 2, 1)
    }

    #[test]
    fn empty_descriptor_builds_an_empty_image() {
        let image = Image::new(ImageDesc::default()).unwrap();
        assert!(image.empty());
        assert!(image.data().is_empty());
        assert_eq!(image.size(), 0);
    }

    #[test]
    fn buffer_matches_descriptor_size_and_alignment() {
        let base = PlaneDesc::new(PixelFormat::RGBA8, Extent3D::new(2, 2, 2));
        let desc = ImageDesc::make(base, 4, 1, 1, ConstructionOrder::FaceMajor, 16);
        let image = Image::new(desc).unwrap();
        assert_eq!(image.data().len() as u64, image.size());
        assert_eq!(image.data().as_ptr() as usize % 16, 0);
    }

    #[test]
    fn initial_content_is_truncated_or_padded() {
        let image = Image::with_content(small_desc(), &[7u8; 9]).unwrap();
        assert_eq!(&image.data()[..9], &[7u8; 9]);
        assert_eq!(image.data()[9], 0);

        let image = Image::with_content(small_desc(), &vec![9u8; 100]).unwrap();
        assert_eq!(image.data(), &[9u8; 16][..]);
    }

    #[test]
    fn clone_is_deep() {
        let mut image = Image::with_content(small_desc(), &[1u8; 16]).unwrap();
        let copy = image.try_clone().unwrap();
        image.data_mut()[0] = 42;
        assert_eq!(copy.data()[0], 1);
        assert_eq!(copy.desc(), image.desc());
    }

    #[test]
    fn clear_releases_everything() {
        let mut image = Image::new(small_desc()).unwrap();
        image.clear();
        assert!(image.empty());
        assert!(image.desc().valid());
    }

    #[test]
    fn view_addresses_pixels() {
        let mut image = Image::new(small_desc()).unwrap();
        let at = image.pixel(PlaneCoord::default(), 1, 1, 0);
        image.data_mut()[at..at + 4].copy_from_slice(&[1, 2, 3, 4]);
        let view = image.view();
        assert_eq!(view.at(PlaneCoord::default(), 1, 1, 0), &[1, 2, 3, 4]);
    }
}
