//! Plane tables for arrayed, cubemapped and mipmapped images.

use crate::plane::{next_multiple_u64, Extent3D, PlaneDesc};
use alloc::vec;
use alloc::vec::Vec;

/// Memory order of the planes. Only offsets differ; the plane table is
/// always indexed the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstructionOrder {
    /// All mip levels of one face are adjacent, then the next face, then
    /// the next array element. This is the DDS file order.
    #[default]
    FaceMajor,
    /// All faces of one mip level are adjacent, then the next level,
    /// then the next array element.
    MipMajor,
}

/// Location of one plane: array element, cube face, mip level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaneCoord {
    pub array: usize,
    pub face: usize,
    pub level: usize,
}

impl PlaneCoord {
    pub const fn new(array: usize, face: usize, level: usize) -> Self {
        Self { array, face, level }
    }
}

/// A dense plane table plus its summary counts.
///
/// The table is indexed by `array × faces × levels + face × levels +
/// level`. Every plane's `offset` is absolute within the image buffer;
/// the total `size` covers them all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDesc {
    /// One descriptor per `(array, face, level)`.
    pub planes: Vec<PlaneDesc>,
    /// Array length; 1 for non-array images.
    pub array_length: u32,
    /// Face count; 6 for cubemaps, else 1.
    pub faces: u32,
    /// Mipmap level count.
    pub levels: u32,
    /// Plane offset alignment. A multiple of every plane's own alignment.
    pub alignment: u32,
    /// Total image size in bytes.
    pub size: u64,
}

impl ImageDesc {
    /// Default plane offset alignment, compatible with 16-byte SIMD loads.
    pub const DEFAULT_ALIGNMENT: u32 = 16;

    /// Builds a descriptor from a base plane.
    ///
    /// Zero `array_length`/`faces` normalize to 1. `levels` of zero (or
    /// more than the full chain) becomes the full mip chain of the base
    /// extent. `alignment` must be a power of two and a multiple of the
    /// base plane's alignment. Invalid input yields the empty descriptor.
    pub fn make(
        base: PlaneDesc,
        array_length: u32,
        faces: u32,
        levels: u32,
        order: ConstructionOrder,
        alignment: u32,
    ) -> Self {
        if !base.valid() {
            log::error!("image descriptor reset failed: invalid base plane");
            return Self::default();
        }
        if alignment == 0 || !alignment.is_power_of_two() || alignment % base.alignment != 0 {
            log::error!(
                "image alignment ({alignment}) must be a power of two multiple of the plane alignment ({})",
                base.alignment
            );
            return Self::default();
        }

        let array_length = array_length.max(1);
        let faces = faces.max(1);
        let full_chain = Self::max_levels(base.extent);
        let levels = if levels == 0 {
            full_chain
        } else {
            levels.min(full_chain)
        };

        let mut desc = Self {
            planes: vec![PlaneDesc::default(); (array_length * faces * levels) as usize],
            array_length,
            faces,
            levels,
            alignment,
            size: 0,
        };

        let mut offset = 0u64;
        match order {
            ConstructionOrder::FaceMajor => {
                for a in 0..array_length as usize {
                    for f in 0..faces as usize {
                        let mut mip = base;
                        for l in 0..levels as usize {
                            let at = desc.index(PlaneCoord::new(a, f, l));
                            mip.offset = offset as u32;
                            desc.planes[at] = mip;
                            offset = next_multiple_u64(offset + mip.size as u64, alignment as u64);
                            mip = Self::next_level(&mip);
                        }
                    }
                }
            }
            ConstructionOrder::MipMajor => {
                for a in 0..array_length as usize {
                    let mut mip = base;
                    for l in 0..levels as usize {
                        for f in 0..faces as usize {
                            let at = desc.index(PlaneCoord::new(a, f, l));
                            mip.offset = offset as u32;
                            desc.planes[at] = mip;
                            offset = next_multiple_u64(offset + mip.size as u64, alignment as u64);
                        }
                        mip = Self::next_level(&mip);
                    }
                }
            }
        }
        desc.size = offset;

        debug_assert!(desc.valid());
        desc
    }

    /// Halves each non-1 extent and recomputes spacing, carrying the
    /// parent's step and alignment.
    fn next_level(parent: &PlaneDesc) -> PlaneDesc {
        let extent = Extent3D::new(
            (parent.extent.w / 2).max(1),
            (parent.extent.h / 2).max(1),
            (parent.extent.d / 2).max(1),
        );
        PlaneDesc::make(parent.format, extent, parent.step, 0, 0, parent.alignment)
    }

    /// Number of levels in the full mip chain of `extent`.
    pub fn max_levels(extent: Extent3D) -> u32 {
        let (mut w, mut h, mut d) = (extent.w.max(1), extent.h.max(1), extent.d.max(1));
        let mut levels = 1;
        while w > 1 || h > 1 || d > 1 {
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            d = (d / 2).max(1);
            levels += 1;
        }
        levels
    }

    /// Resets to the empty descriptor.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Checks the plane table against the summary counts.
    pub fn valid(&self) -> bool {
        if self.planes.is_empty() {
            // The empty descriptor must be all-zero; no other state is
            // observable.
            return self.array_length == 0
                && self.faces == 0
                && self.levels == 0
                && self.alignment == 0
                && self.size == 0;
        }
        if self.planes.len() != (self.array_length * self.faces * self.levels) as usize {
            return false;
        }
        if self.alignment == 0 || !self.alignment.is_power_of_two() {
            return false;
        }
        self.planes.iter().all(|plane| {
            plane.valid()
                && self.alignment % plane.alignment == 0
                && plane.offset as u64 + plane.size as u64 <= self.size
        })
    }

    /// Index of the plane at `coord`.
    pub fn index(&self, coord: PlaneCoord) -> usize {
        debug_assert!(coord.array < self.array_length as usize);
        debug_assert!(coord.face < self.faces as usize);
        debug_assert!(coord.level < self.levels as usize);
        coord.array * (self.faces * self.levels) as usize
            + coord.face * self.levels as usize
            + coord.level
    }

    /// Coordinate of the plane at `index`. Inverse of [`ImageDesc::index`]
    /// regardless of construction order.
    pub fn coord(&self, index: usize) -> PlaneCoord {
        debug_assert!(index < self.planes.len());
        let fl = (self.faces * self.levels) as usize;
        PlaneCoord {
            array: index / fl,
            face: (index / self.levels as usize) % self.faces as usize,
            level: index % self.levels as usize,
        }
    }

    pub fn plane(&self, coord: PlaneCoord) -> &PlaneDesc {
        &self.planes[self.index(coord)]
    }

    /// Byte offset of a pixel within the image buffer.
    pub fn pixel(&self, coord: PlaneCoord, x: u32, y: u32, z: u32) -> usize {
        let r = self.plane(coord).pixel(x, y, z);
        debug_assert!((r as u64) < self.size);
        r
    }

    /// A simple 2D image.
    pub fn new_2d(format: crate::PixelFormat, width: u32, height: u32, levels: u32) -> Self {
        Self::make(
            PlaneDesc::new(format, Extent3D::new_2d(width, height)),
            1,
            1,
            levels,
            ConstructionOrder::default(),
            Self::DEFAULT_ALIGNMENT,
        )
    }

    /// A 2D array image.
    pub fn new_2d_array(
        format: crate::PixelFormat,
        array_length: u32,
        width: u32,
        height: u32,
        levels: u32,
    ) -> Self {
        Self::make(
            PlaneDesc::new(format, Extent3D::new_2d(width, height)),
            array_length,
            1,
            levels,
            ConstructionOrder::default(),
            Self::DEFAULT_ALIGNMENT,
        )
    }

    /// A cubemap with six faces of `width × width`.
    pub fn new_cube(format: crate::PixelFormat, width: u32, levels: u32) -> Self {
        Self::make(
            PlaneDesc::new(format, Extent3D::new_2d(width, width)),
            1,
            6,
            levels,
            ConstructionOrder::default(),
            Self::DEFAULT_ALIGNMENT,
        )
    }

    /// A cubemap array.
    pub fn new_cube_array(
        format: crate::PixelFormat,
        array_length: u32,
        width: u32,
        levels: u32,
    ) -> Self {
        Self::make(
            PlaneDesc::new(format, Extent3D::new_2d(width, width)),
            array_length,
            6,
            levels,
            ConstructionOrder::default(),
            Self::DEFAULT_ALIGNMENT,
        )
    }

    /// A 3D (volume) image.
    pub fn new_3d(format: crate::PixelFormat, width: u32, height: u32, depth: u32, levels: u32) -> Self {
        Self::make(
            PlaneDesc::new(format, Extent3D::new(width, height, depth)),
            1,
            1,
            levels,
            ConstructionOrder::default(),
            Self::DEFAULT_ALIGNMENT,
        )
    }
}
