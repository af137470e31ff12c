//! The native RIL container.
//!
//! Little-endian wire layout:
//!
//! ```text
//! +---------------------+ byte 0
//! | tag[4] = "RIL_"     |
//! | u32 version         |  currently 1
//! +---------------------+ 8
//! | header (36 bytes)   |
//! |   u32 header_size   |  = RIL_HEADER_SIZE
//! |   u32 plane_size    |  = RIL_PLANE_DESC_SIZE
//! |   u32 first_plane   |  = RIL_FIRST_PLANE_OFFSET
//! |   u32 array_length  |
//! |   u32 faces         |
//! |   u32 levels        |
//! |   u32 alignment     |
//! |   u64 size          |  total pixel bytes
//! +---------------------+ 44
//! | plane desc × N      |  N = array_length × faces × levels
//! +---------------------+
//! | pixel blob          |
//! +---------------------+
//! ```
//!
//! The header records its own layout sizes; a reader rejects any file
//! whose sizes differ from the compiled-in constants, so the wire
//! format is versioned by struct identity as well as by `version`.

use crate::error::{FormatError, FormatResult};
use alloc::vec;
use alloc::vec::Vec;
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};
use texstack::{Extent3D, Image, ImageDesc, ImageError, ImageView, PixelFormat, PlaneDesc};

/// File tag, followed by the format version.
pub const RIL_TAG: [u8; 4] = *b"RIL_";
/// Current wire format version.
pub const RIL_VERSION: u32 = 1;
/// Bytes in the fixed header after tag and version.
pub const RIL_HEADER_SIZE: u32 = 36;
/// Bytes per serialized plane descriptor (ten `u32` fields).
pub const RIL_PLANE_DESC_SIZE: u32 = 40;
/// Offset of the first plane descriptor from the start of the file.
pub const RIL_FIRST_PLANE_OFFSET: u32 = 8 + RIL_HEADER_SIZE;

/// True when `data` starts with the RIL tag.
pub fn is_ril(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == RIL_TAG
}

/// Decodes a RIL file into an image.
pub fn decode(data: &[u8]) -> FormatResult<Image> {
    if !is_ril(data) {
        return Err(FormatError::UnsupportedFileFormat);
    }
    if data.len() < RIL_FIRST_PLANE_OFFSET as usize {
        return Err(FormatError::CorruptFile("truncated RIL header"));
    }
    // SAFETY: bounds checked above; all offsets below stay inside
    // RIL_FIRST_PLANE_OFFSET.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let version = unsafe { reader.read_u32_at(4) };
    if version != RIL_VERSION {
        return Err(FormatError::UnsupportedFileFormat);
    }
    let header_size = unsafe { reader.read_u32_at(8) };
    let plane_desc_size = unsafe { reader.read_u32_at(12) };
    let first_plane = unsafe { reader.read_u32_at(16) };
    if header_size != RIL_HEADER_SIZE
        || plane_desc_size != RIL_PLANE_DESC_SIZE
        || first_plane != RIL_FIRST_PLANE_OFFSET
    {
        return Err(FormatError::CorruptFile("unexpected RIL struct sizes"));
    }
    let array_length = unsafe { reader.read_u32_at(20) };
    let faces = unsafe { reader.read_u32_at(24) };
    let levels = unsafe { reader.read_u32_at(28) };
    let alignment = unsafe { reader.read_u32_at(32) };
    let size =
        unsafe { reader.read_u32_at(36) as u64 | (reader.read_u32_at(40) as u64) << 32 };

    let plane_count = array_length as usize * faces as usize * levels as usize;
    let planes_end = RIL_FIRST_PLANE_OFFSET as usize
        + plane_count
            .checked_mul(RIL_PLANE_DESC_SIZE as usize)
            .ok_or(FormatError::CorruptFile("plane table overflow"))?;
    if data.len() < planes_end {
        return Err(FormatError::CorruptFile("truncated RIL plane table"));
    }

    let mut planes = Vec::with_capacity(plane_count);
    for i in 0..plane_count {
        let base = (RIL_FIRST_PLANE_OFFSET as usize + i * RIL_PLANE_DESC_SIZE as usize) as isize;
        // SAFETY: the whole record is inside planes_end.
        let plane = unsafe {
            PlaneDesc {
                format: PixelFormat::from_u32(reader.read_u32_at(base)),
                extent: Extent3D::new(
                    reader.read_u32_at(base + 4),
                    reader.read_u32_at(base + 8),
                    reader.read_u32_at(base + 12),
                ),
                step: reader.read_u32_at(base + 16),
                pitch: reader.read_u32_at(base + 20),
                slice: reader.read_u32_at(base + 24),
                size: reader.read_u32_at(base + 28),
                offset: reader.read_u32_at(base + 32),
                alignment: reader.read_u32_at(base + 36),
            }
        };
        planes.push(plane);
    }

    let desc = ImageDesc {
        planes,
        array_length,
        faces,
        levels,
        alignment,
        size,
    };
    if !desc.valid() {
        return Err(FormatError::CorruptFile("RIL descriptor failed validation"));
    }

    let blob = &data[planes_end..];
    if (blob.len() as u64) < size {
        return Err(FormatError::CorruptFile("truncated RIL pixel blob"));
    }
    let mut image = Image::new(desc)?;
    image.data_mut().copy_from_slice(&blob[..size as usize]);
    Ok(image)
}

/// Encodes an image into a RIL byte vector. Pixel bytes are stored
/// verbatim.
pub fn encode(view: ImageView<'_>) -> FormatResult<Vec<u8>> {
    let desc = view.desc;
    if desc.empty() || !desc.valid() {
        return Err(ImageError::InvalidDescriptor("cannot encode an invalid image").into());
    }
    if (view.data.len() as u64) < desc.size {
        return Err(ImageError::BufferTooSmall {
            required: desc.size as usize,
            actual: view.data.len(),
        }
        .into());
    }

    let planes_end =
        RIL_FIRST_PLANE_OFFSET as usize + desc.planes.len() * RIL_PLANE_DESC_SIZE as usize;
    let mut out = vec![0u8; planes_end + desc.size as usize];
    out[..4].copy_from_slice(&RIL_TAG);
    // SAFETY: `out` covers every offset written below.
    let mut writer = unsafe { LittleEndianWriter::new(out.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(RIL_VERSION, 4);
        writer.write_u32_at(RIL_HEADER_SIZE, 8);
        writer.write_u32_at(RIL_PLANE_DESC_SIZE, 12);
        writer.write_u32_at(RIL_FIRST_PLANE_OFFSET, 16);
        writer.write_u32_at(desc.array_length, 20);
        writer.write_u32_at(desc.faces, 24);
        writer.write_u32_at(desc.levels, 28);
        writer.write_u32_at(desc.alignment, 32);
        writer.write_u32_at(desc.size as u32, 36);
        writer.write_u32_at((desc.size >> 32) as u32, 40);
        for (i, plane) in desc.planes.iter().enumerate() {
            let base =
                (RIL_FIRST_PLANE_OFFSET as usize + i * RIL_PLANE_DESC_SIZE as usize) as isize;
            writer.write_u32_at(plane.format.to_u32(), base);
            writer.write_u32_at(plane.extent.w, base + 4);
            writer.write_u32_at(plane.extent.h, base + 8);
            writer.write_u32_at(plane.extent.d, base + 12);
            writer.write_u32_at(plane.step, base + 16);
            writer.write_u32_at(plane.pitch, base + 20);
            writer.write_u32_at(plane.slice, base + 24);
            writer.write_u32_at(plane.size, base + 28);
            writer.write_u32_at(plane.offset, base + 32);
            writer.write_u32_at(plane.alignment, base + 36);
        }
    }
    out[planes_end..].copy_from_slice(&view.data[..desc.size as usize]);
    Ok(out)
}
