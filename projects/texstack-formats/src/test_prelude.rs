//! Common test imports and synthetic DDS builders.
#![allow(dead_code)]

pub(crate) use crate::dds::constants::*;
use alloc::vec;
use alloc::vec::Vec;
use texstack::{ConstructionOrder, Extent3D, ImageDesc, PixelFormat, PlaneDesc};

/// Writes a little-endian `u32` at `offset`.
pub fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Pixel bytes a decoder will expect for this geometry (alignment 4,
/// face-major, like the DDS reader builds).
pub fn expected_blob_len(format: PixelFormat, w: u32, h: u32, d: u32, faces: u32, levels: u32) -> usize {
    let base = PlaneDesc::new(format, Extent3D::new(w, h, d));
    ImageDesc::make(base, 1, faces, levels, ConstructionOrder::FaceMajor, 4).size as usize
}

/// A DDS header (no DX10 extension) followed by `blob_len` patterned
/// bytes.
fn dds_skeleton(w: u32, h: u32, mips: u32, blob_len: usize, dx10: bool) -> Vec<u8> {
    let header_len = if dx10 {
        DDS_HEADER_SIZE + DX10_HEADER_SIZE
    } else {
        DDS_HEADER_SIZE
    };
    let mut data = vec![0u8; header_len + blob_len];
    write_u32(&mut data, 0, DDS_MAGIC);
    write_u32(&mut data, DDS_SIZE_OFFSET, 124);

    let mut flags = DDSD_CAPS | DDSD_WIDTH | DDSD_HEIGHT | DDSD_PIXELFORMAT;
    let mut caps = DDSCAPS_TEXTURE;
    if mips > 1 {
        flags |= DDSD_MIPMAPCOUNT;
        caps |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
        write_u32(&mut data, DDS_MIPMAP_COUNT_OFFSET, mips);
    }
    write_u32(&mut data, DDS_FLAGS_OFFSET, flags);
    write_u32(&mut data, DDS_HEIGHT_OFFSET, h);
    write_u32(&mut data, DDS_WIDTH_OFFSET, w);
    write_u32(&mut data, DDS_CAPS_OFFSET, caps);
    write_u32(&mut data, DDS_PIXELFORMAT_OFFSET, 32);

    for i in 0..blob_len {
        data[header_len + i] = (i % 251) as u8;
    }
    data
}

/// A legacy DDS using a FourCC pixel format.
pub fn dds_with_fourcc(fourcc: u32, format: PixelFormat, w: u32, h: u32) -> Vec<u8> {
    let mut data = dds_skeleton(w, h, 1, expected_blob_len(format, w, h, 1, 1, 1), false);
    write_u32(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_FOURCC);
    write_u32(&mut data, FOURCC_OFFSET, fourcc);
    data
}

/// A DX10-extended DDS with the given DXGI format code.
pub fn dds_with_dx10(dxgi: u32, format: PixelFormat, w: u32, h: u32) -> Vec<u8> {
    let mut data = dds_skeleton(w, h, 1, expected_blob_len(format, w, h, 1, 1, 1), true);
    write_u32(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_FOURCC);
    write_u32(&mut data, FOURCC_OFFSET, FOURCC_DX10);
    write_u32(&mut data, DX10_FORMAT_OFFSET, dxgi);
    write_u32(&mut data, DX10_RESOURCE_DIMENSION_OFFSET, 3);
    write_u32(&mut data, DX10_ARRAY_SIZE_OFFSET, 1);
    data
}

/// A BC1 2D surface with a mip chain.
pub fn bc1_dds_with_mips(w: u32, h: u32, mips: u32) -> Vec<u8> {
    let mut data = dds_skeleton(
        w,
        h,
        mips,
        expected_blob_len(PixelFormat::BC1_UNORM, w, h, 1, 1, mips),
        false,
    );
    write_u32(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_FOURCC);
    write_u32(&mut data, FOURCC_OFFSET, FOURCC_DXT1);
    data
}

/// A BC1 cubemap (all six faces) with a mip chain.
pub fn bc1_cubemap_dds(size: u32, mips: u32) -> Vec<u8> {
    let blob = expected_blob_len(PixelFormat::BC1_UNORM, size, size, 1, 6, mips);
    let mut data = dds_skeleton(size, size, mips, blob, false);
    write_u32(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_FOURCC);
    write_u32(&mut data, FOURCC_OFFSET, FOURCC_DXT1);
    write_u32(&mut data, DDS_CAPS2_OFFSET, DDSCAPS2_CUBEMAP_ALLFACES);
    data
}

fn masked_dds_with_pixels(
    w: u32,
    h: u32,
    pf_flags: u32,
    bits: u32,
    masks: [u32; 4],
    pixels: &[u8],
) -> Vec<u8> {
    let mut data = dds_skeleton(w, h, 1, pixels.len(), false);
    write_u32(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, pf_flags);
    write_u32(&mut data, DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET, bits);
    write_u32(&mut data, DDS_PIXELFORMAT_RBITMASK_OFFSET, masks[0]);
    write_u32(&mut data, DDS_PIXELFORMAT_GBITMASK_OFFSET, masks[1]);
    write_u32(&mut data, DDS_PIXELFORMAT_BBITMASK_OFFSET, masks[2]);
    write_u32(&mut data, DDS_PIXELFORMAT_ABITMASK_OFFSET, masks[3]);
    data[DDS_HEADER_SIZE..].copy_from_slice(pixels);
    data
}

/// A legacy B8G8R8A8 surface with explicit pixel bytes.
pub fn bgra8888_dds_with_pixels(w: u32, h: u32, pixels: &[u8]) -> Vec<u8> {
    masked_dds_with_pixels(
        w,
        h,
        DDPF_RGB | DDPF_ALPHAPIXELS,
        32,
        [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000],
        pixels,
    )
}

/// A legacy B8G8R8X8 surface with explicit pixel bytes.
pub fn bgrx8888_dds_with_pixels(w: u32, h: u32, pixels: &[u8]) -> Vec<u8> {
    masked_dds_with_pixels(
        w,
        h,
        DDPF_RGB,
        32,
        [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0],
        pixels,
    )
}

/// A DX10 R32G32B32A32_FLOAT surface filled with one pixel value.
pub fn rgba32f_dds(w: u32, h: u32, pixel: [f32; 4]) -> Vec<u8> {
    let mut data = dds_with_dx10(2, PixelFormat::RGBA_32_32_32_32_FLOAT, w, h);
    let start = DDS_HEADER_SIZE + DX10_HEADER_SIZE;
    for chunk in data[start..].chunks_exact_mut(16) {
        for (c, value) in pixel.iter().enumerate() {
            chunk[c * 4..c * 4 + 4].copy_from_slice(&value.to_le_bytes());
        }
    }
    data
}

/// A legacy R8G8B8A8 volume texture.
pub fn volume_rgba8_dds(w: u32, h: u32, d: u32) -> Vec<u8> {
    let blob = expected_blob_len(PixelFormat::RGBA8, w, h, d, 1, 1);
    let mut data = dds_skeleton(w, h, 1, blob, false);
    let flags = DDSD_CAPS | DDSD_WIDTH | DDSD_HEIGHT | DDSD_PIXELFORMAT | DDSD_DEPTH;
    write_u32(&mut data, DDS_FLAGS_OFFSET, flags);
    write_u32(&mut data, DDS_DEPTH_OFFSET, d);
    write_u32(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_RGB | DDPF_ALPHAPIXELS);
    write_u32(&mut data, DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET, 32);
    write_u32(&mut data, DDS_PIXELFORMAT_RBITMASK_OFFSET, 0x0000_00FF);
    write_u32(&mut data, DDS_PIXELFORMAT_GBITMASK_OFFSET, 0x0000_FF00);
    write_u32(&mut data, DDS_PIXELFORMAT_BBITMASK_OFFSET, 0x00FF_0000);
    write_u32(&mut data, DDS_PIXELFORMAT_ABITMASK_OFFSET, 0xFF00_0000);
    write_u32(&mut data, DDS_CAPS2_OFFSET, DDSCAPS2_VOLUME);
    data
}
