//! DDS reading: header parse, pixel format resolution, blob import.

use super::constants::*;
use crate::error::{FormatError, FormatResult};
use endian_writer::{EndianReader, LittleEndianReader};
use texstack::{
    ConstructionOrder, Extent3D, Image, ImageDesc, Layout, PixelFormat, PlaneDesc, Swizzle,
};

/// True when `data` starts with the DDS magic.
pub fn is_dds(data: &[u8]) -> bool {
    if data.len() < DDS_HEADER_SIZE {
        return false;
    }
    // SAFETY: length checked above.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    unsafe { reader.read_u32_at(0) == DDS_MAGIC }
}

/// The legacy DDSPIXELFORMAT fields that matter for format detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ddpf {
    flags: u32,
    fourcc: u32,
    bits: u32,
    r: u32,
    g: u32,
    b: u32,
    a: u32,
}

impl Ddpf {
    const fn fourcc(code: u32) -> Self {
        Self {
            flags: DDPF_FOURCC,
            fourcc: code,
            bits: 0,
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    const fn masked(flags: u32, bits: u32, r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            flags,
            fourcc: 0,
            bits,
            r,
            g,
            b,
            a,
        }
    }
}

/// Legacy (pre-DX10) pixel format table. Matched with only the fields
/// the entry's flag set implies: the FourCC when `DDPF_FOURCC`, bit
/// count and the implied channel masks otherwise.
#[rustfmt::skip]
static LEGACY_FORMATS: &[(PixelFormat, Ddpf)] = &[
    // FourCC block and video formats. DXT2/DXT3 (and DXT4/DXT5) differ
    // only in premultiplied alpha, which the descriptor does not track.
    (PixelFormat::BC1_UNORM,              Ddpf::fourcc(FOURCC_DXT1)),
    (PixelFormat::BC2_UNORM,              Ddpf::fourcc(FOURCC_DXT2)),
    (PixelFormat::BC2_UNORM,              Ddpf::fourcc(FOURCC_DXT3)),
    (PixelFormat::BC3_UNORM,              Ddpf::fourcc(FOURCC_DXT4)),
    (PixelFormat::BC3_UNORM,              Ddpf::fourcc(FOURCC_DXT5)),
    (PixelFormat::BC4_UNORM,              Ddpf::fourcc(FOURCC_ATI1)),
    (PixelFormat::BC4_UNORM,              Ddpf::fourcc(FOURCC_BC4U)),
    (PixelFormat::BC4_SNORM,              Ddpf::fourcc(FOURCC_BC4S)),
    (PixelFormat::BC5_UNORM,              Ddpf::fourcc(FOURCC_ATI2)),
    (PixelFormat::BC5_UNORM,              Ddpf::fourcc(FOURCC_BC5U)),
    (PixelFormat::BC5_SNORM,              Ddpf::fourcc(FOURCC_BC5S)),
    (PixelFormat::RGBG_UNORM,             Ddpf::fourcc(FOURCC_RGBG)),
    (PixelFormat::GRGB_UNORM,             Ddpf::fourcc(FOURCC_GRGB)),
    // Legacy D3DFMT codes smuggled through the FourCC field.
    (PixelFormat::RGBA_16_16_16_16_UNORM, Ddpf::fourcc(D3DFMT_A16B16G16R16)),
    (PixelFormat::RGBA_16_16_16_16_SNORM, Ddpf::fourcc(D3DFMT_Q16W16V16U16)),
    (PixelFormat::R_16_FLOAT,             Ddpf::fourcc(D3DFMT_R16F)),
    (PixelFormat::RG_16_16_FLOAT,         Ddpf::fourcc(D3DFMT_G16R16F)),
    (PixelFormat::RGBA_16_16_16_16_FLOAT, Ddpf::fourcc(D3DFMT_A16B16G16R16F)),
    (PixelFormat::R_32_FLOAT,             Ddpf::fourcc(D3DFMT_R32F)),
    (PixelFormat::RG_32_32_FLOAT,         Ddpf::fourcc(D3DFMT_G32R32F)),
    (PixelFormat::RGBA_32_32_32_32_FLOAT, Ddpf::fourcc(D3DFMT_A32B32G32R32F)),
    // Masked uncompressed formats. Masks are little-endian: byte 0 is
    // the lowest mask byte.
    (PixelFormat::RGBA_8_8_8_8_UNORM,     Ddpf::masked(DDPF_RGB | DDPF_ALPHAPIXELS, 32, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000)),
    (PixelFormat::BGRA_8_8_8_8_UNORM,     Ddpf::masked(DDPF_RGB | DDPF_ALPHAPIXELS, 32, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000)),
    (PixelFormat::RGBX_8_8_8_8_UNORM,     Ddpf::masked(DDPF_RGB, 32, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0)),
    (PixelFormat::BGRX_8_8_8_8_UNORM,     Ddpf::masked(DDPF_RGB, 32, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0)),
    (PixelFormat::RG_16_16_UNORM,         Ddpf::masked(DDPF_RGB, 32, 0x0000_FFFF, 0xFFFF_0000, 0, 0)),
    (PixelFormat::RGBA_10_10_10_2_UNORM,  Ddpf::masked(DDPF_RGB | DDPF_ALPHAPIXELS, 32, 0x0000_03FF, 0x000F_FC00, 0x3FF0_0000, 0xC000_0000)),
    (PixelFormat::BGR_8_8_8_UNORM,        Ddpf::masked(DDPF_RGB, 24, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0)),
    (PixelFormat::RGB_8_8_8_UNORM,        Ddpf::masked(DDPF_RGB, 24, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0)),
    (PixelFormat::BGR_5_6_5_UNORM,        Ddpf::masked(DDPF_RGB, 16, 0xF800, 0x07E0, 0x001F, 0)),
    (PixelFormat::BGRA_5_5_5_1_UNORM,     Ddpf::masked(DDPF_RGB | DDPF_ALPHAPIXELS, 16, 0x7C00, 0x03E0, 0x001F, 0x8000)),
    (PixelFormat::BGRA_4_4_4_4_UNORM,     Ddpf::masked(DDPF_RGB | DDPF_ALPHAPIXELS, 16, 0x0F00, 0x00F0, 0x000F, 0xF000)),
    (PixelFormat::L_8_UNORM,              Ddpf::masked(DDPF_LUMINANCE, 8, 0xFF, 0, 0, 0)),
    (PixelFormat::L_16_UNORM,             Ddpf::masked(DDPF_LUMINANCE, 16, 0xFFFF, 0, 0, 0)),
    (PixelFormat::LA_8_8_UNORM,           Ddpf::masked(DDPF_LUMINANCE | DDPF_ALPHAPIXELS, 16, 0xFF, 0, 0, 0xFF00)),
    (PixelFormat::A_8_UNORM,              Ddpf::masked(DDPF_ALPHA, 8, 0, 0, 0, 0xFF)),
];

fn detect_legacy_format(ddpf: &Ddpf) -> PixelFormat {
    const FLAG_SET: u32 =
        DDPF_ALPHAPIXELS | DDPF_ALPHA | DDPF_FOURCC | DDPF_RGB | DDPF_YUV | DDPF_LUMINANCE;
    let file_flags = ddpf.flags & FLAG_SET;
    for (format, entry) in LEGACY_FORMATS {
        if entry.flags & DDPF_FOURCC != 0 {
            if file_flags & DDPF_FOURCC != 0 && entry.fourcc == ddpf.fourcc {
                return *format;
            }
            continue;
        }
        if entry.flags != file_flags || entry.bits != ddpf.bits {
            continue;
        }
        let mut matched = true;
        if entry.flags & (DDPF_RGB | DDPF_YUV) != 0 {
            matched &= entry.r == ddpf.r && entry.g == ddpf.g && entry.b == ddpf.b;
        }
        if entry.flags & DDPF_LUMINANCE != 0 {
            matched &= entry.r == ddpf.r;
        }
        if entry.flags & (DDPF_ALPHAPIXELS | DDPF_ALPHA) != 0 {
            matched &= entry.a == ddpf.a;
        }
        if matched {
            return *format;
        }
    }
    PixelFormat::UNKNOWN
}

/// Rewrites a byte-order swizzle `(Z, Y, X, ·)` on an 8:8:8:8 layout to
/// `(X, Y, Z, ·)`; the pixel blob then needs a matching byte swap.
fn rewrite_bgrx(format: PixelFormat) -> Option<PixelFormat> {
    if format.layout() != Layout::L8_8_8_8
        || format.swizzle(0) != Swizzle::Z
        || format.swizzle(1) != Swizzle::Y
        || format.swizzle(2) != Swizzle::X
    {
        return None;
    }
    Some(PixelFormat::make(
        format.layout(),
        format.sign(0),
        format.sign(1),
        format.sign(3),
        Swizzle::X,
        Swizzle::Y,
        Swizzle::Z,
        format.swizzle(3),
    ))
}

/// Decodes a DDS file into an image.
///
/// Legacy `DDPIXELFORMAT` masks and DX10 DXGI codes are both accepted.
/// BGRA/BGRX surfaces come back with RGB channel order, the blob swapped
/// to match.
pub fn decode(data: &[u8]) -> FormatResult<Image> {
    if !is_dds(data) {
        return Err(FormatError::UnsupportedFileFormat);
    }
    // SAFETY: is_dds checked data.len() >= DDS_HEADER_SIZE; DX10 fields
    // are only read after the extended length check below.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };

    let flags = unsafe { reader.read_u32_at(DDS_FLAGS_OFFSET as isize) };
    if flags & (DDSD_WIDTH | DDSD_HEIGHT) != (DDSD_WIDTH | DDSD_HEIGHT) {
        return Err(FormatError::CorruptFile("DDS dimension flags missing"));
    }
    let height = unsafe { reader.read_u32_at(DDS_HEIGHT_OFFSET as isize) };
    let width = unsafe { reader.read_u32_at(DDS_WIDTH_OFFSET as isize) };

    let ddpf = Ddpf {
        flags: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_FLAGS_OFFSET as isize) },
        fourcc: unsafe { reader.read_u32_at(FOURCC_OFFSET as isize) },
        bits: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET as isize) },
        r: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_RBITMASK_OFFSET as isize) },
        g: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_GBITMASK_OFFSET as isize) },
        b: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_BBITMASK_OFFSET as isize) },
        a: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_ABITMASK_OFFSET as isize) },
    };
    if ddpf.flags & DDPF_PALETTEINDEXED8 != 0 {
        return Err(FormatError::CorruptFile("palettized DDS is not supported"));
    }

    let (format, data_offset) = if ddpf.flags & DDPF_FOURCC != 0 && ddpf.fourcc == FOURCC_DX10 {
        if data.len() < DDS_HEADER_SIZE + DX10_HEADER_SIZE {
            return Err(FormatError::CorruptFile("truncated DX10 header"));
        }
        let dxgi = unsafe { reader.read_u32_at(DX10_FORMAT_OFFSET as isize) };
        let format = PixelFormat::from_dxgi(dxgi);
        if format.empty() {
            return Err(FormatError::CorruptFile("unknown DXGI format"));
        }
        (format, DDS_HEADER_SIZE + DX10_HEADER_SIZE)
    } else {
        let format = detect_legacy_format(&ddpf);
        if format.empty() {
            return Err(FormatError::CorruptFile("unrecognized DDS pixel format"));
        }
        (format, DDS_HEADER_SIZE)
    };

    let (format, bgr2rgb) = match rewrite_bgrx(format) {
        Some(rewritten) => (rewritten, true),
        None => (format, false),
    };

    let caps = unsafe { reader.read_u32_at(DDS_CAPS_OFFSET as isize) };
    let caps2 = unsafe { reader.read_u32_at(DDS_CAPS2_OFFSET as isize) };

    let faces = if caps2 & DDSCAPS2_CUBEMAP_ALLFACES == DDSCAPS2_CUBEMAP_ALLFACES {
        6
    } else if caps2 & DDSCAPS2_CUBEMAP != 0 {
        return Err(FormatError::CorruptFile("partial cubemap"));
    } else {
        1
    };

    let depth = if flags & DDSD_DEPTH != 0 {
        unsafe { reader.read_u32_at(DDS_DEPTH_OFFSET as isize) }.max(1)
    } else {
        1
    };

    let mip_flags = DDSCAPS_MIPMAP | DDSCAPS_COMPLEX;
    let levels = if flags & DDSD_MIPMAPCOUNT != 0 && caps & mip_flags == mip_flags {
        unsafe { reader.read_u32_at(DDS_MIPMAP_COUNT_OFFSET as isize) }.max(1)
    } else {
        1
    };

    let base = PlaneDesc::new(format, Extent3D::new(width, height, depth));
    let desc = ImageDesc::make(base, 1, faces, levels, ConstructionOrder::FaceMajor, 4);
    if desc.empty() {
        return Err(FormatError::CorruptFile("DDS geometry is not describable"));
    }

    let blob = &data[data_offset..];
    if (blob.len() as u64) < desc.size {
        return Err(FormatError::CorruptFile("truncated DDS pixel blob"));
    }
    let size = desc.size as usize;
    let mut image = Image::new(desc)?;
    image.data_mut().copy_from_slice(&blob[..size]);

    if bgr2rgb {
        for pixel in image.data_mut().chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use rstest::rstest;
    use texstack::PlaneCoord;

    #[rstest]
    #[case(FOURCC_DXT1, PixelFormat::BC1_UNORM)]
    #[case(FOURCC_DXT2, PixelFormat::BC2_UNORM)]
    #[case(FOURCC_DXT3, PixelFormat::BC2_UNORM)]
    #[case(FOURCC_DXT4, PixelFormat::BC3_UNORM)]
    #[case(FOURCC_DXT5, PixelFormat::BC3_UNORM)]
    #[case(FOURCC_ATI1, PixelFormat::BC4_UNORM)]
    #[case(FOURCC_ATI2, PixelFormat::BC5_UNORM)]
    #[case(D3DFMT_A32B32G32R32F, PixelFormat::RGBA_32_32_32_32_FLOAT)]
    #[case(D3DFMT_R16F, PixelFormat::R_16_FLOAT)]
    fn legacy_fourcc_formats(#[case] fourcc: u32, #[case] expected: PixelFormat) {
        let data = dds_with_fourcc(fourcc, expected, 8, 8);
        let image = decode(&data).unwrap();
        let plane = image.plane(PlaneCoord::default());
        assert_eq!(plane.format, expected);
        assert_eq!(plane.extent, Extent3D::new(8, 8, 1));
    }

    #[rstest]
    #[case(71, PixelFormat::BC1_UNORM)]
    #[case(34, PixelFormat::RG_16_16_FLOAT)]
    #[case(10, PixelFormat::RGBA_16_16_16_16_FLOAT)]
    #[case(2, PixelFormat::RGBA_32_32_32_32_FLOAT)]
    fn dx10_formats(#[case] dxgi: u32, #[case] expected: PixelFormat) {
        let data = dds_with_dx10(dxgi, expected, 8, 8);
        let image = decode(&data).unwrap();
        assert_eq!(image.plane(PlaneCoord::default()).format, expected);
    }

    #[test]
    fn dx10_codes_past_the_table_end_are_rejected() {
        // The DXGI table stops at 88 (B8G8R8X8_UNORM); BC7's code 98 is
        // outside it and must not decode.
        let data = dds_with_dx10(98, PixelFormat::BC7_UNORM, 4, 4);
        assert!(matches!(
            decode(&data),
            Err(FormatError::CorruptFile("unknown DXGI format"))
        ));
    }

    #[test]
    fn bc1_cubemap_with_mips() {
        let data = bc1_cubemap_dds(256, 9);
        let image = decode(&data).unwrap();
        let desc = image.desc();
        assert_eq!(desc.faces, 6);
        assert_eq!(desc.levels, 9);
        assert_eq!(desc.size, 262224);
        assert_eq!(image.plane(PlaneCoord::new(0, 0, 1)).slice, 8192);
    }

    #[test]
    fn mip_count_needs_all_three_flags() {
        // DDSD_MIPMAPCOUNT set but DDSCAPS_COMPLEX missing: single level.
        let mut data = bc1_dds_with_mips(64, 64, 7);
        let caps = DDSCAPS_TEXTURE | DDSCAPS_MIPMAP;
        write_u32(&mut data, DDS_CAPS_OFFSET, caps);
        let image = decode(&data).unwrap();
        assert_eq!(image.desc().levels, 1);
    }

    #[test]
    fn zero_mip_count_normalizes_to_one() {
        let mut data = bc1_dds_with_mips(64, 64, 1);
        write_u32(
            &mut data,
            DDS_FLAGS_OFFSET,
            DDSD_CAPS | DDSD_WIDTH | DDSD_HEIGHT | DDSD_PIXELFORMAT | DDSD_MIPMAPCOUNT,
        );
        write_u32(&mut data, DDS_CAPS_OFFSET, DDSCAPS_TEXTURE | DDSCAPS_MIPMAP | DDSCAPS_COMPLEX);
        write_u32(&mut data, DDS_MIPMAP_COUNT_OFFSET, 0);
        let image = decode(&data).unwrap();
        assert_eq!(image.desc().levels, 1);
    }

    #[test]
    fn bgra_is_rewritten_to_rgba() {
        // One BGRA pixel: B=10 G=20 R=30 A=40.
        let data = bgra8888_dds_with_pixels(1, 1, &[10, 20, 30, 40]);
        let image = decode(&data).unwrap();
        let plane = image.plane(PlaneCoord::default());
        assert_eq!(plane.format, PixelFormat::RGBA8);
        assert_eq!(image.data(), &[30, 20, 10, 40]);
    }

    #[test]
    fn bgrx_is_rewritten_to_rgbx() {
        let data = bgrx8888_dds_with_pixels(1, 1, &[10, 20, 30, 0]);
        let image = decode(&data).unwrap();
        let plane = image.plane(PlaneCoord::default());
        assert_eq!(plane.format, PixelFormat::RGBX_8_8_8_8_UNORM);
        assert_eq!(image.data(), &[30, 20, 10, 0]);
    }

    #[test]
    fn rgba32f_surface_converts_to_rgba8() {
        // 64x64 DX10 float surface, all channels 166/255.
        let gray = 166.0f32 / 255.0;
        let data = rgba32f_dds(64, 64, [gray, gray, gray, 1.0]);
        let image = decode(&data).unwrap();
        let plane = image.plane(PlaneCoord::default());
        assert_eq!(plane.format, PixelFormat::RGBA_32_32_32_32_FLOAT);
        assert_eq!(plane.extent, Extent3D::new(64, 64, 1));

        let pixels = plane.to_rgba8(image.data()).unwrap();
        assert_eq!(pixels[0], texstack::Rgba8::new(166, 166, 166, 255));
    }

    #[test]
    fn volume_texture_reads_depth() {
        let data = volume_rgba8_dds(4, 4, 4);
        let image = decode(&data).unwrap();
        assert_eq!(image.desc().faces, 1);
        assert_eq!(
            image.plane(PlaneCoord::default()).extent,
            Extent3D::new(4, 4, 4)
        );
    }

    #[test]
    fn rejects_bad_magic_and_short_input() {
        assert!(matches!(
            decode(&[0u8; 16]),
            Err(FormatError::UnsupportedFileFormat)
        ));
        let mut data = bc1_dds_with_mips(4, 4, 1);
        data[0] = b'X';
        assert!(matches!(
            decode(&data),
            Err(FormatError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn rejects_missing_dimension_flags() {
        let mut data = bc1_dds_with_mips(4, 4, 1);
        write_u32(&mut data, DDS_FLAGS_OFFSET, DDSD_CAPS | DDSD_PIXELFORMAT);
        assert!(matches!(decode(&data), Err(FormatError::CorruptFile(_))));
    }

    #[test]
    fn rejects_palettized_surfaces() {
        let mut data = bc1_dds_with_mips(4, 4, 1);
        write_u32(
            &mut data,
            DDS_PIXELFORMAT_FLAGS_OFFSET,
            DDPF_PALETTEINDEXED8,
        );
        assert!(matches!(decode(&data), Err(FormatError::CorruptFile(_))));
    }

    #[test]
    fn rejects_unknown_formats() {
        let mut data = bc1_dds_with_mips(4, 4, 1);
        write_u32(&mut data, FOURCC_OFFSET, u32::from_le_bytes(*b"UNKN"));
        assert!(matches!(
            decode(&data),
            Err(FormatError::CorruptFile("unrecognized DDS pixel format"))
        ));

        let mut data = dds_with_dx10(71, PixelFormat::BC1_UNORM, 4, 4);
        write_u32(&mut data, DX10_FORMAT_OFFSET, 9999);
        assert!(matches!(
            decode(&data),
            Err(FormatError::CorruptFile("unknown DXGI format"))
        ));
    }

    #[test]
    fn rejects_partial_cubemaps() {
        let mut data = bc1_dds_with_mips(4, 4, 1);
        write_u32(&mut data, DDS_CAPS2_OFFSET, DDSCAPS2_CUBEMAP | 0x400);
        assert!(matches!(
            decode(&data),
            Err(FormatError::CorruptFile("partial cubemap"))
        ));
    }

    #[test]
    fn rejects_truncated_pixel_blob() {
        let data = bc1_dds_with_mips(16, 16, 1);
        let cut = data.len() - 8;
        assert!(matches!(
            decode(&data[..cut]),
            Err(FormatError::CorruptFile("truncated DDS pixel blob"))
        ));
    }
}
