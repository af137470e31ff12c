//! Mapping between [`PixelFormat`] and DXGI format codes.
//!
//! Covers `DXGI_FORMAT` codes 0..=88 (through `B8G8R8X8_UNORM`).
//! Uncompressed TYPELESS codes carry no interpretation and map to
//! UNKNOWN; block-compressed TYPELESS codes map to their UNORM siblings.

use super::PixelFormat;

pub const DXGI_FORMAT_COUNT: u32 = 89;

#[rustfmt::skip]
static DXGI_TABLE: [PixelFormat; DXGI_FORMAT_COUNT as usize] = [
    PixelFormat::UNKNOWN,                  //  0 UNKNOWN
    PixelFormat::UNKNOWN,                  //  1 R32G32B32A32_TYPELESS
    PixelFormat::RGBA_32_32_32_32_FLOAT,   //  2 R32G32B32A32_FLOAT
    PixelFormat::RGBA_32_32_32_32_UINT,    //  3 R32G32B32A32_UINT
    PixelFormat::RGBA_32_32_32_32_SINT,    //  4 R32G32B32A32_SINT
    PixelFormat::UNKNOWN,                  //  5 R32G32B32_TYPELESS
    PixelFormat::RGB_32_32_32_FLOAT,       //  6 R32G32B32_FLOAT
    PixelFormat::RGB_32_32_32_UINT,        //  7 R32G32B32_UINT
    PixelFormat::RGB_32_32_32_SINT,        //  8 R32G32B32_SINT
    PixelFormat::UNKNOWN,                  //  9 R16G16B16A16_TYPELESS
    PixelFormat::RGBA_16_16_16_16_FLOAT,   // 10 R16G16B16A16_FLOAT
    PixelFormat::RGBA_16_16_16_16_UNORM,   // 11 R16G16B16A16_UNORM
    PixelFormat::RGBA_16_16_16_16_UINT,    // 12 R16G16B16A16_UINT
    PixelFormat::RGBA_16_16_16_16_SNORM,   // 13 R16G16B16A16_SNORM
    PixelFormat::RGBA_16_16_16_16_SINT,    // 14 R16G16B16A16_SINT
    PixelFormat::UNKNOWN,                  // 15 R32G32_TYPELESS
    PixelFormat::RG_32_32_FLOAT,           // 16 R32G32_FLOAT
    PixelFormat::RG_32_32_UINT,            // 17 R32G32_UINT
    PixelFormat::RG_32_32_SINT,            // 18 R32G32_SINT
    PixelFormat::UNKNOWN,                  // 19 R32G8X24_TYPELESS
    PixelFormat::RGX_32_FLOAT_8_UINT_24,   // 20 D32_FLOAT_S8X24_UINT
    PixelFormat::RXX_32_8_24_FLOAT,        // 21 R32_FLOAT_X8X24_TYPELESS
    PixelFormat::XGX_32_8_24_UINT,         // 22 X32_TYPELESS_G8X24_UINT
    PixelFormat::UNKNOWN,                  // 23 R10G10B10A2_TYPELESS
    PixelFormat::RGBA_10_10_10_2_UNORM,    // 24 R10G10B10A2_UNORM
    PixelFormat::RGBA_10_10_10_2_UINT,     // 25 R10G10B10A2_UINT
    PixelFormat::RGB_11_11_10_FLOAT,       // 26 R11G11B10_FLOAT
    PixelFormat::UNKNOWN,                  // 27 R8G8B8A8_TYPELESS
    PixelFormat::RGBA_8_8_8_8_UNORM,       // 28 R8G8B8A8_UNORM
    PixelFormat::RGBA_8_8_8_8_SRGB,        // 29 R8G8B8A8_UNORM_SRGB
    PixelFormat::RGBA_8_8_8_8_UINT,        // 30 R8G8B8A8_UINT
    PixelFormat::RGBA_8_8_8_8_SNORM,       // 31 R8G8B8A8_SNORM
    PixelFormat::RGBA_8_8_8_8_SINT,        // 32 R8G8B8A8_SINT
    PixelFormat::UNKNOWN,                  // 33 R16G16_TYPELESS
    PixelFormat::RG_16_16_FLOAT,           // 34 R16G16_FLOAT
    PixelFormat::RG_16_16_UNORM,           // 35 R16G16_UNORM
    PixelFormat::RG_16_16_UINT,            // 36 R16G16_UINT
    PixelFormat::RG_16_16_SNORM,           // 37 R16G16_SNORM
    PixelFormat::RG_16_16_SINT,            // 38 R16G16_SINT
    PixelFormat::UNKNOWN,                  // 39 R32_TYPELESS
    PixelFormat::R_32_FLOAT,               // 40 D32_FLOAT
    PixelFormat::R_32_FLOAT,               // 41 R32_FLOAT
    PixelFormat::R_32_UINT,                // 42 R32_UINT
    PixelFormat::R_32_SINT,                // 43 R32_SINT
    PixelFormat::UNKNOWN,                  // 44 R24G8_TYPELESS
    PixelFormat::RG_24_UNORM_8_UINT,       // 45 D24_UNORM_S8_UINT
    PixelFormat::RX_24_8_UNORM,            // 46 R24_UNORM_X8_TYPELESS
    PixelFormat::XG_24_8_UINT,             // 47 X24_TYPELESS_G8_UINT
    PixelFormat::UNKNOWN,                  // 48 R8G8_TYPELESS
    PixelFormat::RG_8_8_UNORM,             // 49 R8G8_UNORM
    PixelFormat::RG_8_8_UINT,              // 50 R8G8_UINT
    PixelFormat::RG_8_8_SNORM,             // 51 R8G8_SNORM
    PixelFormat::RG_8_8_SINT,              // 52 R8G8_SINT
    PixelFormat::UNKNOWN,                  // 53 R16_TYPELESS
    PixelFormat::R_16_FLOAT,               // 54 R16_FLOAT
    PixelFormat::R_16_UNORM,               // 55 D16_UNORM
    PixelFormat::R_16_UNORM,               // 56 R16_UNORM
    PixelFormat::R_16_UINT,                // 57 R16_UINT
    PixelFormat::R_16_SNORM,               // 58 R16_SNORM
    PixelFormat::R_16_SINT,                // 59 R16_SINT
    PixelFormat::UNKNOWN,                  // 60 R8_TYPELESS
    PixelFormat::R_8_UNORM,                // 61 R8_UNORM
    PixelFormat::R_8_UINT,                 // 62 R8_UINT
    PixelFormat::R_8_SNORM,                // 63 R8_SNORM
    PixelFormat::R_8_SINT,                 // 64 R8_SINT
    PixelFormat::A_8_UNORM,                // 65 A8_UNORM
    PixelFormat::R_1_UNORM,                // 66 R1_UNORM
    PixelFormat::UNKNOWN,                  // 67 R9G9B9E5_SHAREDEXP
    PixelFormat::RGBG_UNORM,               // 68 R8G8_B8G8_UNORM
    PixelFormat::GRGB_UNORM,               // 69 G8R8_G8B8_UNORM
    PixelFormat::BC1_UNORM,                // 70 BC1_TYPELESS
    PixelFormat::BC1_UNORM,                // 71 BC1_UNORM
    PixelFormat::BC1_SRGB,                 // 72 BC1_UNORM_SRGB
    PixelFormat::BC2_UNORM,                // 73 BC2_TYPELESS
    PixelFormat::BC2_UNORM,                // 74 BC2_UNORM
    PixelFormat::BC2_SRGB,                 // 75 BC2_UNORM_SRGB
    PixelFormat::BC3_UNORM,                // 76 BC3_TYPELESS
    PixelFormat::BC3_UNORM,                // 77 BC3_UNORM
    PixelFormat::BC3_SRGB,                 // 78 BC3_UNORM_SRGB
    PixelFormat::BC4_UNORM,                // 79 BC4_TYPELESS
    PixelFormat::BC4_UNORM,                // 80 BC4_UNORM
    PixelFormat::BC4_SNORM,                // 81 BC4_SNORM
    PixelFormat::BC5_UNORM,                // 82 BC5_TYPELESS
    PixelFormat::BC5_UNORM,                // 83 BC5_UNORM
    PixelFormat::BC5_SNORM,                // 84 BC5_SNORM
    PixelFormat::BGR_5_6_5_UNORM,          // 85 B5G6R5_UNORM
    PixelFormat::BGRA_5_5_5_1_UNORM,       // 86 B5G5R5A1_UNORM
    PixelFormat::BGRA_8_8_8_8_UNORM,       // 87 B8G8R8A8_UNORM
    PixelFormat::BGRX_8_8_8_8_UNORM,       // 88 B8G8R8X8_UNORM
];

impl PixelFormat {
    /// Looks up the pixel format for a DXGI format code.
    ///
    /// Unknown or out-of-range codes yield [`PixelFormat::UNKNOWN`].
    pub fn from_dxgi(code: u32) -> PixelFormat {
        DXGI_TABLE
            .get(code as usize)
            .copied()
            .unwrap_or(PixelFormat::UNKNOWN)
    }

    /// Finds the first DXGI code mapping to this format, else 0.
    pub fn to_dxgi(self) -> u32 {
        if self.empty() {
            return 0;
        }
        DXGI_TABLE
            .iter()
            .position(|entry| *entry == self)
            .unwrap_or(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, PixelFormat::RGBA_32_32_32_32_FLOAT)]
    #[case(10, PixelFormat::RGBA_16_16_16_16_FLOAT)]
    #[case(28, PixelFormat::RGBA8)]
    #[case(29, PixelFormat::RGBA_8_8_8_8_SRGB)]
    #[case(71, PixelFormat::BC1_UNORM)]
    #[case(87, PixelFormat::BGRA8)]
    #[case(88, PixelFormat::BGRX_8_8_8_8_UNORM)]
    fn from_dxgi_known_codes(#[case] code: u32, #[case] expected: PixelFormat) {
        assert_eq!(PixelFormat::from_dxgi(code), expected);
    }

    #[test]
    fn from_dxgi_unknown_codes() {
        assert_eq!(PixelFormat::from_dxgi(0), PixelFormat::UNKNOWN);
        assert_eq!(PixelFormat::from_dxgi(67), PixelFormat::UNKNOWN);
        assert_eq!(PixelFormat::from_dxgi(1000), PixelFormat::UNKNOWN);
    }

    #[test]
    fn to_dxgi_returns_first_match() {
        assert_eq!(PixelFormat::RGBA8.to_dxgi(), 28);
        // BC1_UNORM first appears at the TYPELESS slot.
        assert_eq!(PixelFormat::BC1_UNORM.to_dxgi(), 70);
        // R_32_FLOAT first appears as D32_FLOAT.
        assert_eq!(PixelFormat::R_32_FLOAT.to_dxgi(), 40);
        assert_eq!(PixelFormat::ASTC_4X4_UNORM.to_dxgi(), 0);
        assert_eq!(PixelFormat::UNKNOWN.to_dxgi(), 0);
    }

    #[test]
    fn round_trip_through_dxgi_where_defined() {
        for code in 0..DXGI_FORMAT_COUNT {
            let format = PixelFormat::from_dxgi(code);
            if format.empty() {
                continue;
            }
            let back = format.to_dxgi();
            assert_eq!(PixelFormat::from_dxgi(back), format, "code {code}");
        }
    }
}
