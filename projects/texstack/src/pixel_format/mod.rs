//! The 32-bit packed pixel-format descriptor.
//!
//! A [`PixelFormat`] names a [`Layout`] (how many channels, how wide, how
//! pixels group into blocks), a numeric [`Sign`] per channel group, and a
//! [`Swizzle`] per output channel. The whole descriptor fits in one `u32`
//! so containers can store it verbatim.
//!
//! Bit layout, least significant first:
//!
//! | field | bits |
//! |---|---|
//! | layout | 7 |
//! | reserved (must be zero) | 1 |
//! | sign0 | 4 |
//! | sign12 | 4 |
//! | sign3 | 4 |
//! | swizzle0..swizzle3 | 3 each |

mod dxgi;

use crate::convert::{channel_from_float, channel_to_float};
use crate::error::ConvertError;
use crate::one_pixel::OnePixel;
use crate::pixel::Float4;
use bitfield::bitfield;
use core::fmt;
use core::str::FromStr;
use thiserror::Error;

/// Pixel layout: channel count, per-channel bit windows, block geometry.
///
/// Channel order always starts from the least significant bit; for
/// `L5_6_5` the low 5 bits are channel 0. Block-compressed layouts have
/// no channel windows, only block geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Layout {
    Unknown = 0,
    L1,
    L2_2_2_2,
    L3_3_2,
    L4_4,
    L4_4_4_4,
    L5_5_5_1,
    L5_6_5,
    L8,
    L8_8,
    L8_8_8,
    L8_8_8_8,
    L10_11_11,
    L11_11_10,
    L10_10_10_2,
    L16,
    L16_16,
    L16_16_16,
    L16_16_16_16,
    L32,
    L32_32,
    L32_32_32,
    L32_32_32_32,
    L24,
    L8_24,
    L24_8,
    L4_4_24,
    L32_8_24,
    Grgb,
    Rgbg,
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6h,
    Bc7,
    Etc2,
    Etc2Eac,
    Astc4x4,
    Astc5x4,
    Astc5x5,
    Astc6x5,
    Astc6x6,
    Astc8x5,
    Astc8x6,
    Astc8x8,
    Astc10x5,
    Astc10x6,
    Astc10x8,
    Astc10x10,
    Astc12x10,
    Astc12x12,
}

impl Layout {
    pub const COUNT: usize = 53;

    /// Every layout, indexed by its encoded value.
    pub const ALL: [Layout; Self::COUNT] = [
        Layout::Unknown,
        Layout::L1,
        Layout::L2_2_2_2,
        Layout::L3_3_2,
        Layout::L4_4,
        Layout::L4_4_4_4,
        Layout::L5_5_5_1,
        Layout::L5_6_5,
        Layout::L8,
        Layout::L8_8,
        Layout::L8_8_8,
        Layout::L8_8_8_8,
        Layout::L10_11_11,
        Layout::L11_11_10,
        Layout::L10_10_10_2,
        Layout::L16,
        Layout::L16_16,
        Layout::L16_16_16,
        Layout::L16_16_16_16,
        Layout::L32,
        Layout::L32_32,
        Layout::L32_32_32,
        Layout::L32_32_32_32,
        Layout::L24,
        Layout::L8_24,
        Layout::L24_8,
        Layout::L4_4_24,
        Layout::L32_8_24,
        Layout::Grgb,
        Layout::Rgbg,
        Layout::Bc1,
        Layout::Bc2,
        Layout::Bc3,
        Layout::Bc4,
        Layout::Bc5,
        Layout::Bc6h,
        Layout::Bc7,
        Layout::Etc2,
        Layout::Etc2Eac,
        Layout::Astc4x4,
        Layout::Astc5x4,
        Layout::Astc5x5,
        Layout::Astc6x5,
        Layout::Astc6x6,
        Layout::Astc8x5,
        Layout::Astc8x6,
        Layout::Astc8x8,
        Layout::Astc10x5,
        Layout::Astc10x6,
        Layout::Astc10x8,
        Layout::Astc10x10,
        Layout::Astc12x10,
        Layout::Astc12x12,
    ];

    pub fn from_bits(bits: u32) -> Option<Layout> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Descriptor of this layout's geometry and channel windows.
    pub const fn desc(self) -> &'static LayoutDesc {
        &LAYOUTS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        LAYOUT_NAMES[self as usize]
    }

    fn from_name(name: &str) -> Option<Layout> {
        Self::ALL.iter().find(|l| l.name() == name).copied()
    }
}

const LAYOUT_NAMES: [&str; Layout::COUNT] = [
    "UNKNOWN",
    "1",
    "2_2_2_2",
    "3_3_2",
    "4_4",
    "4_4_4_4",
    "5_5_5_1",
    "5_6_5",
    "8",
    "8_8",
    "8_8_8",
    "8_8_8_8",
    "10_11_11",
    "11_11_10",
    "10_10_10_2",
    "16",
    "16_16",
    "16_16_16",
    "16_16_16_16",
    "32",
    "32_32",
    "32_32_32",
    "32_32_32_32",
    "24",
    "8_24",
    "24_8",
    "4_4_24",
    "32_8_24",
    "GRGB",
    "RGBG",
    "BC1",
    "BC2",
    "BC3",
    "BC4",
    "BC5",
    "BC6H",
    "BC7",
    "ETC2",
    "ETC2_EAC",
    "ASTC_4x4",
    "ASTC_5x4",
    "ASTC_5x5",
    "ASTC_6x5",
    "ASTC_6x6",
    "ASTC_8x5",
    "ASTC_8x6",
    "ASTC_8x8",
    "ASTC_10x5",
    "ASTC_10x6",
    "ASTC_10x8",
    "ASTC_10x10",
    "ASTC_12x10",
    "ASTC_12x12",
];

/// One channel's bit window inside an uncompressed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelDesc {
    /// Right-shift from bit 0 of the pixel to the channel.
    pub shift: u8,
    /// Channel width in bits; 0 marks an absent channel.
    pub bits: u8,
}

/// Geometry of one pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDesc {
    /// Width of one pixel block. 1 means the format is not packed/compressed.
    pub block_width: u8,
    /// Height of one pixel block.
    pub block_height: u8,
    /// Bytes of one pixel block.
    pub block_bytes: u8,
    /// Number of channels.
    pub num_channels: u8,
    /// Channel bit windows; zero-width beyond `num_channels` and for
    /// block-compressed layouts.
    pub channels: [ChannelDesc; 4],
}

const fn ld(bw: u8, bh: u8, bb: u8, nc: u8, c: [(u8, u8); 4]) -> LayoutDesc {
    LayoutDesc {
        block_width: bw,
        block_height: bh,
        block_bytes: bb,
        num_channels: nc,
        channels: [
            ChannelDesc { shift: c[0].0, bits: c[0].1 },
            ChannelDesc { shift: c[1].0, bits: c[1].1 },
            ChannelDesc { shift: c[2].0, bits: c[2].1 },
            ChannelDesc { shift: c[3].0, bits: c[3].1 },
        ],
    }
}

/// Layout descriptors, indexed by the [`Layout`] encoding.
#[rustfmt::skip]
pub static LAYOUTS: [LayoutDesc; Layout::COUNT] = [
    //  BW  BH  BB  CH    CH0       CH1       CH2       CH3
    ld( 0,  0,  0, 0, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Unknown
    ld( 8,  1,  1, 1, [( 0,  1), ( 0,  0), ( 0,  0), ( 0,  0)]), // L1
    ld( 1,  1,  1, 4, [( 0,  2), ( 2,  2), ( 4,  2), ( 6,  2)]), // L2_2_2_2
    ld( 1,  1,  1, 3, [( 0,  3), ( 3,  3), ( 6,  2), ( 0,  0)]), // L3_3_2
    ld( 1,  1,  1, 2, [( 0,  4), ( 4,  4), ( 0,  0), ( 0,  0)]), // L4_4
    ld( 1,  1,  2, 4, [( 0,  4), ( 4,  4), ( 8,  4), (12,  4)]), // L4_4_4_4
    ld( 1,  1,  2, 4, [( 0,  5), ( 5,  5), (10,  5), (15,  1)]), // L5_5_5_1
    ld( 1,  1,  2, 3, [( 0,  5), ( 5,  6), (11,  5), ( 0,  0)]), // L5_6_5
    ld( 1,  1,  1, 1, [( 0,  8), ( 0,  0), ( 0,  0), ( 0,  0)]), // L8
    ld( 1,  1,  2, 2, [( 0,  8), ( 8,  8), ( 0,  0), ( 0,  0)]), // L8_8
    ld( 1,  1,  3, 3, [( 0,  8), ( 8,  8), (16,  8), ( 0,  0)]), // L8_8_8
    ld( 1,  1,  4, 4, [( 0,  8), ( 8,  8), (16,  8), (24,  8)]), // L8_8_8_8
    ld( 1,  1,  4, 3, [( 0, 10), (10, 11), (21, 11), ( 0,  0)]), // L10_11_11
    ld( 1,  1,  4, 3, [( 0, 11), (11, 11), (22, 10), ( 0,  0)]), // L11_11_10
    ld( 1,  1,  4, 4, [( 0, 10), (10, 10), (20, 10), (30,  2)]), // L10_10_10_2
    ld( 1,  1,  2, 1, [( 0, 16), ( 0,  0), ( 0,  0), ( 0,  0)]), // L16
    ld( 1,  1,  4, 2, [( 0, 16), (16, 16), ( 0,  0), ( 0,  0)]), // L16_16
    ld( 1,  1,  6, 3, [( 0, 16), (16, 16), (32, 16), ( 0,  0)]), // L16_16_16
    ld( 1,  1,  8, 4, [( 0, 16), (16, 16), (32, 16), (48, 16)]), // L16_16_16_16
    ld( 1,  1,  4, 1, [( 0, 32), ( 0,  0), ( 0,  0), ( 0,  0)]), // L32
    ld( 1,  1,  8, 2, [( 0, 32), (32, 32), ( 0,  0), ( 0,  0)]), // L32_32
    ld( 1,  1, 12, 3, [( 0, 32), (32, 32), (64, 32), ( 0,  0)]), // L32_32_32
    ld( 1,  1, 16, 4, [( 0, 32), (32, 32), (64, 32), (96, 32)]), // L32_32_32_32
    ld( 1,  1,  3, 1, [( 0, 24), ( 0,  0), ( 0,  0), ( 0,  0)]), // L24
    ld( 1,  1,  4, 2, [( 0,  8), ( 8, 24), ( 0,  0), ( 0,  0)]), // L8_24
    ld( 1,  1,  4, 2, [( 0, 24), (24,  8), ( 0,  0), ( 0,  0)]), // L24_8
    ld( 1,  1,  4, 3, [( 0,  4), ( 4,  4), ( 8, 24), ( 0,  0)]), // L4_4_24
    ld( 1,  1,  8, 3, [( 0, 32), (32,  8), (40, 24), ( 0,  0)]), // L32_8_24
    ld( 2,  1,  4, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Grgb
    ld( 2,  1,  4, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Rgbg
    ld( 4,  4,  8, 3, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc1
    ld( 4,  4, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc2
    ld( 4,  4, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc3
    ld( 4,  4,  8, 1, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc4
    ld( 4,  4, 16, 2, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc5
    ld( 4,  4, 16, 3, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc6h
    ld( 4,  4, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Bc7
    ld( 4,  4,  8, 3, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Etc2
    ld( 4,  4, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Etc2Eac
    ld( 4,  4, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc4x4
    ld( 5,  4, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc5x4
    ld( 5,  5, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc5x5
    ld( 6,  5, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc6x5
    ld( 6,  6, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc6x6
    ld( 8,  5, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc8x5
    ld( 8,  6, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc8x6
    ld( 8,  8, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc8x8
    ld(10,  5, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc10x5
    ld(10,  6, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc10x6
    ld(10,  8, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc10x8
    ld(10, 10, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc10x10
    ld(12, 10, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc12x10
    ld(12, 12, 16, 4, [( 0,  0), ( 0,  0), ( 0,  0), ( 0,  0)]), // Astc12x12
];

/// Numeric interpretation of a channel's raw bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sign {
    /// Normalized unsigned integer.
    UNorm = 0,
    /// Normalized signed integer.
    SNorm,
    /// Normalized bias integer.
    BNorm,
    /// Normalized gamma integer (sRGB).
    GNorm,
    /// Unsigned integer.
    UInt,
    /// Signed integer.
    SInt,
    /// Bias integer.
    BInt,
    /// Gamma integer.
    GInt,
    /// Floating point.
    Float = 8,
}

impl Sign {
    pub const SRGB: Sign = Sign::GNorm;

    const ALL: [Sign; 9] = [
        Sign::UNorm,
        Sign::SNorm,
        Sign::BNorm,
        Sign::GNorm,
        Sign::UInt,
        Sign::SInt,
        Sign::BInt,
        Sign::GInt,
        Sign::Float,
    ];

    pub fn from_bits(bits: u32) -> Option<Sign> {
        Self::ALL.get(bits as usize).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Sign::UNorm => "UNORM",
            Sign::SNorm => "SNORM",
            Sign::BNorm => "BNORM",
            Sign::GNorm => "GNORM",
            Sign::UInt => "UINT",
            Sign::SInt => "SINT",
            Sign::BInt => "BINT",
            Sign::GInt => "GINT",
            Sign::Float => "FLOAT",
        }
    }

    fn from_name(name: &str) -> Option<Sign> {
        Self::ALL.iter().find(|s| s.name() == name).copied()
    }
}

/// Per-output-channel source selector: a source channel or a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Swizzle {
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
    Zero = 4,
    One = 5,
}

impl Swizzle {
    const ALL: [Swizzle; 6] = [
        Swizzle::X,
        Swizzle::Y,
        Swizzle::Z,
        Swizzle::W,
        Swizzle::Zero,
        Swizzle::One,
    ];

    pub fn from_bits(bits: u32) -> Option<Swizzle> {
        Self::ALL.get(bits as usize).copied()
    }

    pub const fn symbol(self) -> char {
        match self {
            Swizzle::X => 'X',
            Swizzle::Y => 'Y',
            Swizzle::Z => 'Z',
            Swizzle::W => 'W',
            Swizzle::Zero => '0',
            Swizzle::One => '1',
        }
    }

    fn from_symbol(symbol: char) -> Option<Swizzle> {
        match symbol {
            'X' => Some(Swizzle::X),
            'Y' => Some(Swizzle::Y),
            'Z' => Some(Swizzle::Z),
            'W' => Some(Swizzle::W),
            '0' => Some(Swizzle::Zero),
            '1' => Some(Swizzle::One),
            _ => None,
        }
    }
}

/// All four swizzle slots at once; shorthand for the named constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swizzle4(pub Swizzle, pub Swizzle, pub Swizzle, pub Swizzle);

#[rustfmt::skip]
impl Swizzle4 {
    pub const XYZW:  Self = Self(Swizzle::X, Swizzle::Y, Swizzle::Z, Swizzle::W);
    pub const ZYXW:  Self = Self(Swizzle::Z, Swizzle::Y, Swizzle::X, Swizzle::W);
    pub const XYZ1:  Self = Self(Swizzle::X, Swizzle::Y, Swizzle::Z, Swizzle::One);
    pub const ZYX1:  Self = Self(Swizzle::Z, Swizzle::Y, Swizzle::X, Swizzle::One);
    pub const XXXY:  Self = Self(Swizzle::X, Swizzle::X, Swizzle::X, Swizzle::Y);
    pub const XY00:  Self = Self(Swizzle::X, Swizzle::Y, Swizzle::Zero, Swizzle::Zero);
    pub const XY01:  Self = Self(Swizzle::X, Swizzle::Y, Swizzle::Zero, Swizzle::One);
    pub const X001:  Self = Self(Swizzle::X, Swizzle::Zero, Swizzle::Zero, Swizzle::One);
    pub const XXX1:  Self = Self(Swizzle::X, Swizzle::X, Swizzle::X, Swizzle::One);
    pub const _111X: Self = Self(Swizzle::One, Swizzle::One, Swizzle::One, Swizzle::X);
    pub const _0Y01: Self = Self(Swizzle::Zero, Swizzle::Y, Swizzle::Zero, Swizzle::One);
}

bitfield! {
    /// A complete pixel-format descriptor packed into 32 bits.
    ///
    /// The raw encoding (`.0` / [`PixelFormat::from_u32`] /
    /// [`PixelFormat::to_u32`]) is stable and stored verbatim by the RIL
    /// container. The all-zero value is the empty/unknown format.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct PixelFormat(u32);
    impl Debug;
    u32;
    layout_bits, set_layout_bits: 6, 0;
    reserved_bit, set_reserved_bit: 7;
    sign0_bits, set_sign0_bits: 11, 8;
    sign12_bits, set_sign12_bits: 15, 12;
    sign3_bits, set_sign3_bits: 19, 16;
    swizzle0_bits, set_swizzle0_bits: 22, 20;
    swizzle1_bits, set_swizzle1_bits: 25, 23;
    swizzle2_bits, set_swizzle2_bits: 28, 26;
    swizzle3_bits, set_swizzle3_bits: 31, 29;
}

impl PixelFormat {
    /// Builds a descriptor from its parts. Only masks the fields; use
    /// [`PixelFormat::valid`] to check the result.
    pub const fn make(
        layout: Layout,
        sign0: Sign,
        sign12: Sign,
        sign3: Sign,
        sw0: Swizzle,
        sw1: Swizzle,
        sw2: Swizzle,
        sw3: Swizzle,
    ) -> Self {
        Self(
            (layout as u32 & 0x7f)
                | ((sign0 as u32 & 0xf) << 8)
                | ((sign12 as u32 & 0xf) << 12)
                | ((sign3 as u32 & 0xf) << 16)
                | ((sw0 as u32 & 0x7) << 20)
                | ((sw1 as u32 & 0x7) << 23)
                | ((sw2 as u32 & 0x7) << 26)
                | ((sw3 as u32 & 0x7) << 29),
        )
    }

    /// [`PixelFormat::make`] with one sign for channels 0..=2.
    pub const fn make3(layout: Layout, sign012: Sign, sign3: Sign, sw: Swizzle4) -> Self {
        Self::make(layout, sign012, sign012, sign3, sw.0, sw.1, sw.2, sw.3)
    }

    /// [`PixelFormat::make`] with one sign for all channels.
    pub const fn make1(layout: Layout, sign: Sign, sw: Swizzle4) -> Self {
        Self::make3(layout, sign, sign, sw)
    }

    pub const fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// True when the descriptor is all-unknown. Empty is never valid.
    pub fn empty(self) -> bool {
        self.layout_bits() == 0
    }

    /// Checks every field is in range and the reserved bit is clear.
    pub fn valid(self) -> bool {
        self.layout_bits() >= 1
            && (self.layout_bits() as usize) < Layout::COUNT
            && self.sign0_bits() <= Sign::Float as u32
            && self.sign12_bits() <= Sign::Float as u32
            && self.sign3_bits() <= Sign::Float as u32
            && self.swizzle0_bits() <= Swizzle::One as u32
            && self.swizzle1_bits() <= Swizzle::One as u32
            && self.swizzle2_bits() <= Swizzle::One as u32
            && self.swizzle3_bits() <= Swizzle::One as u32
            && !self.reserved_bit()
    }

    /// The layout; out-of-range encodings read as [`Layout::Unknown`]
    /// (and fail [`PixelFormat::valid`]).
    pub fn layout(self) -> Layout {
        Layout::from_bits(self.layout_bits()).unwrap_or(Layout::Unknown)
    }

    /// Layout geometry descriptor.
    pub fn layout_desc(self) -> &'static LayoutDesc {
        self.layout().desc()
    }

    /// Bytes per pixel block.
    pub fn bytes_per_block(self) -> u8 {
        self.layout_desc().block_bytes
    }

    /// Bits per pixel. Less than 8 for packed and compressed layouts.
    pub fn bits_per_pixel(self) -> u8 {
        let ld = self.layout_desc();
        if ld.block_width == 0 {
            return 0;
        }
        (ld.block_bytes as u32 * 8 / ld.block_width as u32 / ld.block_height as u32) as u8
    }

    /// Sign applied to source channel `channel` (0..=3). Undefined bit
    /// patterns (rejected by [`PixelFormat::valid`]) read as UNorm.
    pub fn sign(self, channel: u32) -> Sign {
        let bits = match channel {
            0 => self.sign0_bits(),
            1 | 2 => self.sign12_bits(),
            _ => self.sign3_bits(),
        };
        Sign::from_bits(bits).unwrap_or(Sign::UNorm)
    }

    /// Swizzle of output slot `slot` (0..=3).
    pub fn swizzle(self, slot: u32) -> Swizzle {
        let bits = match slot {
            0 => self.swizzle0_bits(),
            1 => self.swizzle1_bits(),
            2 => self.swizzle2_bits(),
            _ => self.swizzle3_bits(),
        };
        Swizzle::from_bits(bits).unwrap_or(Swizzle::X)
    }

    /// Decodes one packed pixel to the canonical four-float value.
    ///
    /// The slice must hold at least [`PixelFormat::bytes_per_block`]
    /// bytes; no bytes past that are read. Block layouts (anything other
    /// than a 1×1 block) have no per-pixel decode.
    pub fn store_to_float4(self, pixel: &[u8]) -> Result<Float4, ConvertError> {
        let ld = self.layout_desc();
        if ld.block_width != 1 || ld.block_height != 1 {
            return Err(ConvertError::CompressedFormat);
        }
        debug_assert!(pixel.len() >= ld.block_bytes as usize);
        let src = OnePixel::from_bytes(&pixel[..(ld.block_bytes as usize).min(pixel.len())]);

        let mut out = [0f32; 4];
        for (slot, value) in out.iter_mut().enumerate() {
            *value = self.decode_channel(src, ld, self.swizzle(slot as u32))?;
        }
        Ok(Float4::new(out[0], out[1], out[2], out[3]))
    }

    /// Encodes the canonical four-float value into one packed pixel.
    ///
    /// Constant swizzle slots contribute nothing; they matter only to
    /// decode.
    pub fn load_from_float4(self, value: Float4) -> Result<OnePixel, ConvertError> {
        let ld = self.layout_desc();
        if ld.block_width != 1 || ld.block_height != 1 {
            return Err(ConvertError::CompressedFormat);
        }
        let mut out = OnePixel::default();
        for slot in 0..4u32 {
            let sw = self.swizzle(slot);
            let channel = match sw {
                Swizzle::X | Swizzle::Y | Swizzle::Z | Swizzle::W => sw as u32,
                Swizzle::Zero | Swizzle::One => continue,
            };
            // Slot `slot` of the canonical value came from source channel
            // `channel` on decode, so encode routes it back there.
            let ch = ld.channels[channel as usize];
            let raw = channel_from_float(
                value.component(slot as usize),
                ch.bits as u32,
                self.sign(channel),
            )?;
            if !out.set(raw, ch.shift as u32, ch.bits as u32) {
                return Err(ConvertError::UnsupportedConversion);
            }
        }
        Ok(out)
    }

    /// Decodes a single output channel of one packed pixel.
    ///
    /// Reads exactly [`PixelFormat::bytes_per_block`] bytes from `pixel`.
    /// `channel` must be in `0..=3`.
    pub fn pixel_channel_float(self, pixel: &[u8], channel: u32) -> Result<f32, ConvertError> {
        assert!(channel < 4, "channel index {channel} out of range [0..3]");
        let ld = self.layout_desc();
        if ld.block_width != 1 || ld.block_height != 1 {
            return Err(ConvertError::CompressedFormat);
        }
        let src = OnePixel::from_bytes(&pixel[..(ld.block_bytes as usize).min(pixel.len())]);
        self.decode_channel(src, ld, self.swizzle(channel))
    }

    fn decode_channel(
        self,
        src: OnePixel,
        ld: &LayoutDesc,
        sw: Swizzle,
    ) -> Result<f32, ConvertError> {
        let channel = match sw {
            Swizzle::Zero => return Ok(0.0),
            Swizzle::One => return Ok(1.0),
            _ => sw as u32,
        };
        let ch = ld.channels[channel as usize];
        let raw = src
            .segment(ch.shift as u32, ch.bits as u32)
            .ok_or(ConvertError::UnsupportedConversion)?;
        channel_to_float(raw, ch.bits as u32, self.sign(channel))
    }
}

/// `"<LAYOUT>-sign0(<S>)-sign12(<S>)-sign3(<S>)-<sw0><sw1><sw2><sw3>"`
impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-sign0({})-sign12({})-sign3({})-{}{}{}{}",
            self.layout().name(),
            self.sign(0).name(),
            self.sign(1).name(),
            self.sign(3).name(),
            self.swizzle(0).symbol(),
            self.swizzle(1).symbol(),
            self.swizzle(2).symbol(),
            self.swizzle(3).symbol(),
        )
    }
}

/// Failure to parse the textual form of a [`PixelFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed pixel format string")]
pub struct ParsePixelFormatError;

impl FromStr for PixelFormat {
    type Err = ParsePixelFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn section<'a>(
            s: &'a str,
            prefix: &str,
        ) -> Result<(&'a str, &'a str), ParsePixelFormatError> {
            let rest = s.strip_prefix(prefix).ok_or(ParsePixelFormatError)?;
            let end = rest.find(')').ok_or(ParsePixelFormatError)?;
            Ok((&rest[..end], &rest[end + 1..]))
        }

        let dash = s.find("-sign0(").ok_or(ParsePixelFormatError)?;
        let layout = Layout::from_name(&s[..dash]).ok_or(ParsePixelFormatError)?;
        let rest = &s[dash..];
        let (s0, rest) = section(rest, "-sign0(")?;
        let (s12, rest) = section(rest, "-sign12(")?;
        let (s3, rest) = section(rest, "-sign3(")?;
        let sw = rest.strip_prefix('-').ok_or(ParsePixelFormatError)?;
        let mut symbols = sw.chars();
        let mut swizzles = [Swizzle::X; 4];
        for slot in &mut swizzles {
            *slot = symbols
                .next()
                .and_then(Swizzle::from_symbol)
                .ok_or(ParsePixelFormatError)?;
        }
        if symbols.next().is_some() {
            return Err(ParsePixelFormatError);
        }
        Ok(PixelFormat::make(
            layout,
            Sign::from_name(s0).ok_or(ParsePixelFormatError)?,
            Sign::from_name(s12).ok_or(ParsePixelFormatError)?,
            Sign::from_name(s3).ok_or(ParsePixelFormatError)?,
            swizzles[0],
            swizzles[1],
            swizzles[2],
            swizzles[3],
        ))
    }
}

/// Named formats.
#[rustfmt::skip]
impl PixelFormat {
    pub const UNKNOWN: Self = Self(0);

    // 8 bits
    pub const R_8_UNORM: Self             = Self::make1(Layout::L8, Sign::UNorm, Swizzle4::X001);
    pub const R_8_SNORM: Self             = Self::make1(Layout::L8, Sign::SNorm, Swizzle4::X001);
    pub const R_8_UINT: Self              = Self::make1(Layout::L8, Sign::UInt,  Swizzle4::X001);
    pub const R_8_SINT: Self              = Self::make1(Layout::L8, Sign::SInt,  Swizzle4::X001);
    pub const L_8_UNORM: Self             = Self::make1(Layout::L8, Sign::UNorm, Swizzle4::XXX1);
    pub const A_8_UNORM: Self             = Self::make1(Layout::L8, Sign::UNorm, Swizzle4::_111X);
    pub const RGB_3_3_2_UNORM: Self       = Self::make1(Layout::L3_3_2, Sign::UNorm, Swizzle4::XYZ1);
    pub const BGR_3_3_2_UNORM: Self       = Self::make1(Layout::L3_3_2, Sign::UNorm, Swizzle4::ZYX1);
    pub const R_1_UNORM: Self             = Self::make1(Layout::L1, Sign::UNorm, Swizzle4::X001);

    // 16 bits
    pub const RGBA_4_4_4_4_UNORM: Self    = Self::make1(Layout::L4_4_4_4, Sign::UNorm, Swizzle4::XYZW);
    pub const RGBX_4_4_4_4_UNORM: Self    = Self::make1(Layout::L4_4_4_4, Sign::UNorm, Swizzle4::XYZ1);
    pub const BGRA_4_4_4_4_UNORM: Self    = Self::make1(Layout::L4_4_4_4, Sign::UNorm, Swizzle4::ZYXW);
    pub const BGRX_4_4_4_4_UNORM: Self    = Self::make1(Layout::L4_4_4_4, Sign::UNorm, Swizzle4::ZYX1);
    pub const RGB_5_6_5_UNORM: Self       = Self::make1(Layout::L5_6_5, Sign::UNorm, Swizzle4::XYZ1);
    pub const BGR_5_6_5_UNORM: Self       = Self::make1(Layout::L5_6_5, Sign::UNorm, Swizzle4::ZYX1);
    pub const RGBA_5_5_5_1_UNORM: Self    = Self::make1(Layout::L5_5_5_1, Sign::UNorm, Swizzle4::XYZW);
    pub const RGBX_5_5_5_1_UNORM: Self    = Self::make1(Layout::L5_5_5_1, Sign::UNorm, Swizzle4::XYZ1);
    pub const BGRA_5_5_5_1_UNORM: Self    = Self::make1(Layout::L5_5_5_1, Sign::UNorm, Swizzle4::ZYXW);
    pub const BGRX_5_5_5_1_UNORM: Self    = Self::make1(Layout::L5_5_5_1, Sign::UNorm, Swizzle4::ZYX1);
    pub const RG_8_8_UNORM: Self          = Self::make1(Layout::L8_8, Sign::UNorm, Swizzle4::XY01);
    pub const RG_8_8_SNORM: Self          = Self::make1(Layout::L8_8, Sign::SNorm, Swizzle4::XY01);
    pub const RG_8_8_UINT: Self           = Self::make1(Layout::L8_8, Sign::UInt,  Swizzle4::XY01);
    pub const RG_8_8_SINT: Self           = Self::make1(Layout::L8_8, Sign::SInt,  Swizzle4::XY01);
    pub const LA_8_8_UNORM: Self          = Self::make1(Layout::L8_8, Sign::UNorm, Swizzle4::XXXY);
    pub const R_16_UNORM: Self            = Self::make1(Layout::L16, Sign::UNorm, Swizzle4::X001);
    pub const R_16_SNORM: Self            = Self::make1(Layout::L16, Sign::SNorm, Swizzle4::X001);
    pub const R_16_UINT: Self             = Self::make1(Layout::L16, Sign::UInt,  Swizzle4::X001);
    pub const R_16_SINT: Self             = Self::make1(Layout::L16, Sign::SInt,  Swizzle4::X001);
    pub const R_16_FLOAT: Self            = Self::make1(Layout::L16, Sign::Float, Swizzle4::X001);
    pub const L_16_UNORM: Self            = Self::make1(Layout::L16, Sign::UNorm, Swizzle4::XXX1);

    // 24 bits
    pub const RGB_8_8_8_UNORM: Self       = Self::make1(Layout::L8_8_8, Sign::UNorm, Swizzle4::XYZ1);
    pub const RGB_8_8_8_SRGB: Self        = Self::make1(Layout::L8_8_8, Sign::GNorm, Swizzle4::XYZ1);
    pub const BGR_8_8_8_UNORM: Self       = Self::make1(Layout::L8_8_8, Sign::UNorm, Swizzle4::ZYX1);
    pub const BGR_8_8_8_SRGB: Self        = Self::make1(Layout::L8_8_8, Sign::GNorm, Swizzle4::ZYX1);

    // 32 bits
    pub const RGBA_8_8_8_8_UNORM: Self    = Self::make1(Layout::L8_8_8_8, Sign::UNorm, Swizzle4::XYZW);
    pub const RGBA_8_8_8_8_SRGB: Self     = Self::make3(Layout::L8_8_8_8, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const RGBA_8_8_8_8_SNORM: Self    = Self::make1(Layout::L8_8_8_8, Sign::SNorm, Swizzle4::XYZW);
    pub const RGBA_8_8_8_8_UINT: Self     = Self::make1(Layout::L8_8_8_8, Sign::UInt,  Swizzle4::XYZW);
    pub const RGBA_8_8_8_8_SINT: Self     = Self::make1(Layout::L8_8_8_8, Sign::SInt,  Swizzle4::XYZW);
    pub const RGBA8: Self                 = Self::RGBA_8_8_8_8_UNORM;
    pub const UBYTE4N: Self               = Self::RGBA_8_8_8_8_UNORM;
    pub const RGBX_8_8_8_8_UNORM: Self    = Self::make1(Layout::L8_8_8_8, Sign::UNorm, Swizzle4::XYZ1);
    pub const BGRA_8_8_8_8_UNORM: Self    = Self::make1(Layout::L8_8_8_8, Sign::UNorm, Swizzle4::ZYXW);
    pub const BGRA_8_8_8_8_SRGB: Self     = Self::make3(Layout::L8_8_8_8, Sign::GNorm, Sign::UNorm, Swizzle4::ZYXW);
    pub const BGRA8: Self                 = Self::BGRA_8_8_8_8_UNORM;
    pub const BGRX_8_8_8_8_UNORM: Self    = Self::make1(Layout::L8_8_8_8, Sign::UNorm, Swizzle4::ZYX1);
    pub const RGBA_10_10_10_2_UNORM: Self = Self::make1(Layout::L10_10_10_2, Sign::UNorm, Swizzle4::XYZW);
    pub const RGBA_10_10_10_2_UINT: Self  = Self::make1(Layout::L10_10_10_2, Sign::UInt,  Swizzle4::XYZW);
    pub const BGRA_10_10_10_2_UNORM: Self = Self::make1(Layout::L10_10_10_2, Sign::UNorm, Swizzle4::ZYXW);
    pub const RGB_11_11_10_FLOAT: Self    = Self::make1(Layout::L11_11_10, Sign::Float, Swizzle4::XYZ1);
    pub const RG_16_16_UNORM: Self        = Self::make1(Layout::L16_16, Sign::UNorm, Swizzle4::XY01);
    pub const RG_16_16_SNORM: Self        = Self::make1(Layout::L16_16, Sign::SNorm, Swizzle4::XY01);
    pub const RG_16_16_UINT: Self         = Self::make1(Layout::L16_16, Sign::UInt,  Swizzle4::XY01);
    pub const RG_16_16_SINT: Self         = Self::make1(Layout::L16_16, Sign::SInt,  Swizzle4::XY01);
    pub const RG_16_16_FLOAT: Self        = Self::make1(Layout::L16_16, Sign::Float, Swizzle4::XY01);
    pub const LA_16_16_UNORM: Self        = Self::make1(Layout::L16_16, Sign::UNorm, Swizzle4::XXXY);
    pub const HALF2: Self                 = Self::RG_16_16_FLOAT;
    pub const R_32_UNORM: Self            = Self::make1(Layout::L32, Sign::UNorm, Swizzle4::X001);
    pub const R_32_UINT: Self             = Self::make1(Layout::L32, Sign::UInt,  Swizzle4::X001);
    pub const R_32_SINT: Self             = Self::make1(Layout::L32, Sign::SInt,  Swizzle4::X001);
    pub const R_32_FLOAT: Self            = Self::make1(Layout::L32, Sign::Float, Swizzle4::X001);
    pub const FLOAT1: Self                = Self::R_32_FLOAT;

    // depth + stencil combos
    pub const GR_8_UINT_24_UNORM: Self    = Self::make(Layout::L8_24, Sign::UInt, Sign::UNorm, Sign::UInt, Swizzle::Y, Swizzle::X, Swizzle::Zero, Swizzle::One);
    pub const GX_8_24_UNORM: Self         = Self::make(Layout::L8_24, Sign::UInt, Sign::UNorm, Sign::UInt, Swizzle::Y, Swizzle::Zero, Swizzle::Zero, Swizzle::One);
    pub const RG_24_UNORM_8_UINT: Self    = Self::make3(Layout::L24_8, Sign::UNorm, Sign::UInt, Swizzle4::XY01);
    pub const RX_24_8_UNORM: Self         = Self::make3(Layout::L24_8, Sign::UNorm, Sign::UInt, Swizzle4::XY01);
    pub const XG_24_8_UINT: Self          = Self::make3(Layout::L24_8, Sign::UNorm, Sign::UInt, Swizzle4::_0Y01);
    pub const RGX_32_FLOAT_8_UINT_24: Self = Self::make(Layout::L32_8_24, Sign::Float, Sign::UInt, Sign::UInt, Swizzle::X, Swizzle::Y, Swizzle::Zero, Swizzle::One);
    pub const RXX_32_8_24_FLOAT: Self     = Self::make(Layout::L32_8_24, Sign::Float, Sign::UInt, Sign::UInt, Swizzle::X, Swizzle::Zero, Swizzle::Zero, Swizzle::One);
    pub const XGX_32_8_24_UINT: Self      = Self::make1(Layout::L32_8_24, Sign::UInt, Swizzle4::_0Y01);

    // macroblock video layouts
    pub const GRGB_UNORM: Self            = Self::make1(Layout::Grgb, Sign::UNorm, Swizzle4::XYZ1);
    pub const RGBG_UNORM: Self            = Self::make1(Layout::Rgbg, Sign::UNorm, Swizzle4::XYZ1);

    // 48 bits
    pub const RGB_16_16_16_UNORM: Self    = Self::make1(Layout::L16_16_16, Sign::UNorm, Swizzle4::XYZ1);
    pub const RGB_16_16_16_FLOAT: Self    = Self::make1(Layout::L16_16_16, Sign::Float, Swizzle4::XYZ1);
    pub const HALF3: Self                 = Self::RGB_16_16_16_FLOAT;

    // 64 bits
    pub const RGBA_16_16_16_16_UNORM: Self = Self::make1(Layout::L16_16_16_16, Sign::UNorm, Swizzle4::XYZW);
    pub const RGBA_16_16_16_16_SNORM: Self = Self::make1(Layout::L16_16_16_16, Sign::SNorm, Swizzle4::XYZW);
    pub const RGBA_16_16_16_16_UINT: Self  = Self::make1(Layout::L16_16_16_16, Sign::UInt,  Swizzle4::XYZW);
    pub const RGBA_16_16_16_16_SINT: Self  = Self::make1(Layout::L16_16_16_16, Sign::SInt,  Swizzle4::XYZW);
    pub const RGBA_16_16_16_16_FLOAT: Self = Self::make1(Layout::L16_16_16_16, Sign::Float, Swizzle4::XYZW);
    pub const HALF4: Self                  = Self::RGBA_16_16_16_16_FLOAT;
    pub const USHORT4N: Self               = Self::RGBA_16_16_16_16_UNORM;
    pub const RG_32_32_UINT: Self          = Self::make1(Layout::L32_32, Sign::UInt,  Swizzle4::XY01);
    pub const RG_32_32_SINT: Self          = Self::make1(Layout::L32_32, Sign::SInt,  Swizzle4::XY01);
    pub const RG_32_32_FLOAT: Self         = Self::make1(Layout::L32_32, Sign::Float, Swizzle4::XY01);
    pub const FLOAT2: Self                 = Self::RG_32_32_FLOAT;

    // 96 bits
    pub const RGB_32_32_32_UINT: Self     = Self::make1(Layout::L32_32_32, Sign::UInt,  Swizzle4::XYZ1);
    pub const RGB_32_32_32_SINT: Self     = Self::make1(Layout::L32_32_32, Sign::SInt,  Swizzle4::XYZ1);
    pub const RGB_32_32_32_FLOAT: Self    = Self::make1(Layout::L32_32_32, Sign::Float, Swizzle4::XYZ1);
    pub const FLOAT3: Self                = Self::RGB_32_32_32_FLOAT;

    // 128 bits
    pub const RGBA_32_32_32_32_UINT: Self  = Self::make1(Layout::L32_32_32_32, Sign::UInt,  Swizzle4::XYZW);
    pub const RGBA_32_32_32_32_SINT: Self  = Self::make1(Layout::L32_32_32_32, Sign::SInt,  Swizzle4::XYZW);
    pub const RGBA_32_32_32_32_FLOAT: Self = Self::make1(Layout::L32_32_32_32, Sign::Float, Swizzle4::XYZW);
    pub const FLOAT4: Self                 = Self::RGBA_32_32_32_32_FLOAT;

    // block compressed
    pub const BC1_UNORM: Self             = Self::make1(Layout::Bc1, Sign::UNorm, Swizzle4::XYZ1);
    pub const BC1_SRGB: Self              = Self::make3(Layout::Bc1, Sign::GNorm, Sign::UNorm, Swizzle4::XYZ1);
    pub const BC2_UNORM: Self             = Self::make1(Layout::Bc2, Sign::UNorm, Swizzle4::XYZW);
    pub const BC2_SRGB: Self              = Self::make3(Layout::Bc2, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const BC3_UNORM: Self             = Self::make1(Layout::Bc3, Sign::UNorm, Swizzle4::XYZW);
    pub const BC3_SRGB: Self              = Self::make3(Layout::Bc3, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const BC4_UNORM: Self             = Self::make1(Layout::Bc4, Sign::UNorm, Swizzle4::X001);
    pub const BC4_SNORM: Self             = Self::make1(Layout::Bc4, Sign::SNorm, Swizzle4::X001);
    pub const BC5_UNORM: Self             = Self::make1(Layout::Bc5, Sign::UNorm, Swizzle4::XY00);
    pub const BC5_SNORM: Self             = Self::make1(Layout::Bc5, Sign::SNorm, Swizzle4::XY00);
    pub const BC6H_UNORM: Self            = Self::make1(Layout::Bc6h, Sign::UNorm, Swizzle4::XYZ1);
    pub const BC6H_SNORM: Self            = Self::make1(Layout::Bc6h, Sign::SNorm, Swizzle4::XYZ1);
    pub const BC7_UNORM: Self             = Self::make1(Layout::Bc7, Sign::UNorm, Swizzle4::XYZW);
    pub const BC7_SRGB: Self              = Self::make3(Layout::Bc7, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const ETC2_UNORM: Self            = Self::make1(Layout::Etc2, Sign::UNorm, Swizzle4::XYZ1);
    pub const ETC2_SRGB: Self             = Self::make3(Layout::Etc2, Sign::GNorm, Sign::UNorm, Swizzle4::XYZ1);
    pub const ETC2_EAC_UNORM: Self        = Self::make1(Layout::Etc2Eac, Sign::UNorm, Swizzle4::XYZW);
    pub const ETC2_EAC_SRGB: Self         = Self::make3(Layout::Etc2Eac, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);

    pub const ASTC_4X4_UNORM: Self        = Self::make1(Layout::Astc4x4, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_5X4_UNORM: Self        = Self::make1(Layout::Astc5x4, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_5X5_UNORM: Self        = Self::make1(Layout::Astc5x5, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_6X5_UNORM: Self        = Self::make1(Layout::Astc6x5, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_6X6_UNORM: Self        = Self::make1(Layout::Astc6x6, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_8X5_UNORM: Self        = Self::make1(Layout::Astc8x5, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_8X6_UNORM: Self        = Self::make1(Layout::Astc8x6, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_8X8_UNORM: Self        = Self::make1(Layout::Astc8x8, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_10X5_UNORM: Self       = Self::make1(Layout::Astc10x5, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_10X6_UNORM: Self       = Self::make1(Layout::Astc10x6, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_10X8_UNORM: Self       = Self::make1(Layout::Astc10x8, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_10X10_UNORM: Self      = Self::make1(Layout::Astc10x10, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_12X10_UNORM: Self      = Self::make1(Layout::Astc12x10, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_12X12_UNORM: Self      = Self::make1(Layout::Astc12x12, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_4X4_SRGB: Self         = Self::make3(Layout::Astc4x4, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_6X6_SRGB: Self         = Self::make3(Layout::Astc6x6, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_8X8_SRGB: Self         = Self::make3(Layout::Astc8x8, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_12X12_SRGB: Self       = Self::make3(Layout::Astc12x12, Sign::GNorm, Sign::UNorm, Swizzle4::XYZW);
    pub const ASTC_4X4_SFLOAT: Self       = Self::make1(Layout::Astc4x4, Sign::Float, Swizzle4::XYZW);
    pub const ASTC_6X6_SFLOAT: Self       = Self::make1(Layout::Astc6x6, Sign::Float, Swizzle4::XYZW);
    pub const ASTC_8X8_SFLOAT: Self       = Self::make1(Layout::Astc8x8, Sign::Float, Swizzle4::XYZW);
    pub const ASTC_12X12_SFLOAT: Self     = Self::make1(Layout::Astc12x12, Sign::Float, Swizzle4::XYZW);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rstest::rstest;

    #[test]
    fn unknown_is_empty_and_invalid() {
        assert!(PixelFormat::UNKNOWN.empty());
        assert!(!PixelFormat::UNKNOWN.valid());
        assert_eq!(PixelFormat::UNKNOWN.layout_desc().block_width, 0);
    }

    #[test]
    fn named_formats_are_valid_and_not_empty() {
        for format in [
            PixelFormat::RGBA8,
            PixelFormat::BC1_UNORM,
            PixelFormat::ASTC_12X12_SFLOAT,
            PixelFormat::RG_24_UNORM_8_UINT,
            PixelFormat::A_8_UNORM,
        ] {
            assert!(format.valid(), "{format}");
            assert!(!format.empty(), "{format}");
        }
    }

    #[test]
    fn reserved_bit_invalidates() {
        let raw = PixelFormat::RGBA8.to_u32() | 0x80;
        assert!(!PixelFormat::from_u32(raw).valid());
    }

    #[test]
    fn out_of_range_layout_invalidates() {
        let raw = (PixelFormat::RGBA8.to_u32() & !0x7f) | (Layout::COUNT as u32);
        assert!(!PixelFormat::from_u32(raw).valid());
    }

    #[test]
    fn layout_table_is_bit_consistent() {
        for layout in &Layout::ALL[1..] {
            let ld = layout.desc();
            // blockBytes × 8 == blockWidth × blockHeight × bitsPerPixel
            let format = PixelFormat::make1(*layout, Sign::UNorm, Swizzle4::XYZW);
            assert_eq!(
                ld.block_bytes as u32 * 8,
                ld.block_width as u32 * ld.block_height as u32 * format.bits_per_pixel() as u32,
                "{}",
                layout.name()
            );
            // channel windows of uncompressed layouts stay inside the block
            // and do not overlap (windows are listed low to high).
            if ld.block_width == 1 && ld.block_height == 1 {
                let mut next_free = 0u32;
                for ch in ld.channels.iter().take(ld.num_channels as usize) {
                    assert!(ch.bits > 0, "{}", layout.name());
                    assert!(ch.shift as u32 >= next_free, "{}", layout.name());
                    next_free = ch.shift as u32 + ch.bits as u32;
                }
                assert!(next_free <= ld.block_bytes as u32 * 8, "{}", layout.name());
            }
        }
    }

    #[test]
    fn layout_1_geometry() {
        let ld = Layout::L1.desc();
        assert_eq!(
            (ld.block_width, ld.block_height, ld.block_bytes),
            (8, 1, 1)
        );
    }

    #[test]
    fn u32_round_trip() {
        for format in [
            PixelFormat::RGBA8,
            PixelFormat::BGRA8,
            PixelFormat::BC7_SRGB,
            PixelFormat::RGX_32_FLOAT_8_UINT_24,
        ] {
            assert_eq!(PixelFormat::from_u32(format.to_u32()), format);
        }
    }

    #[test]
    fn display_form() {
        assert_eq!(
            PixelFormat::RGBA8.to_string(),
            "8_8_8_8-sign0(UNORM)-sign12(UNORM)-sign3(UNORM)-XYZW"
        );
        assert_eq!(
            PixelFormat::BC1_SRGB.to_string(),
            "BC1-sign0(GNORM)-sign12(GNORM)-sign3(UNORM)-XYZ1"
        );
    }

    #[rstest]
    #[case(PixelFormat::RGBA8)]
    #[case(PixelFormat::BGRX_8_8_8_8_UNORM)]
    #[case(PixelFormat::A_8_UNORM)]
    #[case(PixelFormat::RGB_11_11_10_FLOAT)]
    #[case(PixelFormat::ASTC_10X8_UNORM)]
    #[case(PixelFormat::GR_8_UINT_24_UNORM)]
    fn string_round_trip(#[case] format: PixelFormat) {
        let text = format.to_string();
        assert_eq!(text.parse::<PixelFormat>().unwrap(), format);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<PixelFormat>().is_err());
        assert!("8_8_8_8".parse::<PixelFormat>().is_err());
        assert!("8_8_8_8-sign0(UNORM)-sign12(UNORM)-sign3(UNORM)-XYZQ"
            .parse::<PixelFormat>()
            .is_err());
        assert!("NOPE-sign0(UNORM)-sign12(UNORM)-sign3(UNORM)-XYZW"
            .parse::<PixelFormat>()
            .is_err());
    }

    #[test]
    fn total_order_follows_the_encoding() {
        let a = PixelFormat::from_u32(1);
        let b = PixelFormat::from_u32(2);
        assert!(a < b);
    }

    #[test]
    fn store_to_float4_rgba8() {
        let v = PixelFormat::RGBA8
            .store_to_float4(&[0, 51, 102, 255])
            .unwrap();
        assert_eq!(v, Float4::new(0.0, 0.2, 0.4, 1.0));
    }

    #[test]
    fn store_to_float4_honors_swizzle_constants() {
        // RGBX: the W slot reads the constant one.
        let v = PixelFormat::RGBX_8_8_8_8_UNORM
            .store_to_float4(&[0, 0, 0, 0])
            .unwrap();
        assert_eq!(v.w, 1.0);
        // A8: RGB slots read the constant one, alpha reads channel 0.
        let v = PixelFormat::A_8_UNORM.store_to_float4(&[51]).unwrap();
        assert_eq!(v, Float4::new(1.0, 1.0, 1.0, 0.2));
    }

    #[test]
    fn store_to_float4_bgra_swizzles() {
        let v = PixelFormat::BGRA8
            .store_to_float4(&[255, 0, 51, 255])
            .unwrap();
        // byte 0 is the blue channel under the ZYXW swizzle
        assert_eq!(v, Float4::new(0.2, 0.0, 1.0, 1.0));
    }

    #[rstest]
    #[case(PixelFormat::RGBA8, &[1u8, 2, 3, 4][..])]
    #[case(PixelFormat::BGRA8, &[4u8, 3, 2, 1][..])]
    #[case(PixelFormat::RGB_5_6_5_UNORM, &[0x5Au8, 0xA5][..])]
    #[case(PixelFormat::RGBA_10_10_10_2_UNORM, &[0x12u8, 0x34, 0x56, 0x78][..])]
    #[case(PixelFormat::RGBA_16_16_16_16_UNORM, &[1u8, 2, 3, 4, 5, 6, 7, 8][..])]
    #[case(PixelFormat::R_32_FLOAT, &0.5f32.to_le_bytes()[..])]
    #[case(PixelFormat::RGBA_32_32_32_32_FLOAT, &[0u8, 0, 0x80, 0x3f, 0, 0, 0, 0x40, 0, 0, 0x40, 0x40, 0, 0, 0x80, 0x40][..])]
    fn load_store_round_trip(#[case] format: PixelFormat, #[case] bytes: &[u8]) {
        let f4 = format.store_to_float4(bytes).unwrap();
        let packed = format.load_from_float4(f4).unwrap();
        assert_eq!(
            &packed.to_bytes()[..bytes.len()],
            bytes,
            "{format} {bytes:?}"
        );
    }

    #[test]
    fn load_inverts_store_for_replicating_swizzles() {
        // XXXY and 111X reuse source channels across slots; the encoder
        // must route each slot back to its source channel, not clobber
        // channel 1 with the replicated luminance.
        for (format, bytes) in [
            (PixelFormat::LA_8_8_UNORM, &[7u8, 200][..]),
            (PixelFormat::A_8_UNORM, &[51u8][..]),
            (PixelFormat::L_8_UNORM, &[99u8][..]),
        ] {
            let f4 = format.store_to_float4(bytes).unwrap();
            let packed = format.load_from_float4(f4).unwrap();
            assert_eq!(&packed.to_bytes()[..bytes.len()], bytes, "{format}");
        }
    }

    #[test]
    fn compressed_formats_have_no_per_pixel_path() {
        assert_eq!(
            PixelFormat::BC1_UNORM.store_to_float4(&[0; 8]),
            Err(ConvertError::CompressedFormat)
        );
        assert_eq!(
            PixelFormat::BC1_UNORM.load_from_float4(Float4::default()),
            Err(ConvertError::CompressedFormat)
        );
        // LAYOUT_1 packs 8 pixels per byte; it is a block format too.
        assert_eq!(
            PixelFormat::R_1_UNORM.store_to_float4(&[0xff]),
            Err(ConvertError::CompressedFormat)
        );
    }

    #[test]
    fn pixel_channel_float_reads_single_channels() {
        let format = PixelFormat::RG_8_8_UNORM;
        let pixel = [51u8, 102];
        assert_eq!(format.pixel_channel_float(&pixel, 0).unwrap(), 0.2);
        assert_eq!(format.pixel_channel_float(&pixel, 1).unwrap(), 0.4);
        assert_eq!(format.pixel_channel_float(&pixel, 2).unwrap(), 0.0);
        assert_eq!(format.pixel_channel_float(&pixel, 3).unwrap(), 1.0);
    }

    #[test]
    fn pixel_channel_float_reads_no_bytes_past_the_block() {
        // Exactly one byte; decoding must not index past it.
        let pixel = [127u8];
        let value = PixelFormat::R_8_UNORM.pixel_channel_float(&pixel, 0).unwrap();
        assert_eq!(value, 127.0 / 255.0);
    }

    #[test]
    fn srgb_signs_have_no_conversion_path() {
        assert_eq!(
            PixelFormat::RGB_8_8_8_SRGB.store_to_float4(&[1, 2, 3]),
            Err(ConvertError::UnsupportedConversion)
        );
        // ... but the alpha channel of an sRGB format still decodes.
        assert_eq!(
            PixelFormat::RGBA_8_8_8_8_SRGB
                .pixel_channel_float(&[0, 0, 0, 255], 3)
                .unwrap(),
            1.0
        );
    }
}
