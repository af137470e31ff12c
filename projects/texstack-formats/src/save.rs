//! Save dispatch: explicit parameters or file-extension selection.

use crate::dds;
use crate::error::{FormatError, FormatResult};
use crate::raster::{MemoryIo, RasterCodec, RasterFrame};
use crate::ril;
use alloc::vec::Vec;
use texstack::{ImageView, PlaneCoord, Sign};

/// Target container formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileFormat {
    /// The native container.
    #[default]
    Ril,
    /// DirectDraw Surface.
    Dds,
    /// Portable Network Graphics (via the raster bridge).
    Png,
    /// JPEG (via the raster bridge).
    Jpg,
    /// Windows Bitmap (via the raster bridge).
    Bmp,
}

impl FileFormat {
    /// Maps a lowercased file extension (no dot) to a format.
    pub fn from_extension(ext: &str) -> Option<FileFormat> {
        match ext {
            "ril" => Some(FileFormat::Ril),
            "dds" => Some(FileFormat::Dds),
            "png" => Some(FileFormat::Png),
            "jpg" | "jpeg" => Some(FileFormat::Jpg),
            "bmp" => Some(FileFormat::Bmp),
            _ => None,
        }
    }
}

/// Explicit save parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveParams {
    pub format: FileFormat,
    /// Compression quality; used by JPG only.
    pub quality: i32,
}

impl Default for SaveParams {
    fn default() -> Self {
        Self {
            format: FileFormat::Ril,
            quality: 85,
        }
    }
}

impl SaveParams {
    pub fn new(format: FileFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }
}

/// Encodes an image into the chosen container.
///
/// Raster targets need the host codec and accept only single-plane
/// uncompressed images with 8-bit channels (16-bit also allowed for
/// PNG).
pub fn encode_to_memory(
    params: SaveParams,
    view: ImageView<'_>,
    raster: Option<&mut dyn RasterCodec>,
) -> FormatResult<Vec<u8>> {
    match params.format {
        FileFormat::Ril => ril::encode(view),
        FileFormat::Dds => dds::encode(view),
        format => {
            let Some(codec) = raster else {
                return Err(FormatError::UnsupportedFileFormat);
            };
            let (pixels, info) = pack_raster_frame(&view, format)?;
            let frame = RasterFrame {
                width: info.width,
                height: info.height,
                components: info.components,
                bytes_per_component: info.bytes_per_component,
                pixels: &pixels,
            };
            let mut io = MemoryIo::new(&[]);
            codec.encode(format, params.quality, &frame, &mut io)?;
            Ok(io.into_output())
        }
    }
}

struct FrameInfo {
    width: u32,
    height: u32,
    components: u32,
    bytes_per_component: u32,
}

/// Validates raster constraints and packs the single plane into tight
/// rows.
fn pack_raster_frame(
    view: &ImageView<'_>,
    format: FileFormat,
) -> FormatResult<(Vec<u8>, FrameInfo)> {
    let desc = view.desc;
    if desc.empty() {
        return Err(FormatError::UnsupportedForRaster("empty image"));
    }
    if desc.array_length != 1 || desc.faces != 1 || desc.levels != 1 {
        return Err(FormatError::UnsupportedForRaster(
            "raster formats hold a single plane",
        ));
    }
    let plane = view.plane(PlaneCoord::default());
    let ld = plane.format.layout_desc();
    if ld.block_width != 1 || ld.block_height != 1 {
        return Err(FormatError::UnsupportedForRaster(
            "raster formats hold uncompressed pixels",
        ));
    }
    if plane.extent.d != 1 {
        return Err(FormatError::UnsupportedForRaster(
            "raster formats hold a single slice",
        ));
    }
    let channel_bits = ld.channels[0].bits;
    let bits_ok = ld
        .channels
        .iter()
        .take(ld.num_channels as usize)
        .all(|ch| ch.bits == channel_bits);
    let depth_ok = match (format, channel_bits) {
        (_, 8) => true,
        (FileFormat::Png, 16) => true,
        _ => false,
    };
    if !bits_ok || !depth_ok || plane.format.sign(0) != Sign::UNorm {
        return Err(FormatError::UnsupportedForRaster(
            "raster formats hold 8-bit unorm channels (16-bit for PNG)",
        ));
    }

    // Repack rows without step/pitch padding.
    let (w, h) = (plane.extent.w, plane.extent.h);
    let bytes = ld.block_bytes as usize;
    let mut pixels = Vec::with_capacity(w as usize * h as usize * bytes);
    for y in 0..h {
        for x in 0..w {
            let at = plane.pixel(x, y, 0);
            pixels.extend_from_slice(&view.data[at..at + bytes]);
        }
    }

    Ok((
        pixels,
        FrameInfo {
            width: w,
            height: h,
            components: ld.num_channels as u32,
            bytes_per_component: (channel_bits / 8) as u32,
        },
    ))
}
