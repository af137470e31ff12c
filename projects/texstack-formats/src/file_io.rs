//! Stream and file entry points (std only).
//!
//! The codecs themselves are slice-based; these helpers buffer a
//! seekable stream (or a file) and delegate, so an in-memory cursor and
//! a real file behave identically.

use crate::detect::load_from_memory;
use crate::error::{FormatError, FormatResult};
use crate::raster::RasterCodec;
use crate::save::{encode_to_memory, FileFormat, SaveParams};
use alloc::vec::Vec;
use std::io::{Read, Seek, Write};
use std::path::Path;
use texstack::{Image, ImageView};

/// Loads an image from a seekable stream, starting at its current
/// position.
pub fn load(
    stream: &mut (impl Read + Seek),
    raster: Option<&mut dyn RasterCodec>,
) -> FormatResult<Image> {
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    load_from_memory(&data, raster)
}

/// Loads an image from a file.
pub fn load_file(
    path: impl AsRef<Path>,
    raster: Option<&mut dyn RasterCodec>,
) -> FormatResult<Image> {
    let data = std::fs::read(path)?;
    load_from_memory(&data, raster)
}

/// Saves an image to a stream with explicit parameters.
pub fn save_to_stream(
    params: SaveParams,
    stream: &mut impl Write,
    view: ImageView<'_>,
    raster: Option<&mut dyn RasterCodec>,
) -> FormatResult<()> {
    let bytes = encode_to_memory(params, view, raster)?;
    stream.write_all(&bytes)?;
    Ok(())
}

/// Saves an image to a file, selecting the format from the lowercased
/// path extension (`.ril`, `.dds`, `.png`, `.jpg`/`.jpeg`, `.bmp`).
pub fn save_file(
    path: impl AsRef<Path>,
    view: ImageView<'_>,
    raster: Option<&mut dyn RasterCodec>,
) -> FormatResult<()> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| FileFormat::from_extension(&ext.to_ascii_lowercase()))
        .ok_or(FormatError::UnsupportedFileFormat)?;
    // The file is created only after the codec is chosen and has run.
    let bytes = encode_to_memory(SaveParams::new(format), view, raster)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use texstack::{ImageDesc, PixelFormat};

    fn sample_image() -> Image {
        let desc = ImageDesc::new_2d(PixelFormat::RGBA8, 4, 4, 1);
        let mut image = Image::new(desc).unwrap();
        for (i, b) in image.data_mut().iter_mut().enumerate() {
            *b = i as u8;
        }
        image
    }

    #[test]
    fn stream_round_trip() {
        let image = sample_image();
        let mut stream = Cursor::new(Vec::new());
        save_to_stream(SaveParams::default(), &mut stream, image.view(), None).unwrap();

        stream.set_position(0);
        let loaded = load(&mut stream, None).unwrap();
        assert_eq!(loaded.desc(), image.desc());
        assert_eq!(loaded.data(), image.data());
    }

    #[test]
    fn file_round_trip_by_extension() {
        let dir = std::env::temp_dir().join("texstack-file-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.RIL");

        let image = sample_image();
        save_file(&path, image.view(), None).unwrap();
        let loaded = load_file(&path, None).unwrap();
        assert_eq!(loaded.data(), image.data());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unknown_extension_is_rejected_before_touching_the_disk() {
        let image = sample_image();
        let path = std::env::temp_dir().join("texstack-file-io-test.tga");
        assert!(matches!(
            save_file(&path, image.view(), None),
            Err(FormatError::UnsupportedFileFormat)
        ));
        assert!(!path.exists());
    }
}
