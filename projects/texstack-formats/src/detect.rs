//! Container detection and the load dispatch chain.

use crate::dds;
use crate::error::{FormatError, FormatResult};
use crate::raster::{MemoryIo, RasterCodec};
use crate::ril;
use texstack::{Image, ImageDesc, PixelFormat};

/// Containers the sniffer can recognize from magic bytes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Ril,
    Dds,
    Unknown,
}

/// Identifies the container from its magic bytes.
pub fn sniff(data: &[u8]) -> Container {
    if ril::is_ril(data) {
        Container::Ril
    } else if dds::is_dds(data) {
        Container::Dds
    } else {
        Container::Unknown
    }
}

/// Loads an image from a memory buffer.
///
/// Tries RIL, then DDS, then hands the bytes to the raster codec when
/// one is provided. Inputs nothing recognizes fail with
/// `UnsupportedFileFormat`.
pub fn load_from_memory(
    data: &[u8],
    raster: Option<&mut dyn RasterCodec>,
) -> FormatResult<Image> {
    match sniff(data) {
        Container::Ril => ril::decode(data),
        Container::Dds => dds::decode(data),
        Container::Unknown => {
            let Some(codec) = raster else {
                return Err(FormatError::UnsupportedFileFormat);
            };
            log::debug!("no container magic; delegating to the raster codec");
            let mut io = MemoryIo::new(data);
            let decoded = codec.decode(&mut io)?;
            let desc = ImageDesc::new_2d(PixelFormat::RGBA8, decoded.width, decoded.height, 1);
            Ok(Image::with_content(desc, &decoded.pixels)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{DecodedRaster, RasterFrame, RasterIo};
    use crate::save::FileFormat;
    use crate::test_prelude::*;
    use alloc::vec;
    use texstack::{Extent3D, PlaneCoord};

    /// Pretends everything is a 2x1 gradient.
    struct FakeCodec {
        decoded: usize,
    }

    impl FakeCodec {
        fn new() -> Self {
            Self { decoded: 0 }
        }
    }

    impl RasterCodec for FakeCodec {
        fn decode(&mut self, io: &mut dyn RasterIo) -> FormatResult<DecodedRaster> {
            let mut probe = [0u8; 1];
            if io.read(&mut probe) == 0 {
                return Err(FormatError::RasterCodec("empty input"));
            }
            self.decoded += 1;
            Ok(DecodedRaster {
                width: 2,
                height: 1,
                pixels: vec![1, 2, 3, 255, 4, 5, 6, 255],
            })
        }

        fn encode(
            &mut self,
            _format: FileFormat,
            _quality: i32,
            _frame: &RasterFrame<'_>,
            _io: &mut dyn RasterIo,
        ) -> FormatResult<()> {
            Err(FormatError::RasterCodec("encode not expected"))
        }
    }

    #[test]
    fn sniff_recognizes_the_native_containers() {
        assert_eq!(sniff(b"RIL_\x01\x00\x00\x00"), Container::Ril);
        assert_eq!(sniff(&bc1_dds_with_mips(4, 4, 1)), Container::Dds);
        assert_eq!(sniff(b"\x89PNG\r\n"), Container::Unknown);
    }

    #[test]
    fn ril_magic_routes_to_the_ril_decoder() {
        let desc = ImageDesc::new_2d(PixelFormat::RGBA8, 2, 2, 1);
        let mut image = Image::new(desc).unwrap();
        image.data_mut().fill(7);
        let encoded = ril::encode(image.view()).unwrap();

        let loaded = load_from_memory(&encoded, None).unwrap();
        assert_eq!(loaded.desc(), image.desc());
        assert_eq!(loaded.data(), image.data());
    }

    #[test]
    fn dds_magic_routes_to_the_dds_decoder() {
        let data = bc1_dds_with_mips(8, 8, 1);
        let image = load_from_memory(&data, None).unwrap();
        assert_eq!(
            image.plane(PlaneCoord::default()).format,
            PixelFormat::BC1_UNORM
        );
    }

    #[test]
    fn unknown_magic_without_codec_is_unsupported() {
        assert!(matches!(
            load_from_memory(b"\x89PNG\r\n\x1a\n....", None),
            Err(FormatError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn unknown_magic_falls_through_to_the_codec() {
        let mut codec = FakeCodec::new();
        let image = load_from_memory(b"\x89PNG\r\n\x1a\n....", Some(&mut codec)).unwrap();
        assert_eq!(codec.decoded, 1);
        assert_eq!(
            image.plane(PlaneCoord::default()).extent,
            Extent3D::new(2, 1, 1)
        );
        assert_eq!(&image.data()[..8], &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn native_containers_never_reach_the_codec() {
        let mut codec = FakeCodec::new();
        let data = bc1_dds_with_mips(4, 4, 1);
        load_from_memory(&data, Some(&mut codec)).unwrap();
        assert_eq!(codec.decoded, 0);
    }

    #[test]
    fn codec_errors_propagate() {
        let mut codec = FakeCodec::new();
        let err = load_from_memory(b"", Some(&mut codec)).unwrap_err();
        assert!(matches!(err, FormatError::RasterCodec(_)));
    }
}
