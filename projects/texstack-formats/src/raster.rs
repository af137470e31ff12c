//! Bridge to a host-provided raster codec (PNG/JPG/BMP/HDR).
//!
//! The library does not link a raster codec of its own. A host that has
//! one (stb_image, image-rs, ...) implements [`RasterCodec`] over the
//! four-callback [`RasterIo`] surface and passes it to the load/save
//! entry points; without a codec, raster inputs and targets fail with
//! `UnsupportedFileFormat`.

use crate::error::FormatResult;
use crate::save::FileFormat;
use alloc::vec::Vec;

/// Stream surface handed to the host codec.
pub trait RasterIo {
    /// Reads up to `buf.len()` bytes; returns how many were read.
    fn read(&mut self, buf: &mut [u8]) -> usize;
    /// Skips `n` bytes (negative seeks backwards).
    fn skip(&mut self, n: i64);
    /// True at end of input.
    fn eof(&self) -> bool;
    /// Appends bytes to the output (encode only).
    fn write(&mut self, buf: &[u8]);
}

/// A decoded raster image: tightly packed RGBA8 rows.
pub struct DecodedRaster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One uncompressed frame handed to the codec for encoding. Rows are
/// tightly packed, `components × bytes_per_component` bytes per pixel,
/// in the image's stored channel order.
pub struct RasterFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub components: u32,
    pub bytes_per_component: u32,
    pub pixels: &'a [u8],
}

/// The host raster codec.
pub trait RasterCodec {
    /// Decodes one image from `io`.
    fn decode(&mut self, io: &mut dyn RasterIo) -> FormatResult<DecodedRaster>;

    /// Encodes `frame` as `format` into `io`. `quality` applies to JPG
    /// only; codecs ignore it elsewhere.
    fn encode(
        &mut self,
        format: FileFormat,
        quality: i32,
        frame: &RasterFrame<'_>,
        io: &mut dyn RasterIo,
    ) -> FormatResult<()>;
}

/// [`RasterIo`] over an in-memory input slice and an output vector.
pub struct MemoryIo<'a> {
    input: &'a [u8],
    position: usize,
    output: Vec<u8>,
}

impl<'a> MemoryIo<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            output: Vec::new(),
        }
    }

    /// Everything written through [`RasterIo::write`].
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl RasterIo for MemoryIo<'_> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.input.len() - self.position);
        buf[..n].copy_from_slice(&self.input[self.position..self.position + n]);
        self.position += n;
        n
    }

    fn skip(&mut self, n: i64) {
        let target = self.position as i64 + n;
        self.position = target.clamp(0, self.input.len() as i64) as usize;
    }

    fn eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn write(&mut self, buf: &[u8]) {
        self.output.extend_from_slice(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_io_reads_skips_and_writes() {
        let input = [1u8, 2, 3, 4, 5];
        let mut io = MemoryIo::new(&input);

        let mut buf = [0u8; 2];
        assert_eq!(io.read(&mut buf), 2);
        assert_eq!(buf, [1, 2]);
        assert!(!io.eof());

        io.skip(2);
        assert_eq!(io.read(&mut buf), 1);
        assert_eq!(buf[0], 5);
        assert!(io.eof());

        io.skip(-100);
        assert!(!io.eof());

        io.write(&[9, 9]);
        assert_eq!(io.into_output(), [9, 9]);
    }
}
