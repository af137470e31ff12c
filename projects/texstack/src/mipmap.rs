//! Box-filter mipmap synthesis.

use crate::error::{ConvertError, ImageResult};
use crate::image::Image;
use crate::image_desc::{ConstructionOrder, ImageDesc, PlaneCoord};
use crate::pixel::Float4;
use crate::plane::PlaneDesc;
use alloc::vec::Vec;

impl PlaneDesc {
    /// Builds a new image holding this plane plus a mipmap chain.
    ///
    /// `pixels` is the buffer this plane addresses into (its `offset`
    /// and spacing apply). The result has default spacing; the base
    /// level is re-encoded from the source, each further level is the
    /// box average of the previous one. `max_levels` of zero means the
    /// full chain. Block formats have no per-pixel path and are
    /// rejected.
    pub fn generate_mipmaps(&self, pixels: &[u8], max_levels: u32) -> ImageResult<Image> {
        let ld = self.format.layout_desc();
        if ld.block_width != 1 || ld.block_height != 1 {
            return Err(ConvertError::CompressedFormat.into());
        }

        let base = PlaneDesc::new(self.format, self.extent);
        let desc = ImageDesc::make(
            base,
            1,
            1,
            max_levels,
            ConstructionOrder::FaceMajor,
            base.alignment,
        );
        let mut image = Image::new(desc)?;

        // Base level: re-encode through float4 so source step/pitch
        // padding is dropped.
        let base_pixels = self.to_float4(pixels)?;
        write_level(&mut image, 0, &base_pixels)?;

        // Each level sources the level just written, so quantization
        // carries down the chain.
        for level in 1..image.desc().levels as usize {
            let src = *image.desc().plane(PlaneCoord::new(0, 0, level - 1));
            let dst = *image.desc().plane(PlaneCoord::new(0, 0, level));
            let src_pixels = src.to_float4(image.data())?;
            let reduced = box_reduce(&src, &src_pixels, &dst);
            write_level(&mut image, level, &reduced)?;
        }

        Ok(image)
    }
}

fn write_level(image: &mut Image, level: usize, pixels: &[Float4]) -> ImageResult<()> {
    let plane = *image.desc().plane(PlaneCoord::new(0, 0, level));
    let per_slice = (plane.extent.w * plane.extent.h) as usize;
    for z in 0..plane.extent.d {
        plane.from_float4(
            image.data_mut(),
            z,
            &pixels[z as usize * per_slice..][..per_slice],
        )?;
    }
    Ok(())
}

/// Averages `src` (laid out `(z, y, x)` row-major for `src_desc`'s
/// extent) down to `dst_desc`'s extent. Each destination pixel averages
/// the `sx × sy × sz` source pixels starting at `(x·sx, y·sy, z·sz)`.
fn box_reduce(src_desc: &PlaneDesc, src: &[Float4], dst_desc: &PlaneDesc) -> Vec<Float4> {
    let (sw, sh) = (src_desc.extent.w, src_desc.extent.h);
    let (dw, dh, dd) = (
        dst_desc.extent.w,
        dst_desc.extent.h,
        dst_desc.extent.d,
    );
    let rx = src_desc.extent.w / dw;
    let ry = src_desc.extent.h / dh;
    let rz = src_desc.extent.d / dd;
    let scale = 1.0 / (rx * ry * rz) as f32;

    let mut out = Vec::with_capacity((dw * dh * dd) as usize);
    for z in 0..dd {
        for y in 0..dh {
            for x in 0..dw {
                let mut acc = Float4::default();
                for bz in 0..rz {
                    for by in 0..ry {
                        for bx in 0..rx {
                            let sz = z * rz + bz;
                            let sy = y * ry + by;
                            let sx = x * rx + bx;
                            acc += src[((sz * sh + sy) * sw + sx) as usize];
                        }
                    }
                }
                acc *= scale;
                out.push(acc);
            }
        }
    }
    out
}
