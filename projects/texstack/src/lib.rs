#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![no_std]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod allocate;
pub mod convert;
pub mod copy;
pub mod error;
pub mod image;
pub mod image_desc;
pub mod mipmap;
pub mod one_pixel;
pub mod pixel;
pub mod pixel_format;
pub mod plane;

pub use error::*;
pub use image::{Image, ImageView};
pub use image_desc::{ConstructionOrder, ImageDesc, PlaneCoord};
pub use one_pixel::OnePixel;
pub use pixel::{Float4, Rgba8};
pub use pixel_format::{ChannelDesc, Layout, LayoutDesc, PixelFormat, Sign, Swizzle};
pub use plane::{Extent3D, PlaneDesc};
