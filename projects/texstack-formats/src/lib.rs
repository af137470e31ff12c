#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![no_std]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod dds;
pub mod detect;
pub mod error;
pub mod raster;
pub mod ril;
pub mod save;

#[cfg(feature = "std")]
pub mod file_io;

pub use detect::{load_from_memory, sniff, Container};
pub use error::*;
pub use raster::{DecodedRaster, RasterCodec, RasterIo};
pub use save::{FileFormat, SaveParams};

#[cfg(test)]
pub mod test_prelude;
