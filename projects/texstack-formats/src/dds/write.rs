//! DDS writing. Reserved; the entry point exists so save dispatch has a
//! stable surface, but no encoder is implemented yet.

use crate::error::{FormatError, FormatResult};
use alloc::vec::Vec;
use texstack::ImageView;

/// Encodes an image as DDS.
///
/// TODO: emit a DX10-extended header once a consumer needs DDS output;
/// until then this returns `NotImplemented`.
pub fn encode(_view: ImageView<'_>) -> FormatResult<Vec<u8>> {
    Err(FormatError::NotImplemented("DDS writing"))
}
