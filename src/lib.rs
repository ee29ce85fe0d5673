//! Zero-copy DDS and KTX texture container parsing.
//!
//! Parses byte data according to the
//! [DDS programming guide](https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dx-graphics-dds-pguide)
//! and the
//! [KTX 1 specification](https://registry.khronos.org/KTX/specs/1.0/ktxspec.v1.html),
//! producing a [`TextureInfo`] descriptor plus zero-copy [`SubImage`] views
//! into the GPU-ready payload. Nothing is decoded and nothing is allocated;
//! the input buffer is borrowed throughout.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), gputex::ParseError> {
//! // A 2x2 RGBA8 DDS built in memory: magic, 124-byte header, 16 payload bytes.
//! let mut file = Vec::from(*b"DDS ");
//! let mut header = [0u32; 31];
//! header[0] = 124;                    // header size
//! header[1] = 0x1 | 0x2 | 0x4 | 0x1000; // caps | height | width | pixelformat
//! header[2] = 2;                      // height
//! header[3] = 2;                      // width
//! header[18] = 32;                    // pixel format size
//! header[19] = 0x40 | 0x1;            // rgb | alphapixels
//! header[21] = 32;                    // bits per pixel
//! header[22..26].copy_from_slice(&[0xff, 0xff00, 0xff_0000, 0xff00_0000]);
//! header[26] = 0x1000;                // caps1: texture
//! for word in header {
//!     file.extend_from_slice(&word.to_le_bytes());
//! }
//! file.extend_from_slice(&[0u8; 16]);
//!
//! let info = gputex::parse(&file)?;
//! assert_eq!(info.format, gputex::Format::Rgba8);
//! assert_eq!((info.width, info.height), (2, 2));
//!
//! let base = info.sub_image(&file, 0, 0, 0);
//! assert_eq!(base.row_pitch, 8);
//! assert_eq!(base.data.len(), 16);
//! # Ok(()) }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::cast_lossless)]

mod dds;
pub mod error;
pub mod format;
mod ktx;
mod reader;
pub mod texture;

pub use error::{ParseError, Result};
pub use format::{BlockInfo, Encoding, Format};
pub use texture::{Source, SubImage, TextureInfo};

use reader::ByteReader;

/// Parses a texture container, dispatching on the 4-byte magic.
///
/// Accepts DDS (`"DDS "`) and KTX version 1 (`0xAB "KTX"`); anything else,
/// including a buffer shorter than the magic, is [`ParseError::UnknownMagic`].
pub fn parse(data: &[u8]) -> Result<TextureInfo> {
    let mut magic = [0u8; 4];
    if ByteReader::new(data).read(&mut magic) != magic.len() {
        return Err(ParseError::UnknownMagic);
    }
    match magic {
        dds::MAGIC => dds::parse(data),
        ktx::MAGIC => ktx::parse(data),
        _ => Err(ParseError::UnknownMagic),
    }
}
