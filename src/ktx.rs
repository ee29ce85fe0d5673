//! Khronos Texture (KTX version 1) container parsing.
//!
//! Layout on disk:
//! ```text
//! [0x00] Identifier 0xAB "KTX 11" 0xBB \r \n 0x1A \n   (12 bytes)
//! [0x0C] Header, 13 big-endian dwords                  (52 bytes)
//!        endianness, gl type, gl type size, gl format, gl internal format,
//!        gl base internal format, width, height, depth, array elements,
//!        faces, mip levels, key/value byte count
//! [0x40] Key/value data                                (recorded, not parsed)
//! [...]  Per mip level: 4-byte image size, then the packed
//!        layer/face/slice data with 4-byte face and mip padding
//! ```
//!
//! Only big-endian files are accepted; the payload of a little-endian file
//! would need word swapping, which this crate does not do.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{ParseError, Result};
use crate::format;
use crate::reader::ByteReader;
use crate::texture::{Source, TextureInfo};

pub(crate) const MAGIC: [u8; 4] = [0xAB, 0x4B, 0x54, 0x58];

// Identifier bytes after the dispatch magic: " 11" 0xBB \r \n 0x1A \n.
const IDENTIFIER_TAIL: [u8; 8] = [0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A];

const HEADER_SIZE: usize = 52;

/// The endianness word decodes to this when the file matches the big-endian
/// reference layout.
const ENDIAN_REF: u32 = 0x0403_0201;

/// Parses a complete KTX byte buffer. The caller has already matched the
/// first four identifier bytes.
pub(crate) fn parse(data: &[u8]) -> Result<TextureInfo> {
    let mut reader = ByteReader::new(data);
    let mut magic = [0u8; 4];
    reader.read(&mut magic);

    let mut id_tail = [0u8; 8];
    if reader.read(&mut id_tail) != 8 {
        return Err(ParseError::KtxHeaderSize);
    }
    if id_tail != IDENTIFIER_TAIL {
        return Err(ParseError::KtxInvalidId);
    }

    let mut header = [0u8; HEADER_SIZE];
    if reader.read(&mut header) != HEADER_SIZE {
        return Err(ParseError::KtxHeaderSize);
    }
    let mut words = [0u32; HEADER_SIZE / 4];
    BigEndian::read_u32_into(&header, &mut words);

    if words[0] != ENDIAN_REF {
        return Err(ParseError::KtxEndianUnsupported);
    }
    let gl_internal_format = words[4];
    let width = words[6].max(1);
    let height = words[7].max(1);
    let depth = words[8].max(1);
    let layers = words[9].max(1);
    let faces = words[10];
    let mips = words[11].max(1);
    let kv_size = words[12] as usize;

    if faces != 1 && faces != 6 {
        return Err(ParseError::KtxIncompleteCubemap);
    }
    let cubemap = faces == 6;
    if cubemap && depth > 1 {
        return Err(ParseError::CubemapWithDepth);
    }

    let fmt =
        format::from_ktx_internal(gl_internal_format).ok_or(ParseError::KtxUnsupportedFormat)?;

    let kv_offset = reader.offset();
    let data_offset = kv_offset
        .checked_add(kv_size)
        .ok_or(ParseError::KtxHeaderSize)?;
    let data_size = data
        .len()
        .checked_sub(data_offset)
        .ok_or(ParseError::KtxHeaderSize)?;

    Ok(TextureInfo {
        data_offset,
        data_size,
        format: fmt,
        source: Source::Ktx,
        cubemap,
        srgb: false,
        has_alpha: fmt.default_alpha(),
        width,
        height,
        depth,
        layers,
        mips,
        bpp: fmt.block_info().bpp as u32,
        kv_offset,
        kv_size,
    })
}
