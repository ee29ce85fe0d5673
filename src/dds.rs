//! DirectDraw Surface container parsing.
//!
//! Layout on disk, all integers little-endian:
//! ```text
//! [0x00] Magic "DDS "                        (4 bytes)
//! [0x04] Header                              (124 bytes, 31 dwords)
//!        size, flags, height, width, pitch-or-linear-size, depth,
//!        mip count, 11 reserved dwords,
//!        pixel format: size, flags, fourcc, bit count, 4 channel masks,
//!        caps1..caps4, 1 reserved dword
//! [0x80] DX10 extension, only when fourcc == "DX10" (20 bytes)
//!        dxgi format, dimension, misc flags, array size, misc flags2
//! [...]  Pixel payload
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{ParseError, Result};
use crate::format::{self, DDPF_ALPHA, DDPF_ALPHAPIXELS, DDPF_FOURCC};
use crate::reader::ByteReader;
use crate::texture::{Source, TextureInfo};

pub(crate) const MAGIC: [u8; 4] = *b"DDS ";

const HEADER_SIZE: usize = 124;
const DX10_HEADER_SIZE: usize = 20;
const PIXEL_FORMAT_SIZE: u32 = 32;

// Header flag bits. The four required ones must be present in every file.
const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_REQUIRED: u32 = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT;

// Caps bits.
const DDSCAPS_TEXTURE: u32 = 0x1000;
const DDSCAPS_MIPMAP: u32 = 0x40_0000;
const DDSCAPS2_CUBEMAP: u32 = 0x200;
// +X -X +Y -Y +Z -Z face bits; partial cubemaps are rejected.
const DDSCAPS2_ALL_FACES: u32 = 0xfc00;

/// Parses a complete DDS byte buffer. The caller has already matched the
/// magic; everything after it is validated here.
pub(crate) fn parse(data: &[u8]) -> Result<TextureInfo> {
    let mut reader = ByteReader::new(data);
    let mut magic = [0u8; 4];
    reader.read(&mut magic);

    let mut header = [0u8; HEADER_SIZE];
    if reader.read(&mut header) != HEADER_SIZE {
        return Err(ParseError::DdsHeaderSize);
    }
    let mut words = [0u32; HEADER_SIZE / 4];
    LittleEndian::read_u32_into(&header, &mut words);

    let size = words[0];
    let flags = words[1];
    let height = words[2];
    let width = words[3];
    let depth = words[5];
    let mip_count = words[6];
    // words[7..18] are reserved
    let pf_size = words[18];
    let pf_flags = words[19];
    let pf_fourcc = words[20];
    let pf_bit_count = words[21];
    let pf_masks = [words[22], words[23], words[24], words[25]];
    let caps1 = words[26];
    let caps2 = words[27];

    if size as usize != HEADER_SIZE {
        return Err(ParseError::DdsHeaderSize);
    }
    if flags & DDSD_REQUIRED != DDSD_REQUIRED {
        return Err(ParseError::DdsInvalidFlags);
    }
    if pf_size != PIXEL_FORMAT_SIZE {
        return Err(ParseError::DdsInvalidPixelFormat);
    }
    if caps1 & DDSCAPS_TEXTURE == 0 {
        return Err(ParseError::DdsUnsupportedCaps);
    }

    let cubemap = caps2 & DDSCAPS2_CUBEMAP != 0;
    if cubemap && caps2 & DDSCAPS2_ALL_FACES != DDSCAPS2_ALL_FACES {
        return Err(ParseError::DdsIncompleteCubemap);
    }
    if cubemap && depth > 1 {
        return Err(ParseError::CubemapWithDepth);
    }

    let mut layers = 1;
    let mut dxgi = None;
    if pf_flags & DDPF_FOURCC != 0 && pf_fourcc == format::fourcc(b"DX10") {
        let mut ext = [0u8; DX10_HEADER_SIZE];
        if reader.read(&mut ext) != DX10_HEADER_SIZE {
            return Err(ParseError::DdsHeaderSize);
        }
        let mut ext_words = [0u32; DX10_HEADER_SIZE / 4];
        LittleEndian::read_u32_into(&ext, &mut ext_words);
        dxgi = Some(ext_words[0]);
        layers = ext_words[3].max(1);
    }

    // Resolution order: DXGI id, then FourCC tag, then legacy bit masks.
    let (fmt, srgb) = match dxgi {
        Some(id) if id != 0 => format::from_dds_dxgi(id).ok_or(ParseError::DdsUnknownFormat)?,
        _ if pf_flags & DDPF_FOURCC != 0 => (
            format::from_dds_fourcc(pf_fourcc).ok_or(ParseError::DdsUnknownFormat)?,
            false,
        ),
        _ => (
            format::from_dds_pixel_format(pf_bit_count, pf_flags, pf_masks)
                .ok_or(ParseError::DdsUnknownFormat)?,
            false,
        ),
    };

    let mips = if caps1 & DDSCAPS_MIPMAP != 0 { mip_count.max(1) } else { 1 };
    let data_offset = reader.offset();

    Ok(TextureInfo {
        data_offset,
        data_size: data.len() - data_offset,
        format: fmt,
        source: Source::Dds,
        cubemap,
        srgb,
        has_alpha: pf_flags & (DDPF_ALPHAPIXELS | DDPF_ALPHA) != 0,
        width: width.max(1),
        height: height.max(1),
        depth: depth.max(1),
        layers,
        mips,
        bpp: fmt.block_info().bpp as u32,
        kv_offset: 0,
        kv_size: 0,
    })
}
