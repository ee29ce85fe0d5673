//! Canonical texture formats and the static translation tables.
//!
//! Every container-specific identifier (DDS FourCC tags, DXGI numeric ids,
//! DDS RGB bit-mask tuples, KTX GL internal-format enums) funnels into one
//! [`Format`] enumeration here. The tables are short module-level statics
//! scanned linearly; a parse consults each at most once, and row order
//! encodes preference (first match wins).

/// Canonical texture format.
///
/// Declaration order is significant: all block-compressed formats precede
/// all uncompressed ones, so [`Format::is_compressed`] is a single ordinal
/// comparison against the partition boundary at [`Format::A8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Format {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6h,
    Bc7,
    Etc1,
    Etc2,
    Etc2a,
    Etc2a1,
    Ptc12,
    Ptc14,
    Ptc12a,
    Ptc14a,
    Ptc22,
    Ptc24,
    Atc,
    Atce,
    Atci,
    Astc4x4,
    Astc5x5,
    Astc6x6,
    Astc8x5,
    Astc8x6,
    Astc10x5,
    // -- uncompressed from here on --
    A8,
    R8,
    Rgba8,
    Rgba8s,
    Rg16,
    Rgb8,
    R16,
    R32f,
    R16f,
    Rg16f,
    Rg16s,
    Rgba16f,
    Rgba16,
    Bgra8,
    Rgb10a2,
    Rg11b10f,
    Rg8,
    Rg8s,
}

/// How the channel values of a format are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Unsigned normalized.
    Unorm,
    /// Signed normalized.
    Snorm,
    /// Floating point.
    Float,
    /// Signed integer.
    Sint,
    /// Unsigned integer.
    Uint,
}

/// Block geometry and channel layout of a [`Format`].
///
/// For uncompressed formats the block is a single texel. For compressed
/// formats the channel bit widths are zero; the texels only exist after
/// block decoding, which is outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Bits per texel, averaged over a block.
    pub bpp: u8,
    /// Block width in texels.
    pub block_width: u8,
    /// Block height in texels.
    pub block_height: u8,
    /// Encoded block size in bytes.
    pub block_size: u8,
    /// Minimum block count in x imposed by the format.
    pub min_block_x: u8,
    /// Minimum block count in y imposed by the format.
    pub min_block_y: u8,
    /// Red/green/blue/alpha bit widths (uncompressed formats only).
    pub r_bits: u8,
    pub g_bits: u8,
    pub b_bits: u8,
    pub a_bits: u8,
    /// Depth/stencil bit widths; zero for every color format here.
    pub depth_bits: u8,
    pub stencil_bits: u8,
    /// Channel encoding.
    pub encoding: Encoding,
}

const fn block(bpp: u8, bw: u8, bh: u8, size: u8, min_x: u8, min_y: u8, encoding: Encoding) -> BlockInfo {
    BlockInfo {
        bpp,
        block_width: bw,
        block_height: bh,
        block_size: size,
        min_block_x: min_x,
        min_block_y: min_y,
        r_bits: 0,
        g_bits: 0,
        b_bits: 0,
        a_bits: 0,
        depth_bits: 0,
        stencil_bits: 0,
        encoding,
    }
}

const fn pixel(bpp: u8, r: u8, g: u8, b: u8, a: u8, encoding: Encoding) -> BlockInfo {
    BlockInfo {
        bpp,
        block_width: 1,
        block_height: 1,
        block_size: bpp / 8,
        min_block_x: 1,
        min_block_y: 1,
        r_bits: r,
        g_bits: g,
        b_bits: b,
        a_bits: a,
        depth_bits: 0,
        stencil_bits: 0,
        encoding,
    }
}

/// Block geometry table, indexed by format ordinal.
///
/// ASTC blocks are 16 bytes regardless of footprint, so the non-square rows
/// carry the nearest integer bpp; size arithmetic always goes through the
/// block columns, never through bpp.
static BLOCK_INFO: [BlockInfo; 44] = [
    block(4, 4, 4, 8, 1, 1, Encoding::Unorm),   // BC1
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // BC2
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // BC3
    block(4, 4, 4, 8, 1, 1, Encoding::Unorm),   // BC4
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // BC5
    block(8, 4, 4, 16, 1, 1, Encoding::Float),  // BC6H
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // BC7
    block(4, 4, 4, 8, 1, 1, Encoding::Unorm),   // ETC1
    block(4, 4, 4, 8, 1, 1, Encoding::Unorm),   // ETC2
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // ETC2A
    block(4, 4, 4, 8, 1, 1, Encoding::Unorm),   // ETC2A1
    block(2, 8, 4, 8, 2, 2, Encoding::Unorm),   // PTC12
    block(4, 4, 4, 8, 2, 2, Encoding::Unorm),   // PTC14
    block(2, 8, 4, 8, 2, 2, Encoding::Unorm),   // PTC12A
    block(4, 4, 4, 8, 2, 2, Encoding::Unorm),   // PTC14A
    block(2, 8, 4, 8, 2, 2, Encoding::Unorm),   // PTC22
    block(4, 4, 4, 8, 2, 2, Encoding::Unorm),   // PTC24
    block(4, 4, 4, 8, 1, 1, Encoding::Unorm),   // ATC
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // ATCE
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // ATCI
    block(8, 4, 4, 16, 1, 1, Encoding::Unorm),  // ASTC4x4
    block(6, 5, 5, 16, 1, 1, Encoding::Unorm),  // ASTC5x5
    block(4, 6, 6, 16, 1, 1, Encoding::Unorm),  // ASTC6x6
    block(4, 8, 5, 16, 1, 1, Encoding::Unorm),  // ASTC8x5
    block(3, 8, 6, 16, 1, 1, Encoding::Unorm),  // ASTC8x6
    block(3, 10, 5, 16, 1, 1, Encoding::Unorm), // ASTC10x5
    pixel(8, 0, 0, 0, 8, Encoding::Unorm),      // A8
    pixel(8, 8, 0, 0, 0, Encoding::Unorm),      // R8
    pixel(32, 8, 8, 8, 8, Encoding::Unorm),     // RGBA8
    pixel(32, 8, 8, 8, 8, Encoding::Snorm),     // RGBA8S
    pixel(32, 16, 16, 0, 0, Encoding::Unorm),   // RG16
    pixel(24, 8, 8, 8, 0, Encoding::Unorm),     // RGB8
    pixel(16, 16, 0, 0, 0, Encoding::Unorm),    // R16
    pixel(32, 32, 0, 0, 0, Encoding::Float),    // R32F
    pixel(16, 16, 0, 0, 0, Encoding::Float),    // R16F
    pixel(32, 16, 16, 0, 0, Encoding::Float),   // RG16F
    pixel(32, 16, 16, 0, 0, Encoding::Snorm),   // RG16S
    pixel(64, 16, 16, 16, 16, Encoding::Float), // RGBA16F
    pixel(64, 16, 16, 16, 16, Encoding::Unorm), // RGBA16
    pixel(32, 8, 8, 8, 8, Encoding::Unorm),     // BGRA8
    pixel(32, 10, 10, 10, 2, Encoding::Unorm),  // RGB10A2
    pixel(32, 11, 11, 10, 0, Encoding::Float),  // RG11B10F
    pixel(16, 8, 8, 0, 0, Encoding::Unorm),     // RG8
    pixel(16, 8, 8, 0, 0, Encoding::Snorm),     // RG8S
];

/// Display name and default alpha presence, indexed by format ordinal.
///
/// The alpha column only matters for containers that do not carry their own
/// alpha signal (KTX); DDS reports alpha from its pixel-format flags.
static FORMAT_INFO: [(&str, bool); 44] = [
    ("BC1", false),
    ("BC2", true),
    ("BC3", true),
    ("BC4", false),
    ("BC5", false),
    ("BC6H", false),
    ("BC7", true),
    ("ETC1", false),
    ("ETC2", false),
    ("ETC2A", true),
    ("ETC2A1", true),
    ("PTC12", false),
    ("PTC14", false),
    ("PTC12A", true),
    ("PTC14A", true),
    ("PTC22", true),
    ("PTC24", true),
    ("ATC", false),
    ("ATCE", true),
    ("ATCI", true),
    ("ASTC4x4", true),
    ("ASTC5x5", true),
    ("ASTC6x6", true),
    ("ASTC8x5", true),
    ("ASTC8x6", true),
    ("ASTC10x5", true),
    ("A8", true),
    ("R8", false),
    ("RGBA8", true),
    ("RGBA8S", true),
    ("RG16", false),
    ("RGB8", false),
    ("R16", false),
    ("R32F", false),
    ("R16F", false),
    ("RG16F", false),
    ("RG16S", false),
    ("RGBA16F", true),
    ("RGBA16", true),
    ("BGRA8", true),
    ("RGB10A2", true),
    ("RG11B10F", false),
    ("RG8", false),
    ("RG8S", false),
];

impl Format {
    /// Short ASCII display name, e.g. `"BC3"` or `"RGBA16F"`.
    pub fn name(self) -> &'static str {
        FORMAT_INFO[self as usize].0
    }

    /// Whether this is a block-compressed format.
    pub fn is_compressed(self) -> bool {
        (self as u32) < (Format::A8 as u32)
    }

    /// Block geometry and channel layout.
    pub fn block_info(self) -> &'static BlockInfo {
        &BLOCK_INFO[self as usize]
    }

    /// Whether the format carries an alpha channel by default.
    pub(crate) fn default_alpha(self) -> bool {
        FORMAT_INFO[self as usize].1
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A FourCC tag as it appears in the DDS pixel-format header, little-endian.
pub(crate) const fn fourcc(tag: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*tag)
}

// FourCC values that are not ASCII tags: legacy D3DFMT codes smuggled
// through the FourCC field by old exporters.
const D3DFMT_A16B16G16R16: u32 = 36;
const D3DFMT_R16F: u32 = 111;
const D3DFMT_G16R16F: u32 = 112;
const D3DFMT_A16B16G16R16F: u32 = 113;
const D3DFMT_R32F: u32 = 114;

/// DDS FourCC translation. This path never yields sRGB; only the DXGI
/// table can.
static DDS_FOURCC: &[(u32, Format)] = &[
    (fourcc(b"DXT1"), Format::Bc1),
    (fourcc(b"DXT2"), Format::Bc2),
    (fourcc(b"DXT3"), Format::Bc2),
    (fourcc(b"DXT4"), Format::Bc3),
    (fourcc(b"DXT5"), Format::Bc3),
    (fourcc(b"ATI1"), Format::Bc4),
    (fourcc(b"BC4U"), Format::Bc4),
    (fourcc(b"ATI2"), Format::Bc5),
    (fourcc(b"BC5U"), Format::Bc5),
    (D3DFMT_A16B16G16R16, Format::Rgba16),
    (D3DFMT_A16B16G16R16F, Format::Rgba16f),
    (D3DFMT_R16F, Format::R16f),
    (D3DFMT_G16R16F, Format::Rg16f),
    (D3DFMT_R32F, Format::R32f),
];

/// DXGI numeric id translation: `(id, format, srgb)`.
static DDS_DXGI: &[(u32, Format, bool)] = &[
    (71, Format::Bc1, false),
    (72, Format::Bc1, true),
    (74, Format::Bc2, false),
    (75, Format::Bc2, true),
    (77, Format::Bc3, false),
    (78, Format::Bc3, true),
    (80, Format::Bc4, false),
    (83, Format::Bc5, false),
    (95, Format::Bc6h, false),
    (98, Format::Bc7, false),
    (99, Format::Bc7, true),
    (65, Format::A8, false),
    (61, Format::R8, false),
    (28, Format::Rgba8, false),
    (29, Format::Rgba8, true),
    (31, Format::Rgba8s, false),
    (35, Format::Rg16, false),
    (56, Format::R16, false),
    (41, Format::R32f, false),
    (54, Format::R16f, false),
    (34, Format::Rg16f, false),
    (37, Format::Rg16s, false),
    (10, Format::Rgba16f, false),
    (11, Format::Rgba16, false),
    (87, Format::Bgra8, false),
    (91, Format::Bgra8, true),
    (24, Format::Rgb10a2, false),
    (26, Format::Rg11b10f, false),
    (49, Format::Rg8, false),
    (51, Format::Rg8s, false),
];

// DDS pixel-format flag bits.
pub(crate) const DDPF_ALPHAPIXELS: u32 = 0x1;
pub(crate) const DDPF_ALPHA: u32 = 0x2;
pub(crate) const DDPF_FOURCC: u32 = 0x4;
pub(crate) const DDPF_RGB: u32 = 0x40;
pub(crate) const DDPF_LUMINANCE: u32 = 0x2_0000;
pub(crate) const DDPF_BUMPDUDV: u32 = 0x8_0000;

/// Legacy DDS pixel-format translation: `(bit count, flags, rgba masks)`.
/// Rows match by simultaneous equality on all six fields.
static DDS_PIXEL_FORMATS: &[(u32, u32, [u32; 4], Format)] = &[
    (
        32,
        DDPF_RGB | DDPF_ALPHAPIXELS,
        [0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0xff00_0000],
        Format::Rgba8,
    ),
    (
        32,
        DDPF_RGB | DDPF_ALPHAPIXELS,
        [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000],
        Format::Bgra8,
    ),
    (
        32,
        DDPF_RGB | DDPF_ALPHAPIXELS,
        [0x0000_03ff, 0x000f_fc00, 0x3ff0_0000, 0xc000_0000],
        Format::Rgb10a2,
    ),
    (32, DDPF_RGB, [0x0000_ffff, 0xffff_0000, 0, 0], Format::Rg16),
    (
        32,
        DDPF_BUMPDUDV,
        [0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0xff00_0000],
        Format::Rgba8s,
    ),
    (24, DDPF_RGB, [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0], Format::Rgb8),
    (24, DDPF_RGB, [0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0], Format::Rgb8),
    (16, DDPF_RGB, [0x0000_ffff, 0, 0, 0], Format::R16),
    (16, DDPF_LUMINANCE, [0x0000_ffff, 0, 0, 0], Format::R16),
    (16, DDPF_RGB, [0x0000_00ff, 0x0000_ff00, 0, 0], Format::Rg8),
    (16, DDPF_BUMPDUDV, [0x0000_00ff, 0x0000_ff00, 0, 0], Format::Rg8s),
    (8, DDPF_LUMINANCE, [0x0000_00ff, 0, 0, 0], Format::R8),
    (8, DDPF_ALPHA, [0, 0, 0, 0x0000_00ff], Format::A8),
];

/// KTX GL internal-format translation, one row per canonical format.
static KTX_INTERNAL: &[(u32, Format)] = &[
    (0x83F1, Format::Bc1),     // COMPRESSED_RGBA_S3TC_DXT1
    (0x83F2, Format::Bc2),     // COMPRESSED_RGBA_S3TC_DXT3
    (0x83F3, Format::Bc3),     // COMPRESSED_RGBA_S3TC_DXT5
    (0x8DBB, Format::Bc4),     // COMPRESSED_RED_RGTC1
    (0x8DBD, Format::Bc5),     // COMPRESSED_RG_RGTC2
    (0x8E8F, Format::Bc6h),    // COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT
    (0x8E8C, Format::Bc7),     // COMPRESSED_RGBA_BPTC_UNORM
    (0x8D64, Format::Etc1),    // ETC1_RGB8_OES
    (0x9274, Format::Etc2),    // COMPRESSED_RGB8_ETC2
    (0x9278, Format::Etc2a),   // COMPRESSED_RGBA8_ETC2_EAC
    (0x9276, Format::Etc2a1),  // COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2
    (0x8C01, Format::Ptc12),   // COMPRESSED_RGB_PVRTC_2BPPV1_IMG
    (0x8C00, Format::Ptc14),   // COMPRESSED_RGB_PVRTC_4BPPV1_IMG
    (0x8C03, Format::Ptc12a),  // COMPRESSED_RGBA_PVRTC_2BPPV1_IMG
    (0x8C02, Format::Ptc14a),  // COMPRESSED_RGBA_PVRTC_4BPPV1_IMG
    (0x9137, Format::Ptc22),   // COMPRESSED_RGBA_PVRTC_2BPPV2_IMG
    (0x9138, Format::Ptc24),   // COMPRESSED_RGBA_PVRTC_4BPPV2_IMG
    (0x8C92, Format::Atc),     // ATC_RGB_AMD
    (0x8C93, Format::Atce),    // ATC_RGBA_EXPLICIT_ALPHA_AMD
    (0x87EE, Format::Atci),    // ATC_RGBA_INTERPOLATED_ALPHA_AMD
    (0x93B0, Format::Astc4x4), // COMPRESSED_RGBA_ASTC_4x4
    (0x93B2, Format::Astc5x5), // COMPRESSED_RGBA_ASTC_5x5
    (0x93B4, Format::Astc6x6), // COMPRESSED_RGBA_ASTC_6x6
    (0x93B5, Format::Astc8x5), // COMPRESSED_RGBA_ASTC_8x5
    (0x93B6, Format::Astc8x6), // COMPRESSED_RGBA_ASTC_8x6
    (0x93B8, Format::Astc10x5), // COMPRESSED_RGBA_ASTC_10x5
    (0x803C, Format::A8),      // ALPHA8
    (0x8229, Format::R8),      // R8
    (0x8058, Format::Rgba8),   // RGBA8
    (0x8F97, Format::Rgba8s),  // RGBA8_SNORM
    (0x822C, Format::Rg16),    // RG16
    (0x8051, Format::Rgb8),    // RGB8
    (0x822A, Format::R16),     // R16
    (0x822E, Format::R32f),    // R32F
    (0x822D, Format::R16f),    // R16F
    (0x822F, Format::Rg16f),   // RG16F
    (0x8F99, Format::Rg16s),   // RG16_SNORM
    (0x881A, Format::Rgba16f), // RGBA16F
    (0x805B, Format::Rgba16),  // RGBA16
    (0x93A1, Format::Bgra8),   // BGRA8_EXT
    (0x8059, Format::Rgb10a2), // RGB10_A2
    (0x8C3A, Format::Rg11b10f), // R11F_G11F_B10F
    (0x822B, Format::Rg8),     // RG8
    (0x8F95, Format::Rg8s),    // RG8_SNORM
];

/// Fallback for files that store a generic (unsized) GL enum instead of a
/// sized internal format.
static KTX_INTERNAL_FALLBACK: &[(u32, Format)] = &[
    (0x1906, Format::A8),    // ALPHA
    (0x1903, Format::R8),    // RED
    (0x1907, Format::Rgb8),  // RGB
    (0x1908, Format::Rgba8), // RGBA
    (0x83F0, Format::Bc1),   // COMPRESSED_RGB_S3TC_DXT1
];

pub(crate) fn from_dds_fourcc(cc: u32) -> Option<Format> {
    DDS_FOURCC.iter().find(|&&(tag, _)| tag == cc).map(|&(_, f)| f)
}

pub(crate) fn from_dds_dxgi(id: u32) -> Option<(Format, bool)> {
    DDS_DXGI
        .iter()
        .find(|&&(dxgi, _, _)| dxgi == id)
        .map(|&(_, f, srgb)| (f, srgb))
}

pub(crate) fn from_dds_pixel_format(bit_count: u32, flags: u32, masks: [u32; 4]) -> Option<Format> {
    DDS_PIXEL_FORMATS
        .iter()
        .find(|&&(bits, fl, m, _)| bits == bit_count && fl == flags && m == masks)
        .map(|&(_, _, _, f)| f)
}

pub(crate) fn from_ktx_internal(gl_internal_format: u32) -> Option<Format> {
    KTX_INTERNAL
        .iter()
        .chain(KTX_INTERNAL_FALLBACK)
        .find(|&&(gl, _)| gl == gl_internal_format)
        .map(|&(_, f)| f)
}
