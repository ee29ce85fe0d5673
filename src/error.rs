//! Parse failure reporting.

use thiserror::Error;

/// Result alias used by the container parsers.
pub type Result<T> = core::result::Result<T, ParseError>;

/// All ways a texture container can fail to parse.
///
/// Every failure is terminal: on `Err` no descriptor escapes. The `Display`
/// strings are the crate's single textual error channel; callers that need
/// to distinguish conditions programmatically match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first four bytes match neither container magic.
    #[error("unknown texture format")]
    UnknownMagic,
    /// Fewer than 124 header bytes readable, or the header size field
    /// disagrees with the fixed DDS header length.
    #[error("dds: header size must be 124")]
    DdsHeaderSize,
    /// The CAPS/HEIGHT/WIDTH/PIXELFORMAT bits are not all set.
    #[error("dds: invalid header flags")]
    DdsInvalidFlags,
    /// The pixel-format sub-header size field is not 32.
    #[error("dds: invalid pixel format")]
    DdsInvalidPixelFormat,
    /// The caps word does not mark the surface as a texture.
    #[error("dds: unsupported caps")]
    DdsUnsupportedCaps,
    /// The cubemap bit is set without all six face bits.
    #[error("dds: incomplete cubemap")]
    DdsIncompleteCubemap,
    /// No translation table recognizes the pixel format.
    #[error("dds: unknown format")]
    DdsUnknownFormat,
    /// The buffer ends inside the KTX header.
    #[error("ktx: invalid header size")]
    KtxHeaderSize,
    /// The twelve identifier bytes do not match.
    #[error("ktx: invalid identifier")]
    KtxInvalidId,
    /// The endianness marker is not the big-endian reference value.
    #[error("ktx: little-endian files are not supported")]
    KtxEndianUnsupported,
    /// The face count is neither 1 nor 6.
    #[error("ktx: incomplete cubemap")]
    KtxIncompleteCubemap,
    /// The GL internal format resolves through neither KTX table.
    #[error("ktx: unsupported format")]
    KtxUnsupportedFormat,
    /// Cubemap faces and volume depth cannot both be present.
    #[error("cubemap texture with depth > 1")]
    CubemapWithDepth,
}
