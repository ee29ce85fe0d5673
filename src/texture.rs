//! Texture descriptors and zero-copy sub-image access.

use byteorder::{BigEndian, ByteOrder};

use crate::format::Format;

/// Which container a descriptor was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Dds,
    Ktx,
}

/// Parsed description of the texture held in a container buffer.
///
/// A plain value type: parsing borrows the buffer only for the duration of
/// the call, and the descriptor records offsets rather than references.
/// Hand it the same buffer again to locate sub-images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Byte offset of the pixel payload within the buffer.
    pub data_offset: usize,
    /// Byte span from the payload start to the end of the buffer. For KTX
    /// this is the whole span including the interleaved per-mip image-size
    /// words and padding, not the sum of pixel bytes.
    pub data_size: usize,
    /// Canonical pixel format.
    pub format: Format,
    /// Originating container.
    pub source: Source,
    /// Six-faced cubemap. Mutually exclusive with `depth > 1`.
    pub cubemap: bool,
    /// Color data is sRGB-encoded. Only the DDS DXGI path can set this.
    pub srgb: bool,
    /// An alpha channel is present.
    pub has_alpha: bool,
    /// Base level width in texels, at least 1.
    pub width: u32,
    /// Base level height in texels, at least 1.
    pub height: u32,
    /// Depth in slices; greater than 1 means a 3D texture.
    pub depth: u32,
    /// Array layer count, at least 1.
    pub layers: u32,
    /// Mip level count, at least 1.
    pub mips: u32,
    /// Bits per texel, copied from the format's block info.
    pub bpp: u32,
    /// Byte offset of the KTX key/value block; 0 for DDS.
    pub kv_offset: usize,
    /// Byte length of the KTX key/value block; 0 for DDS.
    pub kv_size: usize,
}

/// One (layer, face or slice, mip) sub-image borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubImage<'a> {
    /// The encoded bytes of exactly this sub-image.
    pub data: &'a [u8],
    /// Width in texels, rounded up to the format's block multiple.
    pub width: u32,
    /// Height in texels, rounded up to the format's block multiple.
    pub height: u32,
    /// Byte size; equals `data.len()`.
    pub size: usize,
    /// Bytes per texel row, `width * bpp / 8`. Callers that need per-block
    /// pitch for compressed formats can derive it from the block info.
    pub row_pitch: u32,
}

struct MipLevel {
    width: u32,
    height: u32,
    size: usize,
}

/// Rounds one mip level's extent up to whole blocks and computes its byte
/// size. Inputs may have decayed to zero from repeated halving; the clamp
/// against the format's minimum block count restores the floor.
fn mip_level(format: Format, width: u32, height: u32) -> MipLevel {
    let b = format.block_info();
    let bw = b.block_width as u32;
    let bh = b.block_height as u32;
    let w = width.next_multiple_of(bw).max(b.min_block_x as u32 * bw);
    let h = height.next_multiple_of(bh).max(b.min_block_y as u32 * bh);
    let size = (w / bw) as usize * (h / bh) as usize * b.block_size as usize;
    MipLevel { width: w, height: h, size }
}

const fn align4(offset: usize) -> usize {
    (offset + 3) & !3
}

impl TextureInfo {
    /// Locates one sub-image in `data`, the same buffer this descriptor was
    /// parsed from, without touching unrelated bytes.
    ///
    /// `slice_or_face` selects the cubemap face (+X -X +Y -Y +Z -Z order)
    /// when [`cubemap`](Self::cubemap) is set, otherwise the depth slice.
    ///
    /// # Panics
    ///
    /// Out-of-range indices are programming errors and panic: `layer` must
    /// be below [`layers`](Self::layers), `mip` below [`mips`](Self::mips),
    /// and `slice_or_face` below 6 or [`depth`](Self::depth). Also panics
    /// if the buffer is shorter than the layout the descriptor promises.
    pub fn sub_image<'a>(
        &self,
        data: &'a [u8],
        layer: u32,
        slice_or_face: u32,
        mip: u32,
    ) -> SubImage<'a> {
        assert!(layer < self.layers, "layer {layer} out of range");
        assert!(mip < self.mips, "mip {mip} out of range");
        if self.cubemap {
            assert!(slice_or_face < 6, "face {slice_or_face} out of range");
        } else {
            assert!(slice_or_face < self.depth, "slice {slice_or_face} out of range");
        }

        match self.source {
            Source::Dds => self.sub_image_dds(data, layer, slice_or_face, mip),
            Source::Ktx => self.sub_image_ktx(data, layer, slice_or_face, mip),
        }
    }

    /// DDS payload order: layer, then face, then mip, then depth slice.
    fn sub_image_dds<'a>(
        &self,
        data: &'a [u8],
        layer: u32,
        slice_or_face: u32,
        mip: u32,
    ) -> SubImage<'a> {
        let faces = if self.cubemap { 6 } else { 1 };
        let (want_face, want_slice) =
            if self.cubemap { (slice_or_face, 0) } else { (0, slice_or_face) };

        let mut offset = self.data_offset;
        for l in 0..self.layers {
            for f in 0..faces {
                let mut w = self.width;
                let mut h = self.height;
                for m in 0..self.mips {
                    let level = mip_level(self.format, w, h);
                    for s in 0..self.depth {
                        if l == layer && f == want_face && m == mip && s == want_slice {
                            return self.view(data, offset, &level);
                        }
                        offset += level.size;
                    }
                    w >>= 1;
                    h >>= 1;
                }
            }
        }
        unreachable!("index preconditions already verified")
    }

    /// KTX payload order: mip (preceded by its image-size word), then
    /// layer, then face, then depth slice, with 4-byte padding after each
    /// face and after each whole level.
    fn sub_image_ktx<'a>(
        &self,
        data: &'a [u8],
        layer: u32,
        slice_or_face: u32,
        mip: u32,
    ) -> SubImage<'a> {
        let faces = if self.cubemap { 6 } else { 1 };
        let (want_face, want_slice) =
            if self.cubemap { (slice_or_face, 0) } else { (0, slice_or_face) };

        let mut offset = self.data_offset;
        let mut w = self.width;
        let mut h = self.height;
        for m in 0..self.mips {
            let image_size = BigEndian::read_u32(&data[offset..offset + 4]);
            offset += 4;
            let level = mip_level(self.format, w, h);
            debug_assert_eq!(
                image_size as usize,
                level.size * faces as usize * self.depth as usize,
                "image size word disagrees with block arithmetic at mip {m}"
            );
            for l in 0..self.layers {
                for f in 0..faces {
                    for s in 0..self.depth {
                        if l == layer && f == want_face && m == mip && s == want_slice {
                            return self.view(data, offset, &level);
                        }
                        offset += level.size;
                    }
                    offset = align4(offset);
                }
            }
            offset = align4(offset);
            w >>= 1;
            h >>= 1;
        }
        unreachable!("index preconditions already verified")
    }

    fn view<'a>(&self, data: &'a [u8], offset: usize, level: &MipLevel) -> SubImage<'a> {
        SubImage {
            data: &data[offset..offset + level.size],
            width: level.width,
            height: level.height,
            size: level.size,
            row_pitch: level.width * self.bpp / 8,
        }
    }
}
