use gputex::{parse, Format, ParseError, Source};

// Header word indices (after the 4-byte magic) and flag values used by the
// builder below.
const DDSD_MIPMAPCOUNT: u32 = 0x2_0000;
const DDSD_DEPTH: u32 = 0x80_0000;
const DDPF_ALPHAPIXELS: u32 = 0x1;
const DDPF_ALPHA: u32 = 0x2;
const DDPF_FOURCC: u32 = 0x4;
const DDPF_RGB: u32 = 0x40;
const DDSCAPS_COMPLEX: u32 = 0x8;
const DDSCAPS_TEXTURE: u32 = 0x1000;
const DDSCAPS_MIPMAP: u32 = 0x40_0000;
const DDSCAPS2_CUBEMAP: u32 = 0x200;
const DDSCAPS2_ALL_FACES: u32 = 0xfc00;

const RGBA_MASKS: [u32; 4] = [0x0000_00ff, 0x0000_ff00, 0x00ff_0000, 0xff00_0000];

/// Assembles DDS byte streams for the scenarios below.
struct DdsFile {
    header: [u32; 31],
    dx10: Option<[u32; 5]>,
    payload: usize,
}

impl DdsFile {
    fn new(width: u32, height: u32) -> Self {
        let mut header = [0u32; 31];
        header[0] = 124;
        header[1] = 0x1 | 0x2 | 0x4 | 0x1000;
        header[2] = height;
        header[3] = width;
        header[18] = 32;
        header[26] = DDSCAPS_TEXTURE;
        Self { header, dx10: None, payload: 0 }
    }

    fn fourcc(self, tag: &[u8; 4], alpha: bool) -> Self {
        let mut with_tag = self.fourcc_raw(u32::from_le_bytes(*tag));
        if alpha {
            with_tag.header[19] |= DDPF_ALPHAPIXELS;
        }
        with_tag
    }

    fn fourcc_raw(mut self, code: u32) -> Self {
        self.header[19] = DDPF_FOURCC;
        self.header[20] = code;
        self
    }

    fn masks(mut self, bit_count: u32, flags: u32, masks: [u32; 4]) -> Self {
        self.header[19] = flags;
        self.header[21] = bit_count;
        self.header[22..26].copy_from_slice(&masks);
        self
    }

    fn mips(mut self, count: u32) -> Self {
        self.header[1] |= DDSD_MIPMAPCOUNT;
        self.header[6] = count;
        self.header[26] |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
        self
    }

    fn cubemap(mut self, face_bits: u32) -> Self {
        self.header[26] |= DDSCAPS_COMPLEX;
        self.header[27] = DDSCAPS2_CUBEMAP | face_bits;
        self
    }

    fn depth(mut self, slices: u32) -> Self {
        self.header[1] |= DDSD_DEPTH;
        self.header[5] = slices;
        self
    }

    fn dx10(mut self, dxgi_format: u32, array_size: u32) -> Self {
        self.header[19] |= DDPF_FOURCC;
        self.header[20] = u32::from_le_bytes(*b"DX10");
        self.dx10 = Some([dxgi_format, 3, 0, array_size, 0]);
        self
    }

    fn payload(mut self, bytes: usize) -> Self {
        self.payload = bytes;
        self
    }

    fn build(self) -> Vec<u8> {
        let mut out = Vec::from(*b"DDS ");
        for word in self.header {
            out.extend_from_slice(&word.to_le_bytes());
        }
        if let Some(ext) = self.dx10 {
            for word in ext {
                out.extend_from_slice(&word.to_le_bytes());
            }
        }
        out.resize(out.len() + self.payload, 0);
        out
    }
}

fn offset_in(file: &[u8], sub: &[u8]) -> usize {
    sub.as_ptr() as usize - file.as_ptr() as usize
}

#[test]
fn bc3_with_mip_chain() {
    let mip_sizes = [16384usize, 4096, 1024, 256];
    let file = DdsFile::new(128, 128)
        .fourcc(b"DXT5", true)
        .mips(4)
        .payload(mip_sizes.iter().sum())
        .build();

    let info = parse(&file).unwrap();
    assert_eq!(info.format, Format::Bc3);
    assert_eq!((info.width, info.height, info.depth), (128, 128, 1));
    assert_eq!((info.layers, info.mips), (1, 4));
    assert_eq!(info.source, Source::Dds);
    assert!(info.has_alpha, "has_alpha");
    assert!(!info.cubemap, "!cubemap");
    assert!(!info.srgb, "!srgb");
    assert_eq!(info.data_offset, 4 + 124);
    assert_eq!(info.data_size, 21760);
    assert_eq!(info.bpp, 8);

    let mut expected = info.data_offset;
    for (mip, &size) in mip_sizes.iter().enumerate() {
        let sub = info.sub_image(&file, 0, 0, mip as u32);
        assert_eq!(sub.size, size, "mip {mip} size");
        assert_eq!(sub.data.len(), size);
        assert_eq!(offset_in(&file, sub.data), expected, "mip {mip} offset");
        expected += size;
    }
}

#[test]
fn rgba8_cubemap_face_offsets() {
    let face_size = 64 * 64 * 4;
    let file = DdsFile::new(64, 64)
        .masks(32, DDPF_RGB | DDPF_ALPHAPIXELS, RGBA_MASKS)
        .cubemap(DDSCAPS2_ALL_FACES)
        .payload(face_size * 6)
        .build();

    let info = parse(&file).unwrap();
    assert!(info.cubemap, "cubemap");
    assert_eq!((info.layers, info.depth, info.mips), (1, 1, 1));
    assert_eq!(info.format, Format::Rgba8);

    let sub = info.sub_image(&file, 0, 3, 0);
    assert_eq!(offset_in(&file, sub.data), info.data_offset + 3 * face_size);
    assert_eq!(sub.size, face_size);
    assert_eq!(sub.row_pitch, 256);
}

#[test]
fn dx10_bc7_srgb() {
    let file = DdsFile::new(256, 256).dx10(99, 1).payload(256 * 256).build();

    let info = parse(&file).unwrap();
    assert_eq!(info.format, Format::Bc7);
    assert!(info.srgb, "srgb");
    assert_eq!(info.data_offset, 4 + 124 + 20);
    assert_eq!((info.width, info.height, info.mips), (256, 256, 1));
}

#[test]
fn dx10_array_layers_walk_in_order() {
    // 16x16 BC1 with 2 mips and 3 layers: per layer 128 + 32 bytes.
    let file = DdsFile::new(16, 16).dx10(71, 3).mips(2).payload(3 * 160).build();

    let info = parse(&file).unwrap();
    assert_eq!(info.format, Format::Bc1);
    assert_eq!((info.layers, info.mips), (3, 2));

    let sub = info.sub_image(&file, 2, 0, 1);
    assert_eq!(offset_in(&file, sub.data), info.data_offset + 2 * 160 + 128);
    assert_eq!(sub.size, 32);
}

#[test]
fn volume_slices_within_mips() {
    // 16x16x8 RGBA8, 2 mips. Slices sit inside each mip level; depth does
    // not shrink down the chain.
    let slice0 = 16 * 16 * 4;
    let slice1 = 8 * 8 * 4;
    let file = DdsFile::new(16, 16)
        .masks(32, DDPF_RGB | DDPF_ALPHAPIXELS, RGBA_MASKS)
        .depth(8)
        .mips(2)
        .payload(8 * (slice0 + slice1))
        .build();

    let info = parse(&file).unwrap();
    assert_eq!(info.depth, 8);
    assert!(!info.cubemap);

    let sub = info.sub_image(&file, 0, 5, 0);
    assert_eq!(offset_in(&file, sub.data), info.data_offset + 5 * slice0);

    let sub = info.sub_image(&file, 0, 2, 1);
    assert_eq!(offset_in(&file, sub.data), info.data_offset + 8 * slice0 + 2 * slice1);
    assert_eq!((sub.width, sub.height), (8, 8));
}

#[test]
fn bitmask_path_recognizes_bgra8() {
    let file = DdsFile::new(4, 4)
        .masks(
            32,
            DDPF_RGB | DDPF_ALPHAPIXELS,
            [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000],
        )
        .payload(64)
        .build();

    let info = parse(&file).unwrap();
    assert_eq!(info.format, Format::Bgra8);
    assert_eq!(info.bpp, 32);
}

#[test]
fn alpha_only_path_recognizes_a8() {
    let file = DdsFile::new(4, 4)
        .masks(8, DDPF_ALPHA, [0, 0, 0, 0xff])
        .payload(16)
        .build();

    let info = parse(&file).unwrap();
    assert_eq!(info.format, Format::A8);
    assert!(info.has_alpha, "has_alpha");
    assert_eq!(info.bpp, 8);
}

#[test]
fn legacy_fourcc_half_float() {
    // D3DFMT_A16B16G16R16F travels as a numeric FourCC.
    let file = DdsFile::new(8, 8).fourcc_raw(113).payload(8 * 8 * 8).build();

    let info = parse(&file).unwrap();
    assert_eq!(info.format, Format::Rgba16f);
}

#[test]
fn mip_count_ignored_without_mipmap_caps() {
    let mut file = DdsFile::new(16, 16)
        .fourcc(b"DXT1", false)
        .payload(128)
        .build();
    // Plant a mip count while leaving the MIPMAP caps bit clear.
    file[4 + 6 * 4..4 + 7 * 4].copy_from_slice(&5u32.to_le_bytes());

    let info = parse(&file).unwrap();
    assert_eq!(info.mips, 1);
}

#[test]
fn mip_sizes_stay_within_payload() {
    let file = DdsFile::new(128, 128)
        .fourcc(b"DXT5", true)
        .mips(8)
        .payload(16384 + 4096 + 1024 + 256 + 64 + 16 + 16 + 16)
        .build();

    let info = parse(&file).unwrap();
    assert_eq!(info.mips, 8);
    let mut total = 0usize;
    for mip in 0..info.mips {
        let sub = info.sub_image(&file, 0, 0, mip);
        let start = offset_in(&file, sub.data);
        assert!(start >= info.data_offset);
        assert!(start + sub.size <= info.data_offset + info.data_size);
        total += sub.size;
    }
    assert!(total <= info.data_size);
}

#[test]
fn parse_is_idempotent() {
    let file = DdsFile::new(64, 64).fourcc(b"DXT1", false).payload(2048).build();
    assert_eq!(parse(&file).unwrap(), parse(&file).unwrap());
}

#[test]
fn truncated_header_reports_size() {
    let mut file = DdsFile::new(128, 128).fourcc(b"DXT5", true).build();
    file.truncate(100);

    let err = parse(&file).unwrap_err();
    assert_eq!(err, ParseError::DdsHeaderSize);
    let message = err.to_string();
    assert!(message.contains("dds:"), "{message}");
    assert!(message.contains("header size"), "{message}");
}

#[test]
fn wrong_header_size_field_rejected() {
    let mut file = DdsFile::new(16, 16).fourcc(b"DXT1", false).payload(128).build();
    file[4..8].copy_from_slice(&128u32.to_le_bytes());
    assert_eq!(parse(&file).unwrap_err(), ParseError::DdsHeaderSize);
}

#[test]
fn missing_required_flags_rejected() {
    let mut builder = DdsFile::new(16, 16).fourcc(b"DXT1", false);
    builder.header[1] = 0x1 | 0x2; // width and pixelformat bits missing
    let file = builder.payload(128).build();
    assert_eq!(parse(&file).unwrap_err(), ParseError::DdsInvalidFlags);
}

#[test]
fn wrong_pixel_format_size_rejected() {
    let mut builder = DdsFile::new(16, 16).fourcc(b"DXT1", false);
    builder.header[18] = 24;
    let file = builder.payload(128).build();
    assert_eq!(parse(&file).unwrap_err(), ParseError::DdsInvalidPixelFormat);
}

#[test]
fn non_texture_caps_rejected() {
    let mut builder = DdsFile::new(16, 16).fourcc(b"DXT1", false);
    builder.header[26] = DDSCAPS_COMPLEX;
    let file = builder.payload(128).build();
    assert_eq!(parse(&file).unwrap_err(), ParseError::DdsUnsupportedCaps);
}

#[test]
fn partial_cubemap_rejected() {
    let file = DdsFile::new(64, 64)
        .masks(32, DDPF_RGB | DDPF_ALPHAPIXELS, RGBA_MASKS)
        .cubemap(0x400 | 0x800 | 0x1000) // only three faces
        .payload(3 * 64 * 64 * 4)
        .build();

    let err = parse(&file).unwrap_err();
    assert_eq!(err, ParseError::DdsIncompleteCubemap);
    assert!(err.to_string().contains("incomplete cubemap"));
}

#[test]
fn cubemap_with_depth_rejected() {
    let file = DdsFile::new(64, 64)
        .masks(32, DDPF_RGB | DDPF_ALPHAPIXELS, RGBA_MASKS)
        .cubemap(DDSCAPS2_ALL_FACES)
        .depth(4)
        .payload(6 * 64 * 64 * 4)
        .build();

    assert_eq!(parse(&file).unwrap_err(), ParseError::CubemapWithDepth);
}

#[test]
fn unknown_fourcc_rejected() {
    let file = DdsFile::new(16, 16).fourcc(b"XXXX", false).payload(128).build();
    assert_eq!(parse(&file).unwrap_err(), ParseError::DdsUnknownFormat);
}

#[test]
fn unknown_magic_rejected() {
    let err = parse(b"JUNKJUNKJUNKJUNK").unwrap_err();
    assert_eq!(err, ParseError::UnknownMagic);
    assert_eq!(err.to_string(), "unknown texture format");

    // Shorter than the magic itself.
    assert_eq!(parse(b"DD").unwrap_err(), ParseError::UnknownMagic);
}

#[test]
#[should_panic(expected = "mip 4 out of range")]
fn out_of_range_mip_panics() {
    let file = DdsFile::new(128, 128)
        .fourcc(b"DXT5", true)
        .mips(4)
        .payload(16384 + 4096 + 1024 + 256)
        .build();
    let info = parse(&file).unwrap();
    info.sub_image(&file, 0, 0, 4);
}

#[test]
#[should_panic(expected = "face 6 out of range")]
fn out_of_range_face_panics() {
    let face_size = 16 * 16 * 4;
    let file = DdsFile::new(16, 16)
        .masks(32, DDPF_RGB | DDPF_ALPHAPIXELS, RGBA_MASKS)
        .cubemap(DDSCAPS2_ALL_FACES)
        .payload(face_size * 6)
        .build();
    let info = parse(&file).unwrap();
    info.sub_image(&file, 0, 6, 0);
}
