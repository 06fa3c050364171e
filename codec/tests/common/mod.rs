#![allow(dead_code)]

use codec::{File, MipMap, TextureEntry};

pub const WALL_PATH: &str = "data\\structures\\wall_co.paa";
pub const GROUND_PATH: &str = "data\\ground\\dirt_nohq.paa";

/// Hand-assembled two-entry file, independent of the encoder.
pub fn fixture_bytes() -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(b"0DHT");
    put_u32(&mut b, 1);
    put_u32(&mut b, 2);

    // texture[0]: DXT5, two mips, opaque
    put_u32(&mut b, 1); // palette_count
    put_u32(&mut b, 0); // palette_ptr
    for v in [0.5f32, 0.25, 0.125, 1.0] {
        b.extend_from_slice(&v.to_bits().to_le_bytes());
    }
    b.extend_from_slice(&[32, 64, 128, 255]); // average_color
    b.extend_from_slice(&[255, 255, 255, 255]); // max_color
    put_u32(&mut b, 0); // clamp_flags
    put_u32(&mut b, 0xFFFF_FFFF); // transparent_color
    b.extend_from_slice(&[0, 0, 0, 0]); // alpha booleans
    put_u32(&mut b, 2); // mip_count
    put_u32(&mut b, 10); // format
    b.extend_from_slice(&[1, 1]); // little_endian, is_primary_format
    b.extend_from_slice(WALL_PATH.as_bytes());
    b.push(0);
    put_u32(&mut b, 0); // suffix_type
    put_u32(&mut b, 2); // mip_count_copy
    put_mip(&mut b, 256, 256, 10, 128);
    put_mip(&mut b, 128, 128, 10, 65_664);
    put_u32(&mut b, 87_000); // file_size

    // texture[1]: ARGB8888, one mip, alpha
    put_u32(&mut b, 1);
    put_u32(&mut b, 0);
    for v in [0.0f32, 0.5, 1.0, 0.25] {
        b.extend_from_slice(&v.to_bits().to_le_bytes());
    }
    b.extend_from_slice(&[255, 128, 0, 64]);
    b.extend_from_slice(&[250, 240, 230, 220]);
    put_u32(&mut b, 0);
    put_u32(&mut b, 0xFFFF_FFFF);
    b.extend_from_slice(&[1, 1, 0, 1]);
    put_u32(&mut b, 1);
    put_u32(&mut b, 5);
    b.extend_from_slice(&[1, 1]);
    b.extend_from_slice(GROUND_PATH.as_bytes());
    b.push(0);
    put_u32(&mut b, 3);
    put_u32(&mut b, 1);
    put_mip(&mut b, 16, 8, 5, 40);
    put_u32(&mut b, 552);

    b
}

/// The model [`fixture_bytes`] decodes to.
pub fn fixture_file() -> File {
    File::with_textures(vec![
        TextureEntry {
            path: WALL_PATH.into(),
            palette_count: 1,
            palette_ptr: 0,
            average_color_f: [0.5, 0.25, 0.125, 1.0],
            average_color: [32, 64, 128, 255],
            max_color: [255; 4],
            clamp_flags: 0,
            transparent_color: 0xFFFF_FFFF,
            has_max_color: false,
            is_alpha: false,
            is_transparent: false,
            is_alpha_non_opaque: false,
            mip_count: 2,
            format: 10,
            little_endian: true,
            is_primary_format: true,
            suffix_type: 0,
            mip_count_copy: 2,
            file_size: 87_000,
            mips: vec![
                MipMap::new(256, 256, 10, 128),
                MipMap::new(128, 128, 10, 65_664),
            ],
        },
        TextureEntry {
            path: GROUND_PATH.into(),
            palette_count: 1,
            palette_ptr: 0,
            average_color_f: [0.0, 0.5, 1.0, 0.25],
            average_color: [255, 128, 0, 64],
            max_color: [250, 240, 230, 220],
            clamp_flags: 0,
            transparent_color: 0xFFFF_FFFF,
            has_max_color: true,
            is_alpha: true,
            is_transparent: false,
            is_alpha_non_opaque: true,
            mip_count: 1,
            format: 5,
            little_endian: true,
            is_primary_format: true,
            suffix_type: 3,
            mip_count_copy: 1,
            file_size: 552,
            mips: vec![MipMap::new(16, 8, 5, 40)],
        },
    ])
}

/// Byte offset of texture[0].mip_count.
pub const FIRST_MIP_COUNT_OFFSET: usize = 12 + 4 + 4 + 16 + 4 + 4 + 4 + 4 + 4;

fn put_u32(b: &mut Vec<u8>, v: u32) {
    b.extend_from_slice(&v.to_le_bytes());
}

fn put_mip(b: &mut Vec<u8>, width: u16, height: u16, format: u8, offset: u32) {
    b.extend_from_slice(&width.to_le_bytes());
    b.extend_from_slice(&height.to_le_bytes());
    b.extend_from_slice(&0u16.to_le_bytes());
    b.push(format);
    b.push(3);
    put_u32(b, offset);
}
