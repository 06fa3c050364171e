#![no_main]

use bytestream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((ops, payload)) = data.split_first() else {
        return;
    };
    let mut reader = ByteReader::new(payload);

    // Each bit pair of the first byte picks the next read.
    for shift in (0..8).step_by(2) {
        let result = match (ops >> shift) & 0b11 {
            0 => reader.read_u8().map(drop),
            1 => reader.read_u32().map(drop),
            2 => reader.read_f32().map(drop),
            _ => reader.read_cstring().map(drop),
        };
        if result.is_err() {
            break;
        }
    }
    assert!(reader.position() <= payload.len() as u64);
});
