#![no_main]

use codec::{decode_slice, encode_to_vec, validate_file};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(file) = decode_slice(data) else {
        return;
    };
    let _ = validate_file(&file);

    // Anything that decodes must re-encode and decode to the same model.
    let bytes = encode_to_vec(&file).expect("decoded file re-encodes");
    assert!(bytes.len() <= data.len());
    let again = decode_slice(&bytes).expect("re-encoded file decodes");
    assert_eq!(again.textures.len(), file.textures.len());
    assert_eq!(encode_to_vec(&again).expect("second encode"), bytes);
});
