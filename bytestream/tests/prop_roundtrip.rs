use bytestream::{ByteReader, ByteWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    F32Bits(u32),
    Bytes([u8; 4]),
    CString(Vec<u8>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bool),
        any::<u8>().prop_map(Op::U8),
        any::<u16>().prop_map(Op::U16),
        any::<u32>().prop_map(Op::U32),
        any::<u32>().prop_map(Op::F32Bits),
        any::<[u8; 4]>().prop_map(Op::Bytes),
        prop::collection::vec(1u8..=255, 0..48).prop_map(Op::CString),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut writer = ByteWriter::new(Vec::new());

        for op in &ops {
            match op {
                Op::Bool(v) => writer.write_bool(*v).unwrap(),
                Op::U8(v) => writer.write_u8(*v).unwrap(),
                Op::U16(v) => writer.write_u16(*v).unwrap(),
                Op::U32(v) => writer.write_u32(*v).unwrap(),
                Op::F32Bits(bits) => writer.write_f32(f32::from_bits(*bits)).unwrap(),
                Op::Bytes(v) => writer.write_bytes(v).unwrap(),
                Op::CString(v) => writer.write_cstring(v).unwrap(),
            }
        }

        let written = writer.position();
        let bytes = writer.into_inner();
        prop_assert_eq!(written, bytes.len() as u64);

        let mut reader = ByteReader::new(bytes.as_slice());
        for op in &ops {
            match op {
                Op::Bool(v) => prop_assert_eq!(reader.read_bool().unwrap(), *v),
                Op::U8(v) => prop_assert_eq!(reader.read_u8().unwrap(), *v),
                Op::U16(v) => prop_assert_eq!(reader.read_u16().unwrap(), *v),
                Op::U32(v) => prop_assert_eq!(reader.read_u32().unwrap(), *v),
                Op::F32Bits(bits) => prop_assert_eq!(reader.read_f32().unwrap().to_bits(), *bits),
                Op::Bytes(v) => prop_assert_eq!(reader.read_array::<4>().unwrap(), *v),
                Op::CString(v) => prop_assert_eq!(&reader.read_cstring().unwrap(), v),
            }
        }
        prop_assert_eq!(reader.position(), written);
    }

    #[test]
    fn prop_reader_never_panics(data in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut reader = ByteReader::new(data.as_slice());
        loop {
            if reader.read_u16().is_err() {
                break;
            }
            if reader.read_cstring().is_err() {
                break;
            }
        }
        prop_assert!(reader.position() <= data.len() as u64);
    }
}
