//! Reference vectors for the binary wire format.
//!
//! These bytes are what other implementations produce and accept, so any
//! change here is a wire-compatibility break.

use itc_core::bits::{BitReader, BitWriter};
use itc_core::{BitDecode, BitEncode, Event, Id, Stamp};

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_seed_marshals_to_reference_bytes() {
    assert_eq!(hex(&Stamp::seed().marshal()), "30 00 00 00");
}

#[test]
fn test_forked_seed_marshals_to_reference_bytes() {
    let mut seed = Stamp::seed();
    let forked = seed.fork();
    assert_eq!(hex(&seed.marshal()), "8c 00 00 00");
    // `((0, 1), 0)` is `01 00 1` followed by the zero leaf `1 0 00`.
    assert_eq!(hex(&forked.marshal()), "4c 00 00 00");
}

#[test]
fn test_reference_bytes_unmarshal() {
    let stamp = Stamp::unmarshal(&[0x8c, 0x00, 0x00, 0x00]).unwrap();
    assert_eq!(stamp.to_string(), "((1, 0), 0)");
    assert_eq!(Stamp::unmarshal(&[0x30, 0, 0, 0]).unwrap(), Stamp::seed());
}

#[test]
fn test_bit_packing_vector() {
    let mut writer = BitWriter::new();
    writer.push(2, 3);
    writer.push(0, 1);
    writer.push(1, 2);
    assert_eq!(writer.to_bit_string(), "010001");
    assert_eq!(writer.bit_len(), 6);
}

#[test]
fn test_reader_straddles_block_boundary() {
    let mut writer = BitWriter::new();
    writer.push(0, 25);
    writer.push(1, 1);
    writer.push(1, 1);
    // Two single-bit fields at bits 25 and 26, then one crossing into the
    // second block.
    writer.push(0b101, 7);
    let bytes = writer.into_bytes();
    assert_eq!(bytes.len(), 8);

    let mut reader = BitReader::new(&bytes);
    assert_eq!(reader.pop(25).unwrap(), 0);
    assert_eq!(reader.pop(2).unwrap(), 3);
    assert_eq!(reader.pop(7).unwrap(), 0b101);
}

#[test]
fn test_varint_vectors() {
    let cases = [
        (0, "000"),
        (3, "011"),
        (4, "10000"),
        (11, "10111"),
        (12, "1100000"),
    ];
    for (n, bits) in cases {
        let mut writer = BitWriter::new();
        writer.push_varint(n, 2);
        assert_eq!(writer.to_bit_string(), bits, "varint({n})");
    }
}

#[test]
fn test_id_tree_vectors() {
    let cases = [
        ("0", "000"),
        ("1", "001"),
        ("(0, 1)", "01001"),
        ("(1, 0)", "10001"),
        ("(1, 1)", "11001001"),
        ("((1, 0), (0, 1))", "111000101001"),
    ];
    for (source, bits) in cases {
        let id: Id = source.parse().unwrap();
        let writer = id.to_bits();
        assert_eq!(writer.to_bit_string(), bits, "enc({source})");
        assert_eq!(Id::from_bits(writer.as_bytes()).unwrap(), id);
    }
}

#[test]
fn test_event_tree_vectors() {
    let cases = [
        ("0", "1000"),
        ("1", "1001"),
        ("(0, 0, 1)", "0001001"),
        ("(0, 1, 0)", "0011001"),
        ("(0, 1, 1)", "01010011001"),
        ("(1, 0, 1)", "0110010011001"),
        ("(1, 1, 0)", "0110110011001"),
        ("(1, 1, 1)", "0111100110011001"),
    ];
    for (source, bits) in cases {
        let event: Event = source.parse().unwrap();
        let writer = event.to_bits();
        assert_eq!(writer.to_bit_string(), bits, "enc({source}) = {writer}");
        assert_eq!(Event::from_bits(writer.as_bytes()).unwrap(), event);
    }
}

#[test]
fn test_trailing_bits_are_ignored() {
    let mut bytes = Stamp::seed().marshal();
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(Stamp::unmarshal(&bytes).unwrap(), Stamp::seed());
}
