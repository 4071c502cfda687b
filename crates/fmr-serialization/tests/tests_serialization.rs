//! Tests for FMR record serialization
//!
//! Exercises whole-record decode and encode against a hand-assembled capture, plus the error
//! kinds a caller can see.

use fmr_serialization::{decode_record, encode_record, read_record, RecordHeader};
use fmr_structures::{
    FingerView, FingerprintMinutiaeRecord, FmrError, ImageSize, Minutia, MinutiaType, Resolution,
};

/// One finger view with three minutiae, as an extractor would emit it.
#[rustfmt::skip]
const CAPTURED_RECORD: [u8; 48] = [
    b'F', b'M', b'R', 0x00,         // magic
    b' ', b'2', b'0', 0x00,         // version
    0x00, 0x00, 0x00, 0x30,         // total length = 48
    0x00, 0x00,                     // reserved
    0x01, 0x2C, 0x01, 0x90,         // 300 x 400
    0x00, 0xC5, 0x00, 0xC5,         // 197 x 197 pixels per cm
    0x01, 0x00,                     // 1 finger view, reserved
    0x06, 0x00, 0x3C, 0x03,         // right index, view 0 / impression 0, quality 60, 3 minutiae
    0x40, 0x64, 0x00, 0xC8, 0x80, 0x5A, // termination (100, 200), 128, q 90
    0x80, 0x96, 0x01, 0x2C, 0x40, 0x3C, // bifurcation (150, 300), 64, q 60
    0x00, 0x0A, 0x00, 0x14, 0x00, 0x00, // other (10, 20), 0, q 0
    0x00, 0x00,                     // reserved trailer
];

fn sample_record() -> FingerprintMinutiaeRecord {
    let mut finger = FingerView::new(6, 0, 0, 60);
    finger
        .add_minutia(Minutia::new(MinutiaType::Termination, 100, 200, 128, 90))
        .unwrap();
    finger
        .add_minutia(Minutia::new(MinutiaType::Bifurcation, 150, 300, 64, 60))
        .unwrap();
    finger
        .add_minutia(Minutia::new(MinutiaType::Other, 10, 20, 0, 0))
        .unwrap();
    let mut record =
        FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(197.0, 197.0));
    record.add_finger(finger).unwrap();
    record
}

#[test]
fn test_decode_captured_record() {
    let record = decode_record(&CAPTURED_RECORD).unwrap();
    assert_eq!(record, sample_record());
    assert_eq!(record.fingers[0].minutiae[0].direction_degrees(), 180);
    assert_eq!(record.fingers[0].minutiae[1].direction_degrees(), 90);
}

#[test]
fn test_captured_bytes_survive_reencoding() {
    let record = decode_record(&CAPTURED_RECORD).unwrap();
    assert_eq!(encode_record(&record).unwrap(), CAPTURED_RECORD.to_vec());
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mut bytes = CAPTURED_RECORD.to_vec();
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00]);
    assert_eq!(decode_record(&bytes).unwrap(), sample_record());
}

#[test]
fn test_encoded_length_field_matches_output() {
    let mut record = sample_record();
    for position in 1..=4u8 {
        let mut finger = FingerView::new(position, position, 15 - position, 50);
        for index in 0..(position as u16 * 7) {
            finger
                .add_minutia(Minutia::new(
                    MinutiaType::from_bits(index as u8),
                    index * 100,
                    16383 - index,
                    index as u8,
                    (index % 101) as u8,
                ))
                .unwrap();
        }
        record.add_finger(finger).unwrap();
    }

    let bytes = encode_record(&record).unwrap();
    let header = RecordHeader::read_from(&mut bytes.as_slice()).unwrap();
    assert_eq!(header.total_length as usize, bytes.len());
    assert_eq!(decode_record(&bytes).unwrap(), record);
}

#[test]
fn test_empty_record() {
    let record =
        FingerprintMinutiaeRecord::new(ImageSize::new(0, 0), Resolution::new(0.0, 0.0));
    let bytes = encode_record(&record).unwrap();
    assert_eq!(bytes.len(), RecordHeader::BYTE_COUNT);
    assert_eq!(decode_record(&bytes).unwrap(), record);
}

#[test]
fn test_bad_magic_is_format_error() {
    let mut bytes = CAPTURED_RECORD;
    bytes[0..4].copy_from_slice(b"ANSI");
    assert!(matches!(decode_record(&bytes), Err(FmrError::Format { .. })));
}

#[test]
fn test_bad_version_is_version_error() {
    let mut bytes = CAPTURED_RECORD;
    bytes[4..8].copy_from_slice(b"030\0");
    assert!(matches!(
        decode_record(&bytes),
        Err(FmrError::Version { .. })
    ));
}

#[test]
fn test_every_truncation_is_reported() {
    for length in 0..CAPTURED_RECORD.len() {
        let result = decode_record(&CAPTURED_RECORD[..length]);
        assert!(
            matches!(result, Err(FmrError::TruncatedInput { .. })),
            "length {} should be truncated, got {:?}",
            length,
            result
        );
    }
}

#[test]
fn test_out_of_range_values_rejected() {
    let mut record = sample_record();
    record.fingers[0].minutiae[0].x = 16384;
    assert!(matches!(encode_record(&record), Err(FmrError::Range(_))));

    let mut record = sample_record();
    record.fingers[0].view_number = 16;
    assert!(matches!(encode_record(&record), Err(FmrError::Range(_))));

    assert!(matches!(
        MinutiaType::try_from(4u8),
        Err(FmrError::Range(_))
    ));
}

#[test]
fn test_reserved_y_bits_are_dropped() {
    let mut bytes = CAPTURED_RECORD;
    bytes[30] |= 0xC0; // reserved bits of the first minutia's y word
    let record = decode_record(&bytes).unwrap();
    assert_eq!(record.fingers[0].minutiae[0].y, 200);
    assert_eq!(encode_record(&record).unwrap(), CAPTURED_RECORD.to_vec());
}

#[test]
fn test_stream_reading() {
    let mut stream = std::io::Cursor::new(CAPTURED_RECORD.to_vec());
    let record = read_record(&mut stream).unwrap();
    assert_eq!(stream.position() as usize, CAPTURED_RECORD.len());
    assert_eq!(record.number_of_minutiae(), 3);
}
