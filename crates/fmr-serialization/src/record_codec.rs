// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::field_reader::CountingReader;
use crate::finger_view_codec::{read_finger_view, write_finger_view};
use crate::header::RecordHeader;
use byteorder::{BigEndian, ByteOrder};
use fmr_structures::{FingerprintMinutiaeRecord, FmrError, FmrResult};
use std::io::{Read, Write};

/// Settings that change how strictly a record is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Compare the header's total length against the bytes the record actually occupies.
    /// Off by default: decoding relies on the per-view counts, not on the stored length.
    pub verify_declared_length: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            verify_declared_length: true,
        }
    }
}

//region Decoding

/// Decodes one record from the front of `bytes`. Bytes after the last finger view are ignored.
///
/// # Example
/// ```
/// use fmr_serialization::{decode_record, encode_record};
/// use fmr_structures::{FingerprintMinutiaeRecord, ImageSize, Resolution};
///
/// let record = FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(197.0, 197.0));
/// let bytes = encode_record(&record).unwrap();
/// assert_eq!(decode_record(&bytes).unwrap(), record);
///
/// assert!(decode_record(b"not a record at all").is_err());
/// ```
pub fn decode_record(bytes: &[u8]) -> FmrResult<FingerprintMinutiaeRecord> {
    decode_record_with_options(bytes, &DecodeOptions::default())
}

pub fn decode_record_with_options(
    bytes: &[u8],
    options: &DecodeOptions,
) -> FmrResult<FingerprintMinutiaeRecord> {
    let mut remaining = bytes;
    let record = read_record_with_options(&mut remaining, options)?;
    if !remaining.is_empty() {
        tracing::warn!(
            "[FMR-DECODE] Ignoring {} trailing bytes after the last finger view",
            remaining.len()
        );
    }
    Ok(record)
}

/// Reads one record from `reader`, consuming exactly the bytes the record occupies.
pub fn read_record<R: Read>(reader: &mut R) -> FmrResult<FingerprintMinutiaeRecord> {
    read_record_with_options(reader, &DecodeOptions::default())
}

pub fn read_record_with_options<R: Read>(
    reader: &mut R,
    options: &DecodeOptions,
) -> FmrResult<FingerprintMinutiaeRecord> {
    let mut counting_reader = CountingReader::new(reader);
    let header = RecordHeader::read_from(&mut counting_reader)?;

    let mut record = FingerprintMinutiaeRecord::new(header.image_size(), header.resolution());
    record.version = header.version;
    record.fingers.reserve(header.number_of_fingers as usize);
    for _ in 0..header.number_of_fingers {
        record.add_finger(read_finger_view(&mut counting_reader)?)?;
    }

    let bytes_read = counting_reader.bytes_read();
    if options.verify_declared_length && bytes_read != header.total_length as u64 {
        return Err(FmrError::DeclaredLength {
            declared: header.total_length,
            actual: bytes_read,
        });
    }

    tracing::debug!(
        "[FMR-DECODE] Decoded record with {} finger views and {} minutiae ({} bytes)",
        record.number_of_fingers(),
        record.number_of_minutiae(),
        bytes_read
    );
    Ok(record)
}

/// Reads only the header, leaving the finger views unread.
pub fn read_header<R: Read>(reader: &mut R) -> FmrResult<RecordHeader> {
    RecordHeader::read_from(reader)
}

//endregion

//region Encoding

/// Encodes `record` into a new byte vector with the total length filled in.
///
/// The record is staged in memory with a zero length placeholder, then the real length is
/// patched in once every finger view has been written.
///
/// # Example
/// ```
/// use fmr_serialization::{encode_record, RecordHeader};
/// use fmr_structures::{FingerView, FingerprintMinutiaeRecord, ImageSize, Resolution};
///
/// let mut record = FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(197.0, 197.0));
/// record.add_finger(FingerView::new(1, 0, 0, 90)).unwrap();
///
/// let bytes = encode_record(&record).unwrap();
/// assert_eq!(bytes.len(), 30);
/// assert_eq!(&bytes[RecordHeader::TOTAL_LENGTH_OFFSET..12], &[0, 0, 0, 30]);
/// ```
pub fn encode_record(record: &FingerprintMinutiaeRecord) -> FmrResult<Vec<u8>> {
    let header = RecordHeader::try_from_record(record)?;

    let mut staged: Vec<u8> = Vec::new();
    header.write_to(&mut staged)?;
    for finger in &record.fingers {
        write_finger_view(finger, &mut staged)?;
    }

    let total_length = u32::try_from(staged.len()).map_err(|_| {
        FmrError::Range(format!(
            "Encoded record is {} bytes, too long for the length field",
            staged.len()
        ))
    })?;
    BigEndian::write_u32(
        &mut staged[RecordHeader::TOTAL_LENGTH_OFFSET
            ..RecordHeader::TOTAL_LENGTH_OFFSET + RecordHeader::TOTAL_LENGTH_BYTE_COUNT],
        total_length,
    );

    tracing::debug!(
        "[FMR-ENCODE] Encoded record with {} finger views and {} minutiae ({} bytes)",
        record.number_of_fingers(),
        record.number_of_minutiae(),
        total_length
    );
    Ok(staged)
}

/// Encodes `record` and writes it to `writer`, returning the number of bytes written.
///
/// Nothing reaches `writer` unless the whole record encoded successfully.
pub fn write_record<W: Write>(
    record: &FingerprintMinutiaeRecord,
    writer: &mut W,
) -> FmrResult<usize> {
    let bytes = encode_record(record)?;
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

//endregion
