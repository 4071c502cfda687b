// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::field_reader::{skip_reserved, truncated_at};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use fmr_structures::{FingerprintMinutiaeRecord, FmrError, FmrResult, ImageSize, Resolution};
use std::io::{Read, Write};

/// Bytes every FMR record starts with.
pub const MAGIC: [u8; 4] = *b"FMR\0";

/// The fixed 24 byte record header.
///
/// # Format
/// - Magic `FMR\0` (4 bytes)
/// - Version ` 20\0` (4 bytes)
/// - Total record length (u32)
/// - Reserved (2 bytes)
/// - Width, height (2 x u16)
/// - Resolution x, y (2 x u16)
/// - Finger view count (u8)
/// - Reserved (1 byte)
///
/// All multi-byte values are big-endian.
///
/// # Example
/// ```
/// use fmr_serialization::RecordHeader;
/// use fmr_structures::{FingerprintMinutiaeRecord, ImageSize, Resolution};
///
/// let record = FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(196.85, 196.85));
/// let header = RecordHeader::try_from_record(&record).unwrap();
/// assert_eq!(header.resolution_x, 197);
///
/// let mut bytes = Vec::new();
/// assert_eq!(header.write_to(&mut bytes).unwrap(), RecordHeader::BYTE_COUNT);
/// assert_eq!(&bytes[0..4], b"FMR\0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHeader {
    pub version: [u8; 4],
    /// Length of the whole record as stored in the header. Zero until back-patched on encode
    pub total_length: u32,
    pub width: u16,
    pub height: u16,
    pub resolution_x: u16,
    pub resolution_y: u16,
    pub number_of_fingers: u8,
}

impl RecordHeader {
    pub const BYTE_COUNT: usize = 24;

    pub const TOTAL_LENGTH_OFFSET: usize = 8;

    pub const TOTAL_LENGTH_BYTE_COUNT: usize = 4;

    /// Builds the header for `record`, checking every value fits its wire field.
    ///
    /// The total length is left at zero; only the record assembler knows it.
    pub fn try_from_record(record: &FingerprintMinutiaeRecord) -> FmrResult<Self> {
        if !record.has_supported_version() {
            return Err(FmrError::Version {
                found: record.version,
            });
        }
        if record.fingers.len() > FingerprintMinutiaeRecord::MAX_NUMBER_OF_FINGERS {
            return Err(FmrError::Range(format!(
                "Record holds {} finger views but at most {} can be encoded",
                record.fingers.len(),
                FingerprintMinutiaeRecord::MAX_NUMBER_OF_FINGERS
            )));
        }
        Ok(Self {
            version: record.version,
            total_length: 0,
            width: dimension_to_u16(record.size.width, "image width")?,
            height: dimension_to_u16(record.size.height, "image height")?,
            resolution_x: round_resolution(record.dpi.x, "horizontal resolution")?,
            resolution_y: round_resolution(record.dpi.y, "vertical resolution")?,
            number_of_fingers: record.fingers.len() as u8,
        })
    }

    /// Reads a header, rejecting foreign magic bytes and unsupported versions.
    pub fn read_from<R: Read>(reader: &mut R) -> FmrResult<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(truncated_at("magic"))?;
        if magic != MAGIC {
            return Err(FmrError::Format { found: magic });
        }

        let mut version = [0u8; 4];
        reader
            .read_exact(&mut version)
            .map_err(truncated_at("version"))?;
        if version != FingerprintMinutiaeRecord::SUPPORTED_VERSION {
            return Err(FmrError::Version { found: version });
        }

        let total_length = reader
            .read_u32::<BigEndian>()
            .map_err(truncated_at("total length"))?;
        skip_reserved::<_, 2>(reader, "reserved header bytes")?;
        let width = reader
            .read_u16::<BigEndian>()
            .map_err(truncated_at("image width"))?;
        let height = reader
            .read_u16::<BigEndian>()
            .map_err(truncated_at("image height"))?;
        let resolution_x = reader
            .read_u16::<BigEndian>()
            .map_err(truncated_at("horizontal resolution"))?;
        let resolution_y = reader
            .read_u16::<BigEndian>()
            .map_err(truncated_at("vertical resolution"))?;
        let number_of_fingers = reader.read_u8().map_err(truncated_at("finger view count"))?;
        skip_reserved::<_, 1>(reader, "reserved header byte")?;

        Ok(Self {
            version,
            total_length,
            width,
            height,
            resolution_x,
            resolution_y,
            number_of_fingers,
        })
    }

    /// Writes the header and returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> FmrResult<usize> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&self.version)?;
        writer.write_u32::<BigEndian>(self.total_length)?;
        writer.write_all(&[0u8; 2])?;
        writer.write_u16::<BigEndian>(self.width)?;
        writer.write_u16::<BigEndian>(self.height)?;
        writer.write_u16::<BigEndian>(self.resolution_x)?;
        writer.write_u16::<BigEndian>(self.resolution_y)?;
        writer.write_u8(self.number_of_fingers)?;
        writer.write_u8(0)?;
        Ok(Self::BYTE_COUNT)
    }

    pub fn image_size(&self) -> ImageSize {
        ImageSize::new(self.width as u32, self.height as u32)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.resolution_x as f64, self.resolution_y as f64)
    }
}

fn dimension_to_u16(value: u32, field: &str) -> FmrResult<u16> {
    u16::try_from(value)
        .map_err(|_| FmrError::Range(format!("{} {} does not fit in 16 bits", field, value)))
}

fn round_resolution(value: f64, field: &str) -> FmrResult<u16> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > u16::MAX as f64 {
        return Err(FmrError::Range(format!(
            "{} {} does not fit in 16 bits",
            field, value
        )));
    }
    Ok(rounded as u16)
}
