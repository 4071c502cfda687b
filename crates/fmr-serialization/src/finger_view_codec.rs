// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Finger view block: position, packed view/impression nibbles, quality, minutiae count, the
//! minutiae themselves and a 2 byte reserved trailer.

use crate::field_reader::{skip_reserved, truncated_at};
use crate::minutia_codec::{read_minutia, write_minutia};
use byteorder::{ReadBytesExt, WriteBytesExt};
use fmr_structures::{FingerView, FmrResult};
use std::io::{Read, Write};

/// Bytes a finger view occupies before its minutiae.
pub const FINGER_VIEW_HEADER_BYTE_COUNT: usize = 4;

/// Bytes of reserved trailer after the minutiae.
pub const FINGER_VIEW_TRAILER_BYTE_COUNT: usize = 2;

pub fn read_finger_view<R: Read>(reader: &mut R) -> FmrResult<FingerView> {
    let position = reader.read_u8().map_err(truncated_at("finger position"))?;
    let view_and_impression = reader
        .read_u8()
        .map_err(truncated_at("view and impression number"))?;
    let fp_quality = reader.read_u8().map_err(truncated_at("finger quality"))?;
    let minutiae_count = reader.read_u8().map_err(truncated_at("minutiae count"))?;

    let mut finger = FingerView::new(
        position,
        view_and_impression >> 4,
        view_and_impression & 0x0F,
        fp_quality,
    );
    finger.minutiae.reserve(minutiae_count as usize);
    for _ in 0..minutiae_count {
        finger.add_minutia(read_minutia(reader)?)?;
    }
    skip_reserved::<_, FINGER_VIEW_TRAILER_BYTE_COUNT>(reader, "finger view trailer")?;

    let unknown_minutiae = finger
        .minutiae
        .iter()
        .filter(|minutia| !minutia.minutia_type.is_meaningful())
        .count();
    if unknown_minutiae > 0 {
        tracing::warn!(
            "[FMR-DECODE] Finger view at position {} holds {} minutiae of reserved type",
            finger.position,
            unknown_minutiae
        );
    }
    tracing::trace!("[FMR-DECODE] {}", finger);
    Ok(finger)
}

/// Writes one finger view with its minutiae.
///
/// The nibble fields, the declared count and every minutia are checked before the first byte is
/// written.
pub fn write_finger_view<W: Write>(finger: &FingerView, writer: &mut W) -> FmrResult<()> {
    finger.verify_encodable()?;
    for minutia in &finger.minutiae {
        minutia.verify_coordinates()?;
    }

    writer.write_u8(finger.position)?;
    writer.write_u8((finger.view_number << 4) | finger.impression_number)?;
    writer.write_u8(finger.fp_quality)?;
    writer.write_u8(finger.minutiae_count)?;
    for minutia in &finger.minutiae {
        write_minutia(minutia, writer)?;
    }
    writer.write_all(&[0u8; FINGER_VIEW_TRAILER_BYTE_COUNT])?;
    tracing::trace!("[FMR-ENCODE] {}", finger);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minutia_codec::MINUTIA_BYTE_COUNT;
    use fmr_structures::{FmrError, Minutia, MinutiaType};

    fn sample_finger() -> FingerView {
        let mut finger = FingerView::new(7, 3, 9, 64);
        finger
            .add_minutia(Minutia::new(MinutiaType::Termination, 1, 2, 3, 4))
            .unwrap();
        finger
            .add_minutia(Minutia::new(MinutiaType::Other, 5, 6, 7, 8))
            .unwrap();
        finger
    }

    #[test]
    fn test_layout() {
        let mut bytes = Vec::new();
        write_finger_view(&sample_finger(), &mut bytes).unwrap();
        assert_eq!(
            bytes.len(),
            FINGER_VIEW_HEADER_BYTE_COUNT + 2 * MINUTIA_BYTE_COUNT + FINGER_VIEW_TRAILER_BYTE_COUNT
        );
        assert_eq!(&bytes[0..4], &[7, 0x39, 64, 2]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0, 0]);
    }

    #[test]
    fn test_read_back() {
        let finger = sample_finger();
        let mut bytes = Vec::new();
        write_finger_view(&finger, &mut bytes).unwrap();
        let decoded = read_finger_view(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, finger);
    }

    #[test]
    fn test_view_number_sixteen_rejected() {
        let mut finger = sample_finger();
        finger.view_number = 16;
        let mut bytes = Vec::new();
        assert!(matches!(
            write_finger_view(&finger, &mut bytes),
            Err(FmrError::Range(_))
        ));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let mut finger = sample_finger();
        finger.minutiae_count = 1;
        let mut bytes = Vec::new();
        assert!(matches!(
            write_finger_view(&finger, &mut bytes),
            Err(FmrError::Range(_))
        ));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_bad_minutia_rejected_before_writing() {
        let mut finger = sample_finger();
        finger.minutiae[1].x = 20000;
        let mut bytes = Vec::new();
        assert!(matches!(
            write_finger_view(&finger, &mut bytes),
            Err(FmrError::Range(_))
        ));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_missing_trailer() {
        let mut bytes = Vec::new();
        write_finger_view(&sample_finger(), &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            read_finger_view(&mut bytes.as_slice()),
            Err(FmrError::TruncatedInput { field: "finger view trailer" })
        ));
    }

    #[test]
    fn test_fewer_minutiae_than_declared() {
        let bytes = [1, 0, 50, 3, 0x40, 0x01, 0x00, 0x01, 0, 0];
        assert!(matches!(
            read_finger_view(&mut bytes.as_slice()),
            Err(FmrError::TruncatedInput { .. })
        ));
    }
}
