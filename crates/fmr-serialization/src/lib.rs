// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # FMR Serialization
//!
//! Reads and writes the ISO/IEC 19794-2 Fingerprint Minutiae Record binary format.
//!
//! ## Core Components
//!
//! - **[`RecordHeader`]** - The fixed 24 byte header (magic, version, total length, image metadata)
//! - **[`read_finger_view`] / [`write_finger_view`]** - Per-view metadata, minutiae and trailer
//! - **[`read_minutia`] / [`write_minutia`]** - The bit-packed 6 byte minutia record
//! - **[`decode_record`] / [`encode_record`]** - Whole-record assembly. Encoding stages the record in
//!   memory and back-patches the total length once it is known
//!
//! ## Basic Usage
//!
//! ```rust
//! use fmr_serialization::{decode_record, encode_record};
//! use fmr_structures::{FingerView, FingerprintMinutiaeRecord, ImageSize, Minutia, MinutiaType, Resolution};
//!
//! let mut finger = FingerView::new(1, 0, 0, 80);
//! finger.add_minutia(Minutia::new(MinutiaType::Termination, 10, 20, 64, 60)).unwrap();
//! finger.add_minutia(Minutia::new(MinutiaType::Bifurcation, 30, 40, 128, 90)).unwrap();
//!
//! let mut record = FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(197.0, 197.0));
//! record.add_finger(finger).unwrap();
//!
//! let bytes = encode_record(&record).unwrap();
//! let mut decoded = decode_record(&bytes).unwrap();
//! assert_eq!(decoded, record);
//!
//! decoded.fingers[0].sort_minutiae_by_quality();
//! decoded.fingers[0].shrink_minutiae(1);
//! let curated = encode_record(&decoded).unwrap();
//! assert_eq!(curated.len(), bytes.len() - 6);
//! ```

mod field_reader;
mod finger_view_codec;
mod header;
mod minutia_codec;
mod record_codec;

pub use finger_view_codec::{
    read_finger_view, write_finger_view, FINGER_VIEW_HEADER_BYTE_COUNT,
    FINGER_VIEW_TRAILER_BYTE_COUNT,
};
pub use header::{RecordHeader, MAGIC};
pub use minutia_codec::{read_minutia, write_minutia, MINUTIA_BYTE_COUNT};
pub use record_codec::{
    decode_record, decode_record_with_options, encode_record, read_header, read_record,
    read_record_with_options, write_record, DecodeOptions,
};
