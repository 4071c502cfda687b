// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # FMR - ISO/IEC 19794-2 Fingerprint Minutiae Records
//!
//! Reads, writes and curates fingerprint templates in the ISO/IEC 19794-2:2005 minutiae record
//! format (`FMR\0`, version ` 20\0`).
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! fmr = "0.0.1-beta.18"
//! ```
//!
//! ```rust
//! use fmr::prelude::*;
//!
//! let mut finger = FingerView::new(6, 0, 0, 60);
//! finger.add_minutia(Minutia::new(MinutiaType::Termination, 100, 200, 64, 60))?;
//! finger.add_minutia(Minutia::new(MinutiaType::Bifurcation, 150, 250, 128, 90))?;
//!
//! let mut record = FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(197.0, 197.0));
//! record.add_finger(finger)?;
//!
//! let bytes = encode_record(&record)?;
//! assert_eq!(decode_record(&bytes)?, record);
//!
//! // Keep only the best minutia of each finger
//! let processor = TemplatePostProcessor::new(CurationPolicy::new(1, true), DecodeOptions::default());
//! let curated = decode_record(&processor.process(&bytes)?)?;
//! assert_eq!(curated.fingers[0].minutiae[0].quality, 90);
//! # Ok::<(), fmr::structures::FmrError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: fmr-structures, fmr-config                 │
//! │  (Record model, curation, FmrError, TOML settings)      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Data Processing: fmr-serialization                     │
//! │  (Header / finger view / minutia codecs)                │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Pipeline: fmr (this crate)                             │
//! │  (Template post-processing: decode, curate, re-encode)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging is set up separately through [`observability`].
//!
//! ## License
//!
//! Apache-2.0

mod curation;

pub use curation::{curate_record, CurationPolicy, TemplatePostProcessor};

// Re-export foundation
pub use fmr_config as config;
pub use fmr_structures as structures;

// Re-export data processing
pub use fmr_serialization as serialization;

// Re-export infrastructure
pub use fmr_observability as observability;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maps the `[logging]` section of `config` onto the subscriber settings.
pub fn logging_config(config: &config::FmrConfig) -> anyhow::Result<observability::LoggingConfig> {
    let format = observability::LogFormat::from_name(&config.logging.format).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown log format '{}', expected one of {}",
            config.logging.format,
            observability::LogFormat::NAMES.join(", ")
        )
    })?;
    Ok(observability::LoggingConfig {
        level: config.logging.level.clone(),
        format,
        with_target: config.logging.with_target,
    })
}

/// Installs the logging subscriber described by the `[logging]` section of `config`.
///
/// `--debug-<crate>` arguments and the `FMR_DEBUG` variable raise individual crates to debug.
pub fn init_logging(config: &config::FmrConfig) -> anyhow::Result<()> {
    let debug_flags = observability::parse_debug_flags();
    observability::init_logging(&debug_flags, &logging_config(config)?)
}

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::structures::{
        FingerView, FingerprintMinutiaeRecord, FmrError, FmrResult, ImageSize, Minutia,
        MinutiaType, Resolution,
    };

    pub use crate::serialization::{
        decode_record, encode_record, read_record, write_record, DecodeOptions, RecordHeader,
    };

    pub use crate::{curate_record, CurationPolicy, TemplatePostProcessor};
}
