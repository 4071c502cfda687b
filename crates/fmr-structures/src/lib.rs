// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # FMR Structures
//!
//! The in-memory model of an ISO/IEC 19794-2 Fingerprint Minutiae Record, shared by the codec
//! and by anything that post-processes decoded records.
//!
//! ## Core Components
//!
//! - **[`FingerprintMinutiaeRecord`]** - Top-level container: version, image size, resolution, finger views
//! - **[`FingerView`]** - One impression of one finger, owning its minutiae. Also hosts the curation
//!   operations ([`FingerView::sort_minutiae_by_quality`], [`FingerView::shrink_minutiae`])
//! - **[`Minutia`]** / **[`MinutiaType`]** - A single ridge feature point
//! - **[`FmrError`]** - Error type used across all FMR crates
//!
//! ## Basic Usage
//!
//! ```rust
//! use fmr_structures::{FingerView, FingerprintMinutiaeRecord, ImageSize, Minutia, MinutiaType, Resolution};
//!
//! let mut finger = FingerView::new(1, 0, 0, 75);
//! finger.add_minutia(Minutia::new(MinutiaType::Bifurcation, 100, 120, 64, 80)).unwrap();
//!
//! let mut record = FingerprintMinutiaeRecord::new(ImageSize::new(300, 400), Resolution::new(197.0, 197.0));
//! record.add_finger(finger).unwrap();
//! assert_eq!(record.number_of_minutiae(), 1);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
mod finger_view;
mod minutia;
mod record;

pub use error::{FmrError, FmrResult};
pub use finger_view::FingerView;
pub use minutia::{Minutia, MinutiaType};
pub use record::{FingerprintMinutiaeRecord, ImageSize, Resolution};
