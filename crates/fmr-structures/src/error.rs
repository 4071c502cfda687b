// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Common error type for fingerprint minutiae record operations.
///
/// Every decode error is fatal to the decode call that produced it. Encode errors are raised
/// before any bytes reach the caller's sink.
///
/// # Examples
/// ```
/// use fmr_structures::{FmrError, FmrResult};
///
/// fn check_nibble(value: u8) -> FmrResult<()> {
///     if value > 15 {
///         return Err(FmrError::Range(format!("{} does not fit in 4 bits", value)));
///     }
///     Ok(())
/// }
///
/// assert!(check_nibble(16).is_err());
/// assert!(check_nibble(15).is_ok());
/// ```
#[derive(Error, Debug)]
pub enum FmrError {
    /// The stream does not start with the FMR magic bytes
    #[error("Not an ISO FMR record: invalid magic {found:?}")]
    Format { found: [u8; 4] },

    /// The stream is an FMR record, but of a version this codec does not handle
    #[error("Unsupported FMR version {found:?}, only \" 20\\0\" is supported")]
    Version { found: [u8; 4] },

    /// The stream ended before the named field was complete
    #[error("Input ended while reading {field}")]
    TruncatedInput { field: &'static str },

    /// A value does not fit its field, or a declared count disagrees with its sequence
    #[error("Value out of range: {0}")]
    Range(String),

    /// The header's total length disagrees with the number of bytes the record occupies
    #[error("Header declares {declared} bytes but the record occupies {actual} bytes")]
    DeclaredLength { declared: u32, actual: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FmrResult<T> = Result<T, FmrError>;
