// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{FingerView, FmrError, FmrResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

//region Image Size

/// Dimensions of the image the minutiae were extracted from, in pixels.
///
/// Held wider than the 16-bit wire fields so oversized values are reported rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//endregion

//region Resolution

/// Horizontal and vertical image resolution as stored by the format, in pixels per centimetre.
///
/// Fractional values are allowed in memory and rounded to the nearest integer on encode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

impl Resolution {
    pub const CENTIMETRES_PER_INCH: f64 = 2.54;

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a resolution from a dots-per-inch value used for both axes.
    ///
    /// # Example
    /// ```
    /// use fmr_structures::Resolution;
    ///
    /// let resolution = Resolution::from_pixels_per_inch(500.0);
    /// assert_eq!(resolution.x.round(), 197.0);
    /// assert_eq!(resolution.to_pixels_per_inch(), (500, 500));
    /// ```
    pub fn from_pixels_per_inch(pixels_per_inch: f64) -> Self {
        let per_centimetre = pixels_per_inch / Self::CENTIMETRES_PER_INCH;
        Self::new(per_centimetre, per_centimetre)
    }

    /// Converts back to whole pixels per inch, truncating.
    pub fn to_pixels_per_inch(&self) -> (u32, u32) {
        (
            (self.x * Self::CENTIMETRES_PER_INCH) as u32,
            (self.y * Self::CENTIMETRES_PER_INCH) as u32,
        )
    }
}

//endregion

//region Fingerprint Minutiae Record

/// A complete ISO/IEC 19794-2 minutiae record: image metadata plus one or more finger views.
///
/// # Example
/// ```
/// use fmr_structures::{FingerView, FingerprintMinutiaeRecord, ImageSize, Resolution};
///
/// let mut record = FingerprintMinutiaeRecord::new(
///     ImageSize::new(300, 400),
///     Resolution::from_pixels_per_inch(500.0),
/// );
/// record.add_finger(FingerView::new(1, 0, 0, 80)).unwrap();
/// assert_eq!(record.number_of_fingers(), 1);
/// assert_eq!(record.version_label(), "20");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintMinutiaeRecord {
    pub version: [u8; 4],
    pub size: ImageSize,
    pub dpi: Resolution,
    pub fingers: Vec<FingerView>,
}

impl FingerprintMinutiaeRecord {
    /// The only format version tag this crate reads and writes.
    pub const SUPPORTED_VERSION: [u8; 4] = *b" 20\0";

    pub const MAX_NUMBER_OF_FINGERS: usize = u8::MAX as usize;

    pub fn new(size: ImageSize, dpi: Resolution) -> Self {
        Self {
            version: Self::SUPPORTED_VERSION,
            size,
            dpi,
            fingers: Vec::new(),
        }
    }

    pub fn add_finger(&mut self, finger: FingerView) -> FmrResult<()> {
        if self.fingers.len() >= Self::MAX_NUMBER_OF_FINGERS {
            return Err(FmrError::Range(format!(
                "A minutiae record can hold at most {} finger views!",
                Self::MAX_NUMBER_OF_FINGERS
            )));
        }
        self.fingers.push(finger);
        Ok(())
    }

    pub fn number_of_fingers(&self) -> usize {
        self.fingers.len()
    }

    pub fn has_supported_version(&self) -> bool {
        self.version == Self::SUPPORTED_VERSION
    }

    /// The version tag with its padding spaces and NULs removed.
    pub fn version_label(&self) -> String {
        String::from_utf8_lossy(&self.version)
            .trim_matches(|c| c == ' ' || c == '\0')
            .to_string()
    }

    /// Total number of minutiae across every finger view.
    pub fn number_of_minutiae(&self) -> usize {
        self.fingers.iter().map(|finger| finger.minutiae.len()).sum()
    }
}

impl Default for FingerprintMinutiaeRecord {
    fn default() -> Self {
        Self::new(ImageSize::default(), Resolution::default())
    }
}

impl Display for FingerprintMinutiaeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (dpi_x, dpi_y) = self.dpi.to_pixels_per_inch();
        write!(
            f,
            "FingerprintMinutiaeRecord(Version: {}, Size: {}, DPI: ({}, {}), Num Fingers: {})",
            self.version_label(),
            self.size,
            dpi_x,
            dpi_y,
            self.fingers.len()
        )
    }
}

//endregion
