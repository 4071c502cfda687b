// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{FmrError, FmrResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

//region Minutia Type

/// The kind of ridge feature a [`Minutia`] marks.
///
/// Stored in the top 2 bits of the first minutia word, so every bit pattern maps to a variant.
/// `Unknown` is the reserved pattern `0b11`.
///
/// # Example
/// ```
/// use fmr_structures::MinutiaType;
///
/// assert_eq!(MinutiaType::Bifurcation as u8, 2);
/// assert_eq!(MinutiaType::from_bits(0b01), MinutiaType::Termination);
/// assert!(MinutiaType::try_from(4u8).is_err());
/// ```
#[repr(u8)]
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, Serialize, Deserialize)]
pub enum MinutiaType {
    Other = 0b00,
    Termination = 0b01,
    Bifurcation = 0b10,
    Unknown = 0b11,
}

impl MinutiaType {
    pub const NUMBER_OF_BITS: u32 = 2;

    /// Maps the low 2 bits of the given value to a type. Higher bits are ignored.
    pub const fn from_bits(bits: u8) -> MinutiaType {
        match bits & 0b11 {
            0b00 => MinutiaType::Other,
            0b01 => MinutiaType::Termination,
            0b10 => MinutiaType::Bifurcation,
            _ => MinutiaType::Unknown,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MinutiaType::Other => "Other",
            MinutiaType::Termination => "Termination",
            MinutiaType::Bifurcation => "Bifurcation",
            MinutiaType::Unknown => "Unknown",
        }
    }

    /// True for the three types the standard gives a meaning to.
    pub const fn is_meaningful(&self) -> bool {
        !matches!(self, MinutiaType::Unknown)
    }
}

impl TryFrom<u8> for MinutiaType {
    type Error = FmrError;
    fn try_from(value: u8) -> Result<Self, FmrError> {
        if value > 0b11 {
            return Err(FmrError::Range(format!(
                "Minutia type {} does not fit in {} bits",
                value,
                MinutiaType::NUMBER_OF_BITS
            )));
        }
        Ok(MinutiaType::from_bits(value))
    }
}

impl Display for MinutiaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

//endregion

//region Minutia

/// A single ridge feature point.
///
/// Coordinates are limited to 14 bits on the wire. Construction through [`Minutia::new`] does not
/// check them; the encoder does, and [`Minutia::try_new`] checks up front.
///
/// # Example
/// ```
/// use fmr_structures::{Minutia, MinutiaType};
///
/// let minutia = Minutia::new(MinutiaType::Termination, 120, 340, 128, 90);
/// assert_eq!(minutia.direction_degrees(), 180);
/// assert!(Minutia::try_new(MinutiaType::Termination, 16384, 0, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Minutia {
    pub minutia_type: MinutiaType,
    pub x: u16,
    pub y: u16,
    /// Orientation in units of 360/256 degrees
    pub direction: u8,
    pub quality: u8,
}

impl Minutia {
    pub const NUMBER_OF_COORDINATE_BITS: u32 = 14;

    pub const MAX_COORDINATE: u16 = (1 << Self::NUMBER_OF_COORDINATE_BITS) - 1;

    pub fn new(minutia_type: MinutiaType, x: u16, y: u16, direction: u8, quality: u8) -> Self {
        Self {
            minutia_type,
            x,
            y,
            direction,
            quality,
        }
    }

    pub fn try_new(
        minutia_type: MinutiaType,
        x: u16,
        y: u16,
        direction: u8,
        quality: u8,
    ) -> FmrResult<Self> {
        let minutia = Self::new(minutia_type, x, y, direction, quality);
        minutia.verify_coordinates()?;
        Ok(minutia)
    }

    /// Fails with [`FmrError::Range`] if either coordinate needs more than 14 bits.
    pub fn verify_coordinates(&self) -> FmrResult<()> {
        if self.x > Self::MAX_COORDINATE {
            return Err(FmrError::Range(format!(
                "Minutia x coordinate {} exceeds maximum of {}",
                self.x,
                Self::MAX_COORDINATE
            )));
        }
        if self.y > Self::MAX_COORDINATE {
            return Err(FmrError::Range(format!(
                "Minutia y coordinate {} exceeds maximum of {}",
                self.y,
                Self::MAX_COORDINATE
            )));
        }
        Ok(())
    }

    /// Orientation in whole degrees, `(direction * 360 + 128) / 256`.
    pub fn direction_degrees(&self) -> u16 {
        ((self.direction as u32 * 360 + 128) / 256) as u16
    }

    /// Inverse of [`Minutia::direction_degrees`]. Angles of 360 or more wrap around.
    ///
    /// # Example
    /// ```
    /// use fmr_structures::Minutia;
    ///
    /// assert_eq!(Minutia::direction_from_degrees(180), 128);
    /// assert_eq!(Minutia::direction_from_degrees(360), 0);
    /// ```
    pub fn direction_from_degrees(degrees: u16) -> u8 {
        let degrees = (degrees % 360) as u32;
        ((degrees * 256 + 180) / 360) as u8
    }
}

impl Display for Minutia {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Minutia(Type: {}, x: {}, y: {}, Direction: {}°, Quality: ",
            self.minutia_type,
            self.x,
            self.y,
            self.direction_degrees()
        )?;
        if self.quality == 0 {
            write!(f, "Not Reported)")
        } else {
            write!(f, "{})", self.quality)
        }
    }
}

//endregion
