// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{FmrError, FmrResult, Minutia};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One captured impression of one finger, with the minutiae found on it.
///
/// `minutiae_count` mirrors `minutiae.len()` and is what gets written to the wire. The methods
/// here keep the two in step; code that edits the public fields directly must do so itself, and
/// the encoder refuses a view where they disagree.
///
/// # Example
/// ```
/// use fmr_structures::{FingerView, Minutia, MinutiaType};
///
/// let mut finger = FingerView::new(1, 0, 0, 80);
/// finger.add_minutia(Minutia::new(MinutiaType::Termination, 10, 10, 0, 60)).unwrap();
/// finger.add_minutia(Minutia::new(MinutiaType::Bifurcation, 20, 20, 0, 90)).unwrap();
///
/// finger.sort_minutiae_by_quality();
/// finger.shrink_minutiae(1);
/// assert_eq!(finger.minutiae_count, 1);
/// assert_eq!(finger.minutiae[0].quality, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerView {
    /// Finger position code, not checked against the standard's table
    pub position: u8,
    pub view_number: u8,
    pub impression_number: u8,
    pub fp_quality: u8,
    pub minutiae_count: u8,
    pub minutiae: Vec<Minutia>,
}

impl FingerView {
    pub const MAX_VIEW_NUMBER: u8 = 0x0F;

    pub const MAX_IMPRESSION_NUMBER: u8 = 0x0F;

    pub const MAX_NUMBER_OF_MINUTIAE: usize = u8::MAX as usize;

    //region Constructors

    /// Creates a view with no minutiae.
    pub fn new(position: u8, view_number: u8, impression_number: u8, fp_quality: u8) -> Self {
        Self {
            position,
            view_number,
            impression_number,
            fp_quality,
            minutiae_count: 0,
            minutiae: Vec::new(),
        }
    }

    //endregion

    //region Minutiae

    /// Appends a minutia, failing once the view already holds 255 of them.
    pub fn add_minutia(&mut self, minutia: Minutia) -> FmrResult<()> {
        if self.minutiae.len() >= Self::MAX_NUMBER_OF_MINUTIAE {
            return Err(FmrError::Range(format!(
                "A finger view can hold at most {} minutiae!",
                Self::MAX_NUMBER_OF_MINUTIAE
            )));
        }
        self.minutiae.push(minutia);
        self.minutiae_count = self.minutiae.len() as u8;
        Ok(())
    }

    pub fn clear_minutiae(&mut self) {
        self.minutiae.clear();
        self.minutiae_count = 0;
    }

    pub fn number_of_minutiae(&self) -> usize {
        self.minutiae.len()
    }

    /// Reorders minutiae from highest to lowest quality. Equal qualities keep their order.
    pub fn sort_minutiae_by_quality(&mut self) {
        self.minutiae.sort_by(|a, b| b.quality.cmp(&a.quality));
    }

    /// Keeps only the first `number_of_minutiae` entries.
    ///
    /// Does nothing if the view does not hold more than that. Sort first to keep the best ones.
    pub fn shrink_minutiae(&mut self, number_of_minutiae: usize) {
        if number_of_minutiae >= self.minutiae_count as usize {
            return;
        }
        self.minutiae.truncate(number_of_minutiae);
        self.minutiae_count = self.minutiae.len() as u8;
    }

    //endregion

    //region Validation

    /// Checks the nibble fields and the count before anything is packed for the wire.
    pub fn verify_encodable(&self) -> FmrResult<()> {
        if self.view_number > Self::MAX_VIEW_NUMBER {
            return Err(FmrError::Range(format!(
                "View number {} does not fit in 4 bits",
                self.view_number
            )));
        }
        if self.impression_number > Self::MAX_IMPRESSION_NUMBER {
            return Err(FmrError::Range(format!(
                "Impression number {} does not fit in 4 bits",
                self.impression_number
            )));
        }
        self.verify_minutiae_count()
    }

    pub fn verify_minutiae_count(&self) -> FmrResult<()> {
        if self.minutiae_count as usize != self.minutiae.len() {
            return Err(FmrError::Range(format!(
                "Finger view declares {} minutiae but holds {}",
                self.minutiae_count,
                self.minutiae.len()
            )));
        }
        Ok(())
    }

    //endregion
}

impl Display for FingerView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FingerView(Position: {}, View #: {}, Impression #: {}, FP Quality: {}, Minutiae #: {})",
            self.position,
            self.view_number,
            self.impression_number,
            self.fp_quality,
            self.minutiae_count
        )
    }
}
