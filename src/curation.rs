// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Template curation pipeline
//!
//! Feature extractors often emit more minutiae than a matcher wants. The post-processor here
//! decodes a freshly extracted template, keeps the best minutiae of each finger view and
//! re-encodes it.

use fmr_config::{CodecConfig, CurationConfig};
use fmr_serialization::{decode_record_with_options, encode_record, DecodeOptions};
use fmr_structures::{FingerprintMinutiaeRecord, FmrResult};
use tracing::debug;

/// How minutiae are reduced per finger view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurationPolicy {
    /// Minutiae kept per finger view. 0 keeps everything
    pub max_minutiae: usize,
    pub sort_by_quality: bool,
}

impl CurationPolicy {
    pub fn new(max_minutiae: usize, sort_by_quality: bool) -> Self {
        Self {
            max_minutiae,
            sort_by_quality,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_minutiae > 0
    }
}

impl From<&CurationConfig> for CurationPolicy {
    fn from(config: &CurationConfig) -> Self {
        Self::new(config.max_minutiae, config.sort_by_quality)
    }
}

/// Applies `policy` to every finger view of `record` in place.
///
/// A disabled policy leaves the record untouched, including minutiae order.
pub fn curate_record(record: &mut FingerprintMinutiaeRecord, policy: &CurationPolicy) {
    if !policy.is_enabled() {
        return;
    }

    for finger in record.fingers.iter_mut() {
        if policy.sort_by_quality {
            finger.sort_minutiae_by_quality();
        }
        finger.shrink_minutiae(policy.max_minutiae);
    }
}

/// Decode, curate and re-encode extracted templates
///
/// # Example
/// ```rust
/// use fmr::config::{CodecConfig, CurationConfig};
/// use fmr::TemplatePostProcessor;
///
/// let processor = TemplatePostProcessor::from_config(&CurationConfig::default(), &CodecConfig::default());
/// let template = vec![0x46, 0x4D, 0x52];
/// // Curation is disabled by default, so bytes pass through without being parsed
/// assert_eq!(processor.process(&template).unwrap(), template);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplatePostProcessor {
    policy: CurationPolicy,
    decode_options: DecodeOptions,
}

impl TemplatePostProcessor {
    pub fn new(policy: CurationPolicy, decode_options: DecodeOptions) -> Self {
        Self {
            policy,
            decode_options,
        }
    }

    pub fn from_config(curation: &CurationConfig, codec: &CodecConfig) -> Self {
        Self::new(
            CurationPolicy::from(curation),
            DecodeOptions {
                verify_declared_length: codec.verify_declared_length,
            },
        )
    }

    pub fn policy(&self) -> &CurationPolicy {
        &self.policy
    }

    /// Returns the curated template.
    ///
    /// # Errors
    ///
    /// Any decode or encode error of the underlying codec. Never raised when curation is
    /// disabled, since the input is then returned as is.
    pub fn process(&self, template: &[u8]) -> FmrResult<Vec<u8>> {
        if !self.policy.is_enabled() {
            return Ok(template.to_vec());
        }

        let mut record = decode_record_with_options(template, &self.decode_options)?;
        let minutiae_before = record.number_of_minutiae();
        curate_record(&mut record, &self.policy);
        let curated = encode_record(&record)?;

        debug!(
            "[FMR-CURATE] Kept {} of {} minutiae across {} finger views ({} -> {} bytes)",
            record.number_of_minutiae(),
            minutiae_before,
            record.number_of_fingers(),
            template.len(),
            curated.len()
        );
        Ok(curated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmr_structures::{FingerView, ImageSize, Minutia, MinutiaType, Resolution};

    fn record_with_qualities(qualities: &[u8]) -> FingerprintMinutiaeRecord {
        let mut finger = FingerView::new(1, 0, 0, 70);
        for (i, quality) in qualities.iter().enumerate() {
            finger
                .add_minutia(Minutia::new(MinutiaType::Termination, i as u16, i as u16, 0, *quality))
                .unwrap();
        }
        let mut record =
            FingerprintMinutiaeRecord::new(ImageSize::new(256, 360), Resolution::new(197.0, 197.0));
        record.add_finger(finger).unwrap();
        record
    }

    fn qualities(record: &FingerprintMinutiaeRecord) -> Vec<u8> {
        record.fingers[0].minutiae.iter().map(|m| m.quality).collect()
    }

    #[test]
    fn test_sort_then_shrink_keeps_best() {
        let mut record = record_with_qualities(&[60, 90]);
        curate_record(&mut record, &CurationPolicy::new(1, true));
        assert_eq!(qualities(&record), vec![90]);
        assert_eq!(record.fingers[0].minutiae_count, 1);
    }

    #[test]
    fn test_shrink_without_sort_keeps_first() {
        let mut record = record_with_qualities(&[60, 90]);
        curate_record(&mut record, &CurationPolicy::new(1, false));
        assert_eq!(qualities(&record), vec![60]);
    }

    #[test]
    fn test_disabled_policy_is_a_no_op() {
        let mut record = record_with_qualities(&[10, 50, 30]);
        let original = record.clone();
        curate_record(&mut record, &CurationPolicy::new(0, true));
        assert_eq!(record, original);
    }

    #[test]
    fn test_policy_from_config() {
        let config = CurationConfig {
            max_minutiae: 40,
            sort_by_quality: true,
        };
        assert_eq!(CurationPolicy::from(&config), CurationPolicy::new(40, true));
    }

    #[test]
    fn test_process_shrinks_encoded_template() {
        let template = encode_record(&record_with_qualities(&[20, 80, 50, 70])).unwrap();
        let processor = TemplatePostProcessor::new(CurationPolicy::new(2, true), DecodeOptions::default());

        let curated = processor.process(&template).unwrap();
        assert_eq!(curated.len(), template.len() - 12);

        let decoded = fmr_serialization::decode_record(&curated).unwrap();
        assert_eq!(qualities(&decoded), vec![80, 70]);
    }

    #[test]
    fn test_process_disabled_passes_bytes_through() {
        let processor = TemplatePostProcessor::default();
        let garbage = b"not a record".to_vec();
        assert_eq!(processor.process(&garbage).unwrap(), garbage);
    }

    #[test]
    fn test_process_enabled_rejects_garbage() {
        let processor = TemplatePostProcessor::new(CurationPolicy::new(5, false), DecodeOptions::default());
        assert!(processor.process(b"not a record").is_err());
    }
}
