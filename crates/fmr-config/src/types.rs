// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `fmr_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FmrConfig {
    pub codec: CodecConfig,
    pub curation: CurationConfig,
    pub logging: LoggingSettings,
}

/// Decoder strictness
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Reject records whose header length disagrees with their actual size
    pub verify_declared_length: bool,
}

/// Post-processing applied to freshly extracted templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CurationConfig {
    /// Keep at most this many minutiae per finger view. 0 disables curation
    pub max_minutiae: usize,
    /// Sort by quality before truncating, so the best minutiae are the ones kept
    pub sort_by_quality: bool,
}

/// Console logging
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace, debug, info, warn or error
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// Include the emitting module path in each line
    pub with_target: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            with_target: false,
        }
    }
}
