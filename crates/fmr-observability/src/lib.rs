// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # fmr-observability
//!
//! Logging setup shared by the FMR crates, with per-crate debug flag support.
//!
//! The codec crates only emit `tracing` events; nothing is printed until an application calls
//! [`init_logging`].

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known FMR crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "fmr",
    "fmr-structures",
    "fmr-serialization",
    "fmr-config",
    "fmr-observability",
];
