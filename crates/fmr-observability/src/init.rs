// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

/// Builds the `EnvFilter` directive string for the given flags and configuration.
pub fn filter_directives(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> String {
    debug_flags.to_filter_string(&config.level.to_lowercase())
}

/// Build a subscriber that formats events into `writer`
///
/// Crates flagged in `debug_flags` log at debug level, everything else at `config.level`.
pub fn build_subscriber<W>(
    debug_flags: &CrateDebugFlags,
    config: &LoggingConfig,
    writer: W,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = filter_directives(debug_flags, config);
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(config.with_target)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(config.with_target)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter)
            .boxed(),
    };

    Ok(Registry::default().with(console_layer))
}

/// Install a stdout subscriber as the global default
///
/// # Errors
///
/// Fails if the filter cannot be parsed or a global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<()> {
    build_subscriber(debug_flags, config, std::io::stdout)?
        .try_init()
        .map_err(|e| anyhow!("Failed to install logging subscriber: {}", e))
}
