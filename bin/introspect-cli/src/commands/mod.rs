// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

pub mod backends;
pub mod batches;
pub mod detect;
pub mod graph;
pub mod inspect;

use model_catalog::{CatalogConfig, ModelContext};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the model context, applying the config file when one is given.
pub fn load_context(config: Option<&Path>) -> anyhow::Result<ModelContext> {
    let Some(path) = config else {
        return Ok(ModelContext::new());
    };
    let config = CatalogConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("failed to load config '{}': {e}", path.display()))?;
    for framework in config.disabled_frameworks()? {
        lazy_backend::installed::disable(framework);
    }
    tracing::debug!(path = %path.display(), "catalog config loaded");
    Ok(ModelContext::from_config(&config)?)
}

/// Truncates a string to `max_len` characters with an ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
