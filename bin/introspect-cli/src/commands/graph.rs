// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `introspect graph` command: dump the framework-independent graph as JSON.

use model_catalog::{ModelContext, ModelRegistry};
use std::path::PathBuf;

pub fn execute(model: PathBuf, output: Option<PathBuf>, ctx: &ModelContext) -> anyhow::Result<()> {
    let opened = ModelRegistry::builtin().open(&model, ctx)?;
    let graph = opened.model_graph()?;
    let json = graph.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .map_err(|e| anyhow::anyhow!("failed to write '{}': {e}", path.display()))?;
            tracing::info!(path = %path.display(), nodes = graph.len(), "graph written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
