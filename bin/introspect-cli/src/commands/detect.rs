// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `introspect detect` command: classify paths without loading them.

use model_catalog::ModelRegistry;
use std::path::PathBuf;

pub fn execute(paths: Vec<PathBuf>) -> anyhow::Result<()> {
    let registry = ModelRegistry::builtin();
    let mut unsupported = 0usize;

    for path in &paths {
        match registry.resolve(path) {
            Ok(entry) => println!(
                "  {:<18} {:<12} {}",
                entry.tag.as_str(),
                entry.framework.as_str(),
                path.display(),
            ),
            Err(e) => {
                unsupported += 1;
                println!("  {:<18} {:<12} {}", "-", "-", path.display());
                tracing::info!(path = %path.display(), "{e}");
            }
        }
    }

    if unsupported == paths.len() {
        anyhow::bail!("no path matched a known model format");
    }
    Ok(())
}
