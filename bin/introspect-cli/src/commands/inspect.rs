// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `introspect inspect` command: display model inputs, outputs, and graph shape.
//!
//! Opens the model through the built-in registry, loads it once through its
//! backend, and prints the node lists plus an op histogram of the translated
//! graph.

use super::truncate;
use model_catalog::{ModelContext, ModelRegistry};
use std::path::PathBuf;

pub fn execute(model: PathBuf, ctx: &ModelContext) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             introspect · Model Inspector             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let registry = ModelRegistry::builtin();
    let opened = registry.open(&model, ctx)?;
    opened.guard_requirements_installed()?;

    let inputs = opened
        .input_nodes()
        .map_err(|e| anyhow::anyhow!("failed to load model from '{}': {e}", model.display()))?
        .to_vec();
    let outputs = opened.output_nodes()?;
    let graph = opened.model_graph()?;

    // ── Summary ────────────────────────────────────────────────
    println!("  Path:      {}", opened.path().display());
    println!("  Variant:   {}", opened.tag());
    println!("  Framework: {}", opened.framework());
    println!("  Graph:     {}", graph.summary());
    println!();

    // ── Inputs / Outputs ───────────────────────────────────────
    println!("  Inputs ({}):", inputs.len());
    for name in &inputs {
        println!("   {}", truncate(name, 60));
    }
    println!();
    println!("  Outputs ({}):", outputs.len());
    for name in &outputs {
        println!("   {}", truncate(name, 60));
    }
    println!();

    // ── Op Histogram ───────────────────────────────────────────
    println!("  {:<30} {:>6}", "Op", "Count");
    println!("  {}", "-".repeat(37));
    for (op, count) in graph.op_histogram() {
        println!("  {:<30} {:>6}", truncate(op, 30), count);
    }
    if graph.has_cycle() {
        println!();
        println!("   WARNING: graph contains a cycle");
    }
    println!();
    Ok(())
}
