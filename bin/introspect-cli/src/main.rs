// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # introspect
//!
//! Command-line interface for the model introspection layer.
//!
//! ## Usage
//! ```bash
//! # Which variant handles a path
//! introspect detect ./models/resnet.pb ./models/export/
//!
//! # Inputs, outputs, and a graph summary
//! introspect inspect --model ./models/resnet.onnx
//!
//! # Framework-independent graph as JSON
//! introspect graph --model ./models/resnet.pb --output graph.json
//!
//! # Batches a framework's native loader would produce
//! introspect batches --framework mxnet --len 10 --batch-size 4 --epochs 2
//! ```

mod commands;

use clap::{Parser, Subcommand};
use dataloader::LastBatch;
use lazy_backend::Framework;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "introspect",
    about = "Framework-agnostic model detection and introspection",
    version,
    author
)]
struct Cli {
    /// Path to a TOML catalog configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the variant tag assigned to each path.
    Detect {
        /// Paths to classify.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Load a model and print its inputs, outputs, and graph summary.
    Inspect {
        /// Path to the model file or directory.
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Translate a model into the framework-independent graph as JSON.
    Graph {
        /// Path to the model file or directory.
        #[arg(short, long)]
        model: PathBuf,

        /// Write the JSON here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List frameworks and whether each can be used.
    Backends,

    /// Print the batches a framework's native loader yields over 0..len.
    Batches {
        /// Target framework (tensorflow, onnxrt, pytorch, mxnet).
        #[arg(short, long)]
        framework: Framework,

        /// Number of samples.
        #[arg(long, default_value_t = 10)]
        len: usize,

        #[arg(short, long, default_value_t = 1)]
        batch_size: usize,

        /// Trailing-batch policy: keep, discard, rollover.
        #[arg(long, default_value_t = LastBatch::Rollover)]
        last_batch: LastBatch,

        /// Shuffle with this seed instead of sampling sequentially.
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1)]
        epochs: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let ctx = commands::load_context(cli.config.as_deref())?;

    match cli.command {
        Commands::Detect { paths } => commands::detect::execute(paths),
        Commands::Inspect { model } => commands::inspect::execute(model, &ctx),
        Commands::Graph { model, output } => commands::graph::execute(model, output, &ctx),
        Commands::Backends => commands::backends::execute(),
        Commands::Batches {
            framework,
            len,
            batch_size,
            last_batch,
            seed,
            epochs,
        } => commands::batches::execute(framework, len, batch_size, last_batch, seed, epochs),
    }
}
