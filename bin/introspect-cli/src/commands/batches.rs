// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `introspect batches` command: preview a native loader's batches.
//!
//! Builds the framework's loader over the integers `0..len` and prints the
//! index batches of each epoch, so batching options can be checked against
//! a framework before wiring in real data.

use dataloader::{BatchingConfig, DataLoader, LastBatch, RangeDataset, Sampler};
use lazy_backend::Framework;
use std::sync::Arc;

pub fn execute(
    framework: Framework,
    len: usize,
    batch_size: usize,
    last_batch: LastBatch,
    seed: Option<u64>,
    epochs: usize,
) -> anyhow::Result<()> {
    let mut config = BatchingConfig::new()
        .batch_size(batch_size)
        .last_batch(last_batch);
    if let Some(seed) = seed {
        config = config.sampler(Sampler::Random { seed });
    }

    let mut loader = DataLoader::build(framework, Arc::new(RangeDataset::new(0..len)), config)?;

    println!(
        "  {} loader, {} samples, batch size {}, last batch {}",
        loader.framework(),
        len,
        loader.batch_size(),
        last_batch,
    );
    for epoch in 0..epochs {
        let batches: Vec<Vec<usize>> = loader.epoch().collect();
        println!("  epoch {epoch} ({} batches)", batches.len());
        for batch in &batches {
            println!("   {batch:?}");
        }
    }
    Ok(())
}
