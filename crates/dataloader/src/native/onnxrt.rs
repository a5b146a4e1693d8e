// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The default loader used for ONNX Runtime models.

use crate::backend::{DataHandle, ONNXRT_DATA};
use crate::batcher::{Batcher, Epoch};
use crate::{
    BatchSampler, BatchingConfig, CollateFn, DataLoaderError, DataLoaderFactory, Dataset,
    LastBatch, Sampler,
};
use lazy_backend::Framework;
use std::fmt;
use std::sync::Arc;

/// Single-process loader with the full last-batch policy.
pub struct DefaultDataLoader<D: Dataset> {
    pub batch_size: usize,
    pub last_batch: LastBatch,
    batcher: Batcher<D>,
}

impl<D: Dataset> DefaultDataLoader<D> {
    /// Batches of the next epoch.
    pub fn epoch(&mut self) -> Epoch<'_, D> {
        self.batcher.epoch()
    }

    pub fn sampler(&self) -> &Sampler {
        self.batcher.sampler()
    }

    pub fn batch_sampler(&self) -> Option<&BatchSampler> {
        self.batcher.batch_sampler()
    }

    pub fn collate_fn(&self) -> Option<&CollateFn<D::Item>> {
        self.batcher.collate()
    }

    /// Number of epochs started so far.
    pub fn epochs_started(&self) -> u64 {
        self.batcher.epochs_started()
    }
}

impl<D: Dataset> fmt::Debug for DefaultDataLoader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultDataLoader")
            .field("batch_size", &self.batch_size)
            .field("last_batch", &self.last_batch)
            .field("batcher", &self.batcher)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OnnxrtLoaderFactory {
    backend: &'static DataHandle,
}

impl OnnxrtLoaderFactory {
    pub fn with_backend(backend: &'static DataHandle) -> Self {
        Self { backend }
    }
}

impl Default for OnnxrtLoaderFactory {
    fn default() -> Self {
        Self::with_backend(&ONNXRT_DATA)
    }
}

impl DataLoaderFactory for OnnxrtLoaderFactory {
    const FRAMEWORK: Framework = Framework::Onnxrt;
    type Loader<D: Dataset> = DefaultDataLoader<D>;

    fn build<D: Dataset>(
        &self,
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<DefaultDataLoader<D>, DataLoaderError> {
        config.validate()?;
        let module = self.backend.get()?;

        if config.num_workers > 0 {
            return Err(DataLoaderError::unsupported("num_workers", Self::FRAMEWORK));
        }
        if config.pin_memory {
            return Err(DataLoaderError::unsupported("pin_memory", Self::FRAMEWORK));
        }

        tracing::debug!(
            loader = module.loader,
            batch_size = config.batch_size,
            last_batch = %config.last_batch,
            "building data loader"
        );
        let batcher = Batcher::new(
            dataset,
            config.batch_size,
            config.last_batch,
            config.sampler,
            config.batch_sampler,
            config.collate_fn,
        )?;
        Ok(DefaultDataLoader {
            batch_size: config.batch_size,
            last_batch: config.last_batch,
            batcher,
        })
    }
}
