// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tf.data`-style loader.

use crate::backend::{DataHandle, TENSORFLOW_DATA};
use crate::batcher::{Batcher, Epoch};
use crate::{BatchingConfig, CollateFn, DataLoaderError, DataLoaderFactory, Dataset, LastBatch};
use lazy_backend::Framework;
use std::fmt;
use std::sync::Arc;

/// A batched `tf.data` pipeline: `dataset.batch(batch_size, drop_remainder).map(map)`.
pub struct TfDataset<D: Dataset> {
    pub batch_size: usize,
    pub drop_remainder: bool,
    batcher: Batcher<D>,
}

impl<D: Dataset> TfDataset<D> {
    /// Batches of the next epoch.
    pub fn epoch(&mut self) -> Epoch<'_, D> {
        self.batcher.epoch()
    }

    /// Per-batch map function.
    pub fn map(&self) -> Option<&CollateFn<D::Item>> {
        self.batcher.collate()
    }
}

impl<D: Dataset> fmt::Debug for TfDataset<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TfDataset")
            .field("batch_size", &self.batch_size)
            .field("drop_remainder", &self.drop_remainder)
            .field("map", &self.map().is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TensorflowLoaderFactory {
    backend: &'static DataHandle,
}

impl TensorflowLoaderFactory {
    pub fn with_backend(backend: &'static DataHandle) -> Self {
        Self { backend }
    }
}

impl Default for TensorflowLoaderFactory {
    fn default() -> Self {
        Self::with_backend(&TENSORFLOW_DATA)
    }
}

impl DataLoaderFactory for TensorflowLoaderFactory {
    const FRAMEWORK: Framework = Framework::Tensorflow;
    type Loader<D: Dataset> = TfDataset<D>;

    fn build<D: Dataset>(
        &self,
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<TfDataset<D>, DataLoaderError> {
        config.validate()?;
        let module = self.backend.get()?;

        if config.sampler.is_some() {
            return Err(DataLoaderError::unsupported("sampler", Self::FRAMEWORK));
        }
        if config.batch_sampler.is_some() {
            return Err(DataLoaderError::unsupported("batch_sampler", Self::FRAMEWORK));
        }
        if config.num_workers > 0 {
            return Err(DataLoaderError::unsupported("num_workers", Self::FRAMEWORK));
        }
        if config.pin_memory {
            return Err(DataLoaderError::unsupported("pin_memory", Self::FRAMEWORK));
        }

        let drop_remainder = config.last_batch.drops_incomplete();
        let last_batch = if drop_remainder { LastBatch::Discard } else { LastBatch::Keep };
        tracing::debug!(
            loader = module.loader,
            batch_size = config.batch_size,
            drop_remainder,
            "building data loader"
        );
        let batcher = Batcher::new(dataset, config.batch_size, last_batch, None, None, config.collate_fn)?;
        Ok(TfDataset {
            batch_size: config.batch_size,
            drop_remainder,
            batcher,
        })
    }
}
