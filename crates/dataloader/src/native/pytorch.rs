// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `torch.utils.data.DataLoader`-style loader.

use crate::backend::{DataHandle, PYTORCH_DATA};
use crate::batcher::{Batcher, Epoch};
use crate::{
    BatchSampler, BatchingConfig, CollateFn, DataLoaderError, DataLoaderFactory, Dataset,
    LastBatch, Sampler,
};
use lazy_backend::Framework;
use std::fmt;
use std::sync::Arc;

pub struct TorchDataLoader<D: Dataset> {
    pub batch_size: usize,
    pub drop_last: bool,
    pub num_workers: usize,
    pub pin_memory: bool,
    batcher: Batcher<D>,
}

impl<D: Dataset> TorchDataLoader<D> {
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
}

impl<D: Dataset> fmt::Debug for TorchDataLoader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TorchDataLoader")
            .field("batch_size", &self.batch_size)
            .field("drop_last", &self.drop_last)
            .field("num_workers", &self.num_workers)
            .field("pin_memory", &self.pin_memory)
            .field("batcher", &self.batcher)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PytorchLoaderFactory {
    backend: &'static DataHandle,
}

impl PytorchLoaderFactory {
    pub fn with_backend(backend: &'static DataHandle) -> Self {
        Self { backend }
    }
}

impl Default for PytorchLoaderFactory {
    fn default() -> Self {
        Self::with_backend(&PYTORCH_DATA)
    }
}

impl DataLoaderFactory for PytorchLoaderFactory {
    const FRAMEWORK: Framework = Framework::Pytorch;
    type Loader<D: Dataset> = TorchDataLoader<D>;

    fn build<D: Dataset>(
        &self,
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<TorchDataLoader<D>, DataLoaderError> {
        config.validate()?;
        let module = self.backend.get()?;

        let drop_last = config.last_batch.drops_incomplete();
        let last_batch = if drop_last { LastBatch::Discard } else { LastBatch::Keep };
        tracing::debug!(
            loader = module.loader,
            batch_size = config.batch_size,
            drop_last,
            num_workers = config.num_workers,
            "building data loader"
        );
        let batcher = Batcher::new(
            dataset,
            config.batch_size,
            last_batch,
            config.sampler,
            config.batch_sampler,
            config.collate_fn,
        )?;
        Ok(TorchDataLoader {
            batch_size: config.batch_size,
            drop_last,
            num_workers: config.num_workers,
            pin_memory: config.pin_memory,
            batcher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RangeDataset;

    #[test]
    fn test_every_field_maps() {
        let config = BatchingConfig::new()
            .batch_size(3)
            .last_batch(LastBatch::Discard)
            .sampler(Sampler::Indices(vec![6, 5, 4, 3, 2, 1, 0]))
            .num_workers(4)
            .pin_memory(true)
            .collate_fn(|b: Vec<usize>| b.into_iter().map(|x| x * 10).collect());
        let mut loader = PytorchLoaderFactory::default()
            .build(Arc::new(RangeDataset::new(0..7)), config)
            .unwrap();

        assert!(loader.drop_last);
        assert_eq!(loader.num_workers, 4);
        assert!(loader.pin_memory);
        assert!(loader.collate_fn().is_some());
        assert!(loader.batch_sampler().is_none());
        assert_eq!(
            loader.epoch().collect::<Vec<_>>(),
            vec![vec![60, 50, 40], vec![30, 20, 10]]
        );
    }

    #[test]
    fn test_batch_sampler() {
        let config = BatchingConfig::new().batch_sampler(BatchSampler(vec![vec![2, 0], vec![1]]));
        let mut loader = PytorchLoaderFactory::default()
            .build(Arc::new(vec!['a', 'b', 'c']), config)
            .unwrap();
        assert_eq!(loader.sampler(), &Sampler::Sequential);
        assert_eq!(loader.epoch().collect::<Vec<_>>(), vec![vec!['c', 'a'], vec!['b']]);
    }
}
