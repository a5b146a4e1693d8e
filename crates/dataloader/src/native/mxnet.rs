// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `mxnet.gluon.data.DataLoader`-style loader. The only native loader
//! with a rollover policy of its own besides the default loader.

use crate::backend::{DataHandle, MXNET_DATA};
use crate::batcher::{Batcher, Epoch};
use crate::{
    BatchSampler, BatchingConfig, CollateFn, DataLoaderError, DataLoaderFactory, Dataset,
    LastBatch, Sampler,
};
use lazy_backend::Framework;
use std::fmt;
use std::sync::Arc;

pub struct GluonDataLoader<D: Dataset> {
    pub batch_size: usize,
    pub last_batch: LastBatch,
    pub num_workers: usize,
    pub pin_memory: bool,
    batcher: Batcher<D>,
}

impl<D: Dataset> GluonDataLoader<D> {
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

    pub fn batchify_fn(&self) -> Option<&CollateFn<D::Item>> {
        self.batcher.collate()
    }

    /// Indices carried into the next epoch by `rollover`.
    pub fn pending_rollover(&self) -> &[usize] {
        self.batcher.pending_rollover()
    }
}

impl<D: Dataset> fmt::Debug for GluonDataLoader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GluonDataLoader")
            .field("batch_size", &self.batch_size)
            .field("last_batch", &self.last_batch)
            .field("num_workers", &self.num_workers)
            .field("pin_memory", &self.pin_memory)
            .field("batcher", &self.batcher)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MxnetLoaderFactory {
    backend: &'static DataHandle,
}

impl MxnetLoaderFactory {
    pub fn with_backend(backend: &'static DataHandle) -> Self {
        Self { backend }
    }
}

impl Default for MxnetLoaderFactory {
    fn default() -> Self {
        Self::with_backend(&MXNET_DATA)
    }
}

impl DataLoaderFactory for MxnetLoaderFactory {
    const FRAMEWORK: Framework = Framework::Mxnet;
    type Loader<D: Dataset> = GluonDataLoader<D>;

    fn build<D: Dataset>(
        &self,
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<GluonDataLoader<D>, DataLoaderError> {
        config.validate()?;
        let module = self.backend.get()?;

        tracing::debug!(
            loader = module.loader,
            batch_size = config.batch_size,
            last_batch = %config.last_batch,
            num_workers = config.num_workers,
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
        Ok(GluonDataLoader {
            batch_size: config.batch_size,
            last_batch: config.last_batch,
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
    fn test_rollover_across_epochs() {
        let mut loader = MxnetLoaderFactory::default()
            .build(Arc::new(RangeDataset::new(0..7)), BatchingConfig::new().batch_size(3))
            .unwrap();
        assert_eq!(loader.last_batch, LastBatch::Rollover);

        assert_eq!(loader.epoch().collect::<Vec<_>>(), vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(loader.pending_rollover(), &[6]);
        assert_eq!(
            loader.epoch().collect::<Vec<_>>(),
            vec![vec![6, 0, 1], vec![2, 3, 4]]
        );
        assert_eq!(loader.pending_rollover(), &[5, 6]);
    }

    #[test]
    fn test_batchify_fn_and_workers() {
        let config = BatchingConfig::new()
            .batch_size(2)
            .last_batch(LastBatch::Keep)
            .num_workers(2)
            .pin_memory(true)
            .sampler(Sampler::Random { seed: 3 })
            .collate_fn(|mut b: Vec<usize>| {
                b.sort_unstable();
                b
            });
        let mut loader = MxnetLoaderFactory::default()
            .build(Arc::new(RangeDataset::new(0..5)), config)
            .unwrap();
        assert!(loader.batchify_fn().is_some());
        assert_eq!(loader.sampler(), &Sampler::Random { seed: 3 });
        assert!(loader.batch_sampler().is_none());

        let batches: Vec<Vec<usize>> = loader.epoch().collect();
        assert_eq!(batches.len(), 3);
        assert!(batches.iter().all(|b| b.windows(2).all(|w| w[0] <= w[1])));
        let mut seen: Vec<usize> = batches.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }
}
