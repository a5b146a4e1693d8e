// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The batching engine shared by every native loader.
//!
//! Each epoch first builds a plan (a list of index groups), then fetches
//! samples lazily while iterating:
//!
//! ```text
//! batch_sampler given  → its groups, verbatim
//! otherwise            → carry ++ sampler order, chunked by batch_size
//!                        short tail: keep | discard | carry to next epoch
//! ```

use crate::{BatchSampler, CollateFn, DataLoaderError, Dataset, LastBatch, Sampler};
use std::fmt;
use std::sync::Arc;

pub(crate) struct Batcher<D: Dataset> {
    dataset: Arc<D>,
    batch_size: usize,
    last_batch: LastBatch,
    sampler: Sampler,
    batch_sampler: Option<BatchSampler>,
    collate: Option<CollateFn<D::Item>>,
    carry: Vec<usize>,
    epoch: u64,
}

impl<D: Dataset> Batcher<D> {
    pub(crate) fn new(
        dataset: Arc<D>,
        batch_size: usize,
        last_batch: LastBatch,
        sampler: Option<Sampler>,
        batch_sampler: Option<BatchSampler>,
        collate: Option<CollateFn<D::Item>>,
    ) -> Result<Self, DataLoaderError> {
        let len = dataset.len();
        if let Some(Sampler::Indices(indices)) = &sampler {
            check_indices("sampler", indices, len)?;
        }
        if let Some(batch_sampler) = &batch_sampler {
            for group in batch_sampler.batches() {
                check_indices("batch_sampler", group, len)?;
            }
            tracing::debug!("batch_sampler given, batch_size and last_batch are ignored");
        }

        Ok(Self {
            dataset,
            batch_size,
            last_batch,
            sampler: sampler.unwrap_or_default(),
            batch_sampler,
            collate,
            carry: Vec::new(),
            epoch: 0,
        })
    }

    /// Index groups for the next epoch. Advances the epoch counter.
    pub(crate) fn plan(&mut self) -> Vec<Vec<usize>> {
        let epoch = self.epoch;
        self.epoch += 1;

        if let Some(batch_sampler) = &self.batch_sampler {
            return batch_sampler.batches().to_vec();
        }

        let mut order = std::mem::take(&mut self.carry);
        order.extend(self.sampler.indices(self.dataset.len(), epoch));
        let mut batches: Vec<Vec<usize>> =
            order.chunks(self.batch_size).map(<[usize]>::to_vec).collect();

        if batches.last().is_some_and(|b| b.len() < self.batch_size) {
            match self.last_batch {
                LastBatch::Keep => {}
                LastBatch::Discard => {
                    batches.pop();
                }
                LastBatch::Rollover => {
                    self.carry = batches.pop().unwrap_or_default();
                    tracing::trace!(carried = self.carry.len(), epoch, "rolling over samples");
                }
            }
        }
        batches
    }

    pub(crate) fn epoch(&mut self) -> Epoch<'_, D> {
        let plan = self.plan();
        Epoch {
            dataset: &self.dataset,
            plan: plan.into_iter(),
            collate: self.collate.as_ref(),
        }
    }

    pub(crate) fn collate(&self) -> Option<&CollateFn<D::Item>> {
        self.collate.as_ref()
    }

    pub(crate) fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub(crate) fn batch_sampler(&self) -> Option<&BatchSampler> {
        self.batch_sampler.as_ref()
    }

    pub(crate) fn pending_rollover(&self) -> &[usize] {
        &self.carry
    }

    pub(crate) fn epochs_started(&self) -> u64 {
        self.epoch
    }
}

fn check_indices(field: &str, indices: &[usize], len: usize) -> Result<(), DataLoaderError> {
    match indices.iter().find(|&&i| i >= len) {
        Some(bad) => Err(DataLoaderError::InvalidOption {
            field: field.to_string(),
            detail: format!("index {bad} out of range for dataset of {len} samples"),
        }),
        None => Ok(()),
    }
}

impl<D: Dataset> fmt::Debug for Batcher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batcher")
            .field("samples", &self.dataset.len())
            .field("batch_size", &self.batch_size)
            .field("last_batch", &self.last_batch)
            .field("sampler", &self.sampler)
            .field("batch_sampler", &self.batch_sampler.is_some())
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// Batches of one epoch.
pub struct Epoch<'a, D: Dataset> {
    dataset: &'a D,
    plan: std::vec::IntoIter<Vec<usize>>,
    collate: Option<&'a CollateFn<D::Item>>,
}

impl<D: Dataset> Iterator for Epoch<'_, D> {
    type Item = Vec<D::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = self.plan.next()?;
        let samples: Vec<D::Item> = indices.iter().filter_map(|&i| self.dataset.get(i)).collect();
        Some(match self.collate {
            Some(collate) => collate(samples),
            None => samples,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.plan.size_hint()
    }
}

impl<D: Dataset> ExactSizeIterator for Epoch<'_, D> {}
