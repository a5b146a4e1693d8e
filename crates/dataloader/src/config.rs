// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The framework-agnostic batching configuration.

use crate::{BatchSampler, DataLoaderError, Sampler};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Transforms the samples of one batch before it is yielded.
pub type CollateFn<T> = Arc<dyn Fn(Vec<T>) -> Vec<T> + Send + Sync>;

/// What to do with a trailing batch smaller than `batch_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastBatch {
    /// Yield it as is.
    Keep,
    /// Drop it.
    Discard,
    /// Carry its samples over to the front of the next epoch.
    #[default]
    Rollover,
}

impl LastBatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Discard => "discard",
            Self::Rollover => "rollover",
        }
    }

    /// Parses a policy name, accepting `"drop"` for [`Discard`](Self::Discard).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Some(Self::Keep),
            "discard" | "drop" => Some(Self::Discard),
            "rollover" => Some(Self::Rollover),
            _ => None,
        }
    }

    /// Boolean "drop incomplete trailing batch" reading, for frameworks
    /// without rollover.
    pub fn drops_incomplete(&self) -> bool {
        matches!(self, Self::Discard)
    }
}

impl fmt::Display for LastBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LastBatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| {
            format!("unknown last-batch policy '{s}'; expected 'keep', 'discard', or 'rollover'")
        })
    }
}

/// How a dataset should be split into batches, independent of framework.
pub struct BatchingConfig<T> {
    pub batch_size: usize,
    pub last_batch: LastBatch,
    pub sampler: Option<Sampler>,
    pub batch_sampler: Option<BatchSampler>,
    pub num_workers: usize,
    pub pin_memory: bool,
    pub collate_fn: Option<CollateFn<T>>,
}

impl<T> BatchingConfig<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn last_batch(mut self, last_batch: LastBatch) -> Self {
        self.last_batch = last_batch;
        self
    }

    pub fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn batch_sampler(mut self, batch_sampler: BatchSampler) -> Self {
        self.batch_sampler = Some(batch_sampler);
        self
    }

    pub fn num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    pub fn pin_memory(mut self, pin_memory: bool) -> Self {
        self.pin_memory = pin_memory;
        self
    }

    pub fn collate_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<T>) -> Vec<T> + Send + Sync + 'static,
    {
        self.collate_fn = Some(Arc::new(f));
        self
    }

    /// Framework-independent checks, run before any backend is resolved.
    pub fn validate(&self) -> Result<(), DataLoaderError> {
        if self.sampler.is_some() && self.batch_sampler.is_some() {
            return Err(DataLoaderError::ConflictingSamplerConfiguration);
        }
        if self.batch_size == 0 {
            return Err(DataLoaderError::InvalidOption {
                field: "batch_size".into(),
                detail: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl<T> Default for BatchingConfig<T> {
    fn default() -> Self {
        Self {
            batch_size: 1,
            last_batch: LastBatch::default(),
            sampler: None,
            batch_sampler: None,
            num_workers: 0,
            pin_memory: false,
            collate_fn: None,
        }
    }
}

impl<T> Clone for BatchingConfig<T> {
    fn clone(&self) -> Self {
        Self {
            batch_size: self.batch_size,
            last_batch: self.last_batch,
            sampler: self.sampler.clone(),
            batch_sampler: self.batch_sampler.clone(),
            num_workers: self.num_workers,
            pin_memory: self.pin_memory,
            collate_fn: self.collate_fn.clone(),
        }
    }
}

impl<T> fmt::Debug for BatchingConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchingConfig")
            .field("batch_size", &self.batch_size)
            .field("last_batch", &self.last_batch)
            .field("sampler", &self.sampler)
            .field("batch_sampler", &self.batch_sampler)
            .field("num_workers", &self.num_workers)
            .field("pin_memory", &self.pin_memory)
            .field("collate_fn", &self.collate_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
