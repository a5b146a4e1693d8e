// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dataloader
//!
//! Maps a framework-agnostic [`BatchingConfig`] onto a framework's native
//! batch loader.
//!
//! Each framework has a [`DataLoaderFactory`] that translates the fields
//! its native loader understands, under that framework's own names and
//! semantics, and rejects the ones it cannot express with
//! [`DataLoaderError::UnsupportedBatchingOption`]. The framework's data
//! module is resolved through a [`LazyBackend`](lazy_backend::LazyBackend)
//! on first build.
//!
//! # Example
//! ```
//! use dataloader::{BatchingConfig, DataLoader, LastBatch, RangeDataset};
//! use lazy_backend::Framework;
//! use std::sync::Arc;
//!
//! let config = BatchingConfig::new().batch_size(4).last_batch(LastBatch::Rollover);
//! let mut loader = DataLoader::build(Framework::Mxnet, Arc::new(RangeDataset::new(0..10)), config).unwrap();
//! let first: Vec<Vec<usize>> = loader.epoch().collect();
//! assert_eq!(first, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
//! ```

pub mod backend;
mod batcher;
mod config;
mod dataset;
mod error;
mod factory;
pub mod native;
mod sampler;

pub use batcher::Epoch;
pub use config::{BatchingConfig, CollateFn, LastBatch};
pub use dataset::{Dataset, RangeDataset, TaggedDataset};
pub use error::DataLoaderError;
pub use factory::{DataLoader, DataLoaderFactory, NativeLoader};
pub use native::{
    DefaultDataLoader, GluonDataLoader, MxnetLoaderFactory, OnnxrtLoaderFactory,
    PytorchLoaderFactory, TensorflowLoaderFactory, TfDataset, TorchDataLoader,
};
pub use sampler::{BatchSampler, Sampler};
