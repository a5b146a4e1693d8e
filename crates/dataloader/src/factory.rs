// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Factory trait and framework dispatch.

use crate::batcher::Epoch;
use crate::native::{
    DefaultDataLoader, GluonDataLoader, MxnetLoaderFactory, OnnxrtLoaderFactory,
    PytorchLoaderFactory, TensorflowLoaderFactory, TfDataset, TorchDataLoader,
};
use crate::{BatchingConfig, DataLoaderError, Dataset};
use lazy_backend::Framework;
use std::sync::Arc;

/// Builds one framework's native loader from a [`BatchingConfig`].
///
/// Implementations check, in order:
/// 1. `sampler` and `batch_sampler` are not both set
///    ([`ConflictingSamplerConfiguration`](DataLoaderError::ConflictingSamplerConfiguration));
/// 2. `batch_size` is positive;
/// 3. the framework's data module resolves;
/// 4. every non-default field is expressible
///    ([`UnsupportedBatchingOption`](DataLoaderError::UnsupportedBatchingOption)).
///
/// Nothing is constructed when any check fails.
pub trait DataLoaderFactory {
    const FRAMEWORK: Framework;
    type Loader<D: Dataset>;

    fn build<D: Dataset>(
        &self,
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<Self::Loader<D>, DataLoaderError>;
}

/// A native loader of any supported framework.
#[derive(Debug)]
pub enum NativeLoader<D: Dataset> {
    Tensorflow(TfDataset<D>),
    Pytorch(TorchDataLoader<D>),
    Mxnet(GluonDataLoader<D>),
    Onnxrt(DefaultDataLoader<D>),
}

impl<D: Dataset> NativeLoader<D> {
    pub fn framework(&self) -> Framework {
        match self {
            Self::Tensorflow(_) => Framework::Tensorflow,
            Self::Pytorch(_) => Framework::Pytorch,
            Self::Mxnet(_) => Framework::Mxnet,
            Self::Onnxrt(_) => Framework::Onnxrt,
        }
    }

    pub fn batch_size(&self) -> usize {
        match self {
            Self::Tensorflow(l) => l.batch_size,
            Self::Pytorch(l) => l.batch_size,
            Self::Mxnet(l) => l.batch_size,
            Self::Onnxrt(l) => l.batch_size,
        }
    }

    /// Batches of the next epoch.
    pub fn epoch(&mut self) -> Epoch<'_, D> {
        match self {
            Self::Tensorflow(l) => l.epoch(),
            Self::Pytorch(l) => l.epoch(),
            Self::Mxnet(l) => l.epoch(),
            Self::Onnxrt(l) => l.epoch(),
        }
    }
}

/// Entry point dispatching to the per-framework factories.
pub struct DataLoader;

impl DataLoader {
    /// Builds the native loader of `framework` with the default factories.
    pub fn build<D: Dataset>(
        framework: Framework,
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<NativeLoader<D>, DataLoaderError> {
        match framework {
            Framework::Tensorflow => TensorflowLoaderFactory::default()
                .build(dataset, config)
                .map(NativeLoader::Tensorflow),
            Framework::Pytorch => PytorchLoaderFactory::default()
                .build(dataset, config)
                .map(NativeLoader::Pytorch),
            Framework::Mxnet => MxnetLoaderFactory::default()
                .build(dataset, config)
                .map(NativeLoader::Mxnet),
            Framework::Onnxrt => OnnxrtLoaderFactory::default()
                .build(dataset, config)
                .map(NativeLoader::Onnxrt),
        }
    }

    /// Builds the native loader of the framework the dataset came from.
    pub fn for_dataset<D: Dataset>(
        dataset: Arc<D>,
        config: BatchingConfig<D::Item>,
    ) -> Result<NativeLoader<D>, DataLoaderError> {
        let framework = dataset.origin().ok_or_else(|| DataLoaderError::InvalidOption {
            field: "dataset".into(),
            detail: "dataset does not declare an origin framework".into(),
        })?;
        Self::build(framework, dataset, config)
    }
}
