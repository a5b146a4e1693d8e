// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Native loaders, one per framework.
//!
//! | Field | tensorflow | pytorch | mxnet | onnxrt |
//! |---|---|---|---|---|
//! | `batch_size` | `batch_size` | `batch_size` | `batch_size` | `batch_size` |
//! | `last_batch` | `drop_remainder` | `drop_last` | `last_batch` | `last_batch` |
//! | `sampler` | rejected | `sampler` | `sampler` | `sampler` |
//! | `batch_sampler` | rejected | `batch_sampler` | `batch_sampler` | `batch_sampler` |
//! | `num_workers` | rejected if > 0 | `num_workers` | `num_workers` | rejected if > 0 |
//! | `pin_memory` | rejected if set | `pin_memory` | `pin_memory` | rejected if set |
//! | `collate_fn` | `map` | `collate_fn` | `batchify_fn` | `collate_fn` |
//!
//! Frameworks without rollover read the policy as a boolean "drop the
//! incomplete trailing batch": only `discard` drops it.

mod mxnet;
mod onnxrt;
mod pytorch;
mod tensorflow;

pub use mxnet::{GluonDataLoader, MxnetLoaderFactory};
pub use onnxrt::{DefaultDataLoader, OnnxrtLoaderFactory};
pub use pytorch::{PytorchLoaderFactory, TorchDataLoader};
pub use tensorflow::{TensorflowLoaderFactory, TfDataset};
