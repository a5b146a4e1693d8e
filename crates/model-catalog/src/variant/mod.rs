// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Built-in model variants.
//!
//! | Type | Tag | Framework | Synthetic outputs |
//! |---|---|---|---|
//! | [`FrozenPbModel`] | `frozen-graph` | `tensorflow` | `["custom"]` |
//! | [`SavedModelModel`] | `saved-model` | `tensorflow` | none |
//! | [`CheckpointModel`] | `checkpoint-bundle` | `tensorflow` | none |
//! | [`OnnxModel`] | `onnx-model` | `onnxrt` | none |
//!
//! The `"custom"` output on frozen graphs names the calibration node the
//! quantization pipeline injects into that format. Contexts may replace any
//! variant's list through
//! [`ModelContext::with_synthetic_outputs`](crate::ModelContext::with_synthetic_outputs).

mod onnx;
pub mod tensorflow;

pub use onnx::OnnxModel;
pub use tensorflow::{CheckpointModel, FrozenPbModel, SavedModelModel, TensorflowModel};
