// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Graph readers: backend-native graph → framework-independent [`Graph`].
//!
//! Readers translate every native node into one [`Node`](graph_ir::Node),
//! keeping node names and raw input references exactly as the backend
//! reports them. Cycles are preserved. Each call builds a new graph.

mod onnx;
mod tensorflow;

pub use onnx::OnnxReader;
pub use tensorflow::TensorflowReader;

use crate::{Model, ModelError, NativeGraph};
use graph_ir::Graph;
use lazy_backend::Framework;

/// Converts one framework's native graph into a [`Graph`].
pub trait GraphReader: Send + Sync {
    /// Framework whose native graphs this reader understands.
    fn framework(&self) -> Framework;

    /// Builds a graph from `model` without mutating it.
    fn read(&self, model: &dyn Model) -> Result<Graph, ModelError>;
}

/// Error for a native graph of the wrong framework.
pub(crate) fn wrong_graph(expected: Framework, got: &NativeGraph<'_>) -> ModelError {
    ModelError::IncompatibleBackendVersion {
        framework: expected.to_string(),
        detail: format!("reader received a {} graph", got.framework()),
    }
}
