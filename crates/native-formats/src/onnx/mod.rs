// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ONNX backend.

pub mod proto;

use crate::{read_artifact, FormatError};
use lazy_backend::{installed, Framework, LazyBackend};
use prost::Message;
use proto::{GraphProto, ModelProto};
use std::collections::HashSet;
use std::path::Path;

/// Version of the [`OnnxApi`] surface implemented by this crate.
pub const API_VERSION: u32 = 1;

/// Handle type for the ONNX backend.
pub type OnnxHandle = LazyBackend<Box<dyn OnnxApi>>;

/// Process-wide ONNX backend, resolved on first use.
pub static ONNX: OnnxHandle = LazyBackend::new("onnxrt", load_backend);

fn load_backend() -> Result<Box<dyn OnnxApi>, String> {
    installed::require(Framework::Onnxrt)?;
    Ok(Box::new(ProstOnnx))
}

/// A parsed ONNX model.
#[derive(Debug, Clone, Default)]
pub struct OnnxArtifact {
    pub graph: GraphProto,
    pub ir_version: i64,
    /// Version of the default (`ai.onnx`) operator set, 0 if not declared.
    pub opset: i64,
    pub producer: String,
    /// Graph inputs that are not initializers, in declaration order.
    pub input_names: Vec<String>,
    /// Graph outputs in declaration order.
    pub output_names: Vec<String>,
}

/// ONNX capabilities used by the introspection layer.
pub trait OnnxApi: Send + Sync {
    /// Version of the API surface this implementation provides.
    fn api_version(&self) -> u32;

    /// Parses the `ModelProto` at `path`.
    fn load(&self, path: &Path) -> Result<OnnxArtifact, FormatError>;
}

/// Pure-Rust ONNX backend decoding `ModelProto` with `prost`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProstOnnx;

impl OnnxApi for ProstOnnx {
    fn api_version(&self) -> u32 {
        API_VERSION
    }

    fn load(&self, path: &Path) -> Result<OnnxArtifact, FormatError> {
        tracing::debug!(path = %path.display(), "loading onnx model");
        let bytes = read_artifact(path)?;
        let model = ModelProto::decode(bytes.as_slice()).map_err(|source| FormatError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = model.graph.ok_or_else(|| FormatError::Invalid {
            path: path.to_path_buf(),
            detail: "model has no graph".into(),
        })?;
        let opset = model
            .opset_import
            .iter()
            .find(|o| o.domain.is_empty() || o.domain == "ai.onnx")
            .map(|o| o.version)
            .unwrap_or(0);
        let (input_names, output_names) = io_names(&graph);

        Ok(OnnxArtifact {
            graph,
            ir_version: model.ir_version,
            opset,
            producer: model.producer_name,
            input_names,
            output_names,
        })
    }
}

/// Declared graph inputs (initializers excluded) and outputs.
pub fn io_names(graph: &GraphProto) -> (Vec<String>, Vec<String>) {
    let initializers: HashSet<&str> = graph.initializer.iter().map(|t| t.name.as_str()).collect();
    let inputs = graph
        .input
        .iter()
        .filter(|v| !initializers.contains(v.name.as_str()))
        .map(|v| v.name.clone())
        .collect();
    let outputs = graph.output.iter().map(|v| v.name.clone()).collect();
    (inputs, outputs)
}
