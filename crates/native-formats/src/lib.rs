// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # native-formats
//!
//! The backend libraries of the introspection layer.
//!
//! Each framework is exposed as a capability trait ([`TensorflowApi`],
//! [`OnnxApi`]) reached through a process-wide [`LazyBackend`] handle
//! ([`TENSORFLOW`], [`ONNX`]). Nothing is resolved until a caller actually
//! needs to parse an artifact, and a framework that is not available in the
//! current build or environment surfaces as
//! [`BackendUnavailable`](lazy_backend::BackendUnavailable) on that first use.
//!
//! The bundled implementations decode the frameworks' protobuf files with
//! `prost`, using message definitions that cover the fields introspection
//! needs. Unknown fields are skipped by the decoder.
//!
//! | Artifact | Loader |
//! |---|---|
//! | frozen `GraphDef` (`*.pb`) | [`TensorflowApi::load`] with [`TfFormat::FrozenGraph`] |
//! | SavedModel directory | [`TensorflowApi::load`] with [`TfFormat::SavedModel`] |
//! | checkpoint bundle (`checkpoint` + `*.meta`) | [`TensorflowApi::load`] with [`TfFormat::Checkpoint`] |
//! | ONNX `ModelProto` (`*.onnx`) | [`OnnxApi::load`] |

mod error;
pub mod onnx;
pub mod tensorflow;

pub use error::FormatError;
pub use lazy_backend::LazyBackend;
pub use onnx::{OnnxApi, OnnxArtifact, OnnxHandle, ProstOnnx, ONNX};
pub use tensorflow::{ProstTensorflow, TensorflowApi, TensorflowHandle, TfArtifact, TfFormat, TENSORFLOW};

/// Reads a whole artifact file, attaching the path to I/O failures.
pub(crate) fn read_artifact(path: &std::path::Path) -> Result<Vec<u8>, FormatError> {
    let bytes = std::fs::read(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read artifact");
    Ok(bytes)
}
