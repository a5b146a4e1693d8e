// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The uniform model contract.
//!
//! ```text
//! open(path, ctx)                no I/O, no backend
//!   │
//!   ├─ framework_name()          static
//!   ├─ supports_path(path)       static, same answer as detect()
//!   ├─ guard_requirements_installed()
//!   │                            one presence check, no load
//!   │
//!   └─ input_nodes() / output_nodes() / native_graph()
//!        first call: resolve backend → check API version → parse
//!        later calls: memoized artifact
//! ```

use crate::{detect, ModelContext, ModelError, ModelTag};
use graph_ir::Graph;
use lazy_backend::Framework;
use native_formats::onnx::proto::GraphProto;
use native_formats::tensorflow::proto::GraphDef;
use std::path::{Path, PathBuf};

/// Backend API version the variants are written against.
pub const SUPPORTED_API_VERSION: u32 = 1;

/// A borrowed backend-native graph.
#[derive(Debug, Clone, Copy)]
pub enum NativeGraph<'a> {
    Tensorflow(&'a GraphDef),
    Onnx(&'a GraphProto),
}

impl NativeGraph<'_> {
    /// Framework whose representation this is.
    pub fn framework(&self) -> Framework {
        match self {
            Self::Tensorflow(_) => Framework::Tensorflow,
            Self::Onnx(_) => Framework::Onnxrt,
        }
    }
}

/// One on-disk artifact behind a framework-independent interface.
///
/// Metadata is loaded lazily and memoized per instance. Instances are not
/// `Sync`; sharing one across threads for concurrent first access needs
/// external synchronization.
pub trait Model: std::fmt::Debug {
    /// Artifact path as given at construction. Existence is not checked.
    fn path(&self) -> &Path;

    fn tag(&self) -> ModelTag;

    fn framework(&self) -> Framework;

    /// Checks once that the backend framework is installed.
    ///
    /// Never loads or parses the model.
    fn guard_requirements_installed(&self) -> Result<(), ModelError>;

    /// Backend-reported input names, verbatim and in backend order.
    fn input_nodes(&self) -> Result<&[String], ModelError>;

    /// Backend-reported output names followed by the variant's synthetic
    /// outputs, in that order.
    fn output_nodes(&self) -> Result<Vec<String>, ModelError>;

    /// The loaded backend-native graph.
    fn native_graph(&self) -> Result<NativeGraph<'_>, ModelError>;

    /// Builds a fresh framework-independent graph through the context's
    /// reader for this framework. Not cached.
    fn model_graph(&self) -> Result<Graph, ModelError>;
}

/// A concrete (framework, format) implementation of [`Model`].
///
/// The associated functions are static capability probes: none of them
/// resolve a backend handle.
pub trait ModelVariant: Model + Sized + 'static {
    const TAG: ModelTag;
    const FRAMEWORK: Framework;

    /// Framework name used for presence checks.
    fn framework_name() -> &'static str {
        Self::FRAMEWORK.as_str()
    }

    /// Returns `true` iff [`detect`] assigns this variant's tag to `path`.
    fn supports_path(path: &Path) -> bool {
        matches!(detect(path), Ok(tag) if tag == Self::TAG)
    }

    /// Representative paths this variant accepts. The registry checks them
    /// against every other variant at registration time.
    fn probe_paths() -> &'static [&'static str];

    /// Names appended after the backend outputs unless the context
    /// overrides them for [`Self::TAG`].
    fn default_synthetic_outputs() -> &'static [&'static str] {
        &[]
    }

    /// Wraps `path` without touching the file system or the backend.
    fn open<P: Into<PathBuf>>(path: P, ctx: &ModelContext) -> Self;
}

/// Fails unless the backend speaks [`SUPPORTED_API_VERSION`].
pub(crate) fn check_api_version(framework: Framework, version: u32) -> Result<(), ModelError> {
    if version == SUPPORTED_API_VERSION {
        return Ok(());
    }
    Err(ModelError::IncompatibleBackendVersion {
        framework: framework.to_string(),
        detail: format!("backend API version {version}, expected {SUPPORTED_API_VERSION}"),
    })
}

/// Synthetic outputs for `V`: the context override, else the variant default.
pub(crate) fn synthetic_outputs<V: ModelVariant>(ctx: &ModelContext) -> Vec<String> {
    match ctx.synthetic_outputs(V::TAG) {
        Some(names) => names.to_vec(),
        None => V::default_synthetic_outputs()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    }
}
