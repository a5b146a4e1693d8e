// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ONNX variant.

use crate::model::{check_api_version, synthetic_outputs};
use crate::{Model, ModelContext, ModelError, ModelTag, ModelVariant, NativeGraph};
use graph_ir::Graph;
use lazy_backend::Framework;
use native_formats::OnnxArtifact;
use once_cell::unsync::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

/// An ONNX `ModelProto` file.
pub struct OnnxModel {
    path: PathBuf,
    ctx: ModelContext,
    artifact: OnceCell<OnnxArtifact>,
}

impl OnnxModel {
    /// The parsed model, loading it on first call.
    pub fn artifact(&self) -> Result<&OnnxArtifact, ModelError> {
        self.artifact.get_or_try_init(|| {
            let backend = self.ctx.onnx().get()?;
            check_api_version(Framework::Onnxrt, backend.api_version())?;
            let artifact = backend.load(&self.path).map_err(|cause| ModelError::CorruptModel {
                path: self.path.clone(),
                cause,
            })?;
            tracing::debug!(
                path = %self.path.display(),
                opset = artifact.opset,
                nodes = artifact.graph.node.len(),
                "onnx model loaded"
            );
            Ok(artifact)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.artifact.get().is_some()
    }
}

impl Model for OnnxModel {
    fn path(&self) -> &Path {
        &self.path
    }

    fn tag(&self) -> ModelTag {
        ModelTag::OnnxModel
    }

    fn framework(&self) -> Framework {
        Framework::Onnxrt
    }

    fn guard_requirements_installed(&self) -> Result<(), ModelError> {
        self.ctx.checker().check_module(Self::framework_name())?;
        Ok(())
    }

    fn input_nodes(&self) -> Result<&[String], ModelError> {
        Ok(&self.artifact()?.input_names)
    }

    fn output_nodes(&self) -> Result<Vec<String>, ModelError> {
        let mut outputs = self.artifact()?.output_names.clone();
        outputs.extend(synthetic_outputs::<Self>(&self.ctx));
        Ok(outputs)
    }

    fn native_graph(&self) -> Result<NativeGraph<'_>, ModelError> {
        Ok(NativeGraph::Onnx(&self.artifact()?.graph))
    }

    fn model_graph(&self) -> Result<Graph, ModelError> {
        self.ctx.reader(Framework::Onnxrt)?.read(self)
    }
}

impl ModelVariant for OnnxModel {
    const TAG: ModelTag = ModelTag::OnnxModel;
    const FRAMEWORK: Framework = Framework::Onnxrt;

    fn probe_paths() -> &'static [&'static str] {
        &["model.onnx"]
    }

    fn open<P: Into<PathBuf>>(path: P, ctx: &ModelContext) -> Self {
        Self {
            path: path.into(),
            ctx: ctx.clone(),
            artifact: OnceCell::new(),
        }
    }
}

impl fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxModel")
            .field("path", &self.path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
