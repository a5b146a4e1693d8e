// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! TensorFlow variants.
//!
//! # Type-State Pattern
//!
//! One generic model type serves all three TensorFlow formats; the format
//! is a zero-sized marker fixed at compile time:
//!
//! ```text
//! TensorflowModel<FrozenPb>         frozen GraphDef file
//! TensorflowModel<SavedModelDir>    SavedModel export
//! TensorflowModel<Checkpoint>       checkpoint bundle
//! ```

use crate::model::{check_api_version, synthetic_outputs};
use crate::{Model, ModelContext, ModelError, ModelTag, ModelVariant, NativeGraph};
use graph_ir::Graph;
use lazy_backend::Framework;
use native_formats::{TfArtifact, TfFormat};
use once_cell::unsync::OnceCell;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

// ── Format markers ─────────────────────────────────────────────────

/// Compile-time description of one TensorFlow on-disk format.
pub trait TfFlavor: fmt::Debug + Send + 'static {
    const TAG: ModelTag;
    const FORMAT: TfFormat;
    const PROBES: &'static [&'static str];
    const SYNTHETIC_OUTPUTS: &'static [&'static str];
}

/// Marker: frozen `GraphDef` file.
#[derive(Debug, Clone, Copy)]
pub struct FrozenPb;

/// Marker: SavedModel export directory.
#[derive(Debug, Clone, Copy)]
pub struct SavedModelDir;

/// Marker: checkpoint bundle.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint;

impl TfFlavor for FrozenPb {
    const TAG: ModelTag = ModelTag::FrozenGraph;
    const FORMAT: TfFormat = TfFormat::FrozenGraph;
    const PROBES: &'static [&'static str] = &["model.pb", "/path/to/frozen_pb.pb"];
    const SYNTHETIC_OUTPUTS: &'static [&'static str] = &["custom"];
}

impl TfFlavor for SavedModelDir {
    const TAG: ModelTag = ModelTag::SavedModel;
    const FORMAT: TfFormat = TfFormat::SavedModel;
    const PROBES: &'static [&'static str] = &["export/saved_model.pb"];
    const SYNTHETIC_OUTPUTS: &'static [&'static str] = &[];
}

impl TfFlavor for Checkpoint {
    const TAG: ModelTag = ModelTag::CheckpointBundle;
    const FORMAT: TfFormat = TfFormat::Checkpoint;
    const PROBES: &'static [&'static str] = &["ckpt/model.ckpt-100.meta"];
    const SYNTHETIC_OUTPUTS: &'static [&'static str] = &[];
}

pub type FrozenPbModel = TensorflowModel<FrozenPb>;
pub type SavedModelModel = TensorflowModel<SavedModelDir>;
pub type CheckpointModel = TensorflowModel<Checkpoint>;

// ── TensorflowModel ────────────────────────────────────────────────

/// A TensorFlow artifact in format `F`.
pub struct TensorflowModel<F: TfFlavor> {
    path: PathBuf,
    ctx: ModelContext,
    artifact: OnceCell<TfArtifact>,
    _format: PhantomData<F>,
}

impl<F: TfFlavor> TensorflowModel<F> {
    /// The parsed artifact, loading it on first call.
    pub fn artifact(&self) -> Result<&TfArtifact, ModelError> {
        self.artifact.get_or_try_init(|| {
            let backend = self.ctx.tensorflow().get()?;
            check_api_version(Framework::Tensorflow, backend.api_version())?;
            let artifact = backend
                .load(&self.path, F::FORMAT)
                .map_err(|cause| ModelError::CorruptModel {
                    path: self.path.clone(),
                    cause,
                })?;
            tracing::debug!(
                path = %self.path.display(),
                tag = %F::TAG,
                nodes = artifact.graph.node.len(),
                "tensorflow model loaded"
            );
            Ok(artifact)
        })
    }

    /// Returns `true` once the artifact has been parsed.
    pub fn is_loaded(&self) -> bool {
        self.artifact.get().is_some()
    }
}

impl<F: TfFlavor> Model for TensorflowModel<F> {
    fn path(&self) -> &Path {
        &self.path
    }

    fn tag(&self) -> ModelTag {
        F::TAG
    }

    fn framework(&self) -> Framework {
        Framework::Tensorflow
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
        Ok(NativeGraph::Tensorflow(&self.artifact()?.graph))
    }

    fn model_graph(&self) -> Result<Graph, ModelError> {
        self.ctx.reader(Framework::Tensorflow)?.read(self)
    }
}

impl<F: TfFlavor> ModelVariant for TensorflowModel<F> {
    const TAG: ModelTag = F::TAG;
    const FRAMEWORK: Framework = Framework::Tensorflow;

    fn probe_paths() -> &'static [&'static str] {
        F::PROBES
    }

    fn default_synthetic_outputs() -> &'static [&'static str] {
        F::SYNTHETIC_OUTPUTS
    }

    fn open<P: Into<PathBuf>>(path: P, ctx: &ModelContext) -> Self {
        Self {
            path: path.into(),
            ctx: ctx.clone(),
            artifact: OnceCell::new(),
            _format: PhantomData,
        }
    }
}

impl<F: TfFlavor> fmt::Debug for TensorflowModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorflowModel")
            .field("path", &self.path)
            .field("tag", &F::TAG)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
