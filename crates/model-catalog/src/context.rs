// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Collaborators handed to every model at construction.
//!
//! Models never look up backends, readers, or the presence checker through
//! globals of their own; everything comes from the [`ModelContext`], so
//! tests substitute fakes by building a context instead of patching
//! process state.

use crate::reader::{GraphReader, OnnxReader, TensorflowReader};
use crate::{CatalogConfig, ModelError, ModelTag};
use lazy_backend::{BackendUnavailable, Framework, InstalledModules, ModuleChecker};
use native_formats::{OnnxHandle, TensorflowHandle, ONNX, TENSORFLOW};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shared collaborators for model variants. Cheap to clone.
#[derive(Clone)]
pub struct ModelContext {
    checker: Arc<dyn ModuleChecker>,
    tensorflow: &'static TensorflowHandle,
    onnx: &'static OnnxHandle,
    readers: BTreeMap<Framework, Arc<dyn GraphReader>>,
    synthetic_outputs: BTreeMap<ModelTag, Vec<String>>,
}

impl ModelContext {
    /// Context using the process-wide backends, the installed-module
    /// checker, and the built-in graph readers.
    pub fn new() -> Self {
        Self {
            checker: Arc::new(InstalledModules),
            tensorflow: &TENSORFLOW,
            onnx: &ONNX,
            readers: BTreeMap::new(),
            synthetic_outputs: BTreeMap::new(),
        }
        .with_reader(Arc::new(TensorflowReader))
        .with_reader(Arc::new(OnnxReader))
    }

    /// Default context with the configured synthetic-output overrides.
    ///
    /// `disabled_backends` is process-wide state and is applied by the
    /// caller through `lazy_backend::installed::disable`.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ModelError> {
        let mut ctx = Self::new();
        ctx.synthetic_outputs = config.synthetic_overrides()?;
        Ok(ctx)
    }

    /// Replaces the presence checker.
    pub fn with_checker(mut self, checker: Arc<dyn ModuleChecker>) -> Self {
        self.checker = checker;
        self
    }

    /// Replaces the TensorFlow backend handle.
    pub fn with_tensorflow(mut self, handle: &'static TensorflowHandle) -> Self {
        self.tensorflow = handle;
        self
    }

    /// Replaces the ONNX backend handle.
    pub fn with_onnx(mut self, handle: &'static OnnxHandle) -> Self {
        self.onnx = handle;
        self
    }

    /// Installs `reader` for the framework it reports.
    pub fn with_reader(mut self, reader: Arc<dyn GraphReader>) -> Self {
        self.readers.insert(reader.framework(), reader);
        self
    }

    /// Overrides the synthetic outputs appended for `tag`.
    pub fn with_synthetic_outputs<I, S>(mut self, tag: ModelTag, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synthetic_outputs
            .insert(tag, names.into_iter().map(Into::into).collect());
        self
    }

    pub fn checker(&self) -> &dyn ModuleChecker {
        self.checker.as_ref()
    }

    pub fn tensorflow(&self) -> &'static TensorflowHandle {
        self.tensorflow
    }

    pub fn onnx(&self) -> &'static OnnxHandle {
        self.onnx
    }

    /// Graph reader for `framework`.
    pub fn reader(&self, framework: Framework) -> Result<&dyn GraphReader, ModelError> {
        self.readers
            .get(&framework)
            .map(|reader| reader.as_ref())
            .ok_or_else(|| {
                ModelError::BackendUnavailable(BackendUnavailable {
                    name: framework.to_string(),
                    reason: "no graph reader registered".into(),
                })
            })
    }

    /// Configured synthetic outputs for `tag`, if overridden.
    pub fn synthetic_outputs(&self, tag: ModelTag) -> Option<&[String]> {
        self.synthetic_outputs.get(&tag).map(Vec::as_slice)
    }
}

impl Default for ModelContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("tensorflow", self.tensorflow)
            .field("onnx", self.onnx)
            .field("readers", &self.readers.keys().collect::<Vec<_>>())
            .field("synthetic_outputs", &self.synthetic_outputs)
            .finish_non_exhaustive()
    }
}
