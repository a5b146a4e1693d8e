// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model detection, loading, and introspection.

use crate::ModelTag;
use lazy_backend::{BackendUnavailable, MissingDependency};
use native_formats::FormatError;
use std::path::PathBuf;

/// Errors raised through the [`Model`](crate::Model) contract.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The backend library could not be resolved on first use.
    #[error(transparent)]
    BackendUnavailable(#[from] BackendUnavailable),

    /// An explicit requirements guard failed.
    #[error(transparent)]
    MissingDependency(#[from] MissingDependency),

    /// No registered variant handles this path.
    #[error("unsupported model format: '{}'", path.display())]
    UnsupportedModelFormat { path: PathBuf },

    /// The artifact has a recognized format but could not be parsed.
    #[error("corrupt model '{}': {cause}", path.display())]
    CorruptModel {
        path: PathBuf,
        #[source]
        cause: FormatError,
    },

    /// The backend does not expose the API shape this layer needs.
    #[error("incompatible {framework} backend: {detail}")]
    IncompatibleBackendVersion { framework: String, detail: String },

    /// Invalid catalog configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Registration-time violations of the variant table invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A variant with this tag is already registered.
    #[error("a variant for '{0}' is already registered")]
    DuplicateTag(ModelTag),

    /// Two variants both accept the same path.
    #[error("variants '{first}' and '{second}' both accept '{path}'")]
    OverlappingVariants {
        first: ModelTag,
        second: ModelTag,
        path: String,
    },
}
