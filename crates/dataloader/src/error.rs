// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for data loader construction.

use lazy_backend::BackendUnavailable;

/// Errors that can occur while building a native data loader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataLoaderError {
    /// The target framework cannot express a non-default field.
    #[error("batching option '{field}' is not supported by {framework}")]
    UnsupportedBatchingOption { field: String, framework: String },

    /// Both `sampler` and `batch_sampler` were given.
    #[error("'sampler' and 'batch_sampler' are mutually exclusive")]
    ConflictingSamplerConfiguration,

    /// A field holds a value no framework accepts.
    #[error("invalid batching option '{field}': {detail}")]
    InvalidOption { field: String, detail: String },

    /// The framework's data module could not be resolved.
    #[error(transparent)]
    BackendUnavailable(#[from] BackendUnavailable),
}

impl DataLoaderError {
    pub(crate) fn unsupported(field: &str, framework: lazy_backend::Framework) -> Self {
        Self::UnsupportedBatchingOption {
            field: field.to_string(),
            framework: framework.to_string(),
        }
    }
}
