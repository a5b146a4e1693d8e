// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Errors raised while parsing backend artifacts.

use std::path::PathBuf;

/// Failure to read or decode a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a valid protobuf message of the expected type.
    #[error("cannot decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: prost::DecodeError,
    },

    /// The message decoded but lacks required content.
    #[error("invalid artifact '{}': {detail}", path.display())]
    Invalid { path: PathBuf, detail: String },
}

impl FormatError {
    /// Path of the artifact the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}
