// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types raised while reaching for a backend.

/// A backend library could not be resolved on first use.
///
/// Kept separate from every other error so callers can skip a capability
/// instead of failing outright.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend '{name}' is unavailable: {reason}")]
pub struct BackendUnavailable {
    /// Library name the handle was constructed with.
    pub name: String,
    /// Why the loader failed.
    pub reason: String,
}

/// An explicit requirements guard found a framework missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing dependency: framework '{name}' is not installed")]
pub struct MissingDependency {
    /// Framework that was checked.
    pub name: String,
}
