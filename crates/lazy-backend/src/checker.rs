// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The module-presence check facility.

use crate::{installed, MissingDependency};

/// Answers "is library X usable in this environment".
///
/// Implementations must not resolve or load the backend itself; the check
/// is a cheap presence probe.
pub trait ModuleChecker: Send + Sync {
    /// Returns [`MissingDependency`] if `name` is not available.
    fn check_module(&self, name: &str) -> Result<(), MissingDependency>;
}

/// Default checker backed by the compiled features and disable list.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstalledModules;

impl ModuleChecker for InstalledModules {
    fn check_module(&self, name: &str) -> Result<(), MissingDependency> {
        installed::availability(name).map(|_| ()).map_err(|reason| {
            tracing::debug!(module = name, %reason, "module check failed");
            MissingDependency {
                name: name.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_framework_passes() {
        InstalledModules.check_module("tensorflow").unwrap();
        InstalledModules.check_module("onnxrt").unwrap();
    }

    #[test]
    fn test_unknown_module_is_missing() {
        let err = InstalledModules.check_module("theano").unwrap_err();
        assert_eq!(err.name, "theano");
        assert!(err.to_string().contains("theano"));
    }
}
