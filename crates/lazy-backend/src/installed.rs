// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Which frameworks this process can actually use.
//!
//! A framework is available when its cargo feature is compiled in and it
//! has not been disabled, either through the `INTROSPECT_DISABLE_BACKENDS`
//! environment variable (comma-separated names, aliases accepted) or by a
//! call to [`disable`]. Handles that already resolved keep their outcome;
//! disabling only affects resolutions that have not happened yet.

use crate::Framework;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Environment variable listing frameworks to treat as not installed.
pub const DISABLE_ENV: &str = "INTROSPECT_DISABLE_BACKENDS";

static DISABLED: Lazy<RwLock<BTreeSet<Framework>>> = Lazy::new(|| RwLock::new(BTreeSet::new()));

/// Returns `true` if support for `framework` was compiled into this build.
pub fn is_compiled(framework: Framework) -> bool {
    match framework {
        Framework::Tensorflow => cfg!(feature = "tensorflow"),
        Framework::Onnxrt => cfg!(feature = "onnxrt"),
        Framework::Pytorch => cfg!(feature = "pytorch"),
        Framework::Mxnet => cfg!(feature = "mxnet"),
    }
}

/// Marks a framework as unavailable for the rest of the process.
pub fn disable(framework: Framework) {
    tracing::info!(%framework, "backend disabled");
    DISABLED.write().insert(framework);
}

/// Parses a comma-separated framework list, skipping unknown names.
pub fn parse_list(raw: &str) -> Vec<Framework> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| {
            let parsed = Framework::from_str_loose(s);
            if parsed.is_none() {
                tracing::warn!(name = s.trim(), "ignoring unknown framework in disable list");
            }
            parsed
        })
        .collect()
}

fn disabled_by_env(framework: Framework) -> bool {
    std::env::var(DISABLE_ENV)
        .map(|raw| parse_list(&raw).contains(&framework))
        .unwrap_or(false)
}

/// Checks whether the named framework can be used, explaining why not.
pub fn availability(name: &str) -> Result<Framework, String> {
    let framework = Framework::from_str_loose(name)
        .ok_or_else(|| format!("no framework named '{name}' is known"))?;

    if !is_compiled(framework) {
        return Err(format!("built without the `{framework}` feature"));
    }
    if DISABLED.read().contains(&framework) || disabled_by_env(framework) {
        return Err(format!("`{framework}` is disabled in this environment"));
    }
    Ok(framework)
}

/// Returns `true` if the named framework can be used.
pub fn is_available(name: &str) -> bool {
    availability(name).is_ok()
}

/// Loader helper: succeeds only when `framework` is available.
pub fn require(framework: Framework) -> Result<(), String> {
    availability(framework.as_str()).map(|_| ())
}

/// All frameworks currently available, in [`Framework::ALL`] order.
pub fn available_frameworks() -> Vec<Framework> {
    Framework::ALL
        .into_iter()
        .filter(|fw| is_available(fw.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("tf, torch,,bogus"),
            vec![Framework::Tensorflow, Framework::Pytorch]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let err = availability("caffe").unwrap_err();
        assert!(err.contains("caffe"));
        assert!(!is_available("caffe"));
    }

    #[test]
    fn test_compiled_defaults() {
        // Default features compile every framework in.
        for fw in Framework::ALL {
            assert!(is_compiled(fw));
        }
    }

    #[test]
    fn test_disable() {
        // Only this test touches mxnet in this crate.
        disable(Framework::Mxnet);
        let err = require(Framework::Mxnet).unwrap_err();
        assert!(err.contains("mxnet"));
        assert!(!available_frameworks().contains(&Framework::Mxnet));
    }
}
