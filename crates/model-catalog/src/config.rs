// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Catalog configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! disabled_backends = ["mxnet"]
//!
//! [synthetic_outputs]
//! frozen-graph = ["custom"]
//! onnx-model = ["calibration_sink"]
//! ```

use crate::{ModelError, ModelTag};
use lazy_backend::Framework;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for the model catalog.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogConfig {
    /// Frameworks to treat as not installed (aliases accepted).
    #[serde(default)]
    pub disabled_backends: Vec<String>,
    /// Per-tag replacement of the variant's synthetic output names.
    /// An empty list disables augmentation for that tag.
    #[serde(default)]
    pub synthetic_outputs: BTreeMap<String, Vec<String>>,
}

impl CatalogConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ModelError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ModelError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ModelError> {
        toml::to_string_pretty(self)
            .map_err(|e| ModelError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks that every tag and framework name is known.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.disabled_frameworks()?;
        self.synthetic_overrides()?;
        Ok(())
    }

    /// Resolves `disabled_backends` to frameworks.
    pub fn disabled_frameworks(&self) -> Result<Vec<Framework>, ModelError> {
        self.disabled_backends
            .iter()
            .map(|name| {
                Framework::from_str_loose(name).ok_or_else(|| {
                    ModelError::Config(format!("unknown backend '{name}' in disabled_backends"))
                })
            })
            .collect()
    }

    /// Resolves `synthetic_outputs` keys to tags.
    pub fn synthetic_overrides(&self) -> Result<BTreeMap<ModelTag, Vec<String>>, ModelError> {
        self.synthetic_outputs
            .iter()
            .map(|(key, names)| {
                let tag = key
                    .parse::<ModelTag>()
                    .map_err(|e| ModelError::Config(format!("synthetic_outputs: {e}")))?;
                Ok((tag, names.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let c = CatalogConfig::default();
        assert!(c.disabled_backends.is_empty());
        assert!(c.synthetic_overrides().unwrap().is_empty());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
disabled_backends = ["torch", "mxnet"]

[synthetic_outputs]
frozen-graph = []
onnx-model = ["calibration_sink"]
"#;
        let c = CatalogConfig::from_toml(toml).unwrap();
        assert_eq!(
            c.disabled_frameworks().unwrap(),
            vec![Framework::Pytorch, Framework::Mxnet]
        );
        let overrides = c.synthetic_overrides().unwrap();
        assert_eq!(overrides[&ModelTag::FrozenGraph], Vec::<String>::new());
        assert_eq!(overrides[&ModelTag::OnnxModel], vec!["calibration_sink"]);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let bad_tag = "[synthetic_outputs]\nkeras-h5 = [\"x\"]\n";
        assert!(matches!(
            CatalogConfig::from_toml(bad_tag),
            Err(ModelError::Config(msg)) if msg.contains("keras-h5")
        ));

        let bad_backend = "disabled_backends = [\"caffe\"]\n";
        assert!(CatalogConfig::from_toml(bad_backend).is_err());
        assert!(CatalogConfig::from_toml("disabled_backends = 3").is_err());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let mut c = CatalogConfig::default();
        c.disabled_backends.push("onnxrt".into());
        c.synthetic_outputs.insert("saved-model".into(), vec!["custom".into()]);
        let back = CatalogConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "disabled_backends = [\"tf\"]\n").unwrap();
        let c = CatalogConfig::from_file(&path).unwrap();
        assert_eq!(c.disabled_frameworks().unwrap(), vec![Framework::Tensorflow]);

        let missing = CatalogConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(missing.to_string().contains("nope.toml"));
    }
}
