// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model format tags.

use lazy_backend::Framework;
use std::fmt;
use std::str::FromStr;

/// A (framework, on-disk format) pair. Assigned by [`detect`](crate::detect)
/// and used for all later dispatch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ModelTag {
    /// Self-contained TensorFlow `GraphDef` (`*.pb`).
    FrozenGraph,
    /// TensorFlow SavedModel export directory.
    SavedModel,
    /// TensorFlow checkpoint bundle (`checkpoint` + `*.meta`).
    CheckpointBundle,
    /// ONNX `ModelProto` (`*.onnx`).
    OnnxModel,
}

impl ModelTag {
    /// Every tag, in registry priority order.
    pub const ALL: [ModelTag; 4] = [
        ModelTag::SavedModel,
        ModelTag::CheckpointBundle,
        ModelTag::FrozenGraph,
        ModelTag::OnnxModel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrozenGraph => "frozen-graph",
            Self::SavedModel => "saved-model",
            Self::CheckpointBundle => "checkpoint-bundle",
            Self::OnnxModel => "onnx-model",
        }
    }

    /// Framework that produces artifacts with this tag.
    pub fn framework(&self) -> Framework {
        match self {
            Self::FrozenGraph | Self::SavedModel | Self::CheckpointBundle => Framework::Tensorflow,
            Self::OnnxModel => Framework::Onnxrt,
        }
    }
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s.trim())
            .ok_or_else(|| format!("unknown model tag '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms_agree() {
        for tag in ModelTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{tag}\""));
            assert_eq!(tag.as_str().parse::<ModelTag>().unwrap(), tag);
        }
        assert!("frozen_graph".parse::<ModelTag>().is_err());
    }

    #[test]
    fn test_framework() {
        assert_eq!(ModelTag::CheckpointBundle.framework(), Framework::Tensorflow);
        assert_eq!(ModelTag::OnnxModel.framework(), Framework::Onnxrt);
    }
}
