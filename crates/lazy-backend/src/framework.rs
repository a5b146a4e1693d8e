// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Names of the ML frameworks the layer knows how to talk to.

use std::fmt;
use std::str::FromStr;

/// A backend ML framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// TensorFlow (frozen graphs, SavedModels, checkpoints, `tf.data`).
    Tensorflow,
    /// ONNX models executed through ONNX Runtime.
    Onnxrt,
    /// PyTorch (`torch.utils.data`).
    Pytorch,
    /// Apache MXNet (`gluon.data`).
    Mxnet,
}

impl Framework {
    /// Every known framework, in a fixed order.
    pub const ALL: [Framework; 4] = [
        Framework::Tensorflow,
        Framework::Onnxrt,
        Framework::Pytorch,
        Framework::Mxnet,
    ];

    /// Canonical framework name. Also the module name used for presence checks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tensorflow => "tensorflow",
            Self::Onnxrt => "onnxrt",
            Self::Pytorch => "pytorch",
            Self::Mxnet => "mxnet",
        }
    }

    /// Parses a framework name, accepting common aliases
    /// (`"tf"`, `"onnx"`, `"onnxruntime"`, `"torch"`, `"mx"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tensorflow" | "tf" => Some(Self::Tensorflow),
            "onnxrt" | "onnx" | "onnxruntime" | "ort" => Some(Self::Onnxrt),
            "pytorch" | "torch" | "pt" => Some(Self::Pytorch),
            "mxnet" | "mx" | "gluon" => Some(Self::Mxnet),
            _ => None,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| {
            format!("unknown framework '{s}'; expected tensorflow, onnxrt, pytorch or mxnet")
        })
    }
}
