// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Nodes and edges of the framework-independent graph.

use std::collections::BTreeMap;
use std::fmt;

/// Kind of dependency an [`Edge`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The target consumes a value produced by the source.
    Data,
    /// The target must run after the source, without consuming a value.
    Control,
}

/// A single node translated from a backend graph.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Node {
    /// Node name exactly as the backend reports it.
    pub name: String,
    /// Operation type (e.g. `"Conv2D"`, `"MatMul"`).
    pub op: String,
    /// Input references in backend order, unmodified and not deduplicated.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Selected backend attributes rendered as strings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    /// Creates a node with no inputs or attributes.
    pub fn new(name: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op: op.into(),
            inputs: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the raw input references.
    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one rendered attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.op)?;
        if !self.inputs.is_empty() {
            write!(f, " <- [{}]", self.inputs.join(", "))?;
        }
        Ok(())
    }
}

/// A resolved dependency between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// Producing node.
    pub source: String,
    /// Consuming node.
    pub target: String,
    /// Data or control dependency.
    pub kind: EdgeKind,
}
