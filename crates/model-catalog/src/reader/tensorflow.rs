// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! TensorFlow `GraphDef` reader.
//!
//! Input references become edges: `^x` is a control edge from `x`, `x` and
//! `x:N` are data edges from `x`. References to nodes missing from the
//! graph stay in `inputs` but produce no edge.

use super::{wrong_graph, GraphReader};
use crate::{Model, ModelError, NativeGraph};
use graph_ir::{EdgeKind, Graph, Node};
use lazy_backend::Framework;
use native_formats::tensorflow::proto::{attr_value::Value, dtype_name, format_shape, GraphDef, NodeDef};
use native_formats::tensorflow::{is_control_input, node_name};

/// Attributes copied onto graph nodes.
const RENDERED_ATTRS: &[&str] = &["dtype", "T", "shape"];

#[derive(Debug, Default, Clone, Copy)]
pub struct TensorflowReader;

impl TensorflowReader {
    /// Translates a `GraphDef` directly.
    pub fn translate(&self, graph_def: &GraphDef) -> Graph {
        let mut graph = Graph::new();
        for def in &graph_def.node {
            graph.add_node(translate_node(def));
        }

        for def in &graph_def.node {
            for reference in &def.input {
                let kind = if is_control_input(reference) {
                    EdgeKind::Control
                } else {
                    EdgeKind::Data
                };
                let source = node_name(reference);
                if !graph.add_edge(source, &def.name, kind) {
                    tracing::warn!(node = %def.name, input = %reference, "input references an unknown node");
                }
            }
        }
        graph
    }
}

impl GraphReader for TensorflowReader {
    fn framework(&self) -> Framework {
        Framework::Tensorflow
    }

    fn read(&self, model: &dyn Model) -> Result<Graph, ModelError> {
        match model.native_graph()? {
            NativeGraph::Tensorflow(graph_def) => Ok(self.translate(graph_def)),
            other => Err(wrong_graph(Framework::Tensorflow, &other)),
        }
    }
}

fn translate_node(def: &NodeDef) -> Node {
    let mut node = Node::new(&def.name, &def.op).with_inputs(def.input.iter().cloned());
    for key in RENDERED_ATTRS {
        if let Some(value) = def.attr.get(*key).and_then(|a| a.value.as_ref()) {
            node = node.with_attribute(*key, render(value));
        }
    }
    if !def.device.is_empty() {
        node = node.with_attribute("device", &def.device);
    }
    node
}

fn render(value: &Value) -> String {
    match value {
        Value::Type(t) => dtype_name(*t).map_or_else(|| format!("dtype({t})"), str::to_string),
        Value::Shape(shape) => format_shape(shape),
        Value::S(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::I(i) => i.to_string(),
        Value::F(f) => f.to_string(),
        Value::B(b) => b.to_string(),
    }
}
