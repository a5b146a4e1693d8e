// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ONNX `GraphProto` reader.
//!
//! ONNX wires nodes through tensor names rather than node names, so a
//! node's `inputs` hold tensor names and edges run from the node producing
//! each tensor. Graph inputs and initializers have no producer and yield
//! no edge.

use super::{wrong_graph, GraphReader};
use crate::{Model, ModelError, NativeGraph};
use graph_ir::{EdgeKind, Graph, Node};
use lazy_backend::Framework;
use native_formats::onnx::proto::{GraphProto, NodeProto};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
pub struct OnnxReader;

impl OnnxReader {
    /// Translates a `GraphProto` directly.
    pub fn translate(&self, proto: &GraphProto) -> Graph {
        let names: Vec<String> = proto
            .node
            .iter()
            .enumerate()
            .map(|(index, node)| display_name(node, index))
            .collect();

        let mut producers: HashMap<&str, &str> = HashMap::new();
        for (node, name) in proto.node.iter().zip(&names) {
            for tensor in node.output.iter().filter(|t| !t.is_empty()) {
                producers.entry(tensor.as_str()).or_insert(name.as_str());
            }
        }

        let mut graph = Graph::new();
        for (node, name) in proto.node.iter().zip(&names) {
            let mut translated =
                Node::new(name, &node.op_type).with_inputs(node.input.iter().cloned());
            if !node.domain.is_empty() {
                translated = translated.with_attribute("domain", &node.domain);
            }
            graph.add_node(translated);
        }

        for (node, name) in proto.node.iter().zip(&names) {
            // An empty input name marks an omitted optional input.
            for tensor in node.input.iter().filter(|t| !t.is_empty()) {
                if let Some(&producer) = producers.get(tensor.as_str()) {
                    graph.add_edge(producer, name, EdgeKind::Data);
                }
            }
        }
        graph
    }
}

impl GraphReader for OnnxReader {
    fn framework(&self) -> Framework {
        Framework::Onnxrt
    }

    fn read(&self, model: &dyn Model) -> Result<Graph, ModelError> {
        match model.native_graph()? {
            NativeGraph::Onnx(proto) => Ok(self.translate(proto)),
            other => Err(wrong_graph(Framework::Onnxrt, &other)),
        }
    }
}

/// Node name, falling back to the first output tensor, then `<op>_<index>`.
fn display_name(node: &NodeProto, index: usize) -> String {
    if !node.name.is_empty() {
        return node.name.clone();
    }
    match node.output.iter().find(|t| !t.is_empty()) {
        Some(tensor) => tensor.clone(),
        None => format!("{}_{index}", node.op_type),
    }
}
