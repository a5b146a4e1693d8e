// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-ir
//!
//! The framework-independent structural view of a model.
//!
//! Every backend has its own native graph representation (TensorFlow
//! `GraphDef`, ONNX `GraphProto`, ...). Graph readers translate those into
//! this crate's types so that consumers such as a graph visualizer never
//! depend on a framework:
//!
//! - [`Node`]: one backend node: name, operation type, raw input references.
//! - [`Edge`]: a resolved data or control dependency between two nodes.
//! - [`Graph`]: nodes and edges in backend order.
//!
//! No acyclicity is enforced: backend graphs with control-flow loops are
//! represented as-is.
//!
//! # Example
//! ```
//! use graph_ir::{EdgeKind, Graph, Node};
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("x", "Placeholder"));
//! graph.add_node(Node::new("y", "Relu").with_inputs(["x"]));
//! assert!(graph.add_edge("x", "y", EdgeKind::Data));
//! assert_eq!(graph.successors("x").collect::<Vec<_>>(), vec!["y"]);
//! ```

pub mod graph;
mod node;

pub use graph::Graph;
pub use node::{Edge, EdgeKind, Node};
