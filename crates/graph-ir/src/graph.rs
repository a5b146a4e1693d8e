// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The graph container.
//!
//! Nodes keep the order in which the reader added them, which is the
//! backend's own order. Edges are only recorded between nodes that both
//! exist; a reference to an unknown node stays visible in
//! [`Node::inputs`](crate::Node::inputs) but produces no edge.

use crate::{Edge, EdgeKind, Node};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Framework-independent model graph.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawGraph")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(serde::Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl From<RawGraph> for Graph {
    fn from(raw: RawGraph) -> Self {
        let mut graph = Graph::new();
        for node in raw.nodes {
            graph.add_node(node);
        }
        graph.edges = raw.edges;
        graph
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node.
    ///
    /// Returns `false` if a node with the same name already exists. The
    /// node is appended either way; name lookups resolve to the first one.
    pub fn add_node(&mut self, node: Node) -> bool {
        let position = self.nodes.len();
        let fresh = !self.index.contains_key(&node.name);
        if fresh {
            self.index.insert(node.name.clone(), position);
        } else {
            tracing::warn!(node = %node.name, "duplicate node name in graph");
        }
        self.nodes.push(node);
        fresh
    }

    /// Records an edge if both endpoints exist. Returns whether it was added.
    pub fn add_edge(&mut self, source: &str, target: &str, kind: EdgeKind) -> bool {
        if !self.contains(source) || !self.contains(target) {
            return false;
        }
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            kind,
        });
        true
    }

    /// Looks up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Returns `true` if a node with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Nodes in backend order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in the order they were added.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Names of nodes with an edge into `name`.
    pub fn predecessors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.target == name)
            .map(|e| e.source.as_str())
    }

    /// Names of nodes with an edge out of `name`.
    pub fn successors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == name)
            .map(|e| e.target.as_str())
    }

    /// Returns `true` if the edges form at least one cycle.
    pub fn has_cycle(&self) -> bool {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if let (Some(&s), Some(&t)) = (self.index.get(&edge.source), self.index.get(&edge.target)) {
                adjacency[s].push(t);
            }
        }

        // 0 = unvisited, 1 = on stack, 2 = done.
        let mut state = vec![0u8; self.nodes.len()];
        for start in 0..self.nodes.len() {
            if state[start] != 0 {
                continue;
            }
            let mut stack = vec![(start, 0usize)];
            state[start] = 1;
            while let Some((node, next)) = stack.pop() {
                if let Some(&succ) = adjacency[node].get(next) {
                    stack.push((node, next + 1));
                    match state[succ] {
                        1 => return true,
                        0 => {
                            state[succ] = 1;
                            stack.push((succ, 0));
                        }
                        _ => {}
                    }
                } else {
                    state[node] = 2;
                }
            }
        }
        false
    }

    /// Counts nodes per operation type.
    pub fn op_histogram(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.op.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns a one-line summary.
    pub fn summary(&self) -> String {
        let control = self
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Control)
            .count();
        format!(
            "Graph: {} nodes, {} edges ({} control), {} op types",
            self.nodes.len(),
            self.edges.len(),
            control,
            self.op_histogram().len(),
        )
    }

    /// Serializes to compact JSON (`{"nodes": [...], "edges": [...]}`).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for node in &self.nodes {
            writeln!(f, "  {node}")?;
        }
        Ok(())
    }
}
