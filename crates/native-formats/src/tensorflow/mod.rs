// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! TensorFlow backend.
//!
//! Input and output node names are derived the way TensorFlow tooling does
//! it for inference graphs:
//!
//! - With a serving signature, the signature's tensors (ordered by key,
//!   `:0` port suffix stripped).
//! - Otherwise from graph structure: inputs are `Placeholder` nodes, outputs
//!   are nodes no other node consumes (an unused `Placeholder` included),
//!   skipping constants, variables, no-ops, assertions and the `save/`
//!   scope. Both in graph order.

pub mod checkpoint;
pub mod proto;

use crate::{read_artifact, FormatError};
use lazy_backend::{installed, Framework, LazyBackend};
use proto::{GraphDef, MetaGraphDef, SavedModel, SignatureDef};
use prost::Message;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Version of the [`TensorflowApi`] surface implemented by this crate.
pub const API_VERSION: u32 = 1;

/// File name of the SavedModel protobuf inside an export directory.
pub const SAVED_MODEL_FILE: &str = "saved_model.pb";

/// Meta graph tag selected from a SavedModel.
const SERVE_TAG: &str = "serve";

/// Signature used for input/output names.
const DEFAULT_SIGNATURE: &str = "serving_default";

/// Ops that never count as graph outputs.
const NON_OUTPUT_OPS: &[&str] = &[
    "Const",
    "NoOp",
    "Assert",
    "VariableV2",
    "VarHandleOp",
    "SaveV2",
    "RestoreV2",
];

/// Handle type for the TensorFlow backend.
pub type TensorflowHandle = LazyBackend<Box<dyn TensorflowApi>>;

/// Process-wide TensorFlow backend, resolved on first use.
pub static TENSORFLOW: TensorflowHandle = LazyBackend::new("tensorflow", load_backend);

fn load_backend() -> Result<Box<dyn TensorflowApi>, String> {
    installed::require(Framework::Tensorflow)?;
    Ok(Box::new(ProstTensorflow))
}

/// On-disk TensorFlow formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TfFormat {
    /// A single self-contained `GraphDef` file.
    FrozenGraph,
    /// A SavedModel export directory (or its `saved_model.pb`).
    SavedModel,
    /// A checkpoint bundle directory (or one of its `.meta` files).
    Checkpoint,
}

/// A parsed TensorFlow artifact.
#[derive(Debug, Clone, Default)]
pub struct TfArtifact {
    /// The computation graph.
    pub graph: GraphDef,
    /// Input node names in backend order.
    pub input_names: Vec<String>,
    /// Output node names in backend order.
    pub output_names: Vec<String>,
    /// Meta graph tags (SavedModel and checkpoint formats).
    pub tags: Vec<String>,
}

/// TensorFlow capabilities used by the introspection layer.
pub trait TensorflowApi: Send + Sync {
    /// Version of the API surface this implementation provides.
    fn api_version(&self) -> u32;

    /// Parses the artifact at `path` in the given format.
    fn load(&self, path: &Path, format: TfFormat) -> Result<TfArtifact, FormatError>;
}

/// Pure-Rust TensorFlow backend decoding protobuf files with `prost`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProstTensorflow;

impl TensorflowApi for ProstTensorflow {
    fn api_version(&self) -> u32 {
        API_VERSION
    }

    fn load(&self, path: &Path, format: TfFormat) -> Result<TfArtifact, FormatError> {
        tracing::debug!(path = %path.display(), ?format, "loading tensorflow artifact");
        match format {
            TfFormat::FrozenGraph => load_frozen_graph(path),
            TfFormat::SavedModel => load_saved_model(path),
            TfFormat::Checkpoint => load_checkpoint(path),
        }
    }
}

fn decode<M: Message + Default>(path: &Path, bytes: &[u8]) -> Result<M, FormatError> {
    M::decode(bytes).map_err(|source| FormatError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn load_frozen_graph(path: &Path) -> Result<TfArtifact, FormatError> {
    let bytes = read_artifact(path)?;
    let graph: GraphDef = decode(path, &bytes)?;
    if graph.node.is_empty() {
        return Err(FormatError::Invalid {
            path: path.to_path_buf(),
            detail: "graph contains no nodes".into(),
        });
    }
    let (input_names, output_names) = graph_io_names(&graph);
    Ok(TfArtifact {
        graph,
        input_names,
        output_names,
        tags: Vec::new(),
    })
}

fn load_saved_model(path: &Path) -> Result<TfArtifact, FormatError> {
    let file = if path.is_dir() {
        path.join(SAVED_MODEL_FILE)
    } else {
        path.to_path_buf()
    };
    let bytes = read_artifact(&file)?;
    let saved: SavedModel = decode(&file, &bytes)?;

    let meta = saved
        .meta_graphs
        .iter()
        .find(|m| {
            m.meta_info_def
                .as_ref()
                .is_some_and(|info| info.tags.iter().any(|t| t == SERVE_TAG))
        })
        .or_else(|| saved.meta_graphs.first())
        .ok_or_else(|| FormatError::Invalid {
            path: file.clone(),
            detail: "SavedModel contains no meta graphs".into(),
        })?;

    artifact_from_meta(&file, meta.clone())
}

fn load_checkpoint(path: &Path) -> Result<TfArtifact, FormatError> {
    let meta_path: PathBuf = if path.is_dir() {
        checkpoint::find_meta_graph(path)?
    } else {
        path.to_path_buf()
    };
    let bytes = read_artifact(&meta_path)?;
    let meta: MetaGraphDef = decode(&meta_path, &bytes)?;
    artifact_from_meta(&meta_path, meta)
}

fn artifact_from_meta(path: &Path, meta: MetaGraphDef) -> Result<TfArtifact, FormatError> {
    let tags = meta
        .meta_info_def
        .as_ref()
        .map(|info| info.tags.clone())
        .unwrap_or_default();
    let signature = meta
        .signature_def
        .get(DEFAULT_SIGNATURE)
        .or_else(|| meta.signature_def.values().next())
        .cloned();
    let graph = meta.graph_def.ok_or_else(|| FormatError::Invalid {
        path: path.to_path_buf(),
        detail: "meta graph has no graph_def".into(),
    })?;

    let (input_names, output_names) = match signature {
        Some(sig) if !sig.inputs.is_empty() || !sig.outputs.is_empty() => signature_io_names(&sig),
        _ => graph_io_names(&graph),
    };

    Ok(TfArtifact {
        graph,
        input_names,
        output_names,
        tags,
    })
}

/// Input and output names declared by a signature, ordered by key.
pub fn signature_io_names(signature: &SignatureDef) -> (Vec<String>, Vec<String>) {
    let names = |map: &std::collections::BTreeMap<String, proto::TensorInfo>| {
        map.values()
            .map(|info| node_name(&info.name).to_string())
            .collect::<Vec<_>>()
    };
    (names(&signature.inputs), names(&signature.outputs))
}

/// Input and output names derived from graph structure.
pub fn graph_io_names(graph: &GraphDef) -> (Vec<String>, Vec<String>) {
    let consumed: HashSet<&str> = graph
        .node
        .iter()
        .flat_map(|n| n.input.iter())
        .map(|reference| node_name(reference))
        .collect();

    let inputs = graph
        .node
        .iter()
        .filter(|n| n.op == "Placeholder")
        .map(|n| n.name.clone())
        .collect();

    let outputs = graph
        .node
        .iter()
        .filter(|n| !consumed.contains(n.name.as_str()))
        .filter(|n| !NON_OUTPUT_OPS.contains(&n.op.as_str()))
        .filter(|n| !n.name.starts_with("save/"))
        .map(|n| n.name.clone())
        .collect();

    (inputs, outputs)
}

/// Node name of an input reference: strips `^` and a `:N` port suffix.
pub fn node_name(reference: &str) -> &str {
    let name = reference.strip_prefix('^').unwrap_or(reference);
    match name.rsplit_once(':') {
        Some((base, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => base,
        _ => name,
    }
}

/// Returns `true` for a control-dependency reference (`^node`).
pub fn is_control_input(reference: &str) -> bool {
    reference.starts_with('^')
}

/// Returns `true` if `prefix` starts like a serialized `SavedModel`
/// (field 1 varint, then field 2 length-delimited). A `GraphDef` never
/// starts with field 1 as a varint.
pub fn sniff_saved_model(prefix: &[u8]) -> bool {
    let Some((&0x08, rest)) = prefix.split_first() else {
        return false;
    };
    // Skip the schema-version varint.
    let Some(end) = rest.iter().position(|b| b & 0x80 == 0) else {
        return false;
    };
    rest.get(end + 1) == Some(&0x12)
}
