// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! End-to-end tests: artifacts written to disk, detected, opened through
//! the registry, and parsed by the bundled backends.

use graph_ir::EdgeKind;
use model_catalog::{detect, ModelContext, ModelError, ModelRegistry, ModelTag};
use native_formats::onnx::proto::{GraphProto, ModelProto, NodeProto, TensorProto, ValueInfoProto};
use native_formats::tensorflow::proto::{
    attr_value::Value, GraphDef, MetaGraphDef, MetaInfoDef, NodeDef, SavedModel, SignatureDef,
    TensorInfo,
};
use prost::Message;
use std::path::{Path, PathBuf};

// ── Fixtures ───────────────────────────────────────────────────

fn two_head_graph() -> GraphDef {
    GraphDef::from_nodes(vec![
        NodeDef::new("image", "Placeholder", Vec::<String>::new()).with_attr("dtype", Value::Type(1)),
        NodeDef::new("kernel", "Const", Vec::<String>::new()),
        NodeDef::new("conv", "Conv2D", ["image", "kernel"]).with_attr("T", Value::Type(1)),
        NodeDef::new("first output node", "Softmax", ["conv"]),
        NodeDef::new("second output node", "ArgMax", ["conv:0", "^first output node"]),
    ])
}

fn write(path: &Path, bytes: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

// ── Tests ──────────────────────────────────────────────────────

#[test]
fn test_frozen_graph_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir.path().join("frozen_pb.pb"), &two_head_graph().encode_to_vec());
    assert_eq!(detect(&path).unwrap(), ModelTag::FrozenGraph);

    let model = ModelRegistry::builtin().open(&path, &ModelContext::new()).unwrap();
    model.guard_requirements_installed().unwrap();
    assert_eq!(model.input_nodes().unwrap(), ["image"]);
    // "first output node" is only consumed by a control input.
    assert_eq!(model.output_nodes().unwrap(), vec!["second output node", "custom"]);

    let graph = model.model_graph().unwrap();
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.node("conv").unwrap().attributes["T"], "float32");
    assert_eq!(
        graph.edges().iter().filter(|e| e.kind == EdgeKind::Control).count(),
        1
    );
    let json = graph.to_json().unwrap();
    assert!(json.contains("\"control\""));
}

#[test]
fn test_saved_model_directory_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut signature = SignatureDef::default();
    signature.inputs.insert(
        "image".into(),
        TensorInfo { name: "image:0".into(), ..Default::default() },
    );
    signature.outputs.insert(
        "probabilities".into(),
        TensorInfo { name: "first output node:0".into(), ..Default::default() },
    );
    let mut meta = MetaGraphDef {
        meta_info_def: Some(MetaInfoDef { tags: vec!["serve".into()], ..Default::default() }),
        graph_def: Some(two_head_graph()),
        ..Default::default()
    };
    meta.signature_def.insert("serving_default".into(), signature);
    let saved = SavedModel { saved_model_schema_version: 1, meta_graphs: vec![meta] };
    write(&dir.path().join("export/1/saved_model.pb"), &saved.encode_to_vec());

    let export = dir.path().join("export/1");
    assert_eq!(detect(&export).unwrap(), ModelTag::SavedModel);
    let model = ModelRegistry::builtin().open(&export, &ModelContext::new()).unwrap();
    assert_eq!(model.input_nodes().unwrap(), ["image"]);
    assert_eq!(model.output_nodes().unwrap(), vec!["first output node"]);

    // The same bytes under a frozen-graph name are still recognized.
    let renamed = write(&dir.path().join("renamed.pb"), &saved.encode_to_vec());
    assert_eq!(detect(&renamed).unwrap(), ModelTag::SavedModel);
}

#[test]
fn test_checkpoint_bundle_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let meta = MetaGraphDef { graph_def: Some(two_head_graph()), ..Default::default() };
    write(&dir.path().join("checkpoint"), b"model_checkpoint_path: \"model.ckpt-100\"\n");
    write(&dir.path().join("model.ckpt-100.meta"), &meta.encode_to_vec());

    assert_eq!(detect(dir.path()).unwrap(), ModelTag::CheckpointBundle);
    let model = ModelRegistry::builtin().open(dir.path(), &ModelContext::new()).unwrap();
    assert_eq!(model.output_nodes().unwrap(), vec!["second output node"]);
    assert_eq!(model.model_graph().unwrap().len(), 5);
}

#[test]
fn test_onnx_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let proto = ModelProto {
        ir_version: 8,
        graph: Some(GraphProto {
            node: vec![
                NodeProto::new("", "MatMul", ["x", "W"], ["h"]),
                NodeProto::new("relu", "Relu", ["h"], ["y"]),
            ],
            initializer: vec![TensorProto { name: "W".into(), dims: vec![2, 2], data_type: 1 }],
            input: vec![ValueInfoProto::named("x"), ValueInfoProto::named("W")],
            output: vec![ValueInfoProto::named("y")],
            ..Default::default()
        }),
        ..Default::default()
    };
    let path = write(&dir.path().join("model.onnx"), &proto.encode_to_vec());

    let model = ModelRegistry::builtin().open(&path, &ModelContext::new()).unwrap();
    assert_eq!(model.input_nodes().unwrap(), ["x"]);
    assert_eq!(model.output_nodes().unwrap(), vec!["y"]);

    let graph = model.model_graph().unwrap();
    let names: Vec<&str> = graph.nodes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["h", "relu"]);
    assert_eq!(graph.successors("h").collect::<Vec<_>>(), ["relu"]);
}

#[test]
fn test_corrupt_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir.path().join("broken.pb"), &[0x0A, 0xFF, 0xFF]);

    let model = ModelRegistry::builtin().open(&path, &ModelContext::new()).unwrap();
    match model.input_nodes() {
        Err(ModelError::CorruptModel { path: reported, cause }) => {
            assert_eq!(reported, path);
            assert_eq!(cause.path(), path.as_path());
        }
        other => panic!("expected CorruptModel, got {other:?}"),
    }
}

#[test]
fn test_unsupported_path() {
    let err = ModelRegistry::builtin()
        .open(Path::new("/path/to/model.txt"), &ModelContext::new())
        .unwrap_err();
    assert!(matches!(err, ModelError::UnsupportedModelFormat { ref path } if path == Path::new("/path/to/model.txt")));
}
