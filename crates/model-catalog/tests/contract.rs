// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Contract tests for the model variants, run against injected fakes.
//!
//! Every collaborator (backend handle, presence checker, graph reader) is
//! supplied through `ModelContext`, so nothing here depends on which
//! frameworks the build actually has.

use graph_ir::Node;
use lazy_backend::{Framework, LazyBackend, MissingDependency, ModuleChecker};
use model_catalog::{
    detect, CheckpointModel, FrozenPbModel, GraphReader, Model, ModelContext, ModelError,
    ModelRegistry, ModelTag, ModelVariant, OnnxModel, SavedModelModel, TensorflowReader,
};
use native_formats::tensorflow::proto::{GraphDef, NodeDef};
use native_formats::{FormatError, TensorflowApi, TensorflowHandle, TfArtifact, TfFormat};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Fakes ──────────────────────────────────────────────────────

struct FakeTensorflow {
    version: u32,
    outputs: Vec<String>,
    loads: Arc<AtomicUsize>,
}

impl TensorflowApi for FakeTensorflow {
    fn api_version(&self) -> u32 {
        self.version
    }

    fn load(&self, _path: &Path, _format: TfFormat) -> Result<TfArtifact, FormatError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let mut nodes = vec![NodeDef::new("input", "Placeholder", Vec::<String>::new())];
        for name in &self.outputs {
            nodes.push(NodeDef::new(name.as_str(), "Identity", ["input"]));
        }
        Ok(TfArtifact {
            graph: GraphDef::from_nodes(nodes),
            input_names: vec!["input".into()],
            output_names: self.outputs.clone(),
            tags: Vec::new(),
        })
    }
}

/// A leaked, pre-resolved TensorFlow handle and its load counter.
fn fake_tensorflow(version: u32, outputs: &[&str]) -> (&'static TensorflowHandle, Arc<AtomicUsize>) {
    let loads = Arc::new(AtomicUsize::new(0));
    let api: Box<dyn TensorflowApi> = Box::new(FakeTensorflow {
        version,
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
        loads: Arc::clone(&loads),
    });
    let handle: &'static TensorflowHandle = Box::leak(Box::new(LazyBackend::ready("tensorflow", api)));
    (handle, loads)
}

#[derive(Default)]
struct RecordingChecker {
    calls: Mutex<Vec<String>>,
    missing: Vec<&'static str>,
}

impl ModuleChecker for RecordingChecker {
    fn check_module(&self, name: &str) -> Result<(), MissingDependency> {
        self.calls.lock().push(name.to_string());
        if self.missing.contains(&name) {
            return Err(MissingDependency { name: name.to_string() });
        }
        Ok(())
    }
}

static UNIMPORTABLE_TF: TensorflowHandle =
    LazyBackend::new("tensorflow", || Err("No module named 'tensorflow'".into()));

fn two_outputs() -> (ModelContext, Arc<AtomicUsize>) {
    let (handle, loads) = fake_tensorflow(1, &["first output node", "second output node"]);
    (ModelContext::new().with_tensorflow(handle), loads)
}

// ── Variant exclusivity ────────────────────────────────────────

fn path_strategy() -> impl Strategy<Value = String> {
    let dirs = prop::collection::vec("[a-z_]{1,8}", 0..3);
    let stem = prop_oneof![
        "[a-zA-Z0-9_.-]{1,12}".boxed(),
        Just("saved_model".to_string()).boxed(),
        Just("model.ckpt-100".to_string()).boxed(),
    ];
    let ext = prop::sample::select(vec!["pb", "PB", "meta", "onnx", "txt", "h5", "", "pbtxt"]);
    (any::<bool>(), dirs, stem, ext).prop_map(|(absolute, dirs, stem, ext)| {
        let mut path = if absolute { String::from("/") } else { String::new() };
        for dir in dirs {
            path.push_str(&dir);
            path.push('/');
        }
        path.push_str(&stem);
        if !ext.is_empty() {
            path.push('.');
            path.push_str(ext);
        }
        path
    })
}

proptest! {
    #[test]
    fn variants_are_mutually_exclusive(raw in path_strategy()) {
        let path = Path::new(&raw);
        let registry = ModelRegistry::builtin();
        let accepting: Vec<ModelTag> = registry
            .entries()
            .iter()
            .filter(|entry| (entry.supports)(path))
            .map(|entry| entry.tag)
            .collect();

        prop_assert!(accepting.len() <= 1, "{raw} accepted by {accepting:?}");
        match detect(path) {
            Ok(tag) => prop_assert_eq!(accepting, vec![tag]),
            Err(_) => prop_assert!(accepting.is_empty()),
        }
    }
}

#[test]
fn test_probe_paths_match_their_own_variant() {
    for entry in ModelRegistry::builtin().entries() {
        for probe in entry.probes {
            assert_eq!(detect(Path::new(probe)).unwrap(), entry.tag, "{probe}");
        }
    }
}

// ── Static calls never touch the backend ───────────────────────

#[test]
fn test_static_calls_do_not_resolve_backend() {
    let ctx = ModelContext::new().with_tensorflow(&UNIMPORTABLE_TF);

    assert_eq!(FrozenPbModel::framework_name(), "tensorflow");
    assert_eq!(SavedModelModel::framework_name(), "tensorflow");
    assert_eq!(CheckpointModel::framework_name(), "tensorflow");
    assert!(FrozenPbModel::supports_path(Path::new("/path/to/frozen_pb.pb")));
    let model = ModelRegistry::builtin()
        .open(Path::new("/path/to/frozen_pb.pb"), &ctx)
        .unwrap();
    assert_eq!(model.tag(), ModelTag::FrozenGraph);
    assert!(!UNIMPORTABLE_TF.is_resolved());

    // First real use surfaces the missing backend, distinguishable from
    // every other error.
    let err = model.input_nodes().unwrap_err();
    match err {
        ModelError::BackendUnavailable(inner) => {
            assert_eq!(inner.name, "tensorflow");
            assert!(inner.reason.contains("No module named"));
        }
        other => panic!("expected BackendUnavailable, got {other}"),
    }
    assert_eq!(UNIMPORTABLE_TF.import_attempts(), 1);
}

// ── Memoized load ──────────────────────────────────────────────

#[test]
fn test_input_nodes_parse_once() {
    let (ctx, loads) = two_outputs();
    let model = FrozenPbModel::open("/path/to/frozen_pb.pb", &ctx);
    assert_eq!(loads.load(Ordering::SeqCst), 0);

    let first = model.input_nodes().unwrap().to_vec();
    let second = model.input_nodes().unwrap().to_vec();
    assert_eq!(first, vec!["input"]);
    assert_eq!(first, second);
    model.output_nodes().unwrap();
    model.native_graph().unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_models_do_not_share_state() {
    let (ctx, loads) = two_outputs();
    let a = FrozenPbModel::open("a.pb", &ctx);
    let b = FrozenPbModel::open("b.pb", &ctx);
    a.input_nodes().unwrap();
    b.input_nodes().unwrap();
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

// ── Synthetic outputs ──────────────────────────────────────────

#[test]
fn test_frozen_graph_appends_custom() {
    let (ctx, _) = two_outputs();
    let model = FrozenPbModel::open("/path/to/frozen_pb.pb", &ctx);
    assert_eq!(
        model.output_nodes().unwrap(),
        vec!["first output node", "second output node", "custom"]
    );
}

#[test]
fn test_other_tensorflow_variants_append_nothing() {
    let (ctx, _) = two_outputs();
    for model in [
        Box::new(SavedModelModel::open("export", &ctx)) as Box<dyn Model>,
        Box::new(CheckpointModel::open("ckpt", &ctx)),
    ] {
        assert_eq!(
            model.output_nodes().unwrap(),
            vec!["first output node", "second output node"]
        );
    }
}

#[test]
fn test_synthetic_outputs_are_configurable() {
    let (ctx, _) = two_outputs();
    let ctx = ctx
        .with_synthetic_outputs(ModelTag::FrozenGraph, Vec::<String>::new())
        .with_synthetic_outputs(ModelTag::SavedModel, ["calib_a", "calib_b"]);

    let frozen = FrozenPbModel::open("m.pb", &ctx);
    assert_eq!(frozen.output_nodes().unwrap().len(), 2);

    let saved = SavedModelModel::open("export", &ctx);
    assert_eq!(
        saved.output_nodes().unwrap(),
        vec!["first output node", "second output node", "calib_a", "calib_b"]
    );
}

// ── Requirements guard ─────────────────────────────────────────

#[test]
fn test_guard_checks_once_without_loading() {
    let checker = Arc::new(RecordingChecker::default());
    let (handle, loads) = fake_tensorflow(1, &["out"]);
    let ctx = ModelContext::new()
        .with_tensorflow(handle)
        .with_checker(checker.clone());

    let model = FrozenPbModel::open("/path/to/frozen_pb.pb", &ctx);
    model.guard_requirements_installed().unwrap();

    assert_eq!(*checker.calls.lock(), vec!["tensorflow"]);
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_guard_reports_missing_dependency() {
    let checker = Arc::new(RecordingChecker {
        missing: vec!["onnxrt"],
        ..Default::default()
    });
    let ctx = ModelContext::new().with_checker(checker.clone());

    let err = OnnxModel::open("model.onnx", &ctx)
        .guard_requirements_installed()
        .unwrap_err();
    assert!(matches!(err, ModelError::MissingDependency(ref m) if m.name == "onnxrt"));
    assert_eq!(*checker.calls.lock(), vec!["onnxrt"]);
}

// ── Backend version ────────────────────────────────────────────

#[test]
fn test_unsupported_api_version() {
    let (handle, loads) = fake_tensorflow(7, &["out"]);
    let ctx = ModelContext::new().with_tensorflow(handle);
    let model = CheckpointModel::open("ckpt", &ctx);

    let err = model.output_nodes().unwrap_err();
    assert!(
        matches!(err, ModelError::IncompatibleBackendVersion { ref framework, .. } if framework == "tensorflow"),
        "{err}"
    );
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}

// ── Graph reading ──────────────────────────────────────────────

#[test]
fn test_two_reads_are_equal_and_independent() {
    let (ctx, loads) = two_outputs();
    let model = FrozenPbModel::open("/path/to/frozen_pb.pb", &ctx);

    let mut first = model.model_graph().unwrap();
    let second = model.model_graph().unwrap();
    assert_eq!(first, second);
    assert_eq!(second.len(), 3);
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    first.add_node(Node::new("extra", "NoOp"));
    assert_eq!(second.len(), 3);
    assert_eq!(model.model_graph().unwrap(), second);
}

#[test]
fn test_reader_rejects_foreign_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.onnx");
    let proto = native_formats::onnx::proto::ModelProto {
        graph: Some(Default::default()),
        ..Default::default()
    };
    std::fs::write(&path, prost::Message::encode_to_vec(&proto)).unwrap();

    let model = OnnxModel::open(&path, &ModelContext::new());
    let err = TensorflowReader.read(&model).unwrap_err();
    assert!(matches!(err, ModelError::IncompatibleBackendVersion { .. }), "{err}");
    assert_eq!(TensorflowReader.framework(), Framework::Tensorflow);
}

struct FixedReader;

impl GraphReader for FixedReader {
    fn framework(&self) -> Framework {
        Framework::Tensorflow
    }

    fn read(&self, model: &dyn Model) -> Result<graph_ir::Graph, ModelError> {
        let mut graph = graph_ir::Graph::new();
        graph.add_node(Node::new(model.path().display().to_string(), "Model"));
        Ok(graph)
    }
}

#[test]
fn test_injected_reader_is_used() {
    let (ctx, loads) = two_outputs();
    let ctx = ctx.with_reader(Arc::new(FixedReader));
    let graph = FrozenPbModel::open("m.pb", &ctx).model_graph().unwrap();
    assert_eq!(graph.nodes()[0].name, "m.pb");
    assert_eq!(loads.load(Ordering::SeqCst), 0);
}
