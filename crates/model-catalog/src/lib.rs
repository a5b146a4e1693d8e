// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-catalog
//!
//! Format detection and the uniform model contract.
//!
//! - [`detect`] maps a path to a [`ModelTag`] without loading anything.
//! - [`ModelRegistry`] resolves a path to a [`ModelVariant`] and opens it as
//!   a boxed [`Model`]; variant predicates are checked for mutual
//!   exclusivity when registered.
//! - [`Model`] exposes input/output node names and the native graph, all
//!   loaded lazily from the backend and memoized per instance.
//! - [`GraphReader`]s turn native graphs into a framework-independent
//!   [`Graph`](graph_ir::Graph).
//! - [`ModelContext`] carries the collaborators (presence checker, backend
//!   handles, readers, synthetic-output policy) into every model.
//!
//! # Example
//! ```no_run
//! use model_catalog::{ModelContext, ModelRegistry};
//! use std::path::Path;
//!
//! let registry = ModelRegistry::builtin();
//! let model = registry
//!     .open(Path::new("./models/mobilenet_v2.pb"), &ModelContext::new())
//!     .unwrap();
//! model.guard_requirements_installed().unwrap();
//! println!("inputs:  {:?}", model.input_nodes().unwrap());
//! println!("outputs: {:?}", model.output_nodes().unwrap());
//! println!("{}", model.model_graph().unwrap().summary());
//! ```

mod config;
mod context;
mod detect;
mod error;
pub mod model;
pub mod reader;
mod registry;
mod tag;
pub mod variant;

pub use config::CatalogConfig;
pub use context::ModelContext;
pub use detect::{detect, SNIFF_LEN};
pub use error::{ModelError, RegistryError};
pub use model::{Model, ModelVariant, NativeGraph};
pub use reader::{GraphReader, OnnxReader, TensorflowReader};
pub use registry::{builtin_entries, ModelRegistry, OpenFn, SupportsFn, VariantEntry};
pub use tag::ModelTag;
pub use variant::{CheckpointModel, FrozenPbModel, OnnxModel, SavedModelModel, TensorflowModel};
