// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The variant registry.
//!
//! Resolution is a priority-ordered scan: the first entry whose predicate
//! accepts the path wins. Predicates must be mutually exclusive, and
//! [`ModelRegistry::register`] enforces this over every entry's probe paths
//! so an overlap is a registration error rather than a silent tie.

use crate::variant::{CheckpointModel, FrozenPbModel, OnnxModel, SavedModelModel};
use crate::{Model, ModelContext, ModelError, ModelTag, ModelVariant, RegistryError};
use lazy_backend::Framework;
use std::fmt;
use std::path::{Path, PathBuf};

/// Path predicate of a variant.
pub type SupportsFn = fn(&Path) -> bool;

/// Constructor of a variant, erased to the [`Model`] contract.
pub type OpenFn = fn(PathBuf, &ModelContext) -> Box<dyn Model>;

/// One registered variant.
#[derive(Clone, Copy)]
pub struct VariantEntry {
    pub tag: ModelTag,
    pub framework: Framework,
    pub supports: SupportsFn,
    pub open: OpenFn,
    /// Paths checked against every other entry at registration.
    pub probes: &'static [&'static str],
}

impl VariantEntry {
    /// Entry for a [`ModelVariant`] implementation.
    pub fn of<V: ModelVariant>() -> Self {
        Self {
            tag: V::TAG,
            framework: V::FRAMEWORK,
            supports: V::supports_path,
            open: open_boxed::<V>,
            probes: V::probe_paths(),
        }
    }
}

/// Built-in variants in priority order.
pub fn builtin_entries() -> [VariantEntry; 4] {
    [
        VariantEntry::of::<SavedModelModel>(),
        VariantEntry::of::<CheckpointModel>(),
        VariantEntry::of::<FrozenPbModel>(),
        VariantEntry::of::<OnnxModel>(),
    ]
}

fn open_boxed<V: ModelVariant>(path: PathBuf, ctx: &ModelContext) -> Box<dyn Model> {
    Box::new(V::open(path, ctx))
}

impl fmt::Debug for VariantEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantEntry")
            .field("tag", &self.tag)
            .field("framework", &self.framework)
            .field("probes", &self.probes)
            .finish_non_exhaustive()
    }
}

/// Ordered table of model variants.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<VariantEntry>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in variants in priority order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for entry in builtin_entries() {
            let registered = registry.register(entry);
            debug_assert!(registered.is_ok(), "built-in variants overlap: {registered:?}");
        }
        registry
    }

    /// Appends `entry` at the lowest priority.
    ///
    /// Fails if the tag is taken or if any probe path of the new entry or
    /// of an existing entry is accepted by both.
    pub fn register(&mut self, entry: VariantEntry) -> Result<(), RegistryError> {
        for existing in &self.entries {
            if existing.tag == entry.tag {
                return Err(RegistryError::DuplicateTag(entry.tag));
            }
            let probes = existing.probes.iter().chain(entry.probes);
            for probe in probes {
                let path = Path::new(probe);
                if (existing.supports)(path) && (entry.supports)(path) {
                    return Err(RegistryError::OverlappingVariants {
                        first: existing.tag,
                        second: entry.tag,
                        path: probe.to_string(),
                    });
                }
            }
        }
        tracing::debug!(tag = %entry.tag, framework = %entry.framework, "variant registered");
        self.entries.push(entry);
        Ok(())
    }

    /// First entry accepting `path`.
    pub fn resolve(&self, path: &Path) -> Result<&VariantEntry, ModelError> {
        self.entries
            .iter()
            .find(|entry| (entry.supports)(path))
            .ok_or_else(|| ModelError::UnsupportedModelFormat {
                path: path.to_path_buf(),
            })
    }

    /// Resolves `path` and wraps it in the matching variant.
    pub fn open(&self, path: &Path, ctx: &ModelContext) -> Result<Box<dyn Model>, ModelError> {
        let entry = self.resolve(path)?;
        Ok((entry.open)(path.to_path_buf(), ctx))
    }

    /// Entry registered for `tag`.
    pub fn find(&self, tag: ModelTag) -> Option<&VariantEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[VariantEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any_pb(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == "pb")
    }

    fn greedy_entry() -> VariantEntry {
        VariantEntry {
            tag: ModelTag::OnnxModel,
            framework: Framework::Onnxrt,
            supports: any_pb,
            open: open_boxed::<OnnxModel>,
            probes: &["other.pb"],
        }
    }

    #[test]
    fn test_builtin_order() {
        let registry = ModelRegistry::builtin();
        let tags: Vec<ModelTag> = registry.entries().iter().map(|e| e.tag).collect();
        assert_eq!(tags, ModelTag::ALL);
        assert_eq!(registry.find(ModelTag::OnnxModel).unwrap().framework, Framework::Onnxrt);
    }

    #[test]
    fn test_builtin_goes_through_register() {
        let registry = ModelRegistry::builtin();
        let mut replay = ModelRegistry::new();
        for entry in registry.entries() {
            replay.register(*entry).unwrap();
        }
        assert_eq!(replay.entries().len(), registry.entries().len());
        assert_eq!(
            ModelRegistry::builtin().register(VariantEntry::of::<FrozenPbModel>()),
            Err(RegistryError::DuplicateTag(ModelTag::FrozenGraph))
        );
    }

    #[test]
    fn test_builtin_entries_register_cleanly() {
        let mut registry = ModelRegistry::new();
        for entry in builtin_entries() {
            registry.register(entry).unwrap();
        }
        assert_eq!(registry.entries().len(), 4);
    }

    #[test]
    fn test_resolve() {
        let registry = ModelRegistry::builtin();
        let entry = registry.resolve(Path::new("/path/to/frozen_pb.pb")).unwrap();
        assert_eq!(entry.tag, ModelTag::FrozenGraph);
        assert!(matches!(
            registry.resolve(Path::new("/path/to/model.txt")),
            Err(ModelError::UnsupportedModelFormat { .. })
        ));
    }

    #[test]
    fn test_open_wraps_without_loading() {
        let registry = ModelRegistry::builtin();
        let model = registry
            .open(Path::new("export/saved_model.pb"), &ModelContext::new())
            .unwrap();
        assert_eq!(model.tag(), ModelTag::SavedModel);
        assert_eq!(model.framework(), Framework::Tensorflow);
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut registry = ModelRegistry::builtin();
        let err = registry.register(VariantEntry::of::<OnnxModel>()).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTag(ModelTag::OnnxModel));
    }

    #[test]
    fn test_overlap_rejected() {
        let mut registry = ModelRegistry::new();
        registry.register(VariantEntry::of::<FrozenPbModel>()).unwrap();
        let err = registry.register(greedy_entry()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::OverlappingVariants {
                first: ModelTag::FrozenGraph,
                second: ModelTag::OnnxModel,
                path: "model.pb".into(),
            }
        );
        assert_eq!(registry.entries().len(), 1);
    }
}
