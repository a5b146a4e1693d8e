// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Format detection.
//!
//! Detection looks at the path first and reads file content only for the
//! ambiguous `.pb` extension, where a frozen `GraphDef` and a renamed
//! `SavedModel` share a suffix. Rules, first match wins:
//!
//! | # | Path | Tag |
//! |---|---|---|
//! | 1 | directory containing `saved_model.pb` | `saved-model` |
//! | 2 | directory containing `checkpoint` or `*.meta` | `checkpoint-bundle` |
//! | 3 | file named `saved_model.pb` | `saved-model` |
//! | 4 | `*.pb` with a SavedModel header | `saved-model` |
//! | 4 | any other `*.pb`, existing or not | `frozen-graph` |
//! | 5 | `*.meta` | `checkpoint-bundle` |
//! | 6 | `*.onnx` | `onnx-model` |

use crate::{ModelError, ModelTag};
use native_formats::tensorflow::{checkpoint, sniff_saved_model, SAVED_MODEL_FILE};
use std::io::Read;
use std::path::Path;

/// Upper bound on bytes read while sniffing a file header.
pub const SNIFF_LEN: u64 = 16;

/// Determines the model tag for `path`.
///
/// Deterministic, never loads a backend, and reads at most
/// [`SNIFF_LEN`] bytes of one file.
pub fn detect(path: &Path) -> Result<ModelTag, ModelError> {
    if path.is_dir() {
        if path.join(SAVED_MODEL_FILE).is_file() {
            return Ok(ModelTag::SavedModel);
        }
        if checkpoint::looks_like_bundle(path) {
            return Ok(ModelTag::CheckpointBundle);
        }
    }

    if path.file_name().is_some_and(|name| name == SAVED_MODEL_FILE) {
        return Ok(ModelTag::SavedModel);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let tag = match extension.as_deref() {
        Some("pb") if has_saved_model_header(path) => ModelTag::SavedModel,
        Some("pb") => ModelTag::FrozenGraph,
        Some(checkpoint::META_EXTENSION) => ModelTag::CheckpointBundle,
        Some("onnx") => ModelTag::OnnxModel,
        _ => {
            return Err(ModelError::UnsupportedModelFormat {
                path: path.to_path_buf(),
            })
        }
    };
    tracing::trace!(path = %path.display(), %tag, "detected model format");
    Ok(tag)
}

fn has_saved_model_header(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    let mut prefix = Vec::with_capacity(SNIFF_LEN as usize);
    if file.take(SNIFF_LEN).read_to_end(&mut prefix).is_err() {
        return false;
    }
    sniff_saved_model(&prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_only_rules() {
        assert_eq!(detect(Path::new("/path/to/frozen_pb.pb")).unwrap(), ModelTag::FrozenGraph);
        assert_eq!(detect(Path::new("model.PB")).unwrap(), ModelTag::FrozenGraph);
        assert_eq!(detect(Path::new("export/saved_model.pb")).unwrap(), ModelTag::SavedModel);
        assert_eq!(
            detect(Path::new("ckpt/model.ckpt-100.meta")).unwrap(),
            ModelTag::CheckpointBundle
        );
        assert_eq!(detect(Path::new("resnet50.onnx")).unwrap(), ModelTag::OnnxModel);
    }

    #[test]
    fn test_unsupported() {
        for path in ["/path/to/model.txt", "model", "weights.h5", ""] {
            let err = detect(Path::new(path)).unwrap_err();
            assert!(
                matches!(err, ModelError::UnsupportedModelFormat { .. }),
                "{path}: {err}"
            );
        }
    }

    #[test]
    fn test_directories() {
        let saved = tempfile::tempdir().unwrap();
        std::fs::write(saved.path().join(SAVED_MODEL_FILE), b"").unwrap();
        assert_eq!(detect(saved.path()).unwrap(), ModelTag::SavedModel);

        let bundle = tempfile::tempdir().unwrap();
        std::fs::write(bundle.path().join("checkpoint"), b"").unwrap();
        assert_eq!(detect(bundle.path()).unwrap(), ModelTag::CheckpointBundle);

        let metas = tempfile::tempdir().unwrap();
        std::fs::write(metas.path().join("model.ckpt-1.meta"), b"").unwrap();
        assert_eq!(detect(metas.path()).unwrap(), ModelTag::CheckpointBundle);

        let empty = tempfile::tempdir().unwrap();
        assert!(detect(empty.path()).is_err());
    }

    #[test]
    fn test_pb_content_sniffing() {
        let dir = tempfile::tempdir().unwrap();
        let renamed = dir.path().join("exported.pb");
        std::fs::write(&renamed, [0x08, 0x01, 0x12, 0x04, 0x0A, 0x02, 0x0A, 0x00]).unwrap();
        assert_eq!(detect(&renamed).unwrap(), ModelTag::SavedModel);

        let frozen = dir.path().join("frozen.pb");
        std::fs::write(&frozen, [0x0A, 0x05, 0x0A, 0x01, b'x', 0x12, 0x00]).unwrap();
        assert_eq!(detect(&frozen).unwrap(), ModelTag::FrozenGraph);
    }
}
