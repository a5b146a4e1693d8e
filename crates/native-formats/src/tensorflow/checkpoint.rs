// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Checkpoint bundle layout.
//!
//! A bundle directory holds a text `checkpoint` state file naming the latest
//! checkpoint prefix, plus per-checkpoint files; the graph lives in
//! `<prefix>.meta` as a serialized `MetaGraphDef`:
//!
//! ```text
//! checkpoint                      model_checkpoint_path: "model.ckpt-1000"
//! model.ckpt-1000.meta            MetaGraphDef
//! model.ckpt-1000.index
//! model.ckpt-1000.data-00000-of-00001
//! ```

use crate::FormatError;
use std::path::{Path, PathBuf};

/// Name of the checkpoint state file.
pub const STATE_FILE: &str = "checkpoint";

/// Extension of serialized meta graphs.
pub const META_EXTENSION: &str = "meta";

/// Extracts `model_checkpoint_path` from the text state file.
pub fn parse_state(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let value = line.trim().strip_prefix("model_checkpoint_path:")?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Returns `true` if `dir` looks like a checkpoint bundle.
pub fn looks_like_bundle(dir: &Path) -> bool {
    dir.join(STATE_FILE).is_file() || !meta_files(dir).is_empty()
}

/// Locates the meta graph of the latest checkpoint in `dir`.
///
/// Prefers `<model_checkpoint_path>.meta`; falls back to the
/// lexicographically last `*.meta` file.
pub fn find_meta_graph(dir: &Path) -> Result<PathBuf, FormatError> {
    let state_path = dir.join(STATE_FILE);
    if let Ok(text) = std::fs::read_to_string(&state_path) {
        if let Some(prefix) = parse_state(&text) {
            let prefix = PathBuf::from(prefix);
            let prefix = if prefix.is_absolute() {
                prefix
            } else {
                dir.join(prefix)
            };
            let mut meta = prefix.into_os_string();
            meta.push(".");
            meta.push(META_EXTENSION);
            let meta = PathBuf::from(meta);
            if meta.is_file() {
                return Ok(meta);
            }
            tracing::warn!(
                meta = %meta.display(),
                "checkpoint state names a missing meta graph, scanning directory"
            );
        }
    }

    meta_files(dir).pop().ok_or_else(|| FormatError::Invalid {
        path: dir.to_path_buf(),
        detail: "no .meta graph found in checkpoint bundle".into(),
    })
}

/// `*.meta` files directly inside `dir`, sorted by name.
fn meta_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == META_EXTENSION))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state() {
        let text = "model_checkpoint_path: \"model.ckpt-1000\"\n\
                    all_model_checkpoint_paths: \"model.ckpt-500\"\n\
                    all_model_checkpoint_paths: \"model.ckpt-1000\"\n";
        assert_eq!(parse_state(text).as_deref(), Some("model.ckpt-1000"));
        assert_eq!(parse_state("all_model_checkpoint_paths: \"x\""), None);
        assert_eq!(parse_state("model_checkpoint_path: \"\""), None);
    }

    #[test]
    fn test_find_via_state() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STATE_FILE), "model_checkpoint_path: \"model.ckpt-7\"\n").unwrap();
        std::fs::write(dir.path().join("model.ckpt-7.meta"), b"").unwrap();
        std::fs::write(dir.path().join("model.ckpt-9.meta"), b"").unwrap();

        assert!(looks_like_bundle(dir.path()));
        let meta = find_meta_graph(dir.path()).unwrap();
        assert_eq!(meta, dir.path().join("model.ckpt-7.meta"));
    }

    #[test]
    fn test_find_falls_back_to_last_meta() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.meta"), b"").unwrap();
        std::fs::write(dir.path().join("b.meta"), b"").unwrap();
        assert_eq!(find_meta_graph(dir.path()).unwrap(), dir.path().join("b.meta"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!looks_like_bundle(dir.path()));
        assert!(matches!(
            find_meta_graph(dir.path()),
            Err(FormatError::Invalid { .. })
        ));
    }
}
