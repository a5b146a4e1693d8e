// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The deferred backend handle.
//!
//! ```text
//! LazyBackend::new(name, loader)     no work, usable in a `static`
//!       │  first .get()
//!       ▼
//! loader() runs exactly once         outcome memoized (Ok or Err)
//!       │  every later .get()
//!       ▼
//! same &T, or same BackendUnavailable
//! ```
//!
//! Resolution goes through [`OnceCell::get_or_init`], so when several
//! threads race on first use only one of them runs the loader and all of
//! them observe the single stored outcome.

use crate::BackendUnavailable;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Loader signature: produce the backend, or a human-readable reason why not.
pub type Loader<T> = fn() -> Result<T, String>;

/// A named backend that is resolved on first use and memoized afterwards.
pub struct LazyBackend<T> {
    name: &'static str,
    loader: Loader<T>,
    slot: OnceCell<Result<T, String>>,
    attempts: AtomicUsize,
}

impl<T> LazyBackend<T> {
    /// Creates an unresolved handle. Never calls `loader`.
    pub const fn new(name: &'static str, loader: Loader<T>) -> Self {
        Self {
            name,
            loader,
            slot: OnceCell::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Creates a handle that is already resolved to `value`.
    ///
    /// Used to hand a specific backend implementation to code that expects
    /// a handle (tests, embedders with their own backend).
    pub fn ready(name: &'static str, value: T) -> Self {
        Self::preset(name, Ok(value))
    }

    /// Creates a handle whose resolution has already failed with `reason`.
    pub fn failed(name: &'static str, reason: impl Into<String>) -> Self {
        Self::preset(name, Err(reason.into()))
    }

    fn preset(name: &'static str, outcome: Result<T, String>) -> Self {
        let slot = OnceCell::new();
        let _ = slot.set(outcome);
        Self {
            name,
            loader: preset_loader::<T>,
            slot,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Library name this handle resolves.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` once an outcome (success or failure) is stored.
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Number of times the loader actually ran. At most 1.
    pub fn import_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Resolves the backend on first call and returns the memoized result.
    pub fn get(&self) -> Result<&T, BackendUnavailable> {
        let outcome = self.slot.get_or_init(|| {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(backend = self.name, "resolving backend");
            let outcome = (self.loader)();
            match &outcome {
                Ok(_) => tracing::debug!(backend = self.name, "backend resolved"),
                Err(reason) => {
                    tracing::debug!(backend = self.name, %reason, "backend unavailable")
                }
            }
            outcome
        });

        outcome.as_ref().map_err(|reason| BackendUnavailable {
            name: self.name.to_string(),
            reason: reason.clone(),
        })
    }
}

fn preset_loader<T>() -> Result<T, String> {
    Err("handle was constructed pre-resolved".into())
}

impl<T> fmt::Debug for LazyBackend<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.slot.get() {
            None => "unresolved",
            Some(Ok(_)) => "resolved",
            Some(Err(_)) => "unavailable",
        };
        f.debug_struct("LazyBackend")
            .field("name", &self.name)
            .field("state", &state)
            .finish()
    }
}
