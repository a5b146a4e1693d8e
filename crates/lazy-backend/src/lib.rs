// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # lazy-backend
//!
//! Deferred access to optional ML framework backends.
//!
//! Framework support is optional: a build may leave out any of the
//! framework features, and a deployment may disable a compiled-in framework
//! through the `INTROSPECT_DISABLE_BACKENDS` environment variable. Code that
//! only *probes* capabilities (format detection, framework names) must keep
//! working in either case, so backends are reached through two pieces:
//!
//! - [`LazyBackend`]: a handle constructed eagerly (usually in a `static`)
//!   that runs its loader on first real use, memoizes the outcome, and
//!   reports a missing backend as [`BackendUnavailable`].
//! - [`ModuleChecker`]: the presence-check facility behind
//!   `guard_requirements_installed()`; answers "is framework X available"
//!   without resolving anything and reports [`MissingDependency`].
//!
//! # Example
//! ```
//! use lazy_backend::{Framework, LazyBackend};
//!
//! static GREETER: LazyBackend<String> = LazyBackend::new("greeter", || Ok("hello".into()));
//!
//! assert!(!GREETER.is_resolved());
//! assert_eq!(GREETER.get().unwrap(), "hello");
//! assert_eq!(GREETER.import_attempts(), 1);
//! assert_eq!(Framework::Tensorflow.as_str(), "tensorflow");
//! ```

mod checker;
mod error;
mod framework;
mod handle;
pub mod installed;

pub use checker::{InstalledModules, ModuleChecker};
pub use error::{BackendUnavailable, MissingDependency};
pub use framework::Framework;
pub use handle::LazyBackend;
