//! Resolver for routers registered ahead of time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::Router;
use fsroute_core::{HandlerResolver, LoadError};

/// Maps handler files to routers compiled into the binary.
///
/// Keys are paths relative to the source directory (e.g., `users/index.rs`).
/// Resolving a file with no registered router fails the walk, so every file
/// in the source tree needs a matching entry.
#[derive(Debug)]
pub struct HandlerMap {
    source_dir: PathBuf,
    handlers: HashMap<PathBuf, Router>,
}

impl HandlerMap {
    /// Create an empty map for files under `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            handlers: HashMap::new(),
        }
    }

    /// Register the router for a file relative to the source directory.
    #[must_use]
    pub fn with(mut self, relative: impl Into<PathBuf>, router: Router) -> Self {
        self.insert(relative, router);
        self
    }

    /// Register the router for a file relative to the source directory.
    pub fn insert(&mut self, relative: impl Into<PathBuf>, router: Router) {
        self.handlers.insert(relative.into(), router);
    }

    /// Number of registered routers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no routers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerResolver<Router> for HandlerMap {
    fn resolve(&mut self, file: &Path) -> Result<Router, LoadError> {
        let relative = file.strip_prefix(&self.source_dir).unwrap_or(file);
        self.handlers
            .get(relative)
            .cloned()
            .ok_or_else(|| format!("no handler registered for {}", relative.display()).into())
    }
}
