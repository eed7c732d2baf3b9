//! Test doubles for the routing target and handler resolver.
//!
//! Provides [`RecordingTarget`] and [`StubResolver`] for exercising the walk
//! without a real host framework.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::mount::{HandlerResolver, LoadError, RoutingTarget};

/// Routing target that records every mount call in order.
///
/// # Example
///
/// ```ignore
/// let mut target = RecordingTarget::new();
/// let mut resolver = StubResolver::new();
/// Setup::new(RouteOptions::new("routes"))
///     .target(&mut target)
///     .resolver(&mut resolver)
///     .run()?;
/// assert_eq!(target.mount_paths(), vec!["/api/users"]);
/// ```
#[derive(Debug)]
pub struct RecordingTarget<H> {
    mounts: Vec<(String, H)>,
}

impl<H> Default for RecordingTarget<H> {
    fn default() -> Self {
        Self { mounts: Vec::new() }
    }
}

impl<H> RecordingTarget<H> {
    /// Create an empty recording target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(mount_path, handler)` pairs in call order.
    #[must_use]
    pub fn mounts(&self) -> &[(String, H)] {
        &self.mounts
    }

    /// Recorded mount paths in call order.
    #[must_use]
    pub fn mount_paths(&self) -> Vec<&str> {
        self.mounts.iter().map(|(path, _)| path.as_str()).collect()
    }

    /// Number of mount calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// True if nothing was mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

impl<H> RoutingTarget<H> for RecordingTarget<H> {
    fn mount(&mut self, mount_path: &str, handler: H) {
        self.mounts.push((mount_path.to_owned(), handler));
    }
}

/// Resolver that returns the file path as the handler.
///
/// Files whose name was registered with [`StubResolver::with_failure`] fail
/// to resolve.
#[derive(Debug, Default)]
pub struct StubResolver {
    resolved: Vec<PathBuf>,
    failures: HashSet<String>,
}

impl StubResolver {
    /// Create a resolver that succeeds for every file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail to resolve files with this file name.
    #[must_use]
    pub fn with_failure(mut self, file_name: impl Into<String>) -> Self {
        self.failures.insert(file_name.into());
        self
    }

    /// Files passed to `resolve`, in call order.
    #[must_use]
    pub fn resolved(&self) -> &[PathBuf] {
        &self.resolved
    }
}

impl HandlerResolver<String> for StubResolver {
    fn resolve(&mut self, file: &Path) -> Result<String, LoadError> {
        self.resolved.push(file.to_path_buf());

        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failures.contains(&file_name) {
            return Err(format!("cannot load {file_name}").into());
        }

        Ok(file.display().to_string())
    }
}
