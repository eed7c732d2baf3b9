//! Seams to the host framework.
//!
//! [`HandlerResolver`] turns a discovered file into a handler value and
//! [`RoutingTarget`] registers that handler at its mount path. Both are
//! implemented for closures so simple callers need no wrapper types.

use std::path::Path;

/// Error returned by a [`HandlerResolver`].
pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

/// Produces the handler for a discovered file.
///
/// Called once per file, in traversal order. Returning an error aborts the
/// whole walk.
pub trait HandlerResolver<H> {
    /// Resolve the handler for `file` (the source directory joined with the
    /// file's relative path).
    fn resolve(&mut self, file: &Path) -> Result<H, LoadError>;
}

impl<H, F> HandlerResolver<H> for F
where
    F: FnMut(&Path) -> Result<H, LoadError>,
{
    fn resolve(&mut self, file: &Path) -> Result<H, LoadError> {
        self(file)
    }
}

/// Host framework instance that receives handlers.
pub trait RoutingTarget<H> {
    /// Register `handler` at `mount_path`.
    fn mount(&mut self, mount_path: &str, handler: H);
}

impl<H, F> RoutingTarget<H> for F
where
    F: FnMut(&str, H),
{
    fn mount(&mut self, mount_path: &str, handler: H) {
        self(mount_path, handler);
    }
}
