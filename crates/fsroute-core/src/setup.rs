//! Options validation and walk orchestration.

use std::path::{Path, PathBuf};

use crate::error::SetupError;
use crate::mount::{HandlerResolver, RoutingTarget};
use crate::table::RouteTable;
use crate::walker::Walker;

/// Order in which the entries of each directory are visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryOrder {
    /// Whatever order the platform's directory listing returns.
    #[default]
    Listing,
    /// Sorted by file name within each directory.
    Lexicographic,
}

/// Options controlling how files map to mount paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    /// Prefix prepended to every mount path.
    pub root_prefix: String,
    /// Log per-file diagnostics while walking.
    pub debug: bool,
    /// File name (without extension) that mounts at its directory's path.
    pub root_module: String,
    /// Root of the tree to scan. Required.
    pub source_dir: Option<PathBuf>,
    /// Directory entry visiting order.
    pub order: EntryOrder,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            root_prefix: "/api".to_owned(),
            debug: false,
            root_module: "index".to_owned(),
            source_dir: None,
            order: EntryOrder::Listing,
        }
    }
}

impl RouteOptions {
    /// Default options scanning `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: Some(source_dir.into()),
            ..Self::default()
        }
    }

    /// Set the mount path prefix.
    #[must_use]
    pub fn with_root_prefix(mut self, root_prefix: impl Into<String>) -> Self {
        self.root_prefix = root_prefix.into();
        self
    }

    /// Set the root module name.
    #[must_use]
    pub fn with_root_module(mut self, root_module: impl Into<String>) -> Self {
        self.root_module = root_module.into();
        self
    }

    /// Enable or disable per-file diagnostics.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the entry visiting order.
    #[must_use]
    pub fn with_order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }

    /// Source directory if set and non-empty.
    fn source_dir(&self) -> Option<&Path> {
        self.source_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}

/// Discovers handler files and mounts them on a routing target.
///
/// The routing target, the handler resolver, and a source directory are
/// required. Missing pieces are reported before the filesystem is touched.
///
/// # Example
///
/// ```ignore
/// let table = Setup::new(RouteOptions::new("routes"))
///     .target(&mut router)
///     .resolver(&mut resolver)
///     .run()?;
/// ```
pub struct Setup<'a, H> {
    options: RouteOptions,
    target: Option<&'a mut dyn RoutingTarget<H>>,
    resolver: Option<&'a mut dyn HandlerResolver<H>>,
}

impl<'a, H> Setup<'a, H> {
    /// Start a setup with the given options.
    #[must_use]
    pub fn new(options: RouteOptions) -> Self {
        Self {
            options,
            target: None,
            resolver: None,
        }
    }

    /// Set the routing target that receives handlers.
    #[must_use]
    pub fn target<T: RoutingTarget<H>>(mut self, target: &'a mut T) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the resolver that loads handlers from files.
    #[must_use]
    pub fn resolver<R: HandlerResolver<H>>(mut self, resolver: &'a mut R) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Validate options and walk the source directory.
    ///
    /// Returns `Ok(None)` without mounting anything when the source directory
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the routing target, source directory,
    /// or resolver is missing. Returns `SetupError::Io` or `SetupError::Load`
    /// if the walk fails; nothing discovered before the failure is returned.
    pub fn run(self) -> Result<Option<RouteTable>, SetupError> {
        let Some(target) = self.target else {
            return Err(SetupError::MissingTarget);
        };

        if self.options.debug {
            tracing::info!(options = ?self.options, "Route setup options");
        }

        let Some(source_dir) = self.options.source_dir() else {
            return Err(SetupError::MissingSourceDir);
        };
        let Some(resolver) = self.resolver else {
            return Err(SetupError::MissingResolver);
        };

        if !source_dir.exists() {
            tracing::debug!(source_dir = %source_dir.display(), "Source directory not found");
            return Ok(None);
        }

        let mut table = RouteTable::new(self.options.clone());
        Walker::new(source_dir, &self.options, resolver, target).walk(&mut table)?;

        tracing::debug!(
            source_dir = %source_dir.display(),
            endpoint_count = table.len(),
            "Route discovery completed"
        );

        Ok(Some(table))
    }
}
