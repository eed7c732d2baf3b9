//! Depth-first walk over the source directory.
//!
//! For every file the walker resolves the handler, derives the route name and
//! mount path, records an [`EndpointDescriptor`] and mounts the handler, in
//! that order. Directories are recursed into as they are encountered, so
//! mount calls follow the traversal order exactly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SetupError;
use crate::mount::{HandlerResolver, RoutingTarget};
use crate::route::{RouteMapping, combine_mount_path};
use crate::setup::{EntryOrder, RouteOptions};
use crate::table::{EndpointDescriptor, RouteTable};

pub(crate) struct Walker<'w, 'h, H> {
    source_dir: &'w Path,
    options: &'w RouteOptions,
    resolver: &'h mut dyn HandlerResolver<H>,
    target: &'h mut dyn RoutingTarget<H>,
}

impl<'w, 'h, H> Walker<'w, 'h, H> {
    pub(crate) fn new(
        source_dir: &'w Path,
        options: &'w RouteOptions,
        resolver: &'h mut dyn HandlerResolver<H>,
        target: &'h mut dyn RoutingTarget<H>,
    ) -> Self {
        Self {
            source_dir,
            options,
            resolver,
            target,
        }
    }

    /// Walk the whole source directory into `table`.
    pub(crate) fn walk(&mut self, table: &mut RouteTable) -> Result<(), SetupError> {
        let root = self.source_dir;
        self.walk_directory(root, table)
    }

    fn walk_directory(&mut self, dir: &Path, table: &mut RouteTable) -> Result<(), SetupError> {
        for path in self.list_directory(dir)? {
            // Follows symlinks, so a dangling link fails here
            let metadata = fs::metadata(&path).map_err(|e| SetupError::io(e, &path))?;

            if metadata.is_file() {
                self.visit_file(&path, table)?;
            } else if metadata.is_dir() {
                self.walk_directory(&path, table)?;
            }
        }
        Ok(())
    }

    fn list_directory(&self, dir: &Path) -> Result<Vec<PathBuf>, SetupError> {
        let mut paths = fs::read_dir(dir)
            .map_err(|e| SetupError::io(e, dir))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SetupError::io(e, dir))?;

        if self.options.order == EntryOrder::Lexicographic {
            paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }
        Ok(paths)
    }

    fn visit_file(&mut self, path: &Path, table: &mut RouteTable) -> Result<(), SetupError> {
        let handler = self
            .resolver
            .resolve(path)
            .map_err(|source| SetupError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let relative = relative_path(path.strip_prefix(self.source_dir).unwrap_or(path));
        let mapping = RouteMapping::new(&relative, &self.options.root_module);
        let mount_path =
            combine_mount_path(&self.options.root_prefix, mapping.route_path.as_deref());

        if self.options.debug {
            tracing::info!(
                relative = %relative,
                route_name = %mapping.route_name,
                route_path = ?mapping.route_path,
                mount_path = %mount_path,
                root = mapping.is_root(),
                "Discovered route"
            );
        }

        let descriptor = EndpointDescriptor {
            route_name: mapping.route_name,
            mount_path,
            source_file: path.to_path_buf(),
        };
        let mount_path = descriptor.mount_path.clone();

        if let Some(replaced) = table.insert(descriptor) {
            tracing::warn!(
                route_name = %replaced.route_name,
                replaced = %replaced.source_file.display(),
                by = %path.display(),
                "Route name collision, keeping the later file"
            );
        }

        self.target.mount(&mount_path, handler);
        Ok(())
    }
}

/// Join the components of a relative path with `/`.
fn relative_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
