//! Discovered endpoints.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::setup::RouteOptions;

/// Record of one discovered file.
///
/// Serialized with the field names used by the route listing
/// (`routeName`, `baseUrl`, `filename`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    /// Route name (e.g., "users/index").
    #[serde(rename = "routeName")]
    pub route_name: String,
    /// Path the handler was mounted at (e.g., "/api/users").
    #[serde(rename = "baseUrl")]
    pub mount_path: String,
    /// Source file the handler was resolved from.
    #[serde(rename = "filename")]
    pub source_file: PathBuf,
}

/// Result of a completed walk: descriptors keyed by route name.
///
/// Route names are unique. Inserting a descriptor whose route name is already
/// present replaces the earlier one.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTable {
    endpoints: BTreeMap<String, EndpointDescriptor>,
    #[serde(skip)]
    options: RouteOptions,
}

impl RouteTable {
    pub(crate) fn new(options: RouteOptions) -> Self {
        Self {
            endpoints: BTreeMap::new(),
            options,
        }
    }

    /// Insert a descriptor, returning the one it replaced, if any.
    pub(crate) fn insert(&mut self, descriptor: EndpointDescriptor) -> Option<EndpointDescriptor> {
        self.endpoints
            .insert(descriptor.route_name.clone(), descriptor)
    }

    /// Look up a descriptor by route name.
    #[must_use]
    pub fn get(&self, route_name: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.get(route_name)
    }

    /// Iterate over descriptors ordered by route name.
    pub fn iter(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.values()
    }

    /// Route names ordered lexicographically.
    pub fn route_names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    /// Number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// True if no endpoints were discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Options the walk ran with.
    #[must_use]
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a EndpointDescriptor;
    type IntoIter = std::collections::btree_map::Values<'a, String, EndpointDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.values()
    }
}
