//! Route name and mount path derivation.
//!
//! Converts a path relative to the source directory into a route name and the
//! route path used for mounting, then joins that with the configured prefix.
//!
//! Examples (root module `index`, prefix `/api`):
//! - `users.rs` -> route name `users`, mount path `/api/users`
//! - `users/index.rs` -> route name `users/index`, mount path `/api/users`
//! - `index.rs` -> route name `index`, mount path `/api`
//! - `v1.2/items.rs` -> route name `v1_2/items`, mount path `/api/v1_2/items`

/// Route name and route path for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMapping {
    /// Slash-separated identifier with the extension stripped and dots
    /// replaced by underscores (e.g., "users/settings_v2").
    pub route_name: String,
    /// Path to mount under the prefix. `None` means the prefix itself.
    pub route_path: Option<String>,
}

impl RouteMapping {
    /// Map a path relative to the source directory.
    ///
    /// Accepts both `/` and `\` as separators.
    #[must_use]
    pub fn new(relative: &str, root_module: &str) -> Self {
        let route_name = route_name(relative);

        let route_path = if is_root_module(&route_name, root_module) {
            route_name
                .rsplit_once('/')
                .map(|(parent, _)| parent.to_owned())
        } else {
            Some(route_name.clone())
        };

        Self {
            route_name,
            route_path,
        }
    }

    /// Whether this file mounts at its parent directory's path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.route_path.as_deref() != Some(self.route_name.as_str())
    }
}

/// Build the route name: strip extension, normalize separators, replace dots.
fn route_name(relative: &str) -> String {
    let normalized = relative.replace('\\', "/");
    let without_ext = strip_extension(&normalized);
    without_ext.replace('.', "_")
}

/// Remove everything after the last `.` of the final segment.
///
/// Dotfiles (`.env`) and extensionless names keep their full name.
fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..segment_start + dot],
    }
}

/// Check whether the last segment of `route_name` equals `root_module`.
fn is_root_module(route_name: &str, root_module: &str) -> bool {
    route_name.rsplit('/').next() == Some(root_module)
}

/// Join the prefix and route path into a mount path.
///
/// Runs of `/` are collapsed. A `None` route path yields the prefix alone.
#[must_use]
pub fn combine_mount_path(prefix: &str, route_path: Option<&str>) -> String {
    let joined = match route_path {
        Some(route_path) => format!("{prefix}/{route_path}"),
        None => prefix.to_owned(),
    };
    collapse_slashes(&joined)
}

fn collapse_slashes(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        result.push(c);
    }
    result
}
