//! Route discovery from handler files on disk.
//!
//! This crate walks a source directory and derives, from each file's location
//! and name, the URL path its handler is mounted at. Handlers are organized as
//! plain files instead of manual registration code:
//!
//! - `users.rs` -> `/api/users`
//! - `users/index.rs` -> `/api/users`
//! - `users/settings.v2.rs` -> `/api/users/settings_v2`
//! - `index.rs` -> `/api`
//!
//! # Architecture
//!
//! The crate provides:
//! - [`RouteMapping`] and [`combine_mount_path`] for the pure path derivation
//! - [`HandlerResolver`] for turning a file into a handler value
//! - [`RoutingTarget`] for registering handlers with the host framework
//! - [`Setup`] for validating options and running the walk
//! - [`RouteTable`] with one [`EndpointDescriptor`] per discovered file
//! - [`RecordingTarget`] and [`StubResolver`] for testing (behind `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fsroute_core::{LoadError, RouteOptions, Setup};
//!
//! let options = RouteOptions::new("routes").with_root_prefix("/v1");
//! let mut mounted = Vec::new();
//! let mut target = |path: &str, handler: String| mounted.push((path.to_owned(), handler));
//! let mut resolver = |file: &Path| Ok::<_, LoadError>(file.display().to_string());
//!
//! let table = Setup::new(options)
//!     .target(&mut target)
//!     .resolver(&mut resolver)
//!     .run()?;
//! ```

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod mount;
mod route;
mod setup;
mod table;
mod walker;

pub use error::SetupError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{RecordingTarget, StubResolver};
pub use mount::{HandlerResolver, LoadError, RoutingTarget};
pub use route::{RouteMapping, combine_mount_path};
pub use setup::{EntryOrder, RouteOptions, Setup};
pub use table::{EndpointDescriptor, RouteTable};
