//! axum integration for fsroute.
//!
//! Provides an [`AxumTarget`] routing target that nests each discovered
//! handler router at its mount path, and a [`HandlerMap`] resolver that looks
//! up routers registered ahead of time by their file's relative path.
//!
//! # Quick Start
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use fsroute_axum::{AxumTarget, HandlerMap};
//! use fsroute_core::{RouteOptions, Setup};
//!
//! let mut handlers = HandlerMap::new("routes")
//!     .with("index.rs", Router::new().route("/", get(|| async { "home" })))
//!     .with("users.rs", Router::new().route("/", get(|| async { "users" })));
//! let mut target = AxumTarget::new();
//!
//! Setup::new(RouteOptions::new("routes"))
//!     .target(&mut target)
//!     .resolver(&mut handlers)
//!     .run()?;
//!
//! let app = target.into_router();
//! ```

mod handlers;
mod target;

pub use handlers::HandlerMap;
pub use target::AxumTarget;
