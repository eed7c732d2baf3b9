//! Setup error types.

use std::path::PathBuf;

use crate::mount::LoadError;

/// Error returned by [`Setup::run`](crate::Setup::run).
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// No routing target was given.
    #[error("no routing target specified")]
    MissingTarget,
    /// No source directory was given, or it was empty.
    #[error("no source directory specified")]
    MissingSourceDir,
    /// No handler resolver was given.
    #[error("no handler resolver specified")]
    MissingResolver,
    /// Listing or inspecting an entry failed during the walk.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Entry being listed or inspected.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The handler resolver failed for a file.
    #[error("failed to load handler from {}: {source}", path.display())]
    Load {
        /// File whose handler could not be resolved.
        path: PathBuf,
        /// Error reported by the resolver.
        #[source]
        source: LoadError,
    },
}

impl SetupError {
    /// True for errors raised before the walk starts.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTarget | Self::MissingSourceDir | Self::MissingResolver
        )
    }

    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
