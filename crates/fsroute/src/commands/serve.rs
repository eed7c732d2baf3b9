//! `fsroute serve` command implementation.

use std::path::Path;

use axum::Router;
use clap::Args;
use fsroute_axum::AxumTarget;
use fsroute_core::{LoadError, Setup};
use tower_http::services::ServeFile;

use super::{DiscoveryArgs, route_options_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the walk fails, or the
    /// server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.discovery.load_config(self.host, self.port)?;
        let options = route_options_from_config(&config.routes_resolved);
        let source_dir = options.source_dir.clone().unwrap_or_default();

        let mut target = AxumTarget::new();
        let mut resolver = |file: &Path| Ok::<_, LoadError>(file_router(file));
        let table = Setup::new(options)
            .target(&mut target)
            .resolver(&mut resolver)
            .run()?;

        let Some(table) = table else {
            output.warning(&format!(
                "Source directory not found: {}",
                source_dir.display()
            ));
            return Ok(());
        };

        output.info(&format!("Source directory: {}", source_dir.display()));
        for endpoint in &table {
            output.info(&format!(
                "  {} -> {}",
                endpoint.mount_path,
                endpoint.source_file.display()
            ));
        }
        output.success(&format!("Mounted {} routes", target.len()));

        let (host, port) = (config.server.host, config.server.port);
        output.info(&format!("Starting server on {host}:{port}"));

        let app = target.into_router();
        let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
        tracing::info!(address = %listener.local_addr()?, "Starting server");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Router serving the file's contents at its mount point.
fn file_router(file: &Path) -> Router {
    Router::new().route_service("/", ServeFile::new(file))
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
