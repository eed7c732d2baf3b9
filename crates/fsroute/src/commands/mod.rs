//! CLI command implementations.

pub(crate) mod routes;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use fsroute_config::{CliSettings, Config, RoutesConfig};
use fsroute_core::{EntryOrder, RouteOptions};

use crate::error::CliError;

pub(crate) use routes::RoutesArgs;
pub(crate) use serve::ServeArgs;

/// Route discovery arguments shared by all commands.
#[derive(Args)]
pub(crate) struct DiscoveryArgs {
    /// Path to configuration file (default: auto-discover fsroute.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Handler source directory (overrides config).
    #[arg(short, long, env = "FSROUTE_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Prefix for every mount path (overrides config).
    #[arg(long)]
    prefix: Option<String>,

    /// File name that mounts at its directory's path (overrides config).
    #[arg(long)]
    root_module: Option<String>,

    /// Visit directory entries in lexicographic order.
    #[arg(long)]
    pub sorted: bool,

    /// Log how each file maps to its route.
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl DiscoveryArgs {
    /// Load configuration with these arguments applied on top.
    ///
    /// `host` and `port` are only set by commands that bind a server.
    pub(crate) fn load_config(
        self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            source_dir: self.source_dir,
            prefix: self.prefix,
            root_module: self.root_module,
            debug: self.debug.then_some(true),
            sorted: self.sorted.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build discovery options from resolved route configuration.
pub(crate) fn route_options_from_config(routes: &RoutesConfig) -> RouteOptions {
    RouteOptions {
        root_prefix: routes.prefix.clone(),
        debug: routes.debug,
        root_module: routes.root_module.clone(),
        source_dir: routes.source_dir.clone(),
        order: if routes.sorted {
            EntryOrder::Lexicographic
        } else {
            EntryOrder::Listing
        },
    }
}
