//! fsroute CLI - Filesystem route discovery.
//!
//! Provides commands for:
//! - `routes`: Print the routes discovered in a handler directory
//! - `serve`: Serve every discovered file at its mount path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RoutesArgs, ServeArgs};
use output::Output;

/// fsroute - Mount handler files by their location on disk.
#[derive(Parser)]
#[command(name = "fsroute", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the discovered route table.
    Routes(RoutesArgs),
    /// Serve each discovered file at its mount path.
    Serve(ServeArgs),
}

impl Commands {
    /// Whether INFO-level logs were requested.
    fn wants_info_logs(&self) -> bool {
        let discovery = match self {
            Self::Routes(args) => &args.discovery,
            Self::Serve(args) => &args.discovery,
        };
        discovery.verbose || discovery.debug
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose/--debug enable INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.wants_info_logs() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Routes(args) => args.execute(),
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes_command() {
        let cli = Cli::try_parse_from([
            "fsroute",
            "routes",
            "--source-dir",
            "handlers",
            "--prefix",
            "/v1",
            "--sorted",
            "--json",
        ])
        .unwrap();

        let Commands::Routes(args) = &cli.command else {
            panic!("expected routes command");
        };
        assert!(args.json);
        assert!(args.discovery.sorted);
        assert!(!cli.command.wants_info_logs());
    }

    #[test]
    fn test_parse_serve_command_with_debug() {
        let cli = Cli::try_parse_from(["fsroute", "serve", "--port", "9000", "--debug"]).unwrap();

        assert!(matches!(cli.command, Commands::Serve(_)));
        assert!(cli.command.wants_info_logs());
    }
}
