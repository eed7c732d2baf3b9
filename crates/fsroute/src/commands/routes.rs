//! `fsroute routes` command implementation.

use std::path::Path;

use clap::Args;
use fsroute_core::{LoadError, RouteTable, Setup};

use super::{DiscoveryArgs, route_options_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Print the route table as JSON.
    #[arg(long)]
    pub json: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the walk fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let json = self.json;

        let config = self.discovery.load_config(None, None)?;
        let options = route_options_from_config(&config.routes_resolved);
        let source_dir = options.source_dir.clone().unwrap_or_default();

        // Listing only: nothing is loaded and nothing is mounted
        let mut target = |_: &str, (): ()| {};
        let mut resolver = |_: &Path| Ok::<(), LoadError>(());
        let table = Setup::new(options)
            .target(&mut target)
            .resolver(&mut resolver)
            .run()?;

        let Some(table) = table else {
            output.warning(&format!(
                "Source directory not found: {}",
                source_dir.display()
            ));
            if json {
                output.result("null");
            }
            return Ok(());
        };

        if json {
            output.result(&serde_json::to_string_pretty(&table)?);
            return Ok(());
        }

        for line in format_table(&table, &source_dir) {
            output.result(&line);
        }
        output.success(&format!("{} routes discovered", table.len()));

        Ok(())
    }
}

/// Format the route table as aligned text lines.
///
/// Columns: mount path, route name, source file relative to `source_dir`.
fn format_table(table: &RouteTable, source_dir: &Path) -> Vec<String> {
    let rows: Vec<(&str, &str, String)> = table
        .iter()
        .map(|endpoint| {
            let source = endpoint
                .source_file
                .strip_prefix(source_dir)
                .unwrap_or(&endpoint.source_file)
                .display()
                .to_string();
            (
                endpoint.mount_path.as_str(),
                endpoint.route_name.as_str(),
                source,
            )
        })
        .collect();

    let mount_width = rows
        .iter()
        .map(|(mount, _, _)| mount.len())
        .max()
        .unwrap_or(0)
        .max("MOUNT".len());
    let name_width = rows
        .iter()
        .map(|(_, name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("ROUTE".len());

    std::iter::once(format!(
        "{:mount_width$}  {:name_width$}  SOURCE",
        "MOUNT", "ROUTE"
    ))
    .chain(
        rows.into_iter()
            .map(|(mount, name, source)| format!("{mount:mount_width$}  {name:name_width$}  {source}")),
    )
    .collect()
}
