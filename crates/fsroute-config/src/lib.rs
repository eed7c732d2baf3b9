//! `fsroute.toml` loading.
//!
//! The `[routes]` table configures discovery (source directory, mount prefix,
//! root module, ordering) and `[server]` the address `fsroute serve` binds.
//! Without an explicit path the file is looked up from the working directory
//! upwards; with none found, the built-in defaults apply.
//!
//! `server.host`, `routes.source_dir` and `routes.prefix` may reference the
//! environment as `${VAR}` (unset is an error) or `${VAR:-default}`.
//! Command-line flags, passed as [`CliSettings`], win over file values.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Values given on the command line.
///
/// `None` leaves the file value (or default) in place.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override handler source directory.
    pub source_dir: Option<PathBuf>,
    /// Override mount path prefix.
    pub prefix: Option<String>,
    /// Override root module name.
    pub root_module: Option<String>,
    /// Override debug diagnostics flag.
    pub debug: Option<bool>,
    /// Override lexicographic entry ordering.
    pub sorted: Option<bool>,
}

const CONFIG_FILENAME: &str = "fsroute.toml";

/// Loaded `fsroute.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[server]` table.
    pub server: ServerConfig,
    /// `[routes]` table as written, before env expansion and defaults.
    routes: RoutesConfigRaw,

    /// Discovery settings with defaults filled in and `source_dir` made
    /// relative to the config file.
    #[serde(skip)]
    pub routes_resolved: RoutesConfig,
    /// File the configuration came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Address for `fsroute serve`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port, never 0.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// `[routes]` exactly as parsed; every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RoutesConfigRaw {
    source_dir: Option<String>,
    prefix: Option<String>,
    root_module: Option<String>,
    debug: Option<bool>,
    sorted: Option<bool>,
}

/// Discovery settings handed to route setup.
#[derive(Debug, PartialEq, Eq)]
pub struct RoutesConfig {
    /// Directory holding handler files, resolved against the config file's
    /// directory. Required by route discovery; there is no default.
    pub source_dir: Option<PathBuf>,
    /// Prefix prepended to every mount path.
    pub prefix: String,
    /// File name (without extension) that mounts at its directory's path.
    pub root_module: String,
    /// Log per-file diagnostics during discovery.
    pub debug: bool,
    /// Visit directory entries in lexicographic order.
    pub sorted: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            prefix: "/api".to_owned(),
            root_module: "index".to_owned(),
            debug: false,
            sorted: false,
        }
    }
}

/// Failure to load or validate `fsroute.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `--config` names a file that does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed TOML or a value of the wrong type.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value that route setup or the server would reject.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// A `${VAR}` reference to an unset variable.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`routes.source_dir`").
        field: String,
        /// Error message (e.g., "${`ROUTES_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Read `config_path`, or the nearest `fsroute.toml`, then layer
    /// `cli_settings` on top.
    ///
    /// A command-line `source_dir` is taken as given, not relative to the
    /// config file.
    ///
    /// # Errors
    ///
    /// Fails when `config_path` is missing, the file does not parse, a
    /// `${VAR}` is unset, or the merged values do not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Overwrite resolved values with the flags that were given.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.routes_resolved.source_dir = Some(source_dir.clone());
        }
        if let Some(prefix) = &settings.prefix {
            self.routes_resolved.prefix.clone_from(prefix);
        }
        if let Some(root_module) = &settings.root_module {
            self.routes_resolved.root_module.clone_from(root_module);
        }
        if let Some(debug) = settings.debug {
            self.routes_resolved.debug = debug;
        }
        if let Some(sorted) = settings.sorted {
            self.routes_resolved.sorted = sorted;
        }
    }

    /// Nearest `fsroute.toml` from the working directory upwards.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Parse, expand, resolve and validate one file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // `${VAR}` may produce a relative source_dir
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check that the prefix and root module produce mountable paths and
    /// that the server address is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_routes()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Prefix is `/` or `/segment...` without a trailing slash; root module
    /// is a bare file stem.
    fn validate_routes(&self) -> Result<(), ConfigError> {
        let routes = &self.routes_resolved;

        require_non_empty(&routes.prefix, "routes.prefix")?;
        if !routes.prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "routes.prefix must start with /".to_owned(),
            ));
        }
        if routes.prefix.len() > 1 && routes.prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "routes.prefix cannot end with /".to_owned(),
            ));
        }

        require_non_empty(&routes.root_module, "routes.root_module")?;
        if routes.root_module.contains(['/', '\\', '.']) {
            return Err(ConfigError::Validation(
                "routes.root_module cannot contain path separators or dots".to_owned(),
            ));
        }

        Ok(())
    }

    /// Replace `${VAR}` references in the env-aware fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref source_dir) = self.routes.source_dir {
            self.routes.source_dir = Some(expand::expand_env(source_dir, "routes.source_dir")?);
        }
        if let Some(ref prefix) = self.routes.prefix {
            self.routes.prefix = Some(expand::expand_env(prefix, "routes.prefix")?);
        }

        Ok(())
    }

    /// Fill in discovery defaults and anchor `source_dir` at `config_dir`.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = RoutesConfig::default();
        let raw = &self.routes;

        self.routes_resolved = RoutesConfig {
            source_dir: raw.source_dir.as_deref().map(|dir| config_dir.join(dir)),
            prefix: raw.prefix.clone().unwrap_or(defaults.prefix),
            root_module: raw.root_module.clone().unwrap_or(defaults.root_module),
            debug: raw.debug.unwrap_or(defaults.debug),
            sorted: raw.sorted.unwrap_or(defaults.sorted),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.routes_resolved, RoutesConfig::default());
        assert_eq!(config.routes_resolved.prefix, "/api");
        assert_eq!(config.routes_resolved.root_module, "index");
        assert!(config.routes_resolved.source_dir.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[routes]
source_dir = "handlers"
prefix = "/v1"
root_module = "main"
debug = true
sorted = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.routes_resolved,
            RoutesConfig {
                source_dir: Some(PathBuf::from("/project/handlers")),
                prefix: "/v1".to_owned(),
                root_module: "main".to_owned(),
                debug: true,
                sorted: true,
            }
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("[routes]\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.routes_resolved, RoutesConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[routes]
source_dir = "routes"
prefix = "/apiroot"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.routes_resolved.source_dir,
            Some(temp_dir.path().join("routes"))
        );
        assert_eq!(config.routes_resolved.prefix, "/apiroot");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/fsroute.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("/nonexistent/fsroute.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[routes\nprefix = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates_file_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[routes]\nprefix = \"api\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("routes.prefix"));
    }

    #[test]
    fn test_load_validates_cli_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let overrides = CliSettings {
            root_module: Some("a/b".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(err.to_string().contains("routes.root_module"));
    }

    #[test]
    fn test_cli_source_dir_is_not_anchored_at_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("fsroute.toml");
        std::fs::write(&config_path, "[routes]\nsource_dir = \"routes\"\n").unwrap();

        let cli = CliSettings {
            source_dir: Some(PathBuf::from("handlers")),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&cli)).unwrap();

        assert_eq!(
            config.routes_resolved.source_dir,
            Some(PathBuf::from("handlers"))
        );
    }

    #[test]
    fn test_cli_flags_win_over_routes_table() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("fsroute.toml");
        std::fs::write(
            &config_path,
            r#"
[routes]
prefix = "/api"
root_module = "index"
sorted = false

[server]
port = 8080
"#,
        )
        .unwrap();

        let cli = CliSettings {
            prefix: Some("/v2".to_owned()),
            root_module: Some("main".to_owned()),
            debug: Some(true),
            sorted: Some(true),
            port: Some(9000),
            ..Default::default()
        };
        let config = Config::load(Some(&config_path), Some(&cli)).unwrap();

        assert_eq!(
            config.routes_resolved,
            RoutesConfig {
                source_dir: None,
                prefix: "/v2".to_owned(),
                root_module: "main".to_owned(),
                debug: true,
                sorted: true,
            }
        );
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_no_cli_flags_keep_defaults() {
        let mut config = Config::default();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.routes_resolved, RoutesConfig::default());
    }

    #[test]
    fn test_expand_env_vars_routes() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_FSROUTE_DIR", "handlers");
            std::env::remove_var("TEST_FSROUTE_PREFIX");
        }

        let toml = r#"
[routes]
source_dir = "${TEST_FSROUTE_DIR}"
prefix = "${TEST_FSROUTE_PREFIX:-/v1}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.routes_resolved.source_dir,
            Some(PathBuf::from("/project/handlers"))
        );
        assert_eq!(config.routes_resolved.prefix, "/v1");

        unsafe {
            std::env::remove_var("TEST_FSROUTE_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_FSROUTE_TEST");
        }

        let toml = r#"
[routes]
source_dir = "${MISSING_VAR_FSROUTE_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_FSROUTE_TEST"));
        assert!(err.to_string().contains("routes.source_dir"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default();
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_prefix_requires_leading_slash() {
        let mut config = Config::default();
        config.routes_resolved.prefix = "api".to_owned();
        assert_validation_error(&config, &["routes.prefix", "start with /"]);
    }

    #[test]
    fn test_validate_prefix_trailing_slash() {
        let mut config = Config::default();
        config.routes_resolved.prefix = "/api/".to_owned();
        assert_validation_error(&config, &["routes.prefix", "end with /"]);

        config.routes_resolved.prefix = "/".to_owned();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_root_module() {
        let mut config = Config::default();
        config.routes_resolved.root_module = String::new();
        assert_validation_error(&config, &["routes.root_module", "empty"]);

        config.routes_resolved.root_module = "index.js".to_owned();
        assert_validation_error(&config, &["routes.root_module"]);
    }
}
