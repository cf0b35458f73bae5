//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use footprint::{FootprintError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for FootprintError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(message) => FootprintError::Config(message),
            other => FootprintError::Io(std::io::Error::other(other.to_string())),
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (footprint/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are unusable (e.g. a non-positive epsilon)
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, FootprintError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("footprint/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "footprint", "footprint") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, FootprintError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    debug!(config:?; "Configuration loaded");
    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config
        .validate()
        .map_err(|err| ConfigError::Validation(err.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use footprint::projection::ProjectionKind;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [document]
            closed_paths_only = false

            [conflation]
            epsilon = 0.1

            [projection]
            kind = "identity"

            [change_set]
            label = "Import cadastre"
            "#,
        )
        .unwrap();

        assert!(!config.document().closed_paths_only());
        assert_eq!(config.conflation().epsilon(), 0.1);
        assert_eq!(config.projection().kind(), ProjectionKind::Identity);
        assert_eq!(config.change_set().label(), "Import cadastre");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[conflation]\n").unwrap();
        assert_eq!(config.conflation().epsilon(), 0.05);
        assert!(config.document().closed_paths_only());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[projection]\nkind = \"mercator\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_non_positive_epsilon_fails_validation() {
        let err = parse_config("[conflation]\nepsilon = -0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[change_set]\nlabel = \"From file\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.change_set().label(), "From file");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("/nonexistent/footprint.toml")).unwrap_err();
        assert!(matches!(err, FootprintError::Io(_)));
    }
}
