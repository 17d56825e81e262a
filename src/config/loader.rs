//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SubrouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SubrouterConfig, ConfigError> {
    let config: SubrouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SubrouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("subrouter-loader-{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
            [[routes]]
            path_prefix = "/fuga"
            subdomain = "fuga"
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.routes.len(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = parse_config(include_str!("../../subrouter.toml")).unwrap();
        assert_eq!(config.routes.len(), 3);
        assert!(config.i18n.enabled);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/subrouter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("routes = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config(
            r#"
            [[routes]]
            path_prefix = "/a"

            [[routes]]
            path_prefix = "/a"
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation failed: duplicate route path prefix /a, duplicate route subdomain default"
        );
    }
}
