//! Generic TOML configuration parsing with file path context in errors.

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML file into any deserializable type.
///
/// ```rust,no_run
/// use artifact_pipeline::config::{GlobalConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: GlobalConfig = parse_config(Path::new("config.toml"))?;
/// println!("{} remote repositories", config.repositories.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails with "Failed to read config file: <path>" or "Failed to parse config
/// file: <path>", with the I/O or TOML error preserved as the cause.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobalConfig;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
local_repository = "/srv/repo"

[[repositories]]
id = "mirror"
url = "file:///srv/mirror"
"#,
        )
        .unwrap();

        let config: GlobalConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.local_repository.as_deref(), Some("/srv/repo"));
        assert_eq!(config.repositories[0].id, "mirror");
    }

    #[test]
    fn test_parse_config_error() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid = toml {").unwrap();

        let error = parse_config::<GlobalConfig>(&config_path).unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse config file"));
        assert!(error.chain().any(|cause| cause.downcast_ref::<toml::de::Error>().is_some()));
    }

    #[test]
    fn test_parse_config_missing_file() {
        let temp = tempdir().unwrap();
        let error = parse_config::<GlobalConfig>(&temp.path().join("absent.toml")).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read config file"));
    }
}
