use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::normalize::FieldPolicy;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub fields: Option<FieldsConfig>,
}

/// `[fields]` table of config.toml: overrides for the custom-field policy.
#[derive(Debug, Deserialize, Default)]
pub struct FieldsConfig {
    pub platform_prefixes: Option<Vec<String>>,
    pub custom_allowlist: Option<Vec<String>>,
}

impl AppConfig {
    pub fn field_policy(&self) -> FieldPolicy {
        let mut policy = FieldPolicy::default();
        if let Some(fields) = &self.fields {
            if let Some(prefixes) = &fields.platform_prefixes {
                policy.platform_prefixes = prefixes.clone();
            }
            if fields.custom_allowlist.is_some() {
                policy.custom_allowlist = fields.custom_allowlist.clone();
            }
        }
        policy
    }
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".adonorm")
        .join("config.toml")
}

/// Load config from the default location; a missing file yields defaults.
pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_config_from(&path)
}

/// Load config from an explicit path. Unlike [`load_config`], the file must
/// exist — an explicitly named config that is absent is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_uses_default_policy() {
        let config = AppConfig::default();
        assert_eq!(config.field_policy(), FieldPolicy::default());
    }

    #[test]
    fn config_overrides_prefixes_and_allowlist() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[fields]\nplatform_prefixes = [\"System.\"]\ncustom_allowlist = [\"Acme.Severity\"]"
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        let policy = config.field_policy();
        assert_eq!(policy.platform_prefixes, vec!["System.".to_string()]);
        assert_eq!(
            policy.custom_allowlist,
            Some(vec!["Acme.Severity".to_string()])
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fields\nplatform_prefixes = 3").unwrap();
        let result = load_config_from(file.path());
        assert!(result.unwrap_err().to_string().contains("config.toml"));
    }
}
