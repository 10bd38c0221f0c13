use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};

const UBIO_CONFIG_DIR: &str = "ubio";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_REASON: &str = "Login with Fingerprint";

/// What an attempt resolves to when the device can't do biometrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnavailablePolicy {
    /// Report `Unsupported` and leave the login flag alone.
    #[default]
    Unsupported,
    /// Skip authentication and treat the attempt as a success.
    Grant,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub reason: String,
    pub on_unavailable: UnavailablePolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            reason: DEFAULT_REASON.to_string(),
            on_unavailable: UnavailablePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// external verifier, looked up on PATH when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// preferences file, defaults to the user's data dir
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UbioConfig {
    pub auth: AuthConfig,
    pub helper: HelperConfig,
    pub store: StoreConfig,
}

impl UbioConfig {
    pub fn from_file<P>(file_path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file_data = fs::read_to_string(file_path)?;

        let config = toml::from_str(&file_data)?;

        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(Error::ConfigDirNotFound)?;
        Ok(config_dir.join(UBIO_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load an explicit file, or the default one when it exists.
    pub fn load(file_path: Option<&Path>) -> Result<Self> {
        if let Some(file_path) = file_path {
            info!("loading {}", file_path.display());
            return Self::from_file(file_path);
        }

        let default_path = Self::default_path()?;

        if default_path.exists() {
            info!("loading {}", default_path.display());
            Self::from_file(default_path)
        } else {
            info!("{} not found, using defaults", default_path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = UbioConfig::default();
        assert_eq!(config.auth.reason, "Login with Fingerprint");
        assert_eq!(config.auth.on_unavailable, UnavailablePolicy::Unsupported);
        assert!(config.helper.path.is_none());
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_partial_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(
            &path,
            r#"
[auth]
on_unavailable = "grant"

[helper]
path = "/usr/local/bin/fp-verify"
"#,
        )?;

        let config = UbioConfig::load(Some(&path))?;
        assert_eq!(config.auth.on_unavailable, UnavailablePolicy::Grant);
        assert_eq!(config.auth.reason, "Login with Fingerprint");
        assert_eq!(config.helper.path, Some(PathBuf::from("/usr/local/bin/fp-verify")));

        Ok(())
    }

    #[test]
    fn test_bad_policy() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[auth]\non_unavailable = \"maybe\"\n")?;

        assert!(matches!(UbioConfig::from_file(&path), Err(Error::ConfigParse(_))));

        Ok(())
    }

    #[test]
    fn test_missing_explicit_file() {
        let ret = UbioConfig::load(Some(Path::new("/nonexistent/ubio/config.toml")));
        assert!(matches!(ret, Err(Error::Io(_))));
    }
}
