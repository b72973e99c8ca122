//! Where the registry file lives
//!
//! Resolved in order: an explicit path (the CLI `--registry` flag), the
//! `AUTHORS_REGISTRY` environment variable, the `registry` key of
//! `<config dir>/authors/config.toml`, and finally
//! `<data dir>/authors/all_known_authors.yml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::store::RegistryStore;

pub const REGISTRY_ENV_VAR: &str = "AUTHORS_REGISTRY";
pub const REGISTRY_FILE_NAME: &str = "all_known_authors.yml";
const APP_DIR: &str = "authors";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    registry: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorsConfig {
    pub registry_path: PathBuf,
}

impl AuthorsConfig {
    /// Resolve the configuration, reading the user config file if it exists
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let config_file = default_config_path();
        Self::resolve_with(explicit, env::var_os(REGISTRY_ENV_VAR).map(PathBuf::from), config_file.as_deref())
    }

    /// Resolution with every input supplied by the caller
    pub fn resolve_with(
        explicit: Option<&Path>,
        from_env: Option<PathBuf>,
        config_file: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::with_registry(path));
        }
        if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
            tracing::debug!(path = %path.display(), "registry path from AUTHORS_REGISTRY");
            return Ok(Self::with_registry(path));
        }
        if let Some(file) = config_file.filter(|f| f.is_file()) {
            let parsed: ConfigFile = toml::from_str(&fs::read_to_string(file)?)?;
            if let Some(path) = parsed.registry {
                tracing::debug!(config = %file.display(), path = %path.display(), "registry path from config file");
                return Ok(Self::with_registry(path));
            }
        }
        Ok(Self::with_registry(default_registry_path()))
    }

    pub fn with_registry(path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: path.into(),
        }
    }

    pub fn store(&self) -> RegistryStore {
        RegistryStore::new(&self.registry_path)
    }
}

/// `<config dir>/authors/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// `<data dir>/authors/all_known_authors.yml`, falling back to the current directory
pub fn default_registry_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join(REGISTRY_FILE_NAME)
}
