//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::models::{FieldLimits, DEFAULT_KIND_MAX_LEN, DEFAULT_NAME_MAX_LEN};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "backpack";
/// Prefix for environment overrides, e.g. `BACKPACK_NAME_MAX_LEN`.
pub const ENV_PREFIX: &str = "BACKPACK";

/// Runtime settings. Every field has a built-in default.
///
/// Backpack capacity is not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Visible characters kept for names.
    pub name_max_len: usize,
    /// Visible characters kept for type labels.
    pub kind_max_len: usize,
    /// Directory receiving `backpack.log`.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name_max_len: DEFAULT_NAME_MAX_LEN,
            kind_max_len: DEFAULT_KIND_MAX_LEN,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load from an optional file plus the environment. A missing file is ignored.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("name_max_len", defaults.name_max_len as u64)?
            .set_default("kind_max_len", defaults.kind_max_len as u64)?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?;

        if let Some(path) = path {
            debug!(path = %path.display(), "reading configuration file");
            builder = builder.add_source(File::from(path).required(false));
        }

        let config: Self = builder
            .add_source(env.try_parsing(true))
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Width limits applied to user input.
    pub fn field_limits(&self) -> FieldLimits {
        FieldLimits {
            name: self.name_max_len,
            kind: self.kind_max_len,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name_max_len == 0 {
            bail!("name_max_len must be at least 1");
        }
        if self.kind_max_len == 0 {
            bail!("kind_max_len must be at least 1");
        }
        Ok(())
    }
}

/// `<config_dir>/backpack/config.toml`, when a config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
}
