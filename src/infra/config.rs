use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "ctrprune.toml";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_RUNTIME_BINARY: &str = "nerdctl";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/ctrprune")
}

/// Expands `~` and `$VARS` in a user-supplied config directory
pub fn expand_config_dir(raw: &Path) -> Result<PathBuf> {
    let raw = raw.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("expandindo caminho de config {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub namespace: Option<String>,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(ns) = other.namespace {
            self.namespace = Some(ns);
        }
        if let Some(bin) = other.runtime.binary {
            self.runtime.binary = Some(bin);
        }
    }

    /// Fills in defaults and validates the merged result
    pub fn resolve(self) -> Result<Settings> {
        let namespace = self
            .namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        if namespace.trim().is_empty() {
            bail!("namespace vazio");
        }

        let runtime_binary = self
            .runtime
            .binary
            .unwrap_or_else(|| DEFAULT_RUNTIME_BINARY.to_string());
        if runtime_binary.trim().is_empty() {
            bail!("binário do runtime vazio");
        }

        Ok(Settings {
            namespace,
            runtime_binary,
        })
    }
}

/// Fully resolved settings handed to the commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub namespace: String,
    pub runtime_binary: String,
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Loads `ctrprune.toml` from the config dir; a missing file yields the defaults
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    let path = config_path(config_dir);

    if !path.exists() {
        debug!("Nenhum {:?} encontrado, usando padrões", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("lendo {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("parse de {:?}", path))
}

/// Layers defaults, the config file and command-line overrides, in that order
pub fn load_settings(config_dir: &Path, overrides: AppConfig) -> Result<Settings> {
    let mut config = load_app_config(config_dir)?;
    config.merge(overrides);
    config.resolve()
}
