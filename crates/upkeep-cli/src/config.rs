use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub(crate) const CONFIG_FILE_NAME: &str = "upkeep.toml";
pub(crate) const DEFAULT_LEDGER_FILE: &str = "updates.json";
pub(crate) const DEFAULT_WP_BINARY: &str = "wp";
pub(crate) const WP_BIN_ENV_VAR: &str = "UPKEEP_WP_BIN";

/// Optional per-directory defaults; explicit flags always win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CliConfig {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub wp_bin: Option<String>,
}

pub(crate) fn load_config(dir: &Path) -> Result<CliConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CliConfig::default())
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed reading config: {}", path.display()))
        }
    };

    toml::from_str(&raw).with_context(|| format!("failed parsing config: {}", path.display()))
}

pub(crate) fn resolve_ledger_file(flag: Option<String>, config: &CliConfig) -> String {
    flag.or_else(|| config.file.clone())
        .unwrap_or_else(|| DEFAULT_LEDGER_FILE.to_string())
}

pub(crate) fn resolve_alias(flag: Option<String>, config: &CliConfig) -> Option<String> {
    flag.or_else(|| config.alias.clone())
}

pub(crate) fn resolve_wp_binary(env_override: Option<&str>, config: &CliConfig) -> String {
    if let Some(binary) = env_override {
        let trimmed = binary.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    config
        .wp_bin
        .clone()
        .unwrap_or_else(|| DEFAULT_WP_BINARY.to_string())
}
