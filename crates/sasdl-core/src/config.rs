use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::FetchError;

/// Environment variable naming the local mirror of the archive; overrides `data_root`.
pub const DATA_ROOT_ENV: &str = "SDSS_LOCAL_SAS_MIRROR";

pub const DEFAULT_BASE_URL: &str = "https://data.sdss.org/sas";

/// Global configuration loaded from `~/.config/sasdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SasdlConfig {
    /// Root of the local archive mirror. `SDSS_LOCAL_SAS_MIRROR` takes precedence.
    #[serde(default)]
    pub data_root: Option<PathBuf>,
    /// Remote archive root; catalog paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Data release used when a request does not name one.
    #[serde(default = "default_release")]
    pub default_release: u32,
    /// How many times a corrupt file is downloaded again before giving up.
    #[serde(default = "default_max_refetches")]
    pub max_refetches: u32,
    /// Optional connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_release() -> u32 {
    17
}

fn default_max_refetches() -> u32 {
    1
}

impl Default for SasdlConfig {
    fn default() -> Self {
        Self {
            data_root: None,
            base_url: default_base_url(),
            default_release: default_release(),
            max_refetches: default_max_refetches(),
            connect_timeout_secs: None,
        }
    }
}

impl SasdlConfig {
    /// Local mirror root: `SDSS_LOCAL_SAS_MIRROR` if set and non-empty, else `data_root`.
    pub fn resolve_data_root(&self) -> Result<PathBuf, FetchError> {
        let env = std::env::var_os(DATA_ROOT_ENV).filter(|v| !v.is_empty());
        self.data_root_with(env.map(PathBuf::from))
    }

    fn data_root_with(&self, env: Option<PathBuf>) -> Result<PathBuf, FetchError> {
        env.or_else(|| self.data_root.clone())
            .ok_or(FetchError::MissingDataRoot)
    }

    /// `release` if given, else the configured default (logged, since callers
    /// usually want to pin it).
    pub fn release_or_default(&self, release: Option<u32>) -> u32 {
        match release {
            Some(r) => r,
            None => {
                tracing::info!("no data release given, using DR{}", self.default_release);
                self.default_release
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sasdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SasdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SasdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SasdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SasdlConfig::default();
        assert!(cfg.data_root.is_none());
        assert_eq!(cfg.base_url, "https://data.sdss.org/sas");
        assert_eq!(cfg.default_release, 17);
        assert_eq!(cfg.max_refetches, 1);
        assert!(cfg.connect_timeout_secs.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = SasdlConfig::default();
        cfg.data_root = Some(PathBuf::from("/data/sas"));
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SasdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.data_root, cfg.data_root);
        assert_eq!(parsed.base_url, cfg.base_url);
        assert_eq!(parsed.default_release, cfg.default_release);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            data_root = "/mnt/sas"
            connect_timeout_secs = 20
        "#;
        let cfg: SasdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.data_root.as_deref(), Some(std::path::Path::new("/mnt/sas")));
        assert_eq!(cfg.connect_timeout_secs, Some(20));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.max_refetches, 1);
    }

    #[test]
    fn env_overrides_data_root() {
        let mut cfg = SasdlConfig::default();
        cfg.data_root = Some(PathBuf::from("/from/config"));
        assert_eq!(
            cfg.data_root_with(Some(PathBuf::from("/from/env"))).unwrap(),
            PathBuf::from("/from/env")
        );
        assert_eq!(cfg.data_root_with(None).unwrap(), PathBuf::from("/from/config"));
    }

    #[test]
    fn missing_data_root_is_an_error() {
        let cfg = SasdlConfig::default();
        assert!(matches!(cfg.data_root_with(None), Err(FetchError::MissingDataRoot)));
    }

    #[test]
    fn explicit_release_wins() {
        let cfg = SasdlConfig::default();
        assert_eq!(cfg.release_or_default(Some(16)), 16);
        assert_eq!(cfg.release_or_default(None), 17);
    }
}
