//! Runtime configuration.
//!
//! Resolution chain: CLI flag > env var > config file > default. The config
//! file is optional TOML at `$XDG_CONFIG_HOME/mealplan_gen/config.toml` or
//! `~/.config/mealplan_gen/config.toml`.

use anyhow::{anyhow, Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub api_base: String,
    pub model: String,
    /// Never written back to disk; normally comes from the environment.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub reveal_delay_ms: u64,
    pub save_transcript: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            api_base: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-2.0-flash".into(),
            api_key: None,
            timeout_secs: 120,
            reveal_delay_ms: 1500,
            save_transcript: false,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("{API_KEY_ENV} env var is not set and no api_key in config"))
    }

    /// Parse a config file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Build the effective config for a run.
    ///
    /// An explicit `--config` path must exist; the default path is optional.
    pub fn resolve(args: &Args, env_key: Option<String>) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(p) => Self::from_file(Path::new(p))?,
            None => {
                let p = default_path();
                if p.is_file() {
                    Self::from_file(&p)?
                } else {
                    Self::default()
                }
            }
        };

        if env_key.is_some() {
            cfg.api_key = env_key;
        }

        if let Some(root) = &args.root {
            cfg.root = root.clone();
        }
        if let Some(base) = &args.api_base {
            cfg.api_base = base.clone();
        }
        if let Some(model) = &args.model {
            cfg.model = model.clone();
        }
        if let Some(t) = args.timeout_secs {
            cfg.timeout_secs = t;
        }
        if let Some(d) = args.reveal_delay_ms {
            cfg.reveal_delay_ms = d;
        }
        if args.save_transcript {
            cfg.save_transcript = true;
        }
        Ok(cfg)
    }
}

pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("mealplan_gen");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mealplan_gen")
}

pub fn default_path() -> PathBuf {
    config_dir().join("config.toml")
}
