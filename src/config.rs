use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::Theme;
use crate::store::DEFAULT_TAG;

const DEFAULT_TICK_MS: u64 = 250;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub theme: Option<Theme>,
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TasksConfig {
    pub default_tag: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".tasklist").join("config.toml")
    }

    /// Load config from `path`, or `~/.tasklist/config.toml` when `None`.
    /// Returns default config if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load_from(&Self::default_path()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(tag) = &self.tasks.default_tag {
            if tag.trim().is_empty() {
                bail!(
                    "failed to parse {}: tasks.default_tag must not be empty",
                    path.display()
                );
            }
        }
        if self.ui.tick_ms == Some(0) {
            bail!(
                "failed to parse {}: ui.tick_ms must be positive",
                path.display()
            );
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.ui.theme.unwrap_or_default()
    }

    pub fn tick_ms(&self) -> u64 {
        self.ui.tick_ms.unwrap_or(DEFAULT_TICK_MS)
    }

    pub fn default_tag(&self) -> &str {
        self.tasks
            .default_tag
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_TAG)
    }
}
