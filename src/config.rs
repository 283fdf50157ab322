use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::affordance::ToggleLabels;
use crate::label::DEFAULT_PLACEHOLDER_LABEL;

const CONFIG_DIR_NAME: &str = ".hunkdiff";
const CONFIG_FILE_NAME: &str = "thread_header.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub placeholder_label: String,
    pub collapse_label: String,
    pub delete_label: String,
    pub head_height: Option<f32>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            placeholder_label: DEFAULT_PLACEHOLDER_LABEL.to_string(),
            collapse_label: "Collapse".to_string(),
            delete_label: "Delete".to_string(),
            head_height: None,
        }
    }
}

impl HeaderConfig {
    pub fn toggle_labels(&self) -> ToggleLabels {
        ToggleLabels {
            collapse: self.collapse_label.clone(),
            delete: self.delete_label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new() -> Result<Self> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow!("failed to resolve home directory"))?;
        Ok(Self::from_path(
            home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        ))
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_or_default(&self) -> Result<HeaderConfig> {
        if !self.path.exists() {
            return Ok(HeaderConfig::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read config file at {}", self.path.display()))?;
        toml::from_str::<HeaderConfig>(&raw).with_context(|| {
            format!(
                "failed to parse TOML config file at {}",
                self.path.display()
            )
        })
    }

    pub fn save(&self, config: &HeaderConfig) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| anyhow!("config path has no parent: {}", self.path.display()))?;

        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;

        let contents =
            toml::to_string_pretty(config).context("failed to serialize header config to TOML")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("failed to write config file at {}", self.path.display()))?;
        Ok(())
    }
}
