use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::category::Category;
use crate::error::Result;

pub const DEFAULT_TEMPLATE_COUNT: usize = 2;
pub const MIN_TERMINAL_WIDTH: u16 = 80;
pub const MIN_TERMINAL_HEIGHT: u16 = 24;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// templates drawn per session
    pub template_count: usize,
    pub default_category: Option<Category>,
    pub templates_dir: Option<PathBuf>,
    pub min_width: u16,
    pub min_height: u16,
    pub install_samples: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_count: DEFAULT_TEMPLATE_COUNT,
            default_category: None,
            templates_dir: None,
            min_width: MIN_TERMINAL_WIDTH,
            min_height: MIN_TERMINAL_HEIGHT,
            install_samples: true,
        }
    }
}

impl Config {
    pub fn templates_root(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(AppDirs::templates_dir)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
    fn exists(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files fall back to defaults
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
