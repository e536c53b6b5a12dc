use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::setup::{Configuration, QuestionCount, TablesMax, DEFAULT_TABLES};

/// Starting values for the setup screen, read from disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tables_max: u8,
    pub question_count: QuestionCount,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables_max: DEFAULT_TABLES,
            question_count: QuestionCount::default(),
        }
    }
}

impl From<&Config> for Configuration {
    fn from(cfg: &Config) -> Self {
        Self {
            tables_max: TablesMax::clamped(cfg.tables_max),
            question_count: cfg.question_count,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "multab") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("multab_config.json")
        };
        Self { path }
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
    /// Missing or malformed files fall back to defaults.
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config")
                }
            }
        }
        Config::default()
    }
}
