use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "termtype";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("termtype_config.json"))
    }

    /// Root holding one sub-directory of `.txt` files per category
    pub fn templates_dir() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_dir().join("templates"))
            .unwrap_or_else(|| PathBuf::from("templates"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("termtype.log");
        }
        Self::project()
            .map(|pd| pd.data_local_dir().join("termtype.log"))
            .unwrap_or_else(|| PathBuf::from("termtype.log"))
    }
}
