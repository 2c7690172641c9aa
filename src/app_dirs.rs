use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "wordsearch")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("wordsearch_config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("wordsearch");
            Some(state_dir.join("wordsearch.log"))
        } else {
            ProjectDirs::from("", "", "wordsearch")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("wordsearch.log"))
        }
    }
}
