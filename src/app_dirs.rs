use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "kaiwa")
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("KAIWA_CONFIG") {
            return Some(PathBuf::from(path));
        }
        Self::project().map(|pd| pd.config_dir().join("config.json"))
    }

    /// Directory scanned for user-supplied topic files.
    pub fn topics_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("KAIWA_TOPICS_DIR") {
            return Some(PathBuf::from(dir));
        }
        Self::project().map(|pd| pd.data_dir().join("topics"))
    }
}
