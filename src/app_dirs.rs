use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "breathe").map(|pd| pd.config_dir().join("config.json"))
    }

    /// The TUI owns stdout, so logs go to a file under the state directory.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("breathe");
            Some(state_dir.join("breathe.log"))
        } else {
            ProjectDirs::from("", "", "breathe")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("breathe.log"))
        }
    }
}
