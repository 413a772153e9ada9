use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name used when the caller does not configure one.
pub const DEFAULT_FILE_NAME: &str = "app-settings.json";

/// Per-user data directory for the given application identity.
pub fn app_data_dir(qualifier: &str, organization: &str, application: &str) -> Result<PathBuf> {
    let dirs = ProjectDirs::from(qualifier, organization, application)
        .ok_or_else(|| anyhow!("cannot determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Settings file path: the data directory with the configured or default
/// file name joined at the end.
pub fn settings_file_path(data_dir: &Path, file_name: Option<&str>) -> PathBuf {
    data_dir.join(file_name.unwrap_or(DEFAULT_FILE_NAME))
}
