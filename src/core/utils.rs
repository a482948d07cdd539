use dirs::home_dir;
use std::{env, fs, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".property_core";
const PROPERTY_DIR: &str = "properties";
const CLIENT_DIR: &str = "clients";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.property_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("PROPERTY_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding one JSON file per property record.
pub fn properties_dir_in(base: &Path) -> PathBuf {
    base.join(PROPERTY_DIR)
}

/// Directory holding one JSON file per client record.
pub fn clients_dir_in(base: &Path) -> PathBuf {
    base.join(CLIENT_DIR)
}

/// Path to the per-user configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
