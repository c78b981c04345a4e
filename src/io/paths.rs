use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "WT_DATA_DIR";

/// Locate the data directory: explicit override, then `$WT_DATA_DIR`, then
/// `$XDG_DATA_HOME/worktravel`, then `~/.local/share/worktravel`.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    resolve(
        override_dir,
        std::env::var(DATA_DIR_ENV).ok().as_deref(),
        std::env::var("XDG_DATA_HOME").ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn resolve(
    override_dir: Option<&Path>,
    env_dir: Option<&str>,
    xdg_data_home: Option<&str>,
    home: Option<&str>,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    let data_home = match xdg_data_home.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.unwrap_or("/")).join(".local").join("share"),
    };
    data_home.join("worktravel")
}
