//! Paths inside the Zellij plugin sandbox.
//!
//! Zellij mounts the host filesystem under `/host`, which points at the cwd of
//! the last focused terminal (usually the user's home directory).

use std::path::PathBuf;

/// Directory holding `preferences.json` and the trace file.
///
/// Resolves to `/host/.local/share/zellij/bookshelf`, i.e. normally
/// `~/.local/share/zellij/bookshelf` on the host.
///
/// ```
/// use bookshelf::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/bookshelf"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookshelf")
}

/// Maps a `~`-prefixed path from plugin configuration onto the sandbox mount.
///
/// ```
/// use bookshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/bookshelf.toml"), "/etc/bookshelf.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
