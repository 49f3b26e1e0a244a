//! Path helpers for the Murmur data directory.

use std::path::PathBuf;

/// Get the Murmur data directory (e.g. `~/.murmur/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".murmur")
}

/// Get the REPL history directory (e.g. `~/.murmur/history/`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history")
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_ends_with_murmur() {
        let path = get_data_path();
        assert!(path.ends_with(".murmur"));
    }

    #[test]
    fn test_history_path() {
        let path = get_history_path();
        assert!(path.ends_with("history"));
        assert!(path.parent().unwrap().ends_with(".murmur"));
    }
}
