//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/app/static/css/  ← start
/// /home/user/app/assetmark.toml ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Whether `base` is usable as a url rewrite base.
///
/// Accepts a virtual directory (`/`, `/app/`) or an absolute http(s) url,
/// either way ending with `/`.
pub fn is_valid_base(base: &str) -> bool {
    if base.is_empty() {
        return true;
    }
    if !base.ends_with('/') {
        return false;
    }
    if base.starts_with('/') {
        return !base.starts_with("//");
    }
    url::Url::parse(base).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("static/css");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("assetmark.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("assetmark.toml")).unwrap();
        assert_eq!(found, dir.path().join("assetmark.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(dir.path(), Path::new("no-such-config-file.toml")).is_none());
    }

    #[test]
    fn test_is_valid_base() {
        assert!(is_valid_base(""));
        assert!(is_valid_base("/"));
        assert!(is_valid_base("/app/"));
        assert!(is_valid_base("https://cdn.example.com/"));
        assert!(is_valid_base("http://localhost:8080/static/"));

        assert!(!is_valid_base("/app"));
        assert!(!is_valid_base("//cdn.example.com/"));
        assert!(!is_valid_base("ftp://cdn.example.com/"));
        assert!(!is_valid_base("not a url/"));
    }
}
