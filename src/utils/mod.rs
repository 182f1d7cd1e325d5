//! Utility functions for Kubetalk

use crate::config::OutputFormat;
use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", path));
    }
    Ok(())
}

/// Get the XDG config directory for Kubetalk
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("kubetalk");

    Ok(config_dir)
}

/// Expand `~` and environment variables in a path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow!("Path is not valid UTF-8: {:?}", path))?;
    let expanded = shellexpand::full(raw)
        .map_err(|e| anyhow!("Failed to expand path {:?}: {}", raw, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Convert a string to a valid filename
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name for a CRD manifest, e.g. `kubetalk.io_kubetalks.yaml`
pub fn crd_file_name(group: &str, plural: &str, format: OutputFormat) -> String {
    sanitize_filename(&format!("{}_{}.{}", group, plural, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test.yaml"), "test.yaml");
        assert_eq!(sanitize_filename("test file.yaml"), "test_file.yaml");
        assert_eq!(sanitize_filename("kubetalk.io/v1alpha1"), "kubetalk.io_v1alpha1");
    }

    #[test]
    fn test_crd_file_name() {
        assert_eq!(
            crd_file_name("kubetalk.io", "kubetalks", OutputFormat::Yaml),
            "kubetalk.io_kubetalks.yaml"
        );
        assert_eq!(
            crd_file_name("kubetalk.io", "kubetalks", OutputFormat::Json),
            "kubetalk.io_kubetalks.json"
        );
    }

    #[test]
    fn test_expand_path() {
        let plain = expand_path(Path::new("config/crd")).unwrap();
        assert_eq!(plain, PathBuf::from("config/crd"));

        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path(Path::new("~/manifests")).unwrap();
            assert_eq!(expanded, home.join("manifests"));
        }
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b");

        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());

        let file = temp_dir.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());
    }
}
