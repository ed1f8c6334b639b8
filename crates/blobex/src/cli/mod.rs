//! Command implementations.

pub mod config;
pub mod export;

use anyhow::Context;
use blobex_core::Config;
use std::path::Path;

/// Load the config from `path` if given, else from the default location.
///
/// An explicit path must exist; a missing default file means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().with_context(|| {
            format!(
                "Failed to load config from {}",
                Config::default_path().display()
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("absent.toml"));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blobex.toml");
        std::fs::write(&path, "[output]\ndirectory = \"dump\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.directory, std::path::PathBuf::from("dump"));
    }
}
