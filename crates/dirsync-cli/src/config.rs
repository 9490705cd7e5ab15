//! Optional TOML config file providing option defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dirsync_core::SyncOptions;
use serde::{Deserialize, Serialize};

use crate::cli::SyncFlags;

/// Defaults read from the `[options]` table. Unset keys leave the option off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionDefaults {
    pub verbose: Option<bool>,
    pub purge: Option<bool>,
    pub force_copy: Option<bool>,
    pub use_content: Option<bool>,
    pub two_way: Option<bool>,
    pub hash_verify: Option<bool>,
    pub strict_types: Option<bool>,
}

/// Parsed config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub options: OptionDefaults,
}

/// Config file contents together with where they came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub path: Option<PathBuf>,
    pub config: FileConfig,
}

impl LoadedConfig {
    /// Load the config named on the command line, or the global one if present
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, or a file cannot be
    /// read or parsed.
    pub fn load(cli_path: Option<&Path>, no_config: bool) -> anyhow::Result<Self> {
        if no_config {
            return Ok(Self::default());
        }

        let path = match cli_path {
            Some(path) => {
                anyhow::ensure!(path.is_file(), "Config file not found: {}", path.display());
                Some(path.to_path_buf())
            }
            None => Self::find_global_config(),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = FileConfig::parse(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(Self {
            path: Some(path),
            config,
        })
    }

    /// Find global config in the platform config directory
    fn find_global_config() -> Option<PathBuf> {
        let candidate = dirs::config_dir()?.join("dirsync").join("config.toml");
        candidate.is_file().then_some(candidate)
    }
}

impl FileConfig {
    /// Parse TOML text
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or unknown keys.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Options from file defaults only
    #[must_use]
    pub fn defaults(&self) -> SyncOptions {
        self.resolve(&SyncFlags::default())
    }

    /// Combine command-line flags with file defaults
    #[must_use]
    pub fn resolve(&self, flags: &SyncFlags) -> SyncOptions {
        let file = &self.options;
        let pick = |flag: bool, default: Option<bool>| flag || default.unwrap_or(false);

        SyncOptions::new()
            .with_verbose(pick(flags.verbose, file.verbose))
            .with_purge(pick(flags.purge, file.purge))
            .with_force_copy(pick(flags.force_copy, file.force_copy))
            .with_use_content(pick(flags.use_content, file.use_content))
            .with_two_way(pick(flags.two_way, file.two_way))
            .with_hash_verify(pick(flags.hash_verify, file.hash_verify))
            .with_strict_types(pick(flags.strict_types, file.strict_types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_options_table() {
        let config = FileConfig::parse(
            r"
[options]
purge = true
hash_verify = true
",
        )
        .unwrap();

        assert_eq!(config.options.purge, Some(true));
        assert_eq!(config.options.hash_verify, Some(true));
        assert_eq!(config.options.two_way, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("[options]\npruge = true\n").is_err());
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_flags_override_file_defaults() {
        let config = FileConfig::parse("[options]\nuse_content = true\n").unwrap();
        let flags = SyncFlags {
            purge: true,
            ..SyncFlags::default()
        };

        let options = config.resolve(&flags);
        assert!(options.purge);
        assert!(options.use_content);
        assert!(!options.verbose);
        assert!(!options.two_way);
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dirsync.toml");
        fs::write(&path, "[options]\ntwo_way = true\n").unwrap();

        let loaded = LoadedConfig::load(Some(&path), false).unwrap();
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert!(loaded.config.defaults().two_way);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let tmp = TempDir::new().unwrap();
        let result = LoadedConfig::load(Some(&tmp.path().join("absent.toml")), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_config_skips_loading() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        fs::write(&path, "not = [valid").unwrap();

        let loaded = LoadedConfig::load(Some(&path), true).unwrap();
        assert!(loaded.path.is_none());
        assert_eq!(loaded.config, FileConfig::default());
    }
}
