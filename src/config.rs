//! # Configuration
//!
//! This module defines the optional `.gits.yaml` file that can sit in the
//! scanned root directory, and the logic for loading it.
//!
//! Configuration is layered:
//!
//! 1.  Built-in defaults from [`crate::defaults`].
//! 2.  The `.gits.yaml` file in the root directory, when present.
//! 3.  Command-line flags and environment variables, applied by the CLI
//!     through [`Config::apply_overrides`].
//!
//! ## Example
//!
//! ```yaml
//! remote: upstream
//! develop_branch: develop
//! main_branch: main
//! jobs: 8
//! ignore:
//!   - "archive-*"
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that typos do not
//! silently fall back to defaults.

use crate::defaults;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const KNOWN_KEYS_HINT: &str =
    "supported keys are: remote, develop_branch, main_branch, jobs, ignore";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote whose tracking branches are compared with local branches.
    pub remote: String,
    /// Integration branch; its presence on the remote selects the two-branch
    /// workflow.
    pub develop_branch: String,
    /// Stable branch of the single-branch workflow.
    pub main_branch: String,
    /// Maximum number of repositories processed at the same time.
    ///
    /// `None` runs one worker per repository.
    pub jobs: Option<usize>,
    /// Glob patterns matched against directory names to exclude them from
    /// the scan.
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: defaults::DEFAULT_REMOTE.to_string(),
            develop_branch: defaults::DEFAULT_DEVELOP_BRANCH.to_string(),
            main_branch: defaults::DEFAULT_MAIN_BRANCH.to_string(),
            jobs: None,
            ignore: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the configuration for a root directory.
    ///
    /// Returns the defaults when `root` has no `.gits.yaml`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(defaults::CONFIG_FILENAME);
        if !path.is_file() {
            log::debug!("No {} in {}", defaults::CONFIG_FILENAME, root.display());
            return Ok(Self::default());
        }
        log::info!("Loading configuration from {}", path.display());
        from_file(&path)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_overrides(mut self, remote: Option<String>, jobs: Option<usize>) -> Result<Self> {
        if let Some(remote) = remote {
            self.remote = remote;
        }
        if jobs.is_some() {
            self.jobs = jobs;
        }
        self.validate()?;
        Ok(self)
    }

    /// Compiles the `ignore` patterns.
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.ignore
            .iter()
            .map(|pattern| glob::Pattern::new(pattern).map_err(Error::from))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(Error::ConfigParse {
                message: "jobs must be at least 1".to_string(),
                hint: Some("remove `jobs` to run one worker per repository".to_string()),
            });
        }
        for (key, value) in [
            ("remote", &self.remote),
            ("develop_branch", &self.develop_branch),
            ("main_branch", &self.main_branch),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: format!("{} must not be empty", key),
                    hint: None,
                });
            }
        }
        Ok(())
    }
}

/// Parses a YAML string into a `Config`.
///
/// An empty document (or one holding only comments) yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content).map_err(Error::Yaml)?;
    if value.is_null() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_value(value).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(KNOWN_KEYS_HINT.to_string()),
    })?;
    config.validate()?;
    config.ignore_patterns()?;
    Ok(config)
}

/// Reads and parses a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
remote: upstream
develop_branch: dev
main_branch: main
jobs: 4
ignore:
  - "archive-*"
  - scratch
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.develop_branch, "dev");
        assert_eq!(config.main_branch, "main");
        assert_eq!(config.jobs, Some(4));
        assert_eq!(config.ignore, vec!["archive-*", "scratch"]);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse("remote: upstream\n").unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.develop_branch, "develop");
        assert_eq!(config.main_branch, "master");
        assert_eq!(config.jobs, None);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_parse_empty_and_comment_only() {
        assert_eq!(parse("").unwrap(), Config::default());
        assert_eq!(parse("# nothing here\n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_unknown_key_has_hint() {
        let err = parse("remotes: upstream\n").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Configuration error"));
        assert!(display.contains("hint: supported keys are"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse("remote: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_parse_rejects_zero_jobs() {
        let err = parse("jobs: 0\n").unwrap_err();
        assert!(err.to_string().contains("jobs must be at least 1"));
    }

    #[test]
    fn test_parse_rejects_invalid_glob() {
        let err = parse("ignore:\n  - \"[unclosed\"\n").unwrap_err();
        assert!(matches!(err, Error::Glob(_)));
    }

    #[test]
    fn test_load_without_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Config::load(temp.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_reads_file_from_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".gits.yaml"), "main_branch: main\n").unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.main_branch, "main");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = parse("remote: upstream\njobs: 2\n")
            .unwrap()
            .apply_overrides(Some("fork".to_string()), Some(8))
            .unwrap();
        assert_eq!(config.remote, "fork");
        assert_eq!(config.jobs, Some(8));
    }

    #[test]
    fn test_overrides_absent_keep_file_values() {
        let config = parse("remote: upstream\njobs: 2\n")
            .unwrap()
            .apply_overrides(None, None)
            .unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.jobs, Some(2));
    }

    #[test]
    fn test_overrides_reject_empty_remote() {
        let err = Config::default()
            .apply_overrides(Some("  ".to_string()), None)
            .unwrap_err();
        assert!(err.to_string().contains("remote must not be empty"));
    }

    #[test]
    fn test_ignore_patterns_match_names() {
        let config = parse("ignore:\n  - \"archive-*\"\n").unwrap();
        let patterns = config.ignore_patterns().unwrap();
        assert!(patterns[0].matches("archive-2019"));
        assert!(!patterns[0].matches("alpha"));
    }
}
