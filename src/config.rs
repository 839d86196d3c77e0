//! Serializable discovery configuration.

use crate::error::{DiscoveryError, Result};
use crate::extension::SourceExtensionSet;
use crate::filter::IgnoreRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Ignore rules as plain strings, before compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Built-in exclusion regexes
    pub ignored_default_regex: Option<Vec<String>>,
    /// Single user exclusion regex
    pub ignored_files_regex: Option<String>,
    /// Explicit files or directories to exclude
    pub ignored_files_path: Option<Vec<String>>,
}

impl IgnoreConfig {
    /// Enable the built-in exclusions from [`default_ignored_regex`].
    pub fn with_default_ignores(mut self) -> Self {
        self.ignored_default_regex = Some(
            default_ignored_regex()
                .into_iter()
                .map(str::to_string)
                .collect(),
        );
        self
    }

    /// Compile the patterns. Fails on the first malformed regex.
    pub fn compile(&self) -> Result<IgnoreRules> {
        let mut rules = IgnoreRules::new();
        if let Some(patterns) = &self.ignored_default_regex {
            rules = rules.with_default_regex(patterns)?;
        }
        if let Some(pattern) = &self.ignored_files_regex {
            rules = rules.with_files_regex(pattern)?;
        }
        if let Some(paths) = &self.ignored_files_path {
            rules = rules.with_files_path(paths.iter().cloned());
        }
        Ok(rules)
    }
}

/// Everything needed to run a discovery, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub extensions: Vec<String>,
    pub follow_symlinks: bool,
    pub ignore: IgnoreConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            follow_symlinks: true,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| DiscoveryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&data).map_err(|e| DiscoveryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn extension_set(&self) -> SourceExtensionSet {
        SourceExtensionSet::new(&self.extensions)
    }
}

/// Conventional VCS, dependency and build output directories, as regexes
/// over the path relative to the scan root.
pub fn default_ignored_regex() -> Vec<&'static str> {
    vec![
        r"(.*[/\\])?\.git([/\\].*)?",
        r"(.*[/\\])?\.hg([/\\].*)?",
        r"(.*[/\\])?\.svn([/\\].*)?",
        r"(.*[/\\])?node_modules([/\\].*)?",
        r"(.*[/\\])?bower_components([/\\].*)?",
        r"(.*[/\\])?vendor([/\\].*)?",
        r"(.*[/\\])?target([/\\].*)?",
        r"(.*[/\\])?build([/\\].*)?",
        r"(.*[/\\])?dist([/\\].*)?",
        r"(.*[/\\])?out([/\\].*)?",
        r"(.*[/\\])?\.venv([/\\].*)?",
        r"(.*[/\\])?venv([/\\].*)?",
        r"(.*[/\\])?__pycache__([/\\].*)?",
        r"(.*[/\\])?\.tox([/\\].*)?",
        r"(.*[/\\])?\.next([/\\].*)?",
        r".*\.min\.js",
        r".*\.min\.css",
    ]
}
