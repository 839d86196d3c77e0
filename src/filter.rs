//! Ignore rules and the filter chain that applies them.
//!
//! Three independent mechanisms can exclude a file:
//!
//! - a list of built-in regexes, matched against the path relative to the
//!   scan root
//! - a single user regex, also matched against the relative path
//! - an explicit list of files or directories, compared on resolved paths
//!
//! Each is optional. A file survives only if no active rule flags it.

use crate::error::{DiscoveryError, Result};
use crate::log::DiscoveryLog;
use crate::paths::{absolutize, to_absolute_path, to_relative_path};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// A regex that only matches when it covers the entire input.
#[derive(Debug, Clone)]
pub struct FullMatchRegex {
    source: String,
    anchored: Regex,
}

impl FullMatchRegex {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |source| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };
        // Compile on its own first so a stray `)` cannot escape the anchors.
        Regex::new(pattern).map_err(invalid)?;
        let anchored = Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }
}

/// The active ignore rules. `None` means the rule is switched off.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    pub ignored_default_regex: Option<Vec<FullMatchRegex>>,
    pub ignored_files_regex: Option<FullMatchRegex>,
    pub ignored_files_path: Option<Vec<String>>,
}

impl IgnoreRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the built-in regex list.
    pub fn with_default_regex<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| FullMatchRegex::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.ignored_default_regex = Some(compiled);
        Ok(self)
    }

    /// Set the user regex.
    pub fn with_files_regex(mut self, pattern: &str) -> Result<Self> {
        self.ignored_files_regex = Some(FullMatchRegex::new(pattern)?);
        Ok(self)
    }

    /// Set the explicit files and directories to exclude.
    pub fn with_files_path<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_files_path = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// True when no rule is active.
    pub fn is_empty(&self) -> bool {
        self.ignored_default_regex.is_none()
            && self.ignored_files_regex.is_none()
            && self.ignored_files_path.is_none()
    }
}

/// Applies [`IgnoreRules`] to files found under one scan root.
pub struct IgnoreFilterChain<'a> {
    rules: &'a IgnoreRules,
    root: String,
    /// Canonical forms of `ignored_files_path` entries that exist.
    ignored_paths: Vec<(String, PathBuf)>,
    log: &'a dyn DiscoveryLog,
}

impl<'a> IgnoreFilterChain<'a> {
    /// Prepare the chain for `root`.
    ///
    /// Relative entries of the explicit path list are resolved against
    /// `root`. Entries that do not exist never match.
    pub fn new(rules: &'a IgnoreRules, root: &str, log: &'a dyn DiscoveryLog) -> Self {
        let ignored_paths = rules
            .ignored_files_path
            .iter()
            .flatten()
            .filter_map(|entry| {
                let resolved = to_absolute_path(entry, root);
                fs::canonicalize(&resolved)
                    .ok()
                    .map(|canonical| (entry.clone(), canonical))
            })
            .collect();

        Self {
            rules,
            root: root.to_string(),
            ignored_paths,
            log,
        }
    }

    /// Whether `file` survives every active rule.
    pub fn keep(&self, file: &str) -> bool {
        !(self.ignored_by_default(file)
            || self.ignored_by_regex(file)
            || self.ignored_by_path(file))
    }

    /// Keep the surviving files, preserving order.
    pub fn filter<I, S>(&self, files: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        files
            .into_iter()
            .map(Into::into)
            .filter(|file| self.keep(file))
            .collect()
    }

    fn ignored_by_default(&self, file: &str) -> bool {
        let Some(patterns) = &self.rules.ignored_default_regex else {
            return false;
        };
        let relative = to_relative_path(file, &self.root);
        match patterns.iter().find(|p| p.is_full_match(&relative)) {
            Some(pattern) => {
                self.log.debug(&format!(
                    "'{}' ignored by default rule '{}'",
                    relative,
                    pattern.as_str()
                ));
                true
            }
            None => false,
        }
    }

    fn ignored_by_regex(&self, file: &str) -> bool {
        let Some(pattern) = &self.rules.ignored_files_regex else {
            return false;
        };
        let relative = to_relative_path(file, &self.root);
        if pattern.is_full_match(&relative) {
            self.log.debug(&format!(
                "'{}' ignored by user rule '{}'",
                relative,
                pattern.as_str()
            ));
            return true;
        }
        false
    }

    fn ignored_by_path(&self, file: &str) -> bool {
        if self.ignored_paths.is_empty() {
            return false;
        }
        // The file's own location catches symlinks that live inside an
        // ignored directory; its target catches links to an ignored file.
        let located = locate(Path::new(file));
        let target = fs::canonicalize(file).ok();
        // Component-wise, so `/proj/a` does not claim `/proj/ab`.
        let hit = self.ignored_paths.iter().find(|(_, ignored)| {
            located.starts_with(ignored)
                || target.as_ref().is_some_and(|t| t.starts_with(ignored))
        });
        match hit {
            Some((entry, _)) => {
                self.log
                    .debug(&format!("'{}' ignored by explicit path '{}'", file, entry));
                true
            }
            None => false,
        }
    }
}

/// Canonical parent directory joined with the file name, leaving a final
/// symlink unresolved.
fn locate(file: &Path) -> PathBuf {
    let absolute = absolutize(file);
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent).ok().map(|p| p.join(name)),
        _ => None,
    };
    resolved.unwrap_or(absolute)
}
