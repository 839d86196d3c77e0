//! Source file discovery.
//!
//! Validates the input roots, walks directories, keeps files with a
//! recognized extension and applies the ignore rules. Results are sorted and
//! free of duplicates.

use crate::config::DiscoveryConfig;
use crate::error::Result;
use crate::extension::SourceExtensionSet;
use crate::filter::{IgnoreFilterChain, IgnoreRules};
use crate::log::{DiscoveryLog, TracingLog};
use crate::paths::absolutize;
use crate::traversal::FailsafeTraversal;
use crate::validation::validate_roots;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Discovers source files under one or more roots.
pub struct SourceFileDiscovery {
    /// Extensions that count as source files
    extensions: SourceExtensionSet,
    /// Rules applied by single-root discovery and the `filter_*` methods
    rules: IgnoreRules,
    /// Whether traversal follows symlinks
    follow_symlinks: bool,
    /// Where diagnostics go
    log: Arc<dyn DiscoveryLog>,
}

impl SourceFileDiscovery {
    /// Discovery for the given extensions, with no ignore rules, following
    /// symlinks and logging through `tracing`.
    pub fn new(extensions: SourceExtensionSet) -> Self {
        Self {
            extensions,
            rules: IgnoreRules::default(),
            follow_symlinks: true,
            log: Arc::new(TracingLog),
        }
    }

    /// Build from a loaded configuration, compiling its ignore patterns.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        Ok(Self::new(config.extension_set())
            .with_rules(config.ignore.compile()?)
            .follow_symlinks(config.follow_symlinks))
    }

    /// Replace the ignore rules.
    pub fn with_rules(mut self, rules: IgnoreRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the symlink policy for traversal.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Route diagnostics to `log`.
    pub fn with_log(mut self, log: Arc<dyn DiscoveryLog>) -> Self {
        self.log = log;
        self
    }

    pub fn extensions(&self) -> &SourceExtensionSet {
        &self.extensions
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    /// Discover source files under a single root and apply the ignore rules.
    ///
    /// Regex rules see paths relative to the absolute form of `input_path`.
    pub fn determine(&self, input_path: &str) -> Result<Vec<String>> {
        let files = self.determine_all([input_path])?;
        let root = absolutize(Path::new(input_path));
        Ok(self.filter_files(files, &root.to_string_lossy()))
    }

    /// Discover source files under several roots without applying ignore
    /// rules.
    ///
    /// Every root is validated before any traversal starts. File roots are
    /// kept when their extension matches; directory roots are walked.
    pub fn determine_all<I, S>(&self, input_paths: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roots: Vec<String> = input_paths
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();
        validate_roots(&roots, self.log.as_ref())?;

        let traversal = FailsafeTraversal::new(self.follow_symlinks, self.log.as_ref());
        let mut matching = BTreeSet::new();

        for root in &roots {
            let root = absolutize(Path::new(root));
            if root.is_dir() {
                matching.extend(
                    traversal
                        .collect(&root)
                        .into_iter()
                        .filter(|file| self.extensions.matches(file))
                        .map(|file| file.to_string_lossy().into_owned()),
                );
            } else if root.is_file() && self.extensions.matches(&root) {
                matching.insert(root.to_string_lossy().into_owned());
            }
        }

        self.log.debug(&format!(
            "Discovered {} source files under {} root(s)",
            matching.len(),
            roots.len()
        ));

        Ok(matching.into_iter().collect())
    }

    /// Whether `file`, found under `input_path`, survives the ignore rules.
    pub fn filter_file(&self, file: &str, input_path: &str) -> bool {
        IgnoreFilterChain::new(&self.rules, input_path, self.log.as_ref()).keep(file)
    }

    /// Drop the files flagged by the ignore rules, preserving order.
    pub fn filter_files<I, S>(&self, files: I, input_path: &str) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IgnoreFilterChain::new(&self.rules, input_path, self.log.as_ref()).filter(files)
    }
}
