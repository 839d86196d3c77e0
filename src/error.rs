//! Error types for source discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Fatal discovery failures.
///
/// Problems with individual entries found during traversal are never
/// reported here; they are logged and skipped.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// One or more input roots do not exist or cannot be read.
    #[error("{}", describe_invalid_roots(.missing, .unreadable))]
    InvalidRootPaths {
        /// Roots that do not exist, sorted.
        missing: Vec<String>,
        /// Roots that exist but cannot be read, sorted.
        unreadable: Vec<String>,
    },

    /// An ignore pattern failed to compile.
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("failed to load configuration from {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl DiscoveryError {
    /// Every offending root named by an `InvalidRootPaths` error, sorted.
    pub fn offending_paths(&self) -> Vec<&str> {
        match self {
            Self::InvalidRootPaths {
                missing,
                unreadable,
            } => {
                let mut all: Vec<&str> = missing
                    .iter()
                    .chain(unreadable.iter())
                    .map(String::as_str)
                    .collect();
                all.sort_unstable();
                all
            }
            _ => Vec::new(),
        }
    }
}

fn describe_invalid_roots(missing: &[String], unreadable: &[String]) -> String {
    let mut parts = Vec::with_capacity(2);
    if !missing.is_empty() {
        parts.push(format!(
            "source input paths do not exist: {}",
            missing.join(", ")
        ));
    }
    if !unreadable.is_empty() {
        parts.push(format!(
            "source input paths are not readable: {}",
            unreadable.join(", ")
        ));
    }
    parts.join("; ")
}
