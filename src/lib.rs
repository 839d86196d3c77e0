//! Source file discovery for static-analysis frontends.
//!
//! Given input roots, a set of source extensions and optional ignore rules,
//! produces a sorted, duplicate-free list of files to parse.
//!
//! # Pipeline
//!
//! 1. **Validation**: every root must exist and be readable. All problems are
//!    reported together.
//! 2. **Traversal**: directory roots are walked to completion. Unreadable
//!    entries and symlink cycles are logged and skipped.
//! 3. **Extension matching**: exact, case-sensitive.
//! 4. **Ignore rules**: default regexes, a user regex and an explicit path
//!    list, each optional. Regexes see paths relative to the scan root.
//!
//! # Usage
//!
//! ```ignore
//! use source_discovery::{IgnoreRules, SourceExtensionSet, SourceFileDiscovery};
//!
//! let rules = IgnoreRules::new().with_files_regex("sub/.*")?;
//! let discovery = SourceFileDiscovery::new(SourceExtensionSet::new(["py"])).with_rules(rules);
//! let files = discovery.determine("/path/to/project")?;
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod extension;
pub mod filter;
pub mod log;
pub mod paths;
pub mod traversal;
pub mod validation;

// Re-exports
pub use config::{DiscoveryConfig, IgnoreConfig, default_ignored_regex};
pub use discovery::SourceFileDiscovery;
pub use error::{DiscoveryError, Result};
pub use extension::SourceExtensionSet;
pub use filter::{FullMatchRegex, IgnoreFilterChain, IgnoreRules};
pub use log::{DiscoveryLog, LogRecord, MemoryLog, TracingLog};
pub use paths::{to_absolute_path, to_relative_path};
pub use traversal::FailsafeTraversal;
pub use validation::validate_roots;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
