//! Failsafe directory traversal.
//!
//! Walks a tree to completion no matter what individual entries do. Errors
//! on a single entry (permission denied, broken or cyclic symlinks, I/O
//! failures) are logged and the walk moves on as if the entry were absent.

use crate::log::DiscoveryLog;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects every regular file reachable from a root.
pub struct FailsafeTraversal<'a> {
    follow_symlinks: bool,
    log: &'a dyn DiscoveryLog,
}

impl<'a> FailsafeTraversal<'a> {
    pub fn new(follow_symlinks: bool, log: &'a dyn DiscoveryLog) -> Self {
        Self {
            follow_symlinks,
            log,
        }
    }

    /// Walk `root` and return the regular files found.
    ///
    /// Files that cannot be opened are logged and left out. With symlink
    /// following disabled, symlinks are neither descended into nor recorded.
    pub fn collect(&self, root: &Path) -> HashSet<PathBuf> {
        let walker = WalkDir::new(root).follow_links(self.follow_symlinks);

        let mut files = HashSet::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    // walkdir never opens files, so check readability here.
                    match fs::File::open(entry.path()) {
                        Ok(_) => {
                            files.insert(entry.into_path());
                        }
                        Err(err) => self.log.warn(&format!(
                            "Ignoring '{}': {}",
                            entry.path().display(),
                            err
                        )),
                    }
                }
                Err(err) => self.report(&err),
            }
        }
        files
    }

    fn report(&self, err: &walkdir::Error) {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        match err.loop_ancestor() {
            Some(ancestor) => self.log.warn(&format!(
                "Ignoring '{}' (cyclic symlink to '{}')",
                path,
                ancestor.display()
            )),
            None => {
                let cause = match err.io_error() {
                    Some(io) => io.to_string(),
                    None => err.to_string(),
                };
                self.log.warn(&format!("Ignoring '{}': {}", path, cause));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemoryLog;

    #[test]
    fn test_collects_every_regular_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        fs::create_dir_all(root.join("a/b/c")).expect("create dirs");
        fs::write(root.join("top.txt"), "").expect("write");
        fs::write(root.join("a/b/c/deep.py"), "").expect("write");

        let log = MemoryLog::new();
        let files = FailsafeTraversal::new(true, &log).collect(root);

        let expected: HashSet<PathBuf> =
            [root.join("top.txt"), root.join("a/b/c/deep.py")].into_iter().collect();
        assert_eq!(files, expected);
        assert!(log.records().is_empty());
    }

    #[test]
    fn test_missing_root_is_logged_not_fatal() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("gone");

        let log = MemoryLog::new();
        let files = FailsafeTraversal::new(false, &log).collect(&missing);

        assert!(files.is_empty());
        let warnings = log.messages(tracing::Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("gone"));
    }
}
