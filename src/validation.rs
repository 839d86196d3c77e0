//! Up-front validation of user-supplied roots.

use crate::error::{DiscoveryError, Result};
use crate::log::DiscoveryLog;
use std::fs;
use std::path::Path;

/// Check that every root exists and can be read.
///
/// All roots are inspected before failing, so the error names every
/// offending path at once.
pub fn validate_roots<I, S>(roots: I, log: &dyn DiscoveryLog) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut missing = Vec::new();
    let mut unreadable = Vec::new();

    for root in roots {
        let root = root.as_ref();
        let path = Path::new(root);
        if !path.exists() {
            missing.push(root.to_string());
        } else if !is_readable(path) {
            unreadable.push(root.to_string());
        }
    }

    if missing.is_empty() && unreadable.is_empty() {
        return Ok(());
    }

    missing.sort();
    missing.dedup();
    unreadable.sort();
    unreadable.dedup();

    let err = DiscoveryError::InvalidRootPaths {
        missing,
        unreadable,
    };
    log.error(&err.to_string());
    Err(err)
}

fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        fs::File::open(path).is_ok()
    }
}
