//! Source file extension matching.

use std::collections::BTreeSet;
use std::path::Path;

/// The set of file extensions that count as source files.
///
/// Matching is exact and case-sensitive: `py` accepts `foo.py` but not
/// `foo.PY`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceExtensionSet {
    extensions: BTreeSet<String>,
}

impl SourceExtensionSet {
    /// Build a set from extension strings. A leading dot is stripped, so
    /// `".py"` and `"py"` are equivalent.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref();
                ext.strip_prefix('.').unwrap_or(ext).to_string()
            })
            .collect();
        Self { extensions }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Whether the file name of `path` ends in one of the extensions.
    pub fn matches(&self, path: &Path) -> bool {
        match extension_of(path) {
            Some(ext) => self.extensions.contains(ext),
            None => false,
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for SourceExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Text after the final `.` of the file name. Names without a dot, or ending
/// in one, have no extension.
fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_extension() {
        let set = SourceExtensionSet::new(["py", "pyi"]);
        assert!(set.matches(Path::new("src/foo.py")));
        assert!(set.matches(Path::new("foo.pyi")));
        assert!(!set.matches(Path::new("foo.pyc")));
        assert!(!set.matches(Path::new("foo.py.bak")));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let set = SourceExtensionSet::new(["py"]);
        assert!(!set.matches(Path::new("foo.PY")));
        assert!(!set.matches(Path::new("foo.Py")));
    }

    #[test]
    fn test_no_extension_never_matches() {
        let set = SourceExtensionSet::new(["", "py"]);
        assert!(!set.matches(Path::new("Makefile")));
        assert!(!set.matches(Path::new("trailing.")));
    }

    #[test]
    fn test_dot_file_uses_text_after_dot() {
        let set = SourceExtensionSet::new(["py"]);
        assert!(set.matches(Path::new(".py")));
    }

    #[test]
    fn test_leading_dot_is_stripped() {
        let set: SourceExtensionSet = [".js", "ts"].into_iter().collect();
        assert!(set.contains("js"));
        assert!(set.matches(Path::new("index.js")));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["js", "ts"]);
    }
}
