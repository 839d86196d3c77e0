//! Path arithmetic helpers.
//!
//! These work on path text only. Nothing here touches the filesystem except
//! [`absolutize`], which consults the current working directory.

use std::path::{Component, Path, PathBuf};

/// Lexically collapse `.` and `..` segments.
///
/// `..` directly under the root of an absolute path is dropped; leading `..`
/// segments of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Make `path` absolute against the current directory, then normalize it.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(path)),
        Err(_) => normalize(path),
    }
}

/// Resolve `path` against `root`.
///
/// Absolute paths are only normalized. When `root` already ends with the
/// text of `path`, `root` itself is returned so the suffix is not appended
/// twice.
pub fn to_absolute_path(path: &str, root: &str) -> String {
    let candidate = Path::new(path);
    let resolved = if candidate.is_absolute() {
        normalize(candidate)
    } else if root.ends_with(path) {
        normalize(Path::new(root))
    } else {
        normalize(&Path::new(root).join(candidate))
    };
    resolved.to_string_lossy().into_owned()
}

/// Express `path` relative to `root`.
///
/// Only attempted when `path` starts with `root` as plain text; anything else
/// comes back unchanged. Because the check is textual, a root of `/proj`
/// also claims `/proj2/x` and yields `../proj2/x`.
///
/// When both name the same location, the final segment is returned instead
/// of an empty string.
pub fn to_relative_path(path: &str, root: &str) -> String {
    if !path.starts_with(root) {
        return path.to_string();
    }

    let absolute_path = absolutize(Path::new(path));
    let project_path = absolutize(Path::new(root));

    if absolute_path == project_path {
        return match absolute_path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => absolute_path.to_string_lossy().into_owned(),
        };
    }

    relativize(&project_path, &absolute_path)
        .to_string_lossy()
        .into_owned()
}

/// Path from `base` to `target`, both already absolute and normalized.
fn relativize(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    rel
}
