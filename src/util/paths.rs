// IRLogView - util/paths.rs
//
// Path helpers shared by discovery and the query service. Pure path
// manipulation: nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Validate a caller-supplied path that must stay inside the root directory.
///
/// Rejects empty paths, absolute paths (including a leading `/` or `\` and
/// Windows drive prefixes) and any path with a `..` segment. Returns the path
/// with `.` segments removed.
pub fn sanitize_relative(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() || raw.starts_with('/') || raw.starts_with('\\') {
        return None;
    }

    let mut clean = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::Normal(part) => {
                // A `..` hidden behind Windows separators on a Unix host.
                let text = part.to_string_lossy();
                if text.split('\\').any(|seg| seg == "..") {
                    return None;
                }
                clean.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// `path` relative to `base`, `/`-separated. `None` if `path` is not under
/// `base` or has a non-UTF-8 component.
pub fn relative_path_string(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

/// Resolve `dir` against `root` unless it is already absolute.
pub fn resolve_under(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}
