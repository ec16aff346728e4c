//! Lexical path utilities for repository paths
//!
//! Repository paths are absolute, `/`-separated virtual paths. Every path is
//! normalized before it is used as a key. Normalization is purely lexical:
//! it never checks whether a segment exists or whether it names a file, so
//! `/a/file/..` resolves to `/a` even though `file` could not be entered on a
//! real filesystem.

/// The root of every repository.
pub const ROOT: &str = "/";

/// Normalize a raw path into a repository path.
///
/// Empty segments and `.` are dropped, `..` removes the previous segment and
/// stops at the root. The result always starts with `/` and never ends with
/// one unless it is the root itself.
pub fn normalize(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in raw.trim_end_matches('/').split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return ROOT.to_string();
    }

    let mut normalized = String::with_capacity(raw.len() + 1);
    for segment in segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    normalized
}

/// Whether a selector string should be treated as a glob pattern
pub fn is_pattern(selector: &str) -> bool {
    selector.contains('*')
}

/// Join a normalized directory path with a child name
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// The last segment of a normalized path, or `None` for the root
pub fn file_name(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(index) if path.len() > 1 => Some(&path[index + 1..]),
        _ => None,
    }
}

/// The parent of a normalized path, or `None` for the root
pub fn parent(path: &str) -> Option<&str> {
    match path.rfind('/') {
        _ if path == ROOT => None,
        Some(0) => Some(ROOT),
        Some(index) => Some(&path[..index]),
        None => None,
    }
}

/// Every ancestor of a normalized path, nearest last, excluding the path itself
///
/// `/a/b/c` yields `/`, `/a`, `/a/b`.
pub fn ancestors(path: &str) -> Vec<&str> {
    let mut ancestors = Vec::new();
    let mut current = parent(path);
    while let Some(dir) = current {
        ancestors.push(dir);
        current = parent(dir);
    }
    ancestors.reverse();
    ancestors
}

/// Whether `path` lies strictly below `dir`
pub fn is_descendant(path: &str, dir: &str) -> bool {
    if dir == ROOT {
        return path != ROOT;
    }
    path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root_forms() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("///"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/."), "/");
        assert_eq!(normalize("/.."), "/");
    }

    #[test]
    fn test_normalize_dot_segments() {
        assert_eq!(normalize("/a/./b"), "/a/b");
        assert_eq!(normalize("/a/../b"), "/b");
        assert_eq!(normalize("/a/b/.."), "/a");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("/webmozart/../../webmozart/puli"), "/webmozart/puli");
        assert_eq!(normalize("/webmozart/./../puli"), "/puli");
    }

    #[test]
    fn test_normalize_slashes() {
        assert_eq!(normalize("/webmozart/puli/"), "/webmozart/puli");
        assert_eq!(normalize("//webmozart//puli//"), "/webmozart/puli");
        assert_eq!(normalize("webmozart/puli"), "/webmozart/puli");
    }

    #[test]
    fn test_normalize_pops_across_files() {
        // No existence or type checks are made
        assert_eq!(normalize("/webmozart/puli/file1/.."), "/webmozart/puli");
    }

    #[test]
    fn test_is_pattern() {
        assert!(is_pattern("/webmozart/*"));
        assert!(is_pattern("/webmozart/puli/file*"));
        assert!(!is_pattern("/webmozart/puli"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "webmozart"), "/webmozart");
        assert_eq!(join("/webmozart", "puli"), "/webmozart/puli");
    }

    #[test]
    fn test_file_name_and_parent() {
        assert_eq!(file_name("/"), None);
        assert_eq!(file_name("/webmozart"), Some("webmozart"));
        assert_eq!(file_name("/webmozart/puli"), Some("puli"));

        assert_eq!(parent("/"), None);
        assert_eq!(parent("/webmozart"), Some("/"));
        assert_eq!(parent("/webmozart/puli"), Some("/webmozart"));
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("/"), Vec::<&str>::new());
        assert_eq!(ancestors("/a"), vec!["/"]);
        assert_eq!(ancestors("/a/b/c"), vec!["/", "/a", "/a/b"]);
    }

    #[test]
    fn test_is_descendant() {
        assert!(is_descendant("/a", "/"));
        assert!(is_descendant("/a/b", "/a"));
        assert!(!is_descendant("/ab", "/a"));
        assert!(!is_descendant("/a", "/a"));
        assert!(!is_descendant("/", "/"));
    }
}
