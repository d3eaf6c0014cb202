//! Path normalization and segmentation.

/// Apply the trailing slash policy to a path.
///
/// Unless `strict` is set, one trailing `/` is dropped; a path that becomes
/// empty is the root `/`. Already-normalized paths are returned borrowed.
///
/// ```
/// use radix_router::routing::path::normalize_trailing_slash;
///
/// assert_eq!(normalize_trailing_slash("/a/", false), "/a");
/// assert_eq!(normalize_trailing_slash("/", false), "/");
/// assert_eq!(normalize_trailing_slash("/a/", true), "/a/");
/// ```
pub fn normalize_trailing_slash(path: &str, strict: bool) -> &str {
    if strict {
        return path;
    }
    match path.strip_suffix('/') {
        Some("") => "/",
        Some(trimmed) => trimmed,
        None if path.is_empty() => "/",
        None => path,
    }
}

/// Split a path on `/`, keeping empty segments.
///
/// A leading slash yields a leading empty segment, so `/a` is `["", "a"]`
/// and the root `/` is `["", ""]`.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').collect()
}
