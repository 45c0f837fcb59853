//! URL helpers.

/// Concatenate a base URL with a path.
///
/// All trailing `/` are removed from `base` and `path` is given exactly one
/// leading `/`, so `join("http://example//", "foo")` and
/// `join("http://example", "/foo")` both yield `http://example/foo`.
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("http://example", "foo"), "http://example/foo");
        assert_eq!(join("http://example", "/foo"), "http://example/foo");
        assert_eq!(join("http://example/", "/foo"), "http://example/foo");
        assert_eq!(join("http://example//", "foo"), "http://example/foo");
    }

    #[test]
    fn test_join_collapses_repeated_leading_separators() {
        assert_eq!(join("http://x///", "//foo/bar"), "http://x/foo/bar");
    }

    #[test]
    fn test_join_keeps_inner_path() {
        assert_eq!(
            join("http://x/api/", "document/jobs/1"),
            "http://x/api/document/jobs/1"
        );
    }
}
