//! Request URL → fixture filename.
//!
//! The mapping is total and deterministic: every `/` in the path becomes `_`,
//! each query token is appended after a `--` separator, one leading `_` is
//! dropped, and an empty result becomes `root`.

/// Extension appended to every derived name.
pub const FIXTURE_EXTENSION: &str = ".json";

const ROOT_NAME: &str = "root";
const TOKEN_SEPARATOR: &str = "--";

/// Derive the fixture filename for a path and optional raw query string.
///
/// Query tokens are kept verbatim (no decoding, no reordering).
pub fn derive_filename(path: &str, query: Option<&str>) -> String {
    let mut name = path.replace('/', "_");

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        for token in query.split('&') {
            name.push_str(TOKEN_SEPARATOR);
            name.push_str(token);
        }
    }

    let name = name.strip_prefix('_').unwrap_or(&name);
    let name = if name.is_empty() { ROOT_NAME } else { name };

    format!("{name}{FIXTURE_EXTENSION}")
}

/// Same as [`derive_filename`], splitting a raw `path?query` URL on its first `?`.
pub fn filename_for_url(raw_url: &str) -> String {
    match raw_url.split_once('?') {
        Some((path, query)) => derive_filename(path, Some(query)),
        None => derive_filename(raw_url, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        assert_eq!(derive_filename("/", Some("")), "root.json");
        assert_eq!(derive_filename("/", None), "root.json");
        assert_eq!(filename_for_url("/"), "root.json");
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(derive_filename("/a/b/c", None), "a_b_c.json");
    }

    #[test]
    fn test_query_tokens() {
        assert_eq!(derive_filename("/users/1", Some("active=true")), "users_1--active=true.json");
        assert_eq!(
            filename_for_url("/users?page=2&sort&dir=desc"),
            "users--page=2--sort--dir=desc.json"
        );
    }

    #[test]
    fn test_control_params_are_part_of_the_key() {
        assert_eq!(filename_for_url("/users/1?_delay=500"), "users_1--_delay=500.json");
    }

    #[test]
    fn test_slash_edge_cases() {
        // Only one leading underscore is stripped.
        assert_eq!(derive_filename("//a", None), "_a.json");
        assert_eq!(derive_filename("/a//b", None), "a__b.json");
        assert_eq!(derive_filename("/users/", None), "users_.json");
    }

    #[test]
    fn test_root_with_query() {
        assert_eq!(filename_for_url("/?x=1"), "--x=1.json");
    }

    #[test]
    fn test_splits_on_first_question_mark_only() {
        assert_eq!(filename_for_url("/q?a=1?b=2"), "q--a=1?b=2.json");
    }

    #[test]
    fn test_deterministic() {
        let first = filename_for_url("/orders/9?status=open&limit=5");
        let second = filename_for_url("/orders/9?status=open&limit=5");
        assert_eq!(first, second);
    }
}
