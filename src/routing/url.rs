//! Target URL construction.
//!
//! # Responsibilities
//! - Compose origin + sub-path + query string into the final backend URL
//! - Collapse redundant trailing slashes
//! - Pass the query string through character-for-character
//!
//! # Design Decisions
//! - The query string is never re-parsed or re-encoded; the gateway does
//!   not understand backend-specific query semantics and must not corrupt
//!   them
//! - Any run of trailing slashes collapses to none, so an empty sub-path
//!   yields a clean origin URL

/// Build the backend URL for a resolved route.
///
/// `query` is the raw query string from the inbound request, without the
/// leading `?`.
pub fn build_target_url(origin: &str, sub_path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", origin, sub_path);

    while url.ends_with('/') {
        url.pop();
    }

    if let Some(q) = query {
        if !q.is_empty() {
            url.push('?');
            url.push_str(q);
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_composition() {
        assert_eq!(
            build_target_url("https://api.anthropic.com", "v1/messages", None),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn test_empty_sub_path_has_no_trailing_slash() {
        assert_eq!(
            build_target_url("https://api.openai.com", "", None),
            "https://api.openai.com"
        );
    }

    #[test]
    fn test_empty_sub_path_with_query() {
        assert_eq!(
            build_target_url("https://api.openai.com", "", Some("a=1")),
            "https://api.openai.com?a=1"
        );
    }

    #[test]
    fn test_trailing_slash_run_collapsed() {
        assert_eq!(
            build_target_url("https://api.x.ai", "v1/models///", None),
            "https://api.x.ai/v1/models"
        );
    }

    #[test]
    fn test_query_passed_through_verbatim() {
        // Pre-encoded and oddly-shaped queries must survive untouched.
        assert_eq!(
            build_target_url("https://api.x.ai", "search", Some("q=a%20b&flag&x=%3D")),
            "https://api.x.ai/search?q=a%20b&flag&x=%3D"
        );
    }

    #[test]
    fn test_empty_query_ignored() {
        assert_eq!(
            build_target_url("https://api.x.ai", "v1/models", Some("")),
            "https://api.x.ai/v1/models"
        );
    }

    #[test]
    fn test_interior_slashes_untouched() {
        assert_eq!(
            build_target_url("https://api.x.ai", "a//b/c", None),
            "https://api.x.ai/a//b/c"
        );
    }
}
