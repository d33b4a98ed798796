//! Cursor extraction from the Admin API `Link` response header.
//!
//! Stores on API versions with cursor pagination answer every listing with a
//! `Link` header whose `rel="next"` URL carries a `page_info` cursor:
//!
//! ```text
//! <https://shop.myshopify.com/admin/api/2025-04/products.json?limit=250&page_info=PREV>; rel="previous",
//! <https://shop.myshopify.com/admin/api/2025-04/products.json?limit=250&page_info=NEXT>; rel="next"
//! ```
//!
//! A response without the header means the store pages by number instead.

/// Returns the `page_info` cursor of the `rel="next"` link, or `None` when
/// the header is absent, has no next link, or the next URL has no cursor.
#[must_use]
pub fn extract_next_cursor(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;

    header
        .split(',')
        .map(str::trim)
        .find(|segment| segment.contains(r#"rel="next""#))
        .and_then(angle_bracket_url)
        .and_then(|url| query_param(url, "page_info"))
}

/// URL between `<` and `>` in one link directive.
fn angle_bracket_url(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.find('>')?;
    (start < end).then(|| &segment[start..end])
}

/// Value of `param` in the URL's query string, without percent-decoding.
/// Shopify cursors are base64url and never need it.
fn query_param(url: &str, param: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let needle = format!("{param}=");
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix(needle.as_str()))
        .map(|value| value.split('#').next().unwrap_or(value))
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_when_header_missing_or_empty() {
        assert!(extract_next_cursor(None).is_none());
        assert!(extract_next_cursor(Some("")).is_none());
    }

    #[test]
    fn extracts_cursor_from_single_next_link() {
        let header = r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=250&page_info=eyJsYXN0X2lkIjo2fQ>; rel="next""#;
        assert_eq!(
            extract_next_cursor(Some(header)).as_deref(),
            Some("eyJsYXN0X2lkIjo2fQ")
        );
    }

    #[test]
    fn picks_next_over_previous() {
        let header = concat!(
            r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=250&page_info=PREV>; rel="previous",   "#,
            r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=250&page_info=NEXT>; rel="next""#
        );
        assert_eq!(extract_next_cursor(Some(header)).as_deref(), Some("NEXT"));
    }

    #[test]
    fn none_when_only_previous_link_present() {
        let header = r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?page_info=PREV>; rel="previous""#;
        assert!(extract_next_cursor(Some(header)).is_none());
    }

    #[test]
    fn none_when_next_url_has_no_cursor() {
        let header = r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=250>; rel="next""#;
        assert!(extract_next_cursor(Some(header)).is_none());
    }

    #[test]
    fn angle_bracket_url_requires_brackets() {
        assert!(angle_bracket_url("no brackets here").is_none());
        assert_eq!(
            angle_bracket_url(r#"<https://x.com/p?a=b>; rel="next""#),
            Some("https://x.com/p?a=b")
        );
    }

    #[test]
    fn query_param_ignores_fragment() {
        assert_eq!(
            query_param("https://x.com/p.json?limit=5&page_info=ABC#top", "page_info"),
            Some("ABC".to_owned())
        );
    }
}
