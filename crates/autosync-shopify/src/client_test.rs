use super::catalog::next_page;
use super::*;

fn client(base_url: &str) -> ShopifyAdminClient {
    ShopifyAdminClient::new(base_url, "shpat_test", 5, "autosync-test/0.1").unwrap()
}

#[test]
fn products_url_with_page_number() {
    let c = client("https://glowco.myshopify.com/admin/api/2025-04");
    let url = c.products_url(250, &PageRequest::Number(3)).unwrap();
    assert_eq!(
        url.as_str(),
        "https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=250&page=3"
    );
}

#[test]
fn products_url_with_cursor() {
    let c = client("https://glowco.myshopify.com/admin/api/2025-04/");
    let url = c
        .products_url(50, &PageRequest::Cursor("eyJsYXN0X2lkIjo2fQ".to_owned()))
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=50&page_info=eyJsYXN0X2lkIjo2fQ"
    );
}

#[test]
fn endpoint_keeps_version_segment() {
    let c = client("https://glowco.myshopify.com/admin/api/2025-04");
    assert_eq!(
        c.endpoint("products/42.json").unwrap().as_str(),
        "https://glowco.myshopify.com/admin/api/2025-04/products/42.json"
    );
}

#[test]
fn new_rejects_invalid_base_url() {
    let result = ShopifyAdminClient::new("not a url", "t", 5, "ua");
    assert!(
        matches!(result, Err(ShopifyError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}

#[test]
fn debug_redacts_access_token() {
    let rendered = format!("{:?}", client("https://glowco.myshopify.com"));
    assert!(!rendered.contains("shpat_test"));
}

#[test]
fn next_page_stops_on_empty_page() {
    assert!(next_page(&PageRequest::Number(1), 0, None).is_none());
}

#[test]
fn next_page_counts_up_on_full_page_without_link() {
    assert_eq!(
        next_page(&PageRequest::Number(2), 250, None),
        Some(PageRequest::Number(3))
    );
}

#[test]
fn next_page_counts_up_on_short_page_without_link() {
    assert_eq!(
        next_page(&PageRequest::Number(1), 12, None),
        Some(PageRequest::Number(2))
    );
}

#[test]
fn next_page_stops_on_cursor_page_without_link() {
    assert!(next_page(&PageRequest::Cursor("X".to_owned()), 12, None).is_none());
}

#[test]
fn next_page_follows_link_cursor() {
    let link = r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?limit=2&page_info=NEXT>; rel="next""#;
    assert_eq!(
        next_page(&PageRequest::Number(1), 2, Some(link)),
        Some(PageRequest::Cursor("NEXT".to_owned()))
    );
}

#[test]
fn next_page_stops_when_link_has_no_next() {
    let link = r#"<https://glowco.myshopify.com/admin/api/2025-04/products.json?page_info=PREV>; rel="previous""#;
    assert!(next_page(&PageRequest::Cursor("X".to_owned()), 2, Some(link)).is_none());
}

#[test]
fn retry_after_parses_fractional_seconds() {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::RETRY_AFTER, "2.5".parse().unwrap());
    assert_eq!(retry_after_secs(&headers), 3);
    assert_eq!(retry_after_secs(&reqwest::header::HeaderMap::new()), 2);
}
