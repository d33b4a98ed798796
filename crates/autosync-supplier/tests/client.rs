//! Integration tests for `SupplierClient` using wiremock HTTP mocks.

use autosync_core::SupplierKind;
use autosync_supplier::{SupplierClient, SupplierError};
use rust_decimal::Decimal;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(kind: SupplierKind, base_url: &str) -> SupplierClient {
    SupplierClient::with_base_url(kind, "test-token", 30, "autosync-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn autods_fetch_returns_normalized_products() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "products": [
            {
                "title": "Hydrating Face Serum",
                "sku": "HFS-1",
                "price": 20,
                "stock": 5,
                "images": ["img1"],
                "supplier_name": "GlowCo"
            },
            {
                "title": "Bamboo Hair Brush",
                "sku": "BHB-2",
                "price": "8.40",
                "images": [{ "src": "https://cdn.example.com/brush.jpg" }],
                "body_html": "<p>Bamboo</p>"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(SupplierKind::AutoDs, &server.uri());
    let products = client.fetch_products().await.expect("should fetch products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].sku.as_deref(), Some("HFS-1"));
    assert_eq!(products[0].price, Some(Decimal::from(20)));
    assert_eq!(products[0].stock, Some(5));
    assert_eq!(products[0].vendor.as_deref(), Some("GlowCo"));
    assert_eq!(products[1].stock, None);
    assert_eq!(
        products[1].images,
        vec!["https://cdn.example.com/brush.jpg".to_string()]
    );
    assert_eq!(products[1].description.as_deref(), Some("<p>Bamboo</p>"));
}

#[tokio::test]
async fn autods_missing_products_key_is_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(SupplierKind::AutoDs, &server.uri());
    let products = client.fetch_products().await.expect("should succeed");
    assert!(products.is_empty());
}

#[tokio::test]
async fn autods_unauthorized_is_rejected_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let client = test_client(SupplierKind::AutoDs, &server.uri());
    match client.fetch_products().await {
        Err(SupplierError::Rejected { status, body, .. }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid token");
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn autods_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(SupplierKind::AutoDs, &server.uri());
    let result = client.fetch_products().await;
    assert!(
        matches!(result, Err(SupplierError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn cj_fetch_reads_data_list() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "code": 200,
        "result": true,
        "message": "Success",
        "data": {
            "pageNum": 1,
            "pageSize": 20,
            "total": 1,
            "list": [
                {
                    "productNameEn": "Silicone Face Brush",
                    "productSku": "CJ-889",
                    "sellPrice": "4.75",
                    "imageUrls": ["https://cdn.example.com/brush-1.jpg"],
                    "supplierName": "CJ Warehouse"
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/api2.0/v1/product/list"))
        .and(header("CJ-Access-Token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(SupplierKind::Cj, &server.uri());
    let products = client.fetch_products().await.expect("should fetch products");

    assert_eq!(products.len(), 1);
    let p = &products[0];
    assert_eq!(p.title.as_deref(), Some("Silicone Face Brush"));
    assert_eq!(p.sku.as_deref(), Some("CJ-889"));
    assert_eq!(p.price, Some(Decimal::new(475, 2)));
    assert_eq!(p.stock, None);
    assert_eq!(p.vendor.as_deref(), Some("CJ Warehouse"));
}

#[tokio::test]
async fn cj_result_false_is_api_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "code": 1600001,
        "result": false,
        "message": "Authentication failed",
        "data": null
    });

    Mock::given(method("GET"))
        .and(path("/api2.0/v1/product/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(SupplierKind::Cj, &server.uri());
    match client.fetch_products().await {
        Err(SupplierError::ApiError(msg)) => {
            assert!(msg.contains("Authentication failed"), "message was: {msg}");
            assert!(msg.contains("1600001"), "message was: {msg}");
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}
