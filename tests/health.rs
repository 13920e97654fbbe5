use b2b_orders_api::{
    response::{ApiResponse, Meta},
    routes::health::health_check,
};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[test]
fn meta_counts_partial_last_page() {
    let meta = Meta::new(2, 20, 41);
    assert_eq!(meta.total_pages, Some(3));

    let meta = Meta::unpaged(0);
    assert_eq!(meta.total, Some(0));
    assert_eq!(meta.total_pages, Some(0));
}

#[test]
fn deleted_body_is_an_empty_object() {
    let body = serde_json::to_value(ApiResponse::deleted()).unwrap();
    assert_eq!(body["message"], "Deleted");
    assert_eq!(body["data"], serde_json::json!({}));
}
