//! Handler tests for the products domain
//!
//! Drive the products router directly against the in-memory repository:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization and status codes
//! - Not-found and malformed-input responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_len(body: Body) -> usize {
    body.collect().await.unwrap().to_bytes().len()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, category: &str, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"category": category, "name": name}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_201_with_id() {
    let app = app();

    let product = create(&app, "electronics", "phone").await;

    assert_eq!(product["id"], 1);
    assert_eq!(product["category"], "electronics");
    assert_eq!(product["name"], "phone");
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({"id": 77, "category": "electronics", "name": "phone"}),
        ))
        .await
        .unwrap();

    let product = json_body(response.into_body()).await;
    assert_eq!(product["id"], 1);
}

#[tokio::test]
async fn test_get_product_returns_200() {
    let app = app();
    create(&app, "books", "novel").await;

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product = json_body(response.into_body()).await;
    assert_eq!(product, json!({"id": 1, "category": "books", "name": "novel"}));
}

#[tokio::test]
async fn test_get_missing_product_returns_empty_404() {
    let response = app().oneshot(empty_request("GET", "/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_len(response.into_body()).await, 0);
}

#[tokio::test]
async fn test_get_non_numeric_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_PATH");
}

#[tokio::test]
async fn test_update_uses_path_id_over_body_id() {
    let app = app();
    for i in 0..5 {
        create(&app, "electronics", &format!("item-{i}")).await;
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/5",
            json!({"id": 999, "category": "mobile", "name": "smartphone"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product = json_body(response.into_body()).await;
    assert_eq!(product["id"], 5);
    assert_eq!(product["category"], "mobile");
    assert_eq!(product["name"], "smartphone");

    let response = app.oneshot(empty_request("GET", "/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_product_returns_empty_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/3",
            json!({"category": "mobile", "name": "smartphone"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_len(response.into_body()).await, 0);
}

#[tokio::test]
async fn test_delete_returns_204_then_404() {
    let app = app();
    create(&app, "books", "novel").await;

    let response = app.clone().oneshot(empty_request("DELETE", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(body_len(response.into_body()).await, 0);

    let response = app.clone().oneshot(empty_request("DELETE", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_pages_by_category() {
    let app = app();
    create(&app, "electronics", "phone").await;
    create(&app, "electronics", "tv").await;
    create(&app, "books", "novel").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/list",
            json!({"category": "electronics", "page": 1, "size": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
    assert_eq!(body["products"][0]["name"], "phone");
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 0);
}

#[tokio::test]
async fn test_list_products_second_page() {
    let app = app();
    create(&app, "electronics", "phone").await;
    create(&app, "electronics", "tv").await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/list",
            json!({"category": "electronics", "page": 2, "size": 1}),
        ))
        .await
        .unwrap();

    let body = json_body(response.into_body()).await;
    assert_eq!(body["products"][0]["name"], "tv");
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn test_list_products_clamps_non_positive_page() {
    let app = app();
    create(&app, "electronics", "phone").await;

    for page in [0, -1, -100] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/list",
                json!({"category": "electronics", "page": page, "size": 10}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["page"], 0, "page {page} should be clamped");
        assert_eq!(body["products"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_list_categories_is_distinct() {
    let app = app();
    create(&app, "electronics", "phone").await;
    create(&app, "books", "novel").await;
    create(&app, "electronics", "tv").await;

    let response = app.oneshot(empty_request("GET", "/categories")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    let mut categories: Vec<String> = serde_json::from_value(body).unwrap();
    categories.sort();
    assert_eq!(categories, vec!["books", "electronics"]);
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{\"category\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_missing_fields_return_422() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({"category": "books"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
