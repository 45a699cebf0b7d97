#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use dc_load::api::{AppState, BudgetRequest, ItemRequest, router};
use dc_load::catalog::EquipmentCatalog;

fn app_with(catalog: Arc<EquipmentCatalog>) -> axum::Router {
    router(Arc::new(AppState { catalog }))
}

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn read_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn budget_matches_session_result() {
    let app = app_with(common::builtin_catalog());
    let body = serde_json::json!({
        "site_name": "Tower-001",
        "items": [
            { "model": "Ericsson 4449 B2", "category": "Radio Units", "quantity": 2 },
            { "model": "Ericsson DUS 41", "quantity": 1 }
        ]
    });

    let resp = app
        .oneshot(json_post("/budget", &body))
        .await
        .expect("request should complete");
    assert_eq!(resp.status(), StatusCode::OK);

    let json = read_json(resp).await;
    let expected = common::demo_session()
        .result()
        .expect("demo session has items");
    assert_eq!(json["result"]["total_watts"], expected.total_watts);
    assert_eq!(json["result"]["dc_amps"], expected.dc_amps);
    assert_eq!(
        json["result"]["rectifier_size_amps"],
        expected.rectifier_size_amps
    );
    assert_eq!(json["items"].as_array().map(Vec::len), Some(2));
    assert_ne!(json["items"][0]["id"], json["items"][1]["id"]);
}

#[tokio::test]
async fn custom_catalog_is_served() {
    let catalog = EquipmentCatalog::from_toml_file(&common::asset("catalogs/rooftop.toml"))
        .expect("catalog should load");
    let app = app_with(Arc::new(catalog));

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/catalog/Auxiliary%20Equipment")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should complete");
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["models"][0]["model"], "Fan Tray");
    assert_eq!(json["models"][0]["rated_power_w"], 65.0);

    let resp = app
        .oneshot(json_post(
            "/budget",
            &serde_json::json!({ "items": [{ "model": "Nokia AirScale", "quantity": 1 }] }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn request_types_are_public() {
    let req: BudgetRequest = serde_json::from_value(serde_json::json!({
        "diversity_factor_pct": 65.0,
        "items": [{ "model": "GPS Unit", "quantity": 3 }]
    }))
    .expect("request should parse");
    let item: &ItemRequest = &req.items[0];
    assert_eq!(item.quantity, 3);
    assert_eq!(req.diversity_factor_pct, Some(65.0));
}
