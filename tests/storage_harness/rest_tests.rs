//! REST integration test macro for invoice stores.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that drive
//! an `InvoiceStore` through full REST round-trips:
//! JSON → HTTP request → handler → InvoiceStore → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$store_factory` must produce an `impl InvoiceStore + 'static`.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create`: POST 200 + stored invoice
/// - `test_rest_get` / `test_rest_list`
/// - `test_rest_update`: PUT 200 `{"success": true}`, items replaced
/// - `test_rest_patch_status`: PATCH 200 + updated invoice
/// - `test_rest_delete`: DELETE 200 `{"success": true}`, then GET 404
///
/// ## Extras
/// - `test_rest_totals`, `test_rest_preview`, `test_rest_health`
///
/// ## Error handling
/// - invalid / missing id → 400, unknown id → 404
/// - invalid POST / PUT body → 400, PUT leaves the invoice unchanged
/// - amounts too large to total → stored on create, 400 from `/invoices/totals`
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum_test::TestServer;
            use invoice::server::ServerBuilder;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                let router = ServerBuilder::new().with_store(store).build().unwrap();
                TestServer::try_new(router).unwrap()
            }

            async fn create(server: &TestServer, body: Value) -> Value {
                let response = server.post("/invoices").json(&body).await;
                response.assert_status_ok();
                response.json()
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;
                let body = create(&server, browser_draft_json()).await;

                assert!(body["id"].as_i64().unwrap() > 0);
                assert_eq!(body["customerName"], "U Ba");
                assert_eq!(body["date"], "2025-05-20");
                assert_eq!(body["status"], "pending");
                assert_eq!(body["totalUsd"].as_f64(), Some(100.0));
                assert_eq!(body["totalThb"].as_f64(), Some(3500.0));
                assert_eq!(body["finalMmk"].as_f64(), Some(289.8));
                assert_eq!(body["items"].as_array().unwrap().len(), 2);
                assert_eq!(body["items"][0]["description"], "Consulting");
                assert_eq!(body["items"][0]["invoiceId"], body["id"]);
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, sample_draft_json("Ma Thida", &["12.5"])).await;
                let id = created["id"].as_i64().unwrap();

                let response = server.get("/invoices").add_query_param("id", id).await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["id"], id);
                assert_eq!(body["customerName"], "Ma Thida");
                assert_eq!(body["items"][0]["amount"].as_f64(), Some(12.5));
            }

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;
                let first = create(&server, sample_draft_json("First", &["1"])).await;
                let second = create(&server, sample_draft_json("Second", &["2"])).await;

                let response = server.get("/invoices").await;
                response.assert_status_ok();

                let body: Value = response.json();
                let invoices = body.as_array().unwrap();
                assert_eq!(invoices.len(), 2);
                assert_eq!(invoices[0]["id"], second["id"]);
                assert_eq!(invoices[1]["id"], first["id"]);
            }

            #[tokio::test]
            async fn test_rest_update() {
                let server = make_server().await;
                let created = create(&server, sample_draft_json("Old", &["1", "2", "3"])).await;
                let id = created["id"].as_i64().unwrap();

                let response = server
                    .put("/invoices")
                    .add_query_param("id", id)
                    .json(&sample_draft_json("New", &["9"]))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!({ "success": true }));

                let body: Value = server
                    .get("/invoices")
                    .add_query_param("id", id)
                    .await
                    .json();
                assert_eq!(body["customerName"], "New");
                assert_eq!(body["status"], "pending");
                assert_eq!(body["items"].as_array().unwrap().len(), 1);
                assert_eq!(body["items"][0]["amount"].as_f64(), Some(9.0));
            }

            #[tokio::test]
            async fn test_rest_patch_status() {
                let server = make_server().await;
                let created = create(&server, browser_draft_json()).await;
                let id = created["id"].as_i64().unwrap();

                let response = server
                    .patch("/invoices")
                    .add_query_param("id", id)
                    .json(&json!({ "status": "paid" }))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["id"], id);
                assert_eq!(body["status"], "paid");
                assert_eq!(body["customerName"], "U Ba");
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create(&server, browser_draft_json()).await;
                let id = created["id"].as_i64().unwrap();

                let response = server.delete("/invoices").add_query_param("id", id).await;
                response.assert_status_ok();
                response.assert_json(&json!({ "success": true }));

                let response = server.get("/invoices").add_query_param("id", id).await;
                response.assert_status_not_found();
                response.assert_json(&json!({ "error": "Invoice not found" }));
            }

            // ==============================================================
            // Extras
            // ==============================================================

            #[tokio::test]
            async fn test_rest_totals() {
                let server = make_server().await;

                let response = server
                    .post("/invoices/totals")
                    .json(&json!({ "items": [{ "amount": 60 }, { "amount": "40" }] }))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!({
                    "usd": "100.00",
                    "thb": "3500.00",
                    "mmk": "315.00",
                    "final": "289.80",
                    "finalThb": "3220.00",
                    "reductionPercent": 8.0
                }));
            }

            #[tokio::test]
            async fn test_rest_totals_with_rates() {
                let server = make_server().await;

                let body: Value = server
                    .post("/invoices/totals")
                    .json(&json!({
                        "items": [{ "description": "A", "amount": 10 }],
                        "usdToThbRate": 36.5,
                        "thbToMmkRate": "0.1"
                    }))
                    .await
                    .json();
                assert_eq!(body["thb"], "365.00");
                assert_eq!(body["mmk"], "36.50");
                assert_eq!(body["final"], "33.58");
            }

            #[tokio::test]
            async fn test_rest_preview() {
                let server = make_server().await;
                let created = create(&server, browser_draft_json()).await;
                let id = created["id"].as_i64().unwrap();

                let response = server
                    .get("/invoices/preview")
                    .add_query_param("id", id)
                    .await;
                response.assert_status_ok();

                let html = response.text();
                assert!(html.contains(&format!("#{}", id)));
                assert!(html.contains("U Ba"));
                assert!(html.contains("K289.80"));
            }

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server().await;
                for path in ["/health", "/healthz"] {
                    let response = server.get(path).await;
                    response.assert_status_ok();
                    response.assert_json(&json!({ "status": "ok", "service": "invoice-rs" }));
                }
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_error_invalid_id() {
                let server = make_server().await;

                let response = server.get("/invoices").add_query_param("id", "abc").await;
                response.assert_status_bad_request();
                response.assert_json(&json!({ "error": "Invalid invoice ID" }));

                let response = server.delete("/invoices").await;
                response.assert_status_bad_request();
                response.assert_json(&json!({ "error": "Invalid invoice ID" }));

                let response = server
                    .patch("/invoices")
                    .json(&json!({ "status": "paid" }))
                    .await;
                response.assert_status_bad_request();
            }

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;

                let response = server.get("/invoices").add_query_param("id", 777).await;
                response.assert_status_not_found();

                let response = server
                    .put("/invoices")
                    .add_query_param("id", 777)
                    .json(&browser_draft_json())
                    .await;
                response.assert_status_not_found();

                let response = server
                    .patch("/invoices")
                    .add_query_param("id", 777)
                    .json(&json!({ "status": "paid" }))
                    .await;
                response.assert_status_not_found();

                let response = server.delete("/invoices").add_query_param("id", 777).await;
                response.assert_status_not_found();
                response.assert_json(&json!({ "error": "Invoice not found" }));
            }

            #[tokio::test]
            async fn test_rest_error_invalid_body() {
                let server = make_server().await;

                let mut body = browser_draft_json();
                body["items"] = json!([]);
                let response = server.post("/invoices").json(&body).await;
                response.assert_status_bad_request();
                let error: Value = response.json();
                assert!(error["error"].as_str().unwrap().contains("items"));

                let mut body = browser_draft_json();
                body["customerName"] = json!("   ");
                let response = server.post("/invoices").json(&body).await;
                response.assert_status_bad_request();

                let created = create(&server, browser_draft_json()).await;
                let response = server
                    .patch("/invoices")
                    .add_query_param("id", created["id"].as_i64().unwrap())
                    .json(&json!({ "status": "cancelled" }))
                    .await;
                response.assert_status_bad_request();

                // Nothing was stored by the rejected requests
                let listed: Value = server.get("/invoices").await.json();
                assert_eq!(listed.as_array().unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_rest_error_invalid_update_body() {
                let server = make_server().await;
                let created = create(&server, browser_draft_json()).await;
                let id = created["id"].as_i64().unwrap();

                let mut empty_items = browser_draft_json();
                empty_items["items"] = json!([]);
                let mut blank_customer = browser_draft_json();
                blank_customer["customerName"] = json!("   ");
                let mut zero_rate = browser_draft_json();
                zero_rate["usdToThbRate"] = json!(0);

                for body in [empty_items, blank_customer, zero_rate] {
                    let response = server
                        .put("/invoices")
                        .add_query_param("id", id)
                        .json(&body)
                        .await;
                    response.assert_status_bad_request();
                    let error: Value = response.json();
                    assert!(error["error"].as_str().unwrap().starts_with("Invalid request body"));
                }

                let fetched: Value = server
                    .get("/invoices")
                    .add_query_param("id", id)
                    .await
                    .json();
                assert_eq!(fetched, created);
            }

            #[tokio::test]
            async fn test_rest_oversized_amounts() {
                let server = make_server().await;
                let huge = "50000000000000000000000000000";

                // Totals are stored as submitted even when they cannot be recomputed
                let mut body = browser_draft_json();
                body["items"] = json!([
                    { "description": "A", "amount": huge },
                    { "description": "B", "amount": huge }
                ]);
                let created = create(&server, body).await;
                assert_eq!(created["items"].as_array().unwrap().len(), 2);
                assert_eq!(created["finalMmk"].as_f64(), Some(289.8));

                let response = server
                    .post("/invoices/totals")
                    .json(&json!({ "items": [{ "amount": huge }, { "amount": huge }] }))
                    .await;
                response.assert_status_bad_request();
                let error: Value = response.json();
                assert!(error["error"].as_str().unwrap().contains("too large"));

                let response = server
                    .post("/invoices/totals")
                    .json(&json!({
                        "items": [{ "amount": "1000000000000000000000000000" }],
                        "usdToThbRate": 1000
                    }))
                    .await;
                response.assert_status_bad_request();
            }
        }
    };
}
