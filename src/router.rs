use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        // Cabinet routes
        .route("/api/cabinets", get(handlers::cabinets::list_cabinets))
        .route("/api/cabinets", post(handlers::cabinets::create_cabinet))
        .route("/api/cabinets/:id", get(handlers::cabinets::get_cabinet))
        .route("/api/cabinets/:id", put(handlers::cabinets::update_cabinet))
        .route("/api/cabinets/:id", delete(handlers::cabinets::delete_cabinet))
        // Hardware routes
        .route("/api/hardware", get(handlers::hardware::list_hardware))
        .route("/api/hardware", post(handlers::hardware::create_hardware))
        .route("/api/hardware/:id", get(handlers::hardware::get_hardware))
        .route("/api/hardware/:id", put(handlers::hardware::update_hardware))
        .route("/api/hardware/:id", delete(handlers::hardware::delete_hardware))
        // Aggregation routes
        .route("/api/aggregations/status", get(handlers::aggregations::status_breakdown))
        .route("/api/aggregations/occupancy", get(handlers::aggregations::occupancy))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::Store;

    async fn app_with(config: Config) -> Router {
        let store = Store::in_memory().await.unwrap();
        build(Arc::new(AppState { store, config }))
    }

    async fn app() -> Router {
        app_with(Config::default()).await
    }

    async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, String) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                req = req.header("content-type", "application/json");
                Body::from(b)
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    fn cabinet_body(name: &str) -> Value {
        json!({
            "name": name,
            "row_position": 1,
            "column_position": 1,
            "total_rack_units": 42,
            "location": "Podatkovni Centar 1"
        })
    }

    fn hardware_body(cabinet_id: i64, serial_number: i64, span: i64) -> Value {
        json!({
            "equipment_type": "Server",
            "manufacturer": "HP",
            "model": "ProLiant DL380 Gen10",
            "serial_number": serial_number,
            "install_date": "2023-01-15T00:00:00Z",
            "status": "Aktivan",
            "service_date": "2024-01-15T00:00:00Z",
            "slot_position": 1,
            "rack_unit_span": span,
            "cabinet_id": cabinet_id
        })
    }

    async fn create_cabinet(app: &Router, name: &str) -> i64 {
        let (status, body) = send(app, Method::POST, "/api/cabinets", Some(cabinet_body(name))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn create_hardware(app: &Router, cabinet_id: i64, serial_number: i64, span: i64) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/hardware",
            Some(hardware_body(cabinet_id, serial_number, span)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_healthcheck() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_cabinet_create_then_get() {
        let app = app().await;
        let (status, created) = send(&app, Method::POST, "/api/cabinets", Some(cabinet_body("ORMAR-A1"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, detail) = send(&app, Method::GET, &format!("/api/cabinets/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        for key in ["id", "name", "row_position", "column_position", "total_rack_units", "location"] {
            assert_eq!(detail[key], created[key], "field {}", key);
        }
        assert_eq!(detail["hardware"], json!([]));

        let (status, list) = send(&app, Method::GET, "/api/cabinets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([created]));
    }

    #[tokio::test]
    async fn test_cabinet_not_found() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/cabinets/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        let (status, _) = send(&app, Method::PUT, "/api/cabinets/7", Some(json!({ "name": "X" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/api/cabinets/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cabinet_validation_errors() {
        let app = app().await;

        let mut missing = cabinet_body("ORMAR-A1");
        missing.as_object_mut().unwrap().remove("location");
        let (status, body) = send(&app, Method::POST, "/api/cabinets", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "location is required");

        let mut extra = cabinet_body("ORMAR-A1");
        extra["owner"] = json!("someone");
        let (status, _) = send(&app, Method::POST, "/api/cabinets", Some(extra)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut wrong_type = cabinet_body("ORMAR-A1");
        wrong_type["total_rack_units"] = json!("forty-two");
        let (status, _) = send(&app, Method::POST, "/api/cabinets", Some(wrong_type)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, text) = send_raw(&app, Method::POST, "/api/cabinets", Some("{not json".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.contains("\"error\""));

        let (status, _) = send(&app, Method::GET, "/api/cabinets/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(send(&app, Method::GET, "/api/cabinets", None).await.1, json!([]));
    }

    #[tokio::test]
    async fn test_cabinet_partial_update() {
        let app = app().await;
        let id = create_cabinet(&app, "ORMAR-A1").await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/cabinets/{}", id),
            Some(json!({ "location": "Podatkovni Centar 2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"], "Podatkovni Centar 2");
        assert_eq!(body["name"], "ORMAR-A1");
        assert_eq!(body["total_rack_units"], 42);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/cabinets/{}", id),
            Some(json!({ "total_rack_units": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hardware_embeds_cabinet() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        let id = create_hardware(&app, cabinet_id, 1001, 2).await;

        let (status, unit) = send(&app, Method::GET, &format!("/api/hardware/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unit["cabinet"]["id"], cabinet_id);
        assert_eq!(unit["cabinet"]["name"], "ORMAR-A1");
        assert_eq!(unit["serial_number"], 1001);
        assert_eq!(unit["install_date"], "2023-01-15T00:00:00Z");
        assert_eq!(unit["service_date"], "2024-01-15T00:00:00Z");

        let (_, list) = send(&app, Method::GET, "/api/hardware", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["cabinet"]["total_rack_units"], 42);

        let (_, detail) = send(&app, Method::GET, &format!("/api/cabinets/{}", cabinet_id), None).await;
        assert_eq!(detail["hardware"][0]["id"], id);
    }

    #[tokio::test]
    async fn test_hardware_unknown_cabinet_is_not_found() {
        let app = app().await;
        let (status, body) = send(&app, Method::POST, "/api/hardware", Some(hardware_body(99, 1001, 1))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Cabinet not found: 99");

        let (_, list) = send(&app, Method::GET, "/api/hardware", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_serial_number() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        let first = create_hardware(&app, cabinet_id, 1001, 1).await;

        let (status, body) = send(&app, Method::POST, "/api/hardware", Some(hardware_body(cabinet_id, 1001, 2))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("1001"));

        let (_, list) = send(&app, Method::GET, "/api/hardware", None).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], first);
        assert_eq!(list[0]["rack_unit_span"], 1);
    }

    #[tokio::test]
    async fn test_bad_timestamp_is_rejected() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;

        let mut body = hardware_body(cabinet_id, 1001, 1);
        body["install_date"] = json!("15/01/2023");
        let (status, resp) = send(&app, Method::POST, "/api/hardware", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(resp["error"].as_str().unwrap().contains("install_date"));

        let id = create_hardware(&app, cabinet_id, 1002, 1).await;
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/hardware/{}", id),
            Some(json!({ "service_date": "soon" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_timestamp_offset_is_normalized() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;

        let mut body = hardware_body(cabinet_id, 1001, 1);
        body["install_date"] = json!("2023-01-15T10:00:00+02:00");
        let (status, unit) = send(&app, Method::POST, "/api/hardware", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(unit["install_date"], "2023-01-15T08:00:00Z");
    }

    #[tokio::test]
    async fn test_update_hardware_not_found_cases() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        let id = create_hardware(&app, cabinet_id, 1001, 1).await;

        let (status, _) = send(&app, Method::PUT, "/api/hardware/500", Some(json!({ "status": "Servis" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/hardware/{}", id),
            Some(json!({ "cabinet_id": 500 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Cabinet not found: 500");
    }

    #[tokio::test]
    async fn test_update_without_service_date_keeps_it() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        let id = create_hardware(&app, cabinet_id, 1001, 1).await;
        let uri = format!("/api/hardware/{}", id);

        let (status, unit) = send(&app, Method::PUT, &uri, Some(json!({ "status": "Servis" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unit["status"], "Servis");
        assert_eq!(unit["service_date"], "2024-01-15T00:00:00Z");

        let (status, unit) = send(&app, Method::PUT, &uri, Some(json!({ "service_date": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unit["service_date"], Value::Null);
        assert_eq!(unit["status"], "Servis");
    }

    #[tokio::test]
    async fn test_legacy_update_without_service_date_clears_it() {
        let config = Config {
            clear_service_date_on_omit: true,
            ..Config::default()
        };
        let app = app_with(config).await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        let id = create_hardware(&app, cabinet_id, 1001, 1).await;

        let (_, before) = send(&app, Method::GET, &format!("/api/hardware/{}", id), None).await;
        assert_eq!(before["service_date"], "2024-01-15T00:00:00Z");

        let (status, unit) = send(
            &app,
            Method::PUT,
            &format!("/api/hardware/{}", id),
            Some(json!({ "status": "Servis" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unit["service_date"], Value::Null);
        assert_eq!(unit["install_date"], "2023-01-15T00:00:00Z");
    }

    #[tokio::test]
    async fn test_delete_cabinet_conflict_then_success() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        let hw = create_hardware(&app, cabinet_id, 1001, 1).await;
        let cabinet_uri = format!("/api/cabinets/{}", cabinet_id);

        let (status, body) = send(&app, Method::DELETE, &cabinet_uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, _) = send(&app, Method::GET, &cabinet_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, &format!("/api/hardware/{}", hw), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::DELETE, &format!("/api/hardware/{}", hw), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, body) = send(&app, Method::DELETE, &cabinet_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, Method::GET, &cabinet_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_hardware() {
        let app = app().await;
        let (status, _) = send(&app, Method::DELETE, "/api/hardware/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_aggregation_over_fixtures() {
        let store = Store::in_memory().await.unwrap();
        store.seed_fixtures_if_empty().await.unwrap();
        let app = build(Arc::new(AppState {
            store,
            config: Config::default(),
        }));

        let (status, text) = send_raw(&app, Method::GET, "/api/aggregations/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, r#"{"Aktivan":4,"Servis":1}"#);
    }

    #[tokio::test]
    async fn test_occupancy_aggregation() {
        let app = app().await;
        let cabinet_id = create_cabinet(&app, "ORMAR-A1").await;
        create_hardware(&app, cabinet_id, 1001, 2).await;
        create_hardware(&app, cabinet_id, 1002, 1).await;

        let (status, body) = send(&app, Method::GET, "/api/aggregations/occupancy", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "cabinet_id": cabinet_id,
                "name": "ORMAR-A1",
                "total_rack_units": 42,
                "used_rack_units": 3,
                "occupancy_percent": 7.14
            }])
        );
    }
}
