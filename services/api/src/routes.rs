use crate::catalog::{build_catalog, CatalogView};
use crate::infra::AppState;
use assessment_intake::workflows::intake::{intake_receiver_router, ReceiverStore};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes(store: Arc<ReceiverStore>) -> axum::Router {
    intake_receiver_router(store)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/catalog", axum::routing::get(catalog_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint() -> Json<CatalogView> {
    Json(build_catalog())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let store = Arc::new(ReceiverStore::new("http://127.0.0.1:3000", 1024));
        with_service_routes(store).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let (status, body) = get(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn catalog_endpoint_serves_steps() {
        let (status, body) = get(app(true), "/api/v1/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["steps"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["essay_word_limit"], 300);
    }

    #[tokio::test]
    async fn receiver_routes_are_mounted() {
        let (status, body) = get(app(true), "/files/file-000001/missing.pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "file not found");

        let (status, _) = get(app(true), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}
