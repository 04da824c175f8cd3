use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use listing_alerts::config::WebhookConfig;
use listing_alerts::workflows::intake::{intake_router, ListingIntakeService};
use listing_alerts::workflows::notify::NotificationDispatcher;
use listing_alerts::workflows::profiles::ProfileSource;
use listing_alerts::workflows::realworks::ListingFetcher;

pub(crate) fn with_operational_routes<F, P, D>(
    service: Arc<ListingIntakeService<F, P, D>>,
    webhook: WebhookConfig,
) -> Router
where
    F: ListingFetcher + 'static,
    P: ProfileSource + 'static,
    D: NotificationDispatcher + 'static,
{
    intake_router(service, webhook)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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
