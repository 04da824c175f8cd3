use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::service::ListingIntakeService;
use super::ListingEvaluation;
use crate::config::WebhookConfig;
use crate::error::AppError;
use crate::workflows::notify::NotificationDispatcher;
use crate::workflows::profiles::ProfileSource;
use crate::workflows::realworks::ListingFetcher;

struct IntakeState<F, P, D> {
    service: Arc<ListingIntakeService<F, P, D>>,
    verify_token: Option<String>,
}

/// Realworks webhook body; only the object link is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealworksWebhook {
    #[serde(rename = "objectUrl", default)]
    pub object_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VerificationParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Router exposing the Realworks webhook, a dry-run evaluation endpoint, and the Meta webhook
/// verification handshake.
pub fn intake_router<F, P, D>(
    service: Arc<ListingIntakeService<F, P, D>>,
    webhook: WebhookConfig,
) -> Router
where
    F: ListingFetcher + 'static,
    P: ProfileSource + 'static,
    D: NotificationDispatcher + 'static,
{
    let state = Arc::new(IntakeState {
        service,
        verify_token: webhook.verify_token,
    });

    Router::new()
        .route("/realworks", post(realworks_handler::<F, P, D>))
        .route(
            "/api/v1/listings/evaluate",
            post(evaluate_handler::<F, P, D>),
        )
        .route(
            "/",
            axum::routing::get(verification_handler::<F, P, D>)
                .post(messaging_callback_handler),
        )
        .with_state(state)
}

/// Always acknowledges events it cannot use so Realworks does not keep retrying them.
async fn realworks_handler<F, P, D>(
    State(state): State<Arc<IntakeState<F, P, D>>>,
    body: Bytes,
) -> Result<Response, AppError>
where
    F: ListingFetcher + 'static,
    P: ProfileSource + 'static,
    D: NotificationDispatcher + 'static,
{
    let webhook = match serde_json::from_slice::<RealworksWebhook>(&body) {
        Ok(webhook) => webhook,
        Err(err) => {
            if !body.is_empty() {
                warn!(error = %err, "unreadable realworks webhook body");
            }
            RealworksWebhook::default()
        }
    };

    let Some(object_url) = webhook.object_url.filter(|url| !url.trim().is_empty()) else {
        warn!("realworks webhook without objectUrl ignored");
        return Ok((StatusCode::OK, Json(json!({ "status": "ignored" }))).into_response());
    };

    info!(%object_url, "realworks webhook received");
    let report = state.service.process(&object_url).await?;
    Ok((StatusCode::OK, Json(report)).into_response())
}

async fn evaluate_handler<F, P, D>(
    State(state): State<Arc<IntakeState<F, P, D>>>,
    Json(raw): Json<Value>,
) -> Result<Json<ListingEvaluation>, AppError>
where
    F: ListingFetcher + 'static,
    P: ProfileSource + 'static,
    D: NotificationDispatcher + 'static,
{
    let evaluation = state.service.evaluate(&raw).await?;
    Ok(Json(evaluation))
}

async fn verification_handler<F, P, D>(
    State(state): State<Arc<IntakeState<F, P, D>>>,
    Query(params): Query<VerificationParams>,
) -> Response
where
    F: ListingFetcher + 'static,
    P: ProfileSource + 'static,
    D: NotificationDispatcher + 'static,
{
    let subscribed = params.mode.as_deref() == Some("subscribe");
    let token_matches = match (&state.verify_token, &params.verify_token) {
        (Some(expected), Some(provided)) => expected == provided,
        _ => false,
    };

    if subscribed && token_matches {
        info!("messaging webhook verified");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

async fn messaging_callback_handler(Json(payload): Json<Value>) -> StatusCode {
    info!(%payload, "messaging webhook callback received");
    StatusCode::OK
}
