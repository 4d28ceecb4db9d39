//! HTTP surface: webhook intake, delivery-endpoint setup, admin projection,
//! and health. Each inbound webhook call is handled independently; all
//! cross-call coordination lives in the store.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use stashbot_core::TelegramBot;
use stashbot_storage::{DataEntryRepository, MessageRepository, UserRepository};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::admin;
use crate::commands::CommandDispatcher;
use crate::wire::UpdatePayload;

/// Header Telegram echoes the configured shared secret in.
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: CommandDispatcher,
    pub api: Arc<TelegramBot>,
    pub users: UserRepository,
    pub entries: DataEntryRepository,
    pub messages: MessageRepository,
    /// When set, webhook calls must carry it or are rejected before any
    /// processing.
    pub webhook_secret: Option<String>,
}

/// Request body for registering the delivery endpoint.
#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub webhook_url: Option<String>,
}

/// Builds the router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route(
            "/telegram/webhook",
            post(receive_update).get(get_webhook_status),
        )
        .route(
            "/telegram/setup",
            post(register_webhook)
                .get(get_bot_info)
                .delete(deregister_webhook),
        )
        .route("/admin/users", get(get_admin_users))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Receives one Telegram update. Secret mismatch rejects with 401 before any
/// identity resolution, logging, or handling; internal failures answer a
/// bare 500 so no detail leaks to the caller.
async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<UpdatePayload>,
) -> Result<Json<Value>, StatusCode> {
    if let Some(secret) = &state.webhook_secret {
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if presented != Some(secret.as_str()) {
            warn!(update_id = update.update_id, "Webhook call with bad secret rejected");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    let update_id = update.update_id;
    if let Some(message) = update.into_message() {
        let incoming = message.into_incoming();
        info!(
            update_id,
            chat_id = incoming.chat_id,
            kind = incoming.kind.as_str(),
            "Received update"
        );
        if let Err(e) = state.dispatcher.dispatch(&incoming).await {
            error!(error = %e, update_id, "Update handling failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    Ok(Json(json!({ "ok": true })))
}

/// Endpoint verification, mirrors the webhook URL for manual checks.
async fn get_webhook_status() -> Json<Value> {
    Json(json!({
        "status": "Telegram webhook endpoint is active",
        "timestamp": Utc::now(),
    }))
}

/// Registers the delivery endpoint with the platform, carrying the
/// configured secret, and returns the bot identity.
async fn register_webhook(
    State(state): State<AppState>,
    Json(request): Json<SetupRequest>,
) -> Result<Json<Value>, StatusCode> {
    let Some(webhook_url) = request.webhook_url else {
        return Err(StatusCode::BAD_REQUEST);
    };

    state
        .api
        .set_webhook(&webhook_url, state.webhook_secret.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to set webhook");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let bot = state.api.identity().await.map_err(|e| {
        error!(error = %e, "Failed to query bot identity");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!(webhook_url = %webhook_url, "Webhook registered");
    Ok(Json(json!({
        "success": true,
        "webhook_url": webhook_url,
        "bot": bot,
    })))
}

async fn get_bot_info(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let bot = state.api.identity().await.map_err(|e| {
        error!(error = %e, "Failed to query bot identity");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(json!({ "bot": bot })))
}

async fn deregister_webhook(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    state.api.delete_webhook().await.map_err(|e| {
        error!(error = %e, "Failed to delete webhook");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Webhook deregistered");
    Ok(Json(json!({ "success": true })))
}

/// Read-only projection of every user with their data and messages.
async fn get_admin_users(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let users = admin::collect_users(&state.users, &state.entries, &state.messages)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to build admin projection");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(json!({
        "count": users.len(),
        "users": users,
    })))
}

async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now() }))
}
