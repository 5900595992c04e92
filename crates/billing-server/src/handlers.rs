//! HTTP Handlers

use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};

use billing_core::{
    CardNumber, NewPayment, PaymentError, PaymentId, PendingPayment, ProcessedPayment,
};

use crate::state::AppState;

/// Body returned when the card passes the checksum
pub const PAYMENT_SUCCEEDED: &str = "Payment is successful!";

/// Body returned when the card fails the checksum
pub const PAYMENT_FAILED: &str = "Payment is unsuccessful";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub pending_ttl_secs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CardSubmission {
    #[serde(rename = "cardNumber", default)]
    pub card_number: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

/// Map a billing error onto a status code and error body
fn payment_error(err: &PaymentError) -> ApiError {
    match err {
        PaymentError::InvalidCard(_) => {
            api_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), "INVALID_CARD")
        }
        PaymentError::InvalidPayment(_) => {
            api_error(StatusCode::BAD_REQUEST, err.to_string(), "INVALID_PAYMENT")
        }
        PaymentError::InvalidSessionId(_) => {
            api_error(StatusCode::BAD_REQUEST, err.user_message(), "INVALID_SESSION")
        }
        PaymentError::SessionNotFound(_) => {
            api_error(StatusCode::NOT_FOUND, err.user_message(), "SESSION_NOT_FOUND")
        }
        PaymentError::Storage(_) => {
            tracing::error!("Storage error: {}", err);
            api_error(StatusCode::SERVICE_UNAVAILABLE, err.user_message(), "STORAGE_ERROR")
        }
        PaymentError::Config(_) => {
            tracing::error!("Configuration error: {}", err);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, err.user_message(), "CONFIG_ERROR")
        }
    }
}

/// Resolve a `sessionId` to a live pending payment
async fn find_session(state: &AppState, session_id: &str) -> Result<PendingPayment, ApiError> {
    let id = PaymentId::parse(session_id).map_err(|e| payment_error(&e))?;

    state
        .store
        .find_pending(&id)
        .await
        .map_err(|e| payment_error(&e))?
        .ok_or_else(|| payment_error(&PaymentError::SessionNotFound(id.to_string())))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        pending_ttl_secs: state.store.pending_ttl().num_seconds(),
    })
}

/// Register a pending payment and hand back its card form URL
pub async fn register_payment(
    State(state): State<AppState>,
    Json(payload): Json<NewPayment>,
) -> Result<Json<RegisterResponse>, ApiError> {
    payload.validate().map_err(|e| payment_error(&e))?;

    let pending = PendingPayment::from(payload);
    let value = pending.value;
    let id = state
        .store
        .insert_pending(pending)
        .await
        .map_err(|e| payment_error(&e))?;

    tracing::info!(session_id = %id, %value, "Registered pending payment");

    Ok(Json(RegisterResponse {
        url: format!(
            "{}/payments/card/form?sessionId={}",
            state.config.public_base_url, id
        ),
    }))
}

/// Card entry form for a pending payment
pub async fn card_form(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Html<String>, ApiError> {
    let pending = find_session(&state, &query.session_id).await?;

    let page = state.card_form.render(&pending).map_err(|e| {
        tracing::error!("Card form render error: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not render the payment form.",
            "RENDER_ERROR",
        )
    })?;

    Ok(Html(page))
}

/// Validate a submitted card number and record the payment if it passes
pub async fn check_card(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    Form(submission): Form<CardSubmission>,
) -> Result<Html<&'static str>, ApiError> {
    let pending = find_session(&state, &query.session_id).await?;

    let card = CardNumber::parse(&submission.card_number).map_err(|e| {
        tracing::info!(session_id = %pending.id, reason = %e, "Rejected malformed card number");
        payment_error(&PaymentError::from(e))
    })?;

    if !card.is_valid() {
        tracing::info!(session_id = %pending.id, card = %card, "Card number failed checksum");
        return Ok(Html(PAYMENT_FAILED));
    }

    let processed = ProcessedPayment::from_pending(&pending, &card);
    let processed_id = state
        .store
        .insert_processed(processed)
        .await
        .map_err(|e| payment_error(&e))?;

    tracing::info!(
        session_id = %pending.id,
        payment_id = %processed_id,
        card = %card,
        "Payment processed"
    );

    Ok(Html(PAYMENT_SUCCEEDED))
}

/// List processed payments
pub async fn list_processed(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProcessedPayment>>, ApiError> {
    let payments = state
        .store
        .list_processed()
        .await
        .map_err(|e| payment_error(&e))?;

    Ok(Json(payments))
}
