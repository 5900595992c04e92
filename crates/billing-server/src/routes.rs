//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{card_form, check_card, health_check, list_processed, register_payment};
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register_payment))
        .route("/payments/card/form", get(card_form))
        .route("/luhn", post(check_card))
        .route("/processed", get(list_processed))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
