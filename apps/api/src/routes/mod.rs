pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::chat::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/chat",
            post(handlers::handle_chat).options(handlers::handle_chat_options),
        )
        .route("/chat/greeting", get(handlers::handle_greeting))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
