pub mod booking;
pub mod health;
pub mod results;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/booking/options", get(booking::get_options))
        .route("/api/booking/open", post(booking::open_booking))
        .route("/api/booking", get(booking::get_booking))
        .route("/api/booking/field", post(booking::update_field))
        .route("/api/booking/submit", post(booking::submit_booking))
        .route("/api/booking/cancel", post(booking::cancel_booking))
        .route("/api/results", get(results::get_results))
        .route("/api/meter", get(results::get_meter))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
