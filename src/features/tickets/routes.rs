use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::tickets::handlers;
use crate::features::tickets::services::TicketService;

/// Create routes for the public ticket endpoints
pub fn routes(service: Arc<TicketService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/api/submit",
            post(handlers::submit_ticket).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/api/ticket/{id}", get(handlers::get_ticket))
        .with_state(service)
}
