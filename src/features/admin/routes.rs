use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin review routes, nested under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/pending", get(handlers::list_pending))
        .route("/approved", get(handlers::list_approved))
        .route("/rejected", get(handlers::list_rejected))
        .route("/approve/{id}", post(handlers::approve_ticket))
        .route("/reject/{id}", post(handlers::reject_ticket))
        .route("/ticket/{id}", delete(handlers::delete_ticket))
        .with_state(admin_service)
}
