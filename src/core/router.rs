use std::path::Path;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::tickets::{routes as tickets_routes, TicketService};

/// Everything the HTTP surface needs, built once at startup
pub struct AppServices {
    pub ticket_service: Arc<TicketService>,
    pub admin_service: Arc<AdminService>,
    pub upload_dir: std::path::PathBuf,
    pub max_upload_size: usize,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// API routes, the `/uploads` file route, and the health check
pub fn api_router(services: AppServices) -> Router {
    Router::new()
        .merge(tickets_routes::routes(
            services.ticket_service,
            services.max_upload_size,
        ))
        .nest("/api/admin", admin_routes::routes(services.admin_service))
        .nest_service("/uploads", ServeDir::new(&services.upload_dir))
        .route("/health", get(health_check))
}

/// Serve a front-end build for every path the API does not handle
pub fn with_static_fallback(router: Router, static_dir: &Path) -> Router {
    let index = static_dir.join("index.html");
    router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
}
