mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::router::{api_router, with_static_fallback, AppServices};
use crate::core::{database, middleware};
use crate::features::admin::AdminService;
use crate::features::tickets::{PgTicketRepository, TicketRepository, TicketService};
use crate::modules::storage::{FileStorage, LocalDiskStorage, MinIOClient, SlipStorage};
use axum::{extract::Request, middleware::from_fn, middleware::Next, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Local disk is always available: it serves /uploads and older slips
    let local_storage = LocalDiskStorage::new(&config.storage.upload_dir);
    local_storage
        .ensure_dir_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare upload directory: {}", e))?;
    tracing::info!(
        "Upload directory ready: {}",
        local_storage.upload_dir().display()
    );

    let object_storage: Option<Arc<dyn FileStorage>> = match config.storage.minio.clone() {
        Some(minio_config) => {
            let client = MinIOClient::new(minio_config)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?;
            tracing::info!("MinIO storage enabled for bucket: {}", client.bucket_name());
            let client: Arc<dyn FileStorage> = Arc::new(client);
            Some(client)
        }
        None => {
            tracing::info!("MinIO credentials not configured, storing slips on local disk");
            None
        }
    };

    let slip_storage = Arc::new(SlipStorage::new(Arc::new(local_storage), object_storage));

    let repository: Arc<dyn TicketRepository> = Arc::new(PgTicketRepository::new(pool.clone()));
    let ticket_service = Arc::new(TicketService::new(
        Arc::clone(&repository),
        Arc::clone(&slip_storage),
    ));
    let admin_service = Arc::new(AdminService::new(repository, slip_storage));
    tracing::info!("Ticket and admin services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        let credentials = Arc::new(credentials);
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(move |req: Request, next: Next| {
                middleware::basic_auth(Arc::clone(&credentials), req, next)
            }))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let api = api_router(AppServices {
        ticket_service,
        admin_service,
        upload_dir: config.storage.upload_dir.clone(),
        max_upload_size: config.app.max_request_body_size,
    });

    let mut app = Router::new().merge(swagger).merge(api);
    if let Some(static_dir) = &config.app.static_dir {
        tracing::info!("Serving front-end from {}", static_dir.display());
        app = with_static_fallback(app, static_dir);
    }

    let app = app
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
