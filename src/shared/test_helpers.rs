//! Shared fixtures for HTTP-level tests.

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use crate::core::router::{api_router, AppServices};
use crate::features::admin::AdminService;
use crate::features::tickets::repositories::InMemoryTicketRepository;
use crate::features::tickets::TicketService;
use crate::modules::storage::{LocalDiskStorage, SlipStorage};

pub const TEST_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

/// Router over an in-memory repository and a temporary upload directory
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryTicketRepository>,
    pub upload_dir: TempDir,
}

pub fn test_app() -> TestApp {
    let upload_dir = TempDir::new().unwrap();
    let repository = Arc::new(InMemoryTicketRepository::new());
    let storage = Arc::new(SlipStorage::local_only(LocalDiskStorage::new(
        upload_dir.path(),
    )));

    let app = api_router(AppServices {
        ticket_service: Arc::new(TicketService::new(repository.clone(), storage.clone())),
        admin_service: Arc::new(AdminService::new(repository.clone(), storage)),
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_size: TEST_MAX_UPLOAD_SIZE,
    });

    TestApp {
        server: TestServer::new(app).unwrap(),
        repository,
        upload_dir,
    }
}

pub fn slip_part(file_name: &str, data: &'static [u8]) -> Part {
    Part::bytes(data).file_name(file_name).mime_type("image/png")
}

pub fn submission_form(name: &str, user_id: &str, whatsapp_number: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name.to_string())
        .add_text("userId", user_id.to_string())
        .add_text("whatsappNumber", whatsapp_number.to_string())
        .add_part("paymentSlip", slip_part("slip.png", b"\x89PNG-slip"))
}

impl TestApp {
    /// Submit a valid ticket and return its id
    pub async fn submit(&self, name: &str) -> Uuid {
        let response = self
            .server
            .post("/api/submit")
            .multipart(submission_form(name, "123456789012", "+1555"))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        body["ticketId"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .unwrap()
    }
}
