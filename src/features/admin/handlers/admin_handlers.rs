use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::admin::dtos::ApproveTicketResponseDto;
use crate::features::admin::services::AdminService;
use crate::features::tickets::dtos::TicketResponseDto;
use crate::features::tickets::extractors::TicketId;
use crate::features::tickets::models::TicketStatus;
use crate::shared::types::{ErrorResponse, MessageResponse};

/// List pending tickets (newest first)
#[utoipa::path(
    get,
    path = "/api/admin/pending",
    responses(
        (status = 200, description = "Pending tickets", body = Vec<TicketResponseDto>),
    ),
    tag = "admin"
)]
pub async fn list_pending(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<Vec<TicketResponseDto>>> {
    Ok(Json(service.list_by_status(TicketStatus::Pending).await?))
}

/// List confirmed tickets (newest first)
#[utoipa::path(
    get,
    path = "/api/admin/approved",
    responses(
        (status = 200, description = "Confirmed tickets", body = Vec<TicketResponseDto>),
    ),
    tag = "admin"
)]
pub async fn list_approved(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<Vec<TicketResponseDto>>> {
    Ok(Json(service.list_by_status(TicketStatus::Confirmed).await?))
}

/// List rejected tickets (newest first)
#[utoipa::path(
    get,
    path = "/api/admin/rejected",
    responses(
        (status = 200, description = "Rejected tickets", body = Vec<TicketResponseDto>),
    ),
    tag = "admin"
)]
pub async fn list_rejected(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<Vec<TicketResponseDto>>> {
    Ok(Json(service.list_by_status(TicketStatus::Rejected).await?))
}

/// Approve a pending ticket
///
/// Assigns the next sequential ticket number.
#[utoipa::path(
    post,
    path = "/api/admin/approve/{id}",
    params(
        ("id" = String, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket approved", body = ApproveTicketResponseDto),
        (status = 400, description = "Ticket is not pending", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn approve_ticket(
    State(service): State<Arc<AdminService>>,
    TicketId(id): TicketId,
) -> Result<Json<ApproveTicketResponseDto>> {
    Ok(Json(service.approve(id).await?))
}

/// Reject a pending ticket
#[utoipa::path(
    post,
    path = "/api/admin/reject/{id}",
    params(
        ("id" = String, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket rejected", body = MessageResponse),
        (status = 400, description = "Ticket is not pending", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn reject_ticket(
    State(service): State<Arc<AdminService>>,
    TicketId(id): TicketId,
) -> Result<Json<MessageResponse>> {
    service.reject(id).await?;
    Ok(Json(MessageResponse::new("Ticket rejected successfully.")))
}

/// Delete a confirmed or rejected ticket
///
/// Pending tickets must be rejected first. The payment slip is removed
/// best-effort.
#[utoipa::path(
    delete,
    path = "/api/admin/ticket/{id}",
    params(
        ("id" = String, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket deleted", body = MessageResponse),
        (status = 400, description = "Ticket is still pending", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_ticket(
    State(service): State<Arc<AdminService>>,
    TicketId(id): TicketId,
) -> Result<Json<MessageResponse>> {
    service.delete(id).await?;
    Ok(Json(MessageResponse::new("Ticket deleted successfully.")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;
    use uuid::Uuid;

    use crate::shared::test_helpers::test_app;

    #[tokio::test]
    async fn test_approvals_assign_sequential_numbers() {
        let app = test_app();
        let alice = app.submit("Alice").await;
        let bob = app.submit("Bob").await;

        let response = app.server.post(&format!("/api/admin/approve/{}", alice)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Ticket approved successfully.");
        assert_eq!(body["ticketNumber"], "1");

        let body: Value = app
            .server
            .post(&format!("/api/admin/approve/{}", bob))
            .await
            .json();
        assert_eq!(body["ticketNumber"], "2");

        let ticket: Value = app.server.get(&format!("/api/ticket/{}", alice)).await.json();
        assert_eq!(ticket["status"], "confirmed");
        assert_eq!(ticket["ticketNumber"], "1");
    }

    #[tokio::test]
    async fn test_approving_twice_is_a_state_conflict() {
        let app = test_app();
        let id = app.submit("Alice").await;

        app.server
            .post(&format!("/api/admin/approve/{}", id))
            .await
            .assert_status_ok();

        let response = app.server.post(&format!("/api/admin/approve/{}", id)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Only pending tickets can be approved."
        );
    }

    #[tokio::test]
    async fn test_rejected_ticket_cannot_be_approved() {
        let app = test_app();
        let id = app.submit("Alice").await;

        let response = app.server.post(&format!("/api/admin/reject/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["message"],
            "Ticket rejected successfully."
        );

        app.server
            .post(&format!("/api/admin/approve/{}", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        app.server
            .post(&format!("/api/admin/reject/{}", id))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let ticket: Value = app.server.get(&format!("/api/ticket/{}", id)).await.json();
        assert_eq!(ticket["status"], "rejected");
        assert!(ticket["ticketNumber"].is_null());
    }

    #[tokio::test]
    async fn test_delete_pending_ticket_is_refused() {
        let app = test_app();
        let id = app.submit("Alice").await;

        let response = app.server.delete(&format!("/api/admin/ticket/{}", id)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Cannot delete pending tickets. Reject them instead."
        );
        assert_eq!(app.repository.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_settled_ticket_removes_record_and_slip() {
        let app = test_app();
        let id = app.submit("Alice").await;
        app.server
            .post(&format!("/api/admin/approve/{}", id))
            .await
            .assert_status_ok();

        let response = app.server.delete(&format!("/api/admin/ticket/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["message"],
            "Ticket deleted successfully."
        );

        app.server
            .get(&format!("/api/ticket/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        let remaining = std::fs::read_dir(app.upload_dir.path()).unwrap().count();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_unknown_ticket_is_not_found_everywhere() {
        let app = test_app();
        let id = Uuid::now_v7();

        app.server
            .post(&format!("/api/admin/approve/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .post(&format!("/api/admin/reject/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .delete(&format!("/api/admin/ticket/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .post("/api/admin/approve/12345")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listings_filter_by_status_newest_first() {
        let app = test_app();
        let first = app.submit("Alice").await;
        let second = app.submit("Bob").await;
        let third = app.submit("Carol").await;
        let fourth = app.submit("Dave").await;

        app.server
            .post(&format!("/api/admin/approve/{}", first))
            .await
            .assert_status_ok();
        app.server
            .post(&format!("/api/admin/reject/{}", second))
            .await
            .assert_status_ok();

        let ids = |body: Value| -> Vec<String> {
            body.as_array()
                .unwrap()
                .iter()
                .map(|t| t["_id"].as_str().unwrap().to_string())
                .collect()
        };

        let pending = ids(app.server.get("/api/admin/pending").await.json());
        assert_eq!(pending, vec![fourth.to_string(), third.to_string()]);

        let approved = ids(app.server.get("/api/admin/approved").await.json());
        assert_eq!(approved, vec![first.to_string()]);

        let rejected = ids(app.server.get("/api/admin/rejected").await.json());
        assert_eq!(rejected, vec![second.to_string()]);
    }

    #[tokio::test]
    async fn test_empty_listing_is_an_empty_array() {
        let app = test_app();

        let response = app.server.get("/api/admin/approved").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), serde_json::json!([]));
    }
}
