use std::sync::Arc;

use axum::{
    extract::{multipart::Field, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::tickets::dtos::{
    SubmitTicketDto, SubmitTicketForm, SubmitTicketResponseDto, TicketResponseDto,
};
use crate::features::tickets::extractors::TicketId;
use crate::features::tickets::services::TicketService;
use crate::modules::storage::UploadedFile;
use crate::shared::types::ErrorResponse;
use crate::shared::validation::validation_messages;

const REQUIRED_FIELDS_MESSAGE: &str =
    "Name, userId, whatsappNumber, and payment slip are required.";

/// Submit a ticket with its payment slip
///
/// Accepts multipart/form-data with `name`, `userId` (12 digits),
/// `whatsappNumber`, and the `paymentSlip` file.
#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "tickets",
    request_body(
        content = SubmitTicketForm,
        content_type = "multipart/form-data",
        description = "Submission form with the payment slip file",
    ),
    responses(
        (status = 201, description = "Ticket submitted and pending approval", body = SubmitTicketResponseDto),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Storage or persistence failure", body = ErrorResponse)
    )
)]
pub async fn submit_ticket(
    State(service): State<Arc<TicketService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitTicketResponseDto>)> {
    let mut name: Option<String> = None;
    let mut user_id: Option<String> = None;
    let mut whatsapp_number: Option<String> = None;
    let mut slip: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "name" => name = Some(read_text(field).await?),
            "userId" => user_id = Some(read_text(field).await?),
            "whatsappNumber" => whatsapp_number = Some(read_text(field).await?),
            "paymentSlip" => {
                // A plain text part with this name is not an upload
                let Some(original_name) = field
                    .file_name()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                else {
                    debug!("Ignoring paymentSlip part without a file name");
                    continue;
                };
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                // Browsers send an empty part when no file was chosen
                if !data.is_empty() {
                    slip = Some(UploadedFile {
                        original_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let (Some(name), Some(user_id), Some(whatsapp_number), Some(slip)) =
        (name, user_id, whatsapp_number, slip)
    else {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    let dto = SubmitTicketDto::new(&name, &user_id, &whatsapp_number);
    if dto.name.is_empty() || dto.user_id.is_empty() || dto.whatsapp_number.is_empty() {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }
    dto.validate()
        .map_err(|e| AppError::Validation(validation_messages(&e).join("; ")))?;

    let ticket_id = service.submit(dto, slip).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitTicketResponseDto {
            message: "Ticket submitted successfully and pending approval.".to_string(),
            ticket_id,
        }),
    ))
}

async fn read_text(field: Field<'_>) -> Result<String> {
    let field_name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e)))
}

/// Get ticket by ID
#[utoipa::path(
    get,
    path = "/api/ticket/{id}",
    params(
        ("id" = String, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Ticket found", body = TicketResponseDto),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn get_ticket(
    State(service): State<Arc<TicketService>>,
    TicketId(id): TicketId,
) -> Result<Json<TicketResponseDto>> {
    let ticket = service.get_by_id(id).await?;
    Ok(Json(ticket))
}
