use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::tickets::{
    dtos as tickets_dtos, handlers as tickets_handlers, models as tickets_models,
};
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Tickets (public)
        tickets_handlers::submit_ticket,
        tickets_handlers::get_ticket,
        // Admin review
        admin_handlers::list_pending,
        admin_handlers::list_approved,
        admin_handlers::list_rejected,
        admin_handlers::approve_ticket,
        admin_handlers::reject_ticket,
        admin_handlers::delete_ticket,
    ),
    components(
        schemas(
            // Shared
            MessageResponse,
            ErrorResponse,
            // Tickets
            tickets_models::TicketStatus,
            tickets_dtos::TicketResponseDto,
            tickets_dtos::SubmitTicketForm,
            tickets_dtos::SubmitTicketResponseDto,
            // Admin
            admin_dtos::ApproveTicketResponseDto,
        )
    ),
    tags(
        (name = "tickets", description = "Ticket submission and lookup"),
        (name = "admin", description = "Review of submitted tickets"),
    ),
    info(
        title = "Slip Ticketing API",
        version = "0.1.0",
        description = "Ticket submission and approval API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
