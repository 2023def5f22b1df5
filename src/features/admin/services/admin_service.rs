//! Admin review of submitted tickets: listing, approval, rejection, deletion.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::ApproveTicketResponseDto;
use crate::features::tickets::dtos::TicketResponseDto;
use crate::features::tickets::models::{Ticket, TicketStatus};
use crate::features::tickets::repositories::TicketRepository;
use crate::modules::storage::SlipStorage;

pub struct AdminService {
    repository: Arc<dyn TicketRepository>,
    storage: Arc<SlipStorage>,
}

impl AdminService {
    pub fn new(repository: Arc<dyn TicketRepository>, storage: Arc<SlipStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// All tickets with the given status, newest first
    pub async fn list_by_status(&self, status: TicketStatus) -> Result<Vec<TicketResponseDto>> {
        let tickets = self.repository.list_by_status(status).await?;
        Ok(tickets.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Ticket> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found.".to_string()))
    }

    /// Confirm a pending ticket and assign the next ticket number
    pub async fn approve(&self, id: Uuid) -> Result<ApproveTicketResponseDto> {
        let ticket = self.find(id).await?;
        if ticket.status != TicketStatus::Pending {
            return Err(not_pending("approved"));
        }

        // Another admin may have decided in the meantime
        let confirmed = self
            .repository
            .confirm_pending(id)
            .await?
            .ok_or_else(|| not_pending("approved"))?;

        let ticket_number = confirmed.ticket_number.ok_or_else(|| {
            AppError::Internal(format!("Ticket {} confirmed without a ticket number", id))
        })?;

        tracing::info!("Ticket approved: id={}, ticket_number={}", id, ticket_number);

        Ok(ApproveTicketResponseDto {
            message: "Ticket approved successfully.".to_string(),
            ticket_number: ticket_number.to_string(),
        })
    }

    pub async fn reject(&self, id: Uuid) -> Result<()> {
        let ticket = self.find(id).await?;
        if ticket.status != TicketStatus::Pending {
            return Err(not_pending("rejected"));
        }

        self.repository
            .reject_pending(id)
            .await?
            .ok_or_else(|| not_pending("rejected"))?;

        tracing::info!("Ticket rejected: id={}", id);
        Ok(())
    }

    /// Delete a confirmed or rejected ticket and, best-effort, its payment slip
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let ticket = self.find(id).await?;
        if ticket.status == TicketStatus::Pending {
            return Err(AppError::InvalidState(
                "Cannot delete pending tickets. Reject them instead.".to_string(),
            ));
        }

        if !self.repository.delete_settled(id).await? {
            return Err(AppError::NotFound("Ticket not found.".to_string()));
        }

        let slip = ticket.stored_slip();
        if let Err(e) = self.storage.delete(slip.backend, &slip.key).await {
            tracing::warn!(
                "Ticket {} deleted but its payment slip '{}' was not: {}",
                id,
                slip.location,
                e
            );
        }

        tracing::info!("Ticket deleted: id={}, status={}", id, ticket.status);
        Ok(())
    }
}

fn not_pending(action: &str) -> AppError {
    AppError::InvalidState(format!("Only pending tickets can be {}.", action))
}
