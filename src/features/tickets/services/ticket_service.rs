use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::tickets::dtos::{SubmitTicketDto, TicketResponseDto};
use crate::features::tickets::models::NewTicket;
use crate::features::tickets::repositories::TicketRepository;
use crate::modules::storage::{SlipStorage, UploadedFile};

/// Service for ticket submission and lookup
pub struct TicketService {
    repository: Arc<dyn TicketRepository>,
    storage: Arc<SlipStorage>,
}

impl TicketService {
    pub fn new(repository: Arc<dyn TicketRepository>, storage: Arc<SlipStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Store the payment slip and record a new pending ticket
    ///
    /// `dto` must already be validated. If the record cannot be saved the
    /// stored slip is removed again.
    pub async fn submit(&self, dto: SubmitTicketDto, slip: UploadedFile) -> Result<Uuid> {
        let stored = self.storage.store(slip).await?;

        let new_ticket = NewTicket::new(
            dto.name,
            dto.user_id,
            dto.whatsapp_number,
            stored.clone(),
        );

        let ticket = match self.repository.insert(new_ticket).await {
            Ok(ticket) => ticket,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(stored.backend, &stored.key).await {
                    tracing::warn!(
                        "Failed to remove orphaned slip '{}': {}",
                        stored.location,
                        cleanup
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            "Ticket submitted: id={}, user_id={}, slip={}",
            ticket.id,
            ticket.user_id,
            ticket.payment_slip
        );

        Ok(ticket.id)
    }

    /// Get ticket by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<TicketResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Ticket not found.".to_string()))
    }
}
