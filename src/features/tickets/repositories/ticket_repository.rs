use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::tickets::models::{NewTicket, Ticket, TicketStatus};

/// Persistence for tickets.
///
/// Transition methods are conditional: they only act on tickets in the
/// expected state, so a caller that lost a race gets `None`/`false` instead
/// of overwriting someone else's decision.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a new pending ticket.
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>>;

    /// All tickets with the given status, newest first.
    async fn list_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>>;

    /// Confirm a pending ticket and assign it the next ticket number.
    ///
    /// Numbers come from a counter incremented atomically with the status
    /// change, so concurrent confirmations never share a number. Returns
    /// `None` if the ticket is missing or no longer pending.
    async fn confirm_pending(&self, id: Uuid) -> Result<Option<Ticket>>;

    /// Reject a pending ticket. Returns `None` if it is missing or no longer pending.
    async fn reject_pending(&self, id: Uuid) -> Result<Option<Ticket>>;

    /// Delete a ticket that is not pending. Returns whether a row was removed.
    async fn delete_settled(&self, id: Uuid) -> Result<bool>;
}
