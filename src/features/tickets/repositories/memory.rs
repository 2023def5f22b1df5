//! In-memory ticket repository for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::ticket_repository::TicketRepository;
use crate::core::error::{AppError, Result};
use crate::features::tickets::models::{NewTicket, Ticket, TicketStatus};

#[derive(Default)]
struct State {
    tickets: Vec<Ticket>,
    /// Last ticket number handed out
    counter: i64,
}

/// Mutex-guarded repository with the same transition rules as PostgreSQL.
///
/// Creation timestamps are forced to be strictly increasing so ordering
/// assertions don't depend on clock resolution.
#[derive(Default)]
pub struct InMemoryTicketRepository {
    state: Mutex<State>,
    fail_inserts: Mutex<bool>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inserts fail like a lost database connection would.
    pub fn fail_inserts(&self, fail: bool) {
        *self.fail_inserts.lock().unwrap() = fail;
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().tickets.len()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut state = self.state.lock().unwrap();
        let mut created_at = Utc::now();
        if let Some(last) = state.tickets.iter().map(|t| t.created_at).max() {
            if created_at <= last {
                created_at = last + Duration::milliseconds(1);
            }
        }

        let stored = Ticket {
            id: ticket.id,
            name: ticket.name,
            user_id: ticket.user_id,
            whatsapp_number: ticket.whatsapp_number,
            payment_slip: ticket.slip.location,
            payment_slip_backend: ticket.slip.backend,
            payment_slip_key: ticket.slip.key,
            status: TicketStatus::Pending,
            ticket_number: None,
            created_at,
            updated_at: created_at,
        };
        state.tickets.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>> {
        let state = self.state.lock().unwrap();
        Ok(state.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn list_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>> {
        let state = self.state.lock().unwrap();
        let mut tickets: Vec<Ticket> = state
            .tickets
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tickets)
    }

    async fn confirm_pending(&self, id: Uuid) -> Result<Option<Ticket>> {
        let mut state = self.state.lock().unwrap();
        let next = state.counter + 1;

        let Some(ticket) = state
            .tickets
            .iter_mut()
            .find(|t| t.id == id && t.status == TicketStatus::Pending)
        else {
            return Ok(None);
        };

        ticket.status = TicketStatus::Confirmed;
        ticket.ticket_number = Some(next);
        ticket.updated_at = Utc::now();
        let confirmed = ticket.clone();

        state.counter = next;
        Ok(Some(confirmed))
    }

    async fn reject_pending(&self, id: Uuid) -> Result<Option<Ticket>> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .tickets
            .iter_mut()
            .find(|t| t.id == id && t.status == TicketStatus::Pending)
            .map(|ticket| {
                ticket.status = TicketStatus::Rejected;
                ticket.updated_at = Utc::now();
                ticket.clone()
            }))
    }

    async fn delete_settled(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.tickets.len();
        state
            .tickets
            .retain(|t| !(t.id == id && t.status != TicketStatus::Pending));
        Ok(state.tickets.len() < before)
    }
}
