use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::storage::{StorageBackend, StoredFile};

/// Ticket status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::Confirmed => write!(f, "confirmed"),
            TicketStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Database model for ticket
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub name: String,
    pub user_id: String,
    pub whatsapp_number: String,
    /// Location shown to clients (relative path or URL)
    pub payment_slip: String,
    pub payment_slip_backend: StorageBackend,
    pub payment_slip_key: String,
    pub status: TicketStatus,
    /// Set only once the ticket is confirmed
    pub ticket_number: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn stored_slip(&self) -> StoredFile {
        StoredFile {
            backend: self.payment_slip_backend,
            key: self.payment_slip_key.clone(),
            location: self.payment_slip.clone(),
        }
    }
}

/// Values for a freshly submitted ticket
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub id: Uuid,
    pub name: String,
    pub user_id: String,
    pub whatsapp_number: String,
    pub slip: StoredFile,
}

impl NewTicket {
    pub fn new(name: String, user_id: String, whatsapp_number: String, slip: StoredFile) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            user_id,
            whatsapp_number,
            slip,
        }
    }
}
