use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ticket_repository::TicketRepository;
use crate::core::error::{AppError, Result};
use crate::features::tickets::models::{NewTicket, Ticket, TicketStatus};

/// Counter row that backs ticket numbers
const TICKET_NUMBER_COUNTER: &str = "ticket_number";

const TICKET_COLUMNS: &str = r#"
    id, name, user_id, whatsapp_number,
    payment_slip, payment_slip_backend, payment_slip_key,
    status, ticket_number, created_at, updated_at
"#;

/// PostgreSQL-backed ticket repository
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket> {
        let query = format!(
            r#"
            INSERT INTO tickets (
                id, name, user_id, whatsapp_number,
                payment_slip, payment_slip_backend, payment_slip_key, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TICKET_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket.id)
            .bind(&ticket.name)
            .bind(&ticket.user_id)
            .bind(&ticket.whatsapp_number)
            .bind(&ticket.slip.location)
            .bind(ticket.slip.backend)
            .bind(&ticket.slip.key)
            .bind(TicketStatus::Pending)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert ticket: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1");

        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get ticket by ID: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_by_status(&self, status: TicketStatus) -> Result<Vec<Ticket>> {
        let query = format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE status = $1 ORDER BY created_at DESC, id DESC"
        );

        sqlx::query_as::<_, Ticket>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {} tickets: {:?}", status, e);
                AppError::Database(e)
            })
    }

    async fn confirm_pending(&self, id: Uuid) -> Result<Option<Ticket>> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps a concurrent reject/confirm of the same ticket out
        let current: Option<TicketStatus> =
            sqlx::query_scalar("SELECT status FROM tickets WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if current != Some(TicketStatus::Pending) {
            tx.rollback().await?;
            return Ok(None);
        }

        // Counter row lock serializes number allocation until commit
        let number: i64 = sqlx::query_scalar(
            "UPDATE ticket_counters SET value = value + 1 WHERE name = $1 RETURNING value",
        )
        .bind(TICKET_NUMBER_COUNTER)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            r#"
            UPDATE tickets
            SET status = $2, ticket_number = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {TICKET_COLUMNS}
            "#
        );
        let ticket = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(TicketStatus::Confirmed)
            .bind(number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(ticket))
    }

    async fn reject_pending(&self, id: Uuid) -> Result<Option<Ticket>> {
        let query = format!(
            r#"
            UPDATE tickets
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING {TICKET_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(TicketStatus::Rejected)
            .bind(TicketStatus::Pending)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to reject ticket: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete_settled(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1 AND status <> $2")
            .bind(id)
            .bind(TicketStatus::Pending)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete ticket: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
