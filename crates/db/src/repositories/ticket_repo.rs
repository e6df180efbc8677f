//! Repository for the `tickets` table.

use kanban_core::rules::description_or_default;
use kanban_core::types::new_entity_id;
use sqlx::PgPool;

use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, status, project_id, priority, created_at, updated_at";

/// Provides CRUD operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    ///
    /// Omitted `status` and `priority` fall back to `todo` and `medium`.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets
                (id, title, description, status, project_id, priority, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(new_entity_id())
            .bind(&input.title)
            .bind(description_or_default(input.description.clone()))
            .bind(input.status.unwrap_or_default().as_str())
            .bind(&input.project_id)
            .bind(input.priority.unwrap_or_default().as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets ordered by most recently created first, optionally
    /// restricted to one project.
    pub async fn list(pool: &PgPool, project_id: Option<&str>) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets
             WHERE ($1::TEXT IS NULL OR project_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                project_id = COALESCE($5, project_id),
                priority = COALESCE($6, priority),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.project_id)
            .bind(input.priority.map(|p| p.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
