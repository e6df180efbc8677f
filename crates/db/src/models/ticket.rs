//! Ticket entity model and DTOs.

use kanban_core::ticket::{TicketPriority, TicketStatus};
use kanban_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A ticket row from the `tickets` table.
///
/// `status` and `priority` are stored as text; a row holding any other
/// value fails to decode instead of leaking through.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    pub project_id: EntityId,
    #[sqlx(try_from = "String")]
    pub priority: TicketPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new ticket.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to `todo` if omitted.
    pub status: Option<TicketStatus>,
    pub project_id: Option<EntityId>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<TicketPriority>,
}

/// DTO for updating an existing ticket. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub project_id: Option<EntityId>,
    pub priority: Option<TicketPriority>,
}

/// Query parameters for `GET /tickets`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListParams {
    pub project_id: Option<EntityId>,
}

impl TicketListParams {
    /// The project filter, treating an empty `?projectId=` as no filter.
    pub fn project_filter(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }
}
