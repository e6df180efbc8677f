//! Handlers for the `/tickets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanban_core::rules;
use kanban_db::models::ticket::{CreateTicket, Ticket, TicketListParams, UpdateTicket};
use kanban_db::repositories::{ProjectRepo, TicketRepo};
use kanban_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

/// Reject a ticket that points at a project that does not exist.
async fn ensure_project_exists(pool: &DbPool, project_id: &str) -> AppResult<()> {
    if ProjectRepo::exists(pool, project_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(rules::unknown_project(project_id)))
    }
}

/// POST /api/tickets
///
/// `status` defaults to `todo`, `priority` to `medium`, `description` to
/// an empty string.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateTicket>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    rules::validate_new_ticket(input.title.as_deref(), input.project_id.as_deref())?;
    if let Some(project_id) = input.project_id.as_deref() {
        ensure_project_exists(&state.pool, project_id).await?;
    }

    let ticket = TicketRepo::create(&state.pool, &input).await?;
    tracing::info!(ticket_id = %ticket.id, project_id = %ticket.project_id, "Ticket created");
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/tickets?projectId={id}
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TicketListParams>,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = TicketRepo::list(&state.pool, params.project_filter()).await?;
    Ok(Json(tickets))
}

/// GET /api/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Ticket>> {
    let ticket = TicketRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket", id))?;
    Ok(Json(ticket))
}

/// PUT /api/tickets/{id}
///
/// Partial update: only the supplied fields change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateTicket>,
) -> AppResult<Json<Ticket>> {
    rules::validate_ticket_patch(input.title.as_deref(), input.project_id.as_deref())?;
    if let Some(project_id) = input.project_id.as_deref() {
        ensure_project_exists(&state.pool, project_id).await?;
    }

    let ticket = TicketRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket", id))?;
    Ok(Json(ticket))
}

/// DELETE /api/tickets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = TicketRepo::delete(&state.pool, &id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Ticket", id))
    }
}
