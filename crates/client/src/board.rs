//! Board view state: projects, the selected project, its tickets, and the
//! drag-and-drop gesture in progress.
//!
//! Every mutation goes to the server first and the ticket list is then
//! refetched in full, so local state never diverges from what the API
//! returned. Failures are logged and leave the state as it was.

use kanban_core::ticket::TicketStatus;
use kanban_core::types::EntityId;

use crate::api::{ApiClientError, BoardApi};
use crate::models::{NewProject, NewTicket, Project, Ticket, TicketPatch};

/// What happened when a dragged ticket was dropped on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No ticket was being dragged.
    NoDrag,
    /// The ticket was unknown or already in that column; nothing was sent.
    Unchanged,
    /// The status update succeeded and tickets were refetched.
    Moved,
    /// The status update failed; tickets were left as they were.
    Failed,
}

/// One rendered board column.
#[derive(Debug)]
pub struct BoardColumn<'a> {
    pub status: TicketStatus,
    pub title: &'static str,
    pub tickets: Vec<&'a Ticket>,
}

pub struct BoardState<A> {
    api: A,
    projects: Vec<Project>,
    selected_project_id: Option<EntityId>,
    tickets: Vec<Ticket>,
    dragged_ticket_id: Option<EntityId>,
    drag_over_column: Option<TicketStatus>,
    loading: bool,
}

impl<A: BoardApi> BoardState<A> {
    /// Empty board, `loading` until the first [`load_projects`](Self::load_projects).
    pub fn new(api: A) -> Self {
        Self {
            api,
            projects: Vec::new(),
            selected_project_id: None,
            tickets: Vec::new(),
            dragged_ticket_id: None,
            drag_over_column: None,
            loading: true,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_project_id(&self) -> Option<&str> {
        self.selected_project_id.as_deref()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.selected_project_id.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    /// Tickets of the selected project, newest first.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn dragged_ticket_id(&self) -> Option<&str> {
        self.dragged_ticket_id.as_deref()
    }

    pub fn drag_over_column(&self) -> Option<TicketStatus> {
        self.drag_over_column
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// Fetch all projects. With nothing selected yet, the first (newest)
    /// project is selected and its tickets loaded.
    pub async fn load_projects(&mut self) -> Result<(), ApiClientError> {
        let result = self.api.list_projects().await;
        self.loading = false;

        let projects = result.inspect_err(|err| {
            tracing::error!(error = %err, "Failed to load projects");
        })?;
        self.projects = projects;

        if self.selected_project_id.is_none() {
            if let Some(first) = self.projects.first() {
                let id = first.id.clone();
                self.select_project(Some(id)).await?;
            }
        }
        Ok(())
    }

    /// Change the selected project. Deselecting clears the tickets without
    /// touching the network.
    pub async fn select_project(&mut self, id: Option<EntityId>) -> Result<(), ApiClientError> {
        self.selected_project_id = id;
        if self.selected_project_id.is_none() {
            self.tickets.clear();
            return Ok(());
        }
        self.refresh_tickets().await
    }

    /// Create a project, append it to the list and select it.
    pub async fn create_project(&mut self, input: &NewProject) -> Result<Project, ApiClientError> {
        let project = self.api.create_project(input).await.inspect_err(|err| {
            tracing::error!(error = %err, "Failed to create project");
        })?;
        self.projects.push(project.clone());
        if let Err(err) = self.select_project(Some(project.id.clone())).await {
            tracing::warn!(project_id = %project.id, error = %err, "Created project but could not load its tickets");
        }
        Ok(project)
    }

    // -----------------------------------------------------------------------
    // Tickets
    // -----------------------------------------------------------------------

    /// Refetch the full ticket list of the selected project.
    pub async fn refresh_tickets(&mut self) -> Result<(), ApiClientError> {
        let Some(project_id) = self.selected_project_id.clone() else {
            return Ok(());
        };
        let tickets = self
            .api
            .list_tickets(Some(&project_id))
            .await
            .inspect_err(|err| {
                tracing::error!(project_id = %project_id, error = %err, "Failed to load tickets");
            })?;
        self.tickets = tickets;
        Ok(())
    }

    pub async fn create_ticket(&mut self, input: &NewTicket) -> Result<Ticket, ApiClientError> {
        let ticket = self.api.create_ticket(input).await.inspect_err(|err| {
            tracing::error!(error = %err, "Failed to create ticket");
        })?;
        self.refetch_after_mutation().await;
        Ok(ticket)
    }

    pub async fn update_ticket(
        &mut self,
        id: &str,
        patch: &TicketPatch,
    ) -> Result<Ticket, ApiClientError> {
        let ticket = self.api.update_ticket(id, patch).await.inspect_err(|err| {
            tracing::error!(ticket_id = %id, error = %err, "Failed to update ticket");
        })?;
        self.refetch_after_mutation().await;
        Ok(ticket)
    }

    pub async fn delete_ticket(&mut self, id: &str) -> Result<(), ApiClientError> {
        self.api.delete_ticket(id).await.inspect_err(|err| {
            tracing::error!(ticket_id = %id, error = %err, "Failed to delete ticket");
        })?;
        self.refetch_after_mutation().await;
        Ok(())
    }

    /// The mutation already succeeded; a failed refetch is only logged.
    async fn refetch_after_mutation(&mut self) {
        let _ = self.refresh_tickets().await;
    }

    // -----------------------------------------------------------------------
    // Drag and drop
    // -----------------------------------------------------------------------

    pub fn begin_drag(&mut self, ticket_id: impl Into<EntityId>) {
        self.dragged_ticket_id = Some(ticket_id.into());
    }

    pub fn drag_over(&mut self, status: TicketStatus) {
        self.drag_over_column = Some(status);
    }

    pub fn drag_leave(&mut self) {
        self.drag_over_column = None;
    }

    /// Drop the dragged ticket on a column.
    ///
    /// A drop on the ticket's own column sends nothing. Otherwise a single
    /// status-only update is sent; the tickets are refetched only if it
    /// succeeded. The drag is over once this returns.
    pub async fn drop_on(&mut self, status: TicketStatus) -> DropOutcome {
        self.drag_over_column = None;
        let Some(ticket_id) = self.dragged_ticket_id.take() else {
            return DropOutcome::NoDrag;
        };

        let current = self.tickets.iter().find(|t| t.id == ticket_id);
        match current {
            Some(ticket) if ticket.status != status => {}
            _ => return DropOutcome::Unchanged,
        }

        let result = self
            .api
            .update_ticket(&ticket_id, &TicketPatch::status(status))
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(ticket_id = %ticket_id, status = %status, "Ticket moved");
                self.refetch_after_mutation().await;
                DropOutcome::Moved
            }
            Err(err) => {
                tracing::error!(ticket_id = %ticket_id, status = %status, error = %err, "Failed to move ticket");
                DropOutcome::Failed
            }
        }
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    /// The three board columns in display order, each holding its tickets
    /// in list order.
    pub fn columns(&self) -> Vec<BoardColumn<'_>> {
        TicketStatus::ALL
            .iter()
            .map(|&status| BoardColumn {
                status,
                title: status.column_title(),
                tickets: self.tickets.iter().filter(|t| t.status == status).collect(),
            })
            .collect()
    }
}
