//! REST client for the kanban API.
//!
//! [`BoardApi`] is the seam the board state talks through; [`HttpBoardApi`]
//! implements it over HTTP with [`reqwest`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::models::{NewProject, NewTicket, Project, ProjectPatch, Ticket, TicketPatch};

/// Base URL used when `KANBAN_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Errors from the kanban REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Kanban API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, normally `{"error", "code"}` JSON.
        body: String,
    },
}

impl ApiClientError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Api { status, .. } => Some(*status),
            ApiClientError::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

/// Operations the board needs from the backend.
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiClientError>;

    async fn get_project(&self, id: &str) -> Result<Project, ApiClientError>;

    async fn create_project(&self, input: &NewProject) -> Result<Project, ApiClientError>;

    async fn update_project(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<Project, ApiClientError>;

    async fn delete_project(&self, id: &str) -> Result<(), ApiClientError>;

    /// Tickets newest first, optionally only those of one project.
    async fn list_tickets(&self, project_id: Option<&str>) -> Result<Vec<Ticket>, ApiClientError>;

    async fn get_ticket(&self, id: &str) -> Result<Ticket, ApiClientError>;

    async fn create_ticket(&self, input: &NewTicket) -> Result<Ticket, ApiClientError>;

    async fn update_ticket(&self, id: &str, patch: &TicketPatch)
        -> Result<Ticket, ApiClientError>;

    async fn delete_ticket(&self, id: &str) -> Result<(), ApiClientError>;
}

/// HTTP client for a kanban API server.
pub struct HttpBoardApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBoardApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base URL including the `/api` prefix, e.g.
    ///   `http://localhost:3001/api`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create an API client pointed at `KANBAN_API_URL`, falling back to
    /// [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        let base_url = std::env::var("KANBAN_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Check that the response succeeded and deserialize its JSON body.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Check that the response succeeded, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiClientError> {
        let response = self.client.get(self.url("/projects")).send().await?;
        Self::parse_response(response).await
    }

    async fn get_project(&self, id: &str) -> Result<Project, ApiClientError> {
        let response = self
            .client
            .get(self.url(&format!("/projects/{id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_project(&self, input: &NewProject) -> Result<Project, ApiClientError> {
        let response = self
            .client
            .post(self.url("/projects"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_project(
        &self,
        id: &str,
        patch: &ProjectPatch,
    ) -> Result<Project, ApiClientError> {
        let response = self
            .client
            .put(self.url(&format!("/projects/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ApiClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/projects/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn list_tickets(&self, project_id: Option<&str>) -> Result<Vec<Ticket>, ApiClientError> {
        let mut request = self.client.get(self.url("/tickets"));
        if let Some(project_id) = project_id {
            request = request.query(&[("projectId", project_id)]);
        }
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    async fn get_ticket(&self, id: &str) -> Result<Ticket, ApiClientError> {
        let response = self
            .client
            .get(self.url(&format!("/tickets/{id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_ticket(&self, input: &NewTicket) -> Result<Ticket, ApiClientError> {
        let response = self
            .client
            .post(self.url("/tickets"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_ticket(
        &self,
        id: &str,
        patch: &TicketPatch,
    ) -> Result<Ticket, ApiClientError> {
        let response = self
            .client
            .put(self.url(&format!("/tickets/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_ticket(&self, id: &str) -> Result<(), ApiClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/tickets/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }
}
