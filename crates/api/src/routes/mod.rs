pub mod health;
pub mod project;
pub mod ticket;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          liveness
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
///
/// /tickets                                         list (?projectId=), create
/// /tickets/{id}                                    get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/projects", project::router())
        .nest("/tickets", ticket::router())
}
