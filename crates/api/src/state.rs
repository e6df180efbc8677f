/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; the pool is reference-counted. It is built once in `main`
/// and injected here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kanban_db::DbPool,
}
