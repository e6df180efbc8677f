//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every method issues a
//! single statement; there are no multi-statement transactions.

pub mod project_repo;
pub mod ticket_repo;

pub use project_repo::ProjectRepo;
pub use ticket_repo::TicketRepo;
