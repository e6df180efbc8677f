//! Kanban board domain types and rules.
//!
//! This crate carries no database or HTTP dependencies. Persistence lives in
//! `kanban-db`, the REST surface in `kanban-api`.

pub mod error;
pub mod rules;
pub mod ticket;
pub mod types;
