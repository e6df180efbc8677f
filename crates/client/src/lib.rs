//! Client-side board state for the kanban API.
//!
//! [`api::BoardApi`] abstracts the HTTP surface; [`api::HttpBoardApi`] is the
//! reqwest-backed implementation. [`board::BoardState`] keeps the projects,
//! selection, tickets and drag state a board view renders from.

pub mod api;
pub mod board;
pub mod models;

pub use api::{ApiClientError, BoardApi, HttpBoardApi};
pub use board::{BoardColumn, BoardState, DropOutcome};
