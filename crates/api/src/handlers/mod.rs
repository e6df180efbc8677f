pub mod project;
pub mod ticket;
