//! Core domain types
//!
//! The only entity is the service record, fixed for the lifetime of the process.

pub mod record;
