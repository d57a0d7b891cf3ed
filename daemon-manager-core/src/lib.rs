//! Daemon Manager Core
//!
//! Control logic for a single supervisor-managed service.
//!
//! This crate contains:
//! - Domain types: the immutable [`ServiceRecord`] configured at startup
//! - Errors: the control error taxonomy surfaced to HTTP callers
//! - Supervisor: seams over `systemctl` and the process identity query
//! - Controller: the start/stop/restart/status operations

pub mod controller;
pub mod domain;
pub mod error;
pub mod supervisor;

// Re-export commonly used types
pub use controller::ServiceController;
pub use domain::record::ServiceRecord;
pub use error::{ActionError, ConfigError, ControlError, SupervisorError};
pub use supervisor::{IdCommand, PrivilegeProbe, Supervisor, SupervisorAction, Systemctl};
