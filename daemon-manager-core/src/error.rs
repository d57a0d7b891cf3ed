//! Error types for service control

use thiserror::Error;

/// Errors raised while building the service record at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("service name cannot be empty")]
    EmptyName,

    #[error("unit directory cannot be empty")]
    EmptyUnitDirectory,
}

/// Failure of an external supervisor command
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The command could not be executed at all
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and reported failure
    #[error("{command} exited with {status}")]
    Exit { command: String, status: String },
}

impl SupervisorError {
    /// True when the supervisor itself was unreachable rather than reporting a state
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}

/// Reasons a control operation is refused or fails
#[derive(Debug, Error)]
pub enum ControlError {
    /// The caller's privilege level could not be determined
    #[error("Unsupported system")]
    UnsupportedPlatform,

    /// The process is not running as root
    #[error("You must have root user privileges. Possibly using 'sudo' command should help")]
    RootPrivileges,

    /// The unit file is absent from the unit directory
    #[error("Service is not installed")]
    NotInstalled,

    #[error("Service is already running")]
    AlreadyRunning,

    #[error("Service has already been stopped")]
    AlreadyStopped,

    /// The supervisor command returned failure
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
}

/// A refused or failed operation together with its formatted status line
///
/// Displays as the underlying [`ControlError`] message, which is what HTTP
/// callers receive as the response body.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ActionError {
    /// Status line, e.g. `Starting nginx:[  FAILED  ]`
    pub line: String,

    /// Why the operation did not succeed
    #[source]
    pub error: ControlError,
}

impl ActionError {
    pub fn new(line: impl Into<String>, error: impl Into<ControlError>) -> Self {
        Self {
            line: line.into(),
            error: error.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_displays_control_message() {
        let err = ActionError::new("Starting nginx:[  FAILED  ]", ControlError::AlreadyRunning);
        assert_eq!(err.to_string(), "Service is already running");
        assert_eq!(err.line, "Starting nginx:[  FAILED  ]");
    }

    #[test]
    fn test_supervisor_error_message() {
        let err = ControlError::from(SupervisorError::Exit {
            command: "systemctl start nginx.service".to_string(),
            status: "exit status: 5".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "systemctl start nginx.service exited with exit status: 5"
        );
    }

    #[test]
    fn test_spawn_failure_detection() {
        let spawn = SupervisorError::Spawn {
            command: "systemctl".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(spawn.is_spawn_failure());

        let exit = SupervisorError::Exit {
            command: "systemctl".to_string(),
            status: "exit status: 3".to_string(),
        };
        assert!(!exit.is_spawn_failure());
    }
}
