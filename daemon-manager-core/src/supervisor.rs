//! Supervisor and identity commands
//!
//! Wraps the external tools the controller depends on:
//! - `systemctl` for probing and changing unit state
//! - `id -g` for the caller's effective group
//!
//! Both sit behind traits so the controller can be exercised without root
//! or a running service manager.

use std::fmt;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::SupervisorError;

/// State-changing supervisor subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorAction {
    Start,
    Stop,
    Restart,
}

impl SupervisorAction {
    /// Subcommand passed to the supervisor
    pub fn subcommand(&self) -> &'static str {
        match self {
            SupervisorAction::Start => "start",
            SupervisorAction::Stop => "stop",
            SupervisorAction::Restart => "restart",
        }
    }

    /// Verb used at the head of a status line
    pub fn verb(&self) -> &'static str {
        match self {
            SupervisorAction::Start => "Starting",
            SupervisorAction::Stop => "Stopping",
            SupervisorAction::Restart => "Restart",
        }
    }
}

impl fmt::Display for SupervisorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subcommand())
    }
}

/// Unit-based service supervisor
pub trait Supervisor: Send + Sync {
    /// Queries the run state of a unit
    ///
    /// Returns the probe output when the supervisor reports the unit active,
    /// and an error for every other outcome.
    fn probe(&self, unit: &str) -> Result<String, SupervisorError>;

    /// Runs a state-changing subcommand against a unit
    fn run(&self, action: SupervisorAction, unit: &str) -> Result<(), SupervisorError>;
}

/// Source of the caller's effective group id
pub trait PrivilegeProbe: Send + Sync {
    /// Returns `None` when the identity cannot be determined
    fn group_id(&self) -> Option<u32>;
}

/// Supervisor backed by the `systemctl` binary
#[derive(Debug, Clone)]
pub struct Systemctl {
    program: String,
}

impl Systemctl {
    /// Uses the given supervisor binary, resolved through `PATH` when not absolute
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn execute(&self, subcommand: &str, unit: &str) -> Result<Output, SupervisorError> {
        let command = format!("{} {} {}", self.program, subcommand, unit);
        debug!("Executing: {}", command);

        let output = Command::new(&self.program)
            .arg(subcommand)
            .arg(unit)
            .output()
            .map_err(|source| SupervisorError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!("{} failed with {}", command, output.status);
            return Err(SupervisorError::Exit {
                command,
                status: output.status.to_string(),
            });
        }

        Ok(output)
    }
}

impl Supervisor for Systemctl {
    fn probe(&self, unit: &str) -> Result<String, SupervisorError> {
        let output = self.execute("status", unit)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&self, action: SupervisorAction, unit: &str) -> Result<(), SupervisorError> {
        self.execute(action.subcommand(), unit).map(|_| ())
    }
}

/// Identity probe backed by `id -g`
#[derive(Debug, Clone, Default)]
pub struct IdCommand;

impl PrivilegeProbe for IdCommand {
    fn group_id(&self) -> Option<u32> {
        let output = match Command::new("id").arg("-g").output() {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to execute 'id -g': {}", e);
                return None;
            }
        };

        if !output.status.success() {
            debug!("'id -g' exited with {}", output.status);
            return None;
        }

        parse_group_id(&String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_group_id(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_strings() {
        assert_eq!(SupervisorAction::Start.subcommand(), "start");
        assert_eq!(SupervisorAction::Stop.verb(), "Stopping");
        assert_eq!(SupervisorAction::Restart.verb(), "Restart");
        assert_eq!(SupervisorAction::Restart.to_string(), "restart");
    }

    #[test]
    fn test_parse_group_id() {
        assert_eq!(parse_group_id("0\n"), Some(0));
        assert_eq!(parse_group_id("  1000 "), Some(1000));
        assert_eq!(parse_group_id("wheel"), None);
        assert_eq!(parse_group_id(""), None);
    }

    #[test]
    fn test_missing_supervisor_is_spawn_failure() {
        let supervisor = Systemctl::with_program("/nonexistent/daemon-manager-systemctl");
        let err = supervisor.probe("nginx.service").unwrap_err();
        assert!(err.is_spawn_failure());
        assert!(err.to_string().contains("status nginx.service"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_reported() {
        // `false` ignores its arguments and exits 1
        let supervisor = Systemctl::with_program("false");
        let err = supervisor
            .run(SupervisorAction::Start, "nginx.service")
            .unwrap_err();
        assert!(matches!(err, SupervisorError::Exit { .. }));
        assert_eq!(
            err.to_string(),
            "false start nginx.service exited with exit status: 1"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_returns_stdout_on_success() {
        // `echo` prints its arguments and exits 0
        let supervisor = Systemctl::with_program("echo");
        let output = supervisor.probe("nginx.service").unwrap();
        assert_eq!(output, "status nginx.service\n");
    }
}
