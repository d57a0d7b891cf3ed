//! Service controller
//!
//! Runs the fixed sequence of checks in front of every supervisor command:
//! privilege, installed, running state, then the command itself.
//! Every external command is issued at most once per call and nothing is retried.

use tracing::{debug, info, warn};

use crate::domain::record::ServiceRecord;
use crate::error::{ActionError, ControlError, Result};
use crate::supervisor::{PrivilegeProbe, Supervisor, SupervisorAction};

const SUCCESS: &str = "[  OK  ]";
const FAILED: &str = "[  FAILED  ]";

/// Status reply for a unit whose file is missing
pub const STATUS_NOT_INSTALLED: &str = "Service not installed";

/// Run state as reported by the supervisor probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Probe succeeded, carrying its output
    Running(String),
    /// Probe failed for any reason
    Stopped,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running(_))
    }
}

/// Controls the single configured service
pub struct ServiceController {
    record: ServiceRecord,
    supervisor: Box<dyn Supervisor>,
    privileges: Box<dyn PrivilegeProbe>,
}

impl ServiceController {
    pub fn new(
        record: ServiceRecord,
        supervisor: Box<dyn Supervisor>,
        privileges: Box<dyn PrivilegeProbe>,
    ) -> Self {
        Self {
            record,
            supervisor,
            privileges,
        }
    }

    pub fn record(&self) -> &ServiceRecord {
        &self.record
    }

    /// Starts the service, refusing when it is already running
    pub fn start(&self) -> Result<String> {
        self.transition(SupervisorAction::Start)
    }

    /// Stops the service, refusing when it is already stopped
    pub fn stop(&self) -> Result<String> {
        self.transition(SupervisorAction::Stop)
    }

    /// Restarts the service
    ///
    /// A stopped unit is refused with [`ControlError::AlreadyStopped`]
    /// instead of being started.
    pub fn restart(&self) -> Result<String> {
        self.transition(SupervisorAction::Restart)
    }

    /// Reports the probe output, or a fixed line when the unit is stopped or missing
    pub fn status(&self) -> Result<String> {
        self.check_privileges()
            .map_err(|e| ActionError::new(String::new(), e))?;

        if !self.record.is_installed() {
            return Err(ActionError::new(
                STATUS_NOT_INSTALLED,
                ControlError::NotInstalled,
            ));
        }

        match self.run_state() {
            RunState::Running(output) => Ok(output),
            RunState::Stopped => Ok(format!("Service {} is stopped", self.record.name())),
        }
    }

    /// Probes the unit, collapsing every probe failure into [`RunState::Stopped`]
    pub fn run_state(&self) -> RunState {
        let unit = self.record.unit_name();
        match self.supervisor.probe(&unit) {
            Ok(output) => RunState::Running(output),
            Err(e) if e.is_spawn_failure() => {
                warn!("Supervisor unreachable while probing {}: {}", unit, e);
                RunState::Stopped
            }
            Err(e) => {
                debug!("Probe of {} reported inactive: {}", unit, e);
                RunState::Stopped
            }
        }
    }

    fn transition(&self, action: SupervisorAction) -> Result<String> {
        let head = format!("{} {}:", action.verb(), self.record.name());
        let failed = |error: ControlError| ActionError::new(format!("{head}{FAILED}"), error);

        self.check_privileges().map_err(failed)?;

        if !self.record.is_installed() {
            return Err(failed(ControlError::NotInstalled));
        }

        let running = self.run_state().is_running();
        match action {
            SupervisorAction::Start if running => {
                return Err(failed(ControlError::AlreadyRunning));
            }
            SupervisorAction::Stop | SupervisorAction::Restart if !running => {
                return Err(failed(ControlError::AlreadyStopped));
            }
            _ => {}
        }

        let unit = self.record.unit_name();
        self.supervisor
            .run(action, &unit)
            .map_err(|e| failed(e.into()))?;

        info!("Supervisor {} of {} succeeded", action, unit);

        Ok(format!("{head}{SUCCESS}"))
    }

    fn check_privileges(&self) -> std::result::Result<(), ControlError> {
        match self.privileges.group_id() {
            Some(0) => Ok(()),
            Some(gid) => {
                debug!("Refusing request from group {}", gid);
                Err(ControlError::RootPrivileges)
            }
            None => Err(ControlError::UnsupportedPlatform),
        }
    }
}
