//! Service API Handlers
//!
//! GET endpoints mapping onto the controller operations. Controller calls
//! block on external commands, so they run on the blocking thread pool.

use std::sync::Arc;

use axum::extract::State;
use daemon_manager_core::ServiceController;
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy)]
enum Operation {
    Start,
    Stop,
    Restart,
    Status,
}

impl Operation {
    fn call(self, controller: &ServiceController) -> daemon_manager_core::error::Result<String> {
        match self {
            Operation::Start => controller.start(),
            Operation::Stop => controller.stop(),
            Operation::Restart => controller.restart(),
            Operation::Status => controller.status(),
        }
    }

    fn attempt(self) -> &'static str {
        match self {
            Operation::Start => "Starting daemon",
            Operation::Stop => "Stopping daemon",
            Operation::Restart => "Restarting daemon",
            Operation::Status => "Checking status of daemon",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Operation::Start => "Error starting daemon",
            Operation::Stop => "Error stopping daemon",
            Operation::Restart => "Error restarting daemon",
            Operation::Status => "Error checking status of daemon",
        }
    }

    fn success(self) -> &'static str {
        match self {
            Operation::Start => "started successfully",
            Operation::Stop => "stopped successfully",
            Operation::Restart => "restarted successfully",
            Operation::Status => "status reported",
        }
    }
}

async fn dispatch(controller: Arc<ServiceController>, op: Operation) -> ApiResult<String> {
    let name = controller.record().name().to_string();
    info!("{}: {}", op.attempt(), name);

    let result = tokio::task::spawn_blocking(move || op.call(&controller))
        .await
        .map_err(|e| ApiError::Internal(format!("{} {}: {}", op.failure(), name, e)))?;

    match result {
        Ok(line) => {
            info!("Daemon {} {}", name, op.success());
            Ok(format!("{line}\n"))
        }
        Err(err) => {
            error!(line = %err.line, "{} {}: {}", op.failure(), name, err);
            Err(err.into())
        }
    }
}

/// GET /{name}/start
pub async fn start(State(controller): State<Arc<ServiceController>>) -> ApiResult<String> {
    dispatch(controller, Operation::Start).await
}

/// GET /{name}/stop
pub async fn stop(State(controller): State<Arc<ServiceController>>) -> ApiResult<String> {
    dispatch(controller, Operation::Stop).await
}

/// GET /{name}/restart
pub async fn restart(State(controller): State<Arc<ServiceController>>) -> ApiResult<String> {
    dispatch(controller, Operation::Restart).await
}

/// GET /{name}/status
/// Reports the supervisor probe output
pub async fn status(State(controller): State<Arc<ServiceController>>) -> ApiResult<String> {
    dispatch(controller, Operation::Status).await
}
