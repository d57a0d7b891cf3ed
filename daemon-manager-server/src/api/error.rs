//! API Error Handling
//!
//! Every failure is a 500 with the plain-text error message as the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use daemon_manager_core::ActionError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// The controller refused or failed the operation
    Action(ActionError),
    /// The blocking worker running the operation died
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Action(err) => err.to_string(),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, format!("{message}\n")).into_response()
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        ApiError::Action(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
