//! API Module
//!
//! HTTP front end for the service controller.
//! Every route is scoped under the configured service name.

pub mod error;
pub mod service;

use std::sync::Arc;

use axum::{Router, routing::get};
use daemon_manager_core::ServiceController;
use tower_http::trace::TraceLayer;

/// Create the router exposing `/{name}/start|stop|restart|status`
pub fn create_router(controller: Arc<ServiceController>) -> Router {
    // Braces are route-capture syntax; the name is matched literally.
    let prefix = format!(
        "/{}",
        controller
            .record()
            .name()
            .replace('{', "{{")
            .replace('}', "}}")
    );

    Router::new()
        .route(&format!("{prefix}/start"), get(service::start))
        .route(&format!("{prefix}/stop"), get(service::stop))
        .route(&format!("{prefix}/restart"), get(service::restart))
        .route(&format!("{prefix}/status"), get(service::status))
        .with_state(controller)
        .layer(TraceLayer::new_for_http())
}
