//! Response mapping for routing errors.
//!
//! # Design Decisions
//! - An unknown route name is the client's fault: 404
//! - Everything else is a server-side misconfiguration: 500
//! - Body is the plain-text error message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::RouteError;

impl RouteError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RouteError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Route resolution failed");
        (self.status_code(), self.to_string()).into_response()
    }
}
