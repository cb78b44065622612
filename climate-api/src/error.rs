use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// A request-level failure. Only query failures reach clients, as a 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: Option<String>,
}

impl ApiError {
    /// `expose` controls whether the error text ends up in the response body.
    pub fn internal(err: impl std::fmt::Display, expose: bool) -> Self {
        let msg = err.to_string();
        error!(error = %msg, "Request failed");
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: expose.then_some(msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => detail,
            None => self
                .status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };
        (self.status, body).into_response()
    }
}
