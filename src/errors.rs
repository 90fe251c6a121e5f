use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON body returned with every error status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A sol id that is not among the loaded readings.
    #[error("Sol {0} not found")]
    SolNotFound(String),

    /// The startup fetch produced no readings.
    #[error("No sols loaded from the InSight feed")]
    NoReadings,

    #[error("Invalid units: {0}")]
    InvalidUnits(String),

    /// Transport, status or payload failure talking to the InSight feed.
    #[error("InSight feed error: {0}")]
    Feed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::SolNotFound(_) | AppError::NoReadings => StatusCode::NOT_FOUND,
            AppError::InvalidUnits(_) => StatusCode::BAD_REQUEST,
            AppError::Feed(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (
            status,
            axum::Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
