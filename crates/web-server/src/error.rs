use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use comparison::RejectionReason;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Comparison rejected: {0}")]
    Rejected(#[from] RejectionReason),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected(RejectionReason::SamePlayerSelected) => StatusCode::BAD_REQUEST,
            AppError::Rejected(RejectionReason::UnknownPlayer(_)) => StatusCode::NOT_FOUND,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                "Failed to load the dataset".to_string()
            }
            AppError::Rejected(reason) => reason.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
