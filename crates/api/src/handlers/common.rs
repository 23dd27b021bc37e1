use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

/// Error body returned by every handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
	pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			message: message.into(),
		}),
	)
}

/// Fallback for routes hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
	error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
