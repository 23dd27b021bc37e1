use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::Json,
};
use tracing::{info, warn};

use vault_types::{
	FindBestPathBody, PathRequest, QuoteError, QuoteValidationError, RouteResponse,
};

use crate::handlers::common::{error_response, ApiError};
use crate::state::AppState;

/// POST /api/findBestPath - Best conversion route for a wrapped-asset amount
pub async fn post_find_best_path(
	State(state): State<AppState>,
	body: Result<Json<FindBestPathBody>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
	// A body that is not JSON at all carries no amount either
	let Json(body) = body.map_err(|rejection| {
		warn!("Rejected findBestPath body: {}", rejection.body_text());
		match rejection {
			JsonRejection::MissingJsonContentType(_) => {
				error_response(StatusCode::BAD_REQUEST, "Missing amountIn parameter")
			},
			other => error_response(
				StatusCode::BAD_REQUEST,
				format!("Invalid request body: {}", other.body_text()),
			),
		}
	})?;

	let request = PathRequest::try_from(body).map_err(|e| match e {
		QuoteValidationError::MissingAmount => {
			error_response(StatusCode::BAD_REQUEST, "Missing amountIn parameter")
		},
		other => error_response(StatusCode::BAD_REQUEST, other.to_string()),
	})?;

	info!(
		"Finding best path for {} (native: {}) via {}",
		request.amount_in,
		request.is_native,
		state.route_service.name()
	);

	match state.route_service.find_best_path(&request).await {
		Ok(route) => Ok(Json(RouteResponse::from(&route))),
		Err(QuoteError::RouteUnavailable { reason }) => {
			info!("No route available: {}", reason);
			Err(error_response(StatusCode::NOT_FOUND, "No route available"))
		},
		Err(QuoteError::InvalidAmount { reason }) => {
			Err(error_response(StatusCode::BAD_REQUEST, reason))
		},
		Err(e @ QuoteError::ServiceUnreachable { .. }) => {
			warn!("Error in findBestPath: {}", e);
			Err(error_response(
				StatusCode::INTERNAL_SERVER_ERROR,
				"Internal Server Error",
			))
		},
	}
}
