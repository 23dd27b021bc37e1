use axum::{
	routing::{get, post},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{health, method_not_allowed, post_find_best_path};
use crate::security::add_security_headers;
use crate::state::AppState;

/// Request bodies are tiny JSON objects
const BODY_LIMIT_BYTES: usize = 64 * 1024;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(BODY_LIMIT_BYTES);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let router = Router::new()
		.route("/health", get(health))
		.route(
			"/api/findBestPath",
			post(post_find_best_path).fallback(method_not_allowed),
		)
		.layer(cors)
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}
