//! Default security headers for API responses

use axum::{
	http::header::{HeaderName, HeaderValue},
	Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

const SECURITY_HEADERS: [(&str, &str); 5] = [
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "no-referrer"),
	("content-security-policy", "default-src 'none'"),
	("cache-control", "no-store"),
];

/// Add each header unless a handler already set it
pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	SECURITY_HEADERS
		.iter()
		.fold(router, |router, (name, value)| {
			router.layer(SetResponseHeaderLayer::if_not_present(
				HeaderName::from_static(name),
				HeaderValue::from_static(value),
			))
		})
}
