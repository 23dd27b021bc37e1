use std::sync::Arc;

use vault_types::RouteService;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
	pub route_service: Arc<dyn RouteService>,
}

impl AppState {
	pub fn new(route_service: Arc<dyn RouteService>) -> Self {
		Self { route_service }
	}
}
