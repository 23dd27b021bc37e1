//! Scripted route service

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use vault_types::{PathRequest, QuoteError, QuoteResult, Route, RouteService};

use super::fixtures::route_for;

/// Returns a two-hop route scaled to the requested amount, or scripted failures
#[derive(Debug)]
pub struct MockRouteService {
	failures: Mutex<Vec<QuoteError>>,
	fixed_route: Option<Route>,
	delay_ms: u64,
	call_tracker: AtomicUsize,
	requests: Mutex<Vec<PathRequest>>,
}

impl Default for MockRouteService {
	fn default() -> Self {
		Self::new()
	}
}

impl MockRouteService {
	pub fn new() -> Self {
		Self {
			failures: Mutex::new(Vec::new()),
			fixed_route: None,
			delay_ms: 0,
			call_tracker: AtomicUsize::new(0),
			requests: Mutex::new(Vec::new()),
		}
	}

	/// Fail the next call with `error`, then answer normally
	pub fn failing_once(error: QuoteError) -> Self {
		let service = Self::new();
		service.failures.lock().unwrap().push(error);
		service
	}

	pub fn with_route(mut self, route: Route) -> Self {
		self.fixed_route = Some(route);
		self
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay_ms = delay.as_millis() as u64;
		self
	}

	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::SeqCst)
	}

	pub fn requests(&self) -> Vec<PathRequest> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl RouteService for MockRouteService {
	async fn find_best_path(&self, request: &PathRequest) -> QuoteResult<Route> {
		self.call_tracker.fetch_add(1, Ordering::SeqCst);
		self.requests.lock().unwrap().push(*request);
		if self.delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
		}

		let failure = {
			let mut failures = self.failures.lock().unwrap();
			(!failures.is_empty()).then(|| failures.remove(0))
		};
		if let Some(error) = failure {
			return Err(error);
		}

		Ok(self
			.fixed_route
			.clone()
			.unwrap_or_else(|| route_for(request.amount_in)))
	}

	fn name(&self) -> &str {
		"mock"
	}
}
