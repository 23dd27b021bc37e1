//! Path-finding server on an ephemeral port

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;
use vault_deposit::{RouteService, VaultAppBuilder};

pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Serve the application router backed by `service`
	pub async fn spawn_with_route_service(
		service: Arc<dyn RouteService>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (app, _) = VaultAppBuilder::new()
			.with_route_service(service)
			.start()
			.await?;
		Self::spawn_server_with_app(app).await
	}

	pub async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		// Give server time to start
		tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

		Ok(Self { base_url, handle })
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}
}

impl Drop for TestServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}
