//! Vault Deposit Library
//!
//! Client-side deposit engine for a routed yield vault, plus the HTTP
//! path-finding service deposit clients query for their conversion routes.

// Core domain types
pub use vault_types::{
	Address, AssetSymbol, Balance, ConnectionError, DepositIntent, FailureReason, Network,
	PathRequest, QuoteError, Route, RouteService, Session, SubmitRejection, TransactionRecord,
	TxHash, WalletError, WalletProvider, WorkflowStatus, U256,
};

// Service layer
pub use vault_service::{
	BalanceState, BalanceTracker, ClientWatch, DepositClient, DepositForm, DepositOutcome,
	DepositWorkflow, PathFinder, PriceFeed, PriceSource, StaticPriceSource, WalletSession,
	WorkflowConfig, WorkflowError,
};

// Adapters
pub use vault_adapters::{HttpRouteService, JsonRpcWallet, RouterContractQuoter};

// API layer
pub use vault_api::{create_router, AppState};

// Config
pub use vault_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use vault_types::*;
}

pub mod config {
	pub use vault_config::*;
}

pub mod adapters {
	pub use vault_adapters::*;
}

pub mod api {
	pub use vault_api::*;
}

pub mod service {
	pub use vault_service::*;
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use vault_config::{log_deployment, log_service_shutdown};

// Re-export external dependencies for embedders
pub use async_trait;
pub use reqwest;

/// Builder for the path-finding server
#[derive(Default)]
pub struct VaultAppBuilder {
	settings: Option<Settings>,
	route_service: Option<Arc<dyn RouteService>>,
}

impl VaultAppBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Serve routes from `service` instead of calling the router contract
	pub fn with_route_service(mut self, service: Arc<dyn RouteService>) -> Self {
		self.route_service = Some(service);
		self
	}

	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use vault_config::LogFormat;

		// RUST_LOG wins over the configured level
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		let result = match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
		};
		result.map_err(|e| format!("Failed to initialise tracing: {}", e))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);
		Ok(())
	}

	/// Build the router and its state without binding a socket
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		let route_service = match self.route_service {
			Some(service) => service,
			None => {
				let rpc_url = settings.rpc_url()?;
				let quoter = RouterContractQuoter::new(&rpc_url, settings.routing.timeout_ms)?
					.with_contracts(
						settings.contracts.router,
						settings.contracts.wrapped_asset,
						settings.contracts.target_asset,
					)
					.with_max_steps(settings.routing.max_steps);
				Arc::new(quoter) as Arc<dyn RouteService>
			},
		};
		info!("Routing through the {} route service", route_service.name());

		let state = AppState::new(route_service);
		let router = create_router().with_state(state.clone());
		Ok((router, state))
	}

	/// Load configuration, initialise logging and serve until Ctrl-C
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config().unwrap_or_default(),
		};

		self.init_tracing_from_settings(&settings)?;
		log_service_info();
		log_deployment(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		let (app, _) = self.with_settings(settings).start().await?;
		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  POST /api/findBestPath");

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;
		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Could not listen for Ctrl-C, running until killed: {}", e);
		std::future::pending::<()>().await;
	}
}

/// Deposit client talking to the configured wallet bridge and path-finding endpoint
pub fn deposit_client_from_settings(
	settings: &Settings,
) -> Result<DepositClient, Box<dyn std::error::Error>> {
	let wallet = JsonRpcWallet::new(&settings.wallet.endpoint)?.with_poll_intervals(
		Duration::from_millis(settings.wallet.receipt_poll_ms),
		Duration::from_millis(settings.wallet.event_poll_ms),
	);
	let routes = HttpRouteService::new(&settings.routing.endpoint, settings.routing.timeout_ms)?;

	Ok(DepositClient::from_settings(
		settings,
		Arc::new(wallet),
		Arc::new(routes),
	)?)
}
