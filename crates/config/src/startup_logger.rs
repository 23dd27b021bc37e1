//! Service startup logging

use std::env;
use tracing::info;

use crate::Settings;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "vault-deposit";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Vault Deposit Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the deployment the service is pointed at
pub fn log_deployment(settings: &Settings) {
	info!(
		"⛓️ Network: {} (chain {})",
		settings.network.name, settings.network.chain_id
	);
	info!("🔌 RPC: {}", settings.network.rpc_url);
	info!("🧭 Router: {}", settings.contracts.router);
	info!(
		"🔁 Route: {} -> {} (max {} steps)",
		settings.contracts.wrapped_asset, settings.contracts.target_asset, settings.routing.max_steps
	);
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Vault Deposit Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Vault Deposit Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
}
