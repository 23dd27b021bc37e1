//! Vault path-finding server
//!
//! Serves `POST /api/findBestPath` for deposit clients.

use vault_deposit::VaultAppBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	VaultAppBuilder::new().start_server().await
}
