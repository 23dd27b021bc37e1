//! Addresses and identifiers of the Avalanche C-Chain deployment

use alloy_primitives::{address, Address};

/// Avalanche C-Chain mainnet
pub const AVALANCHE_C_CHAIN_ID: u64 = 43114;

pub const AVALANCHE_C_CHAIN_NAME: &str = "Avalanche C-Chain";

/// Public RPC endpoint used by the path-finding service
pub const DEFAULT_RPC_URL: &str = "https://api.avax.network/ext/bc/C/rpc";

/// Block explorer base URL; transaction links are `<base>/tx/<hash>`
pub const DEFAULT_EXPLORER_URL: &str = "https://snowtrace.io";

/// Wrapped AVAX (WAVAX) token contract
pub const WAVAX_ADDRESS: Address = address!("b31f66aa3c1e785363f0875a1b74e27b85fd66c7");

/// Staked AVAX (sAVAX), the asset the vault holds
pub const SAVAX_ADDRESS: Address = address!("2b2c81e08f1af8835a78bb2a90ae924ace0ea4be");

/// Yield Yak aggregator router
pub const YAK_ROUTER_ADDRESS: Address = address!("c4729e56b831d74bbc18797e0e17a295fa77488c");

/// Decimal count of both depositable assets
pub const ASSET_DECIMALS: u8 = 18;
