//! Vault Adapters
//!
//! Network-facing implementations of the capability traits in `vault-types`:
//! the HTTP path-finding client, a quoter calling the router contract over
//! JSON-RPC, and a JSON-RPC wallet provider.

pub mod client_cache;
pub mod error;
pub mod json_rpc;
pub mod json_rpc_wallet;
pub mod route_client;
pub mod router_quoter;

pub use client_cache::{global_client_cache, ClientCache, ClientConfig};
pub use error::{AdapterError, AdapterResult};
pub use json_rpc::JsonRpcClient;
pub use json_rpc_wallet::JsonRpcWallet;
pub use route_client::HttpRouteService;
pub use router_quoter::RouterContractQuoter;
