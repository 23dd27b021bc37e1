//! Shared addresses, amounts and builders

#![allow(dead_code)]

use vault_service::WorkflowConfig;
use vault_types::{
	constants::{SAVAX_ADDRESS, WAVAX_ADDRESS},
	Address, Network, Route, Session, U256,
};

pub const ACCOUNT: Address = Address::repeat_byte(0xaa);
pub const VAULT: Address = Address::repeat_byte(0x77);
pub const ADAPTER_A: Address = Address::repeat_byte(0x0a);
pub const ADAPTER_B: Address = Address::repeat_byte(0x0b);
pub const HOP: Address = Address::repeat_byte(0x33);
pub const EXPLORER: &str = "https://snowtrace.io";

/// `n` whole tokens in 18-decimal base units
pub fn ether(n: u64) -> U256 {
	U256::from(n) * U256::from(10u64).pow(U256::from(18u8))
}

/// WAVAX -> HOP -> sAVAX with a small loss per hop
pub fn route_for(amount_in: U256) -> Route {
	let mid = amount_in * U256::from(99u8) / U256::from(100u8);
	let out = mid * U256::from(98u8) / U256::from(100u8);
	Route::new(
		vec![WAVAX_ADDRESS, HOP, SAVAX_ADDRESS],
		vec![amount_in, mid, out],
		vec![ADAPTER_A, ADAPTER_B],
	)
}

pub fn workflow_config() -> WorkflowConfig {
	WorkflowConfig {
		network: Network::avalanche(),
		vault: VAULT,
		wrapped_asset: WAVAX_ADDRESS,
		explorer_url: EXPLORER.to_string(),
	}
}

pub fn ready_session() -> Session {
	Session::connected(ACCOUNT, 43114)
}
