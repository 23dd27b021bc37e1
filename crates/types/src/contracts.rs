//! ABI bindings and calldata helpers for the vault, wrapped asset and router

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::models::Route;

sol! {
	interface IDefiVault {
		function deposit(address[] path, uint256[] amounts, address[] adapters, bool isAVAX) external payable;
	}

	interface IWrappedNative {
		function balanceOf(address account) external view returns (uint256);
		function approve(address spender, uint256 amount) external returns (bool);
	}

	interface IYakRouter {
		function findBestPath(uint256 amountIn, address tokenIn, address tokenOut, uint256 maxSteps)
			external
			view
			returns (uint256[] memory amounts, address[] memory adapters, address[] memory path);
	}
}

/// Calldata for `IDefiVault.deposit`
pub fn deposit_calldata(route: &Route, is_native: bool) -> Bytes {
	IDefiVault::depositCall {
		path: route.path.clone(),
		amounts: route.amounts.clone(),
		adapters: route.adapters.clone(),
		isAVAX: is_native,
	}
	.abi_encode()
	.into()
}

/// Calldata for `IWrappedNative.approve`
pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
	IWrappedNative::approveCall { spender, amount }
		.abi_encode()
		.into()
}

/// Calldata for `IWrappedNative.balanceOf`
pub fn balance_of_calldata(account: Address) -> Bytes {
	IWrappedNative::balanceOfCall { account }
		.abi_encode()
		.into()
}

pub fn decode_balance_of(data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
	Ok(IWrappedNative::balanceOfCall::abi_decode_returns(data, true)?._0)
}

/// Calldata for `IYakRouter.findBestPath`
pub fn find_best_path_calldata(
	amount_in: U256,
	token_in: Address,
	token_out: Address,
	max_steps: usize,
) -> Bytes {
	IYakRouter::findBestPathCall {
		amountIn: amount_in,
		tokenIn: token_in,
		tokenOut: token_out,
		maxSteps: U256::from(max_steps),
	}
	.abi_encode()
	.into()
}

pub fn decode_find_best_path(data: &[u8]) -> Result<Route, alloy_sol_types::Error> {
	let decoded = IYakRouter::findBestPathCall::abi_decode_returns(data, true)?;
	Ok(Route::new(decoded.path, decoded.amounts, decoded.adapters))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_sol_types::SolValue;

	#[test]
	fn test_selectors() {
		let approve = approve_calldata(Address::repeat_byte(1), U256::from(1u8));
		assert_eq!(&approve[..4], &IWrappedNative::approveCall::SELECTOR);
		// approve(address,uint256)
		assert_eq!(&approve[..4], &[0x09, 0x5e, 0xa7, 0xb3]);

		let balance = balance_of_calldata(Address::repeat_byte(1));
		// balanceOf(address)
		assert_eq!(&balance[..4], &[0x70, 0xa0, 0x82, 0x31]);
		assert_eq!(balance.len(), 4 + 32);
	}

	#[test]
	fn test_deposit_calldata_decodes() {
		let route = Route::new(
			vec![Address::repeat_byte(1), Address::repeat_byte(2)],
			vec![U256::from(10u8), U256::from(9u8)],
			vec![Address::repeat_byte(3)],
		);
		let data = deposit_calldata(&route, true);
		let call = IDefiVault::depositCall::abi_decode(&data, true).unwrap();
		assert_eq!(call.path, route.path);
		assert_eq!(call.amounts, route.amounts);
		assert_eq!(call.adapters, route.adapters);
		assert!(call.isAVAX);
	}

	#[test]
	fn test_decode_router_output() {
		let amounts = vec![U256::from(100u8), U256::from(95u8)];
		let adapters = vec![Address::repeat_byte(7)];
		let path = vec![Address::repeat_byte(1), Address::repeat_byte(2)];
		let encoded = (amounts.clone(), adapters.clone(), path.clone()).abi_encode_params();

		let route = decode_find_best_path(&encoded).unwrap();
		assert_eq!(route.amounts, amounts);
		assert_eq!(route.adapters, adapters);
		assert_eq!(route.path, path);
	}

	#[test]
	fn test_decode_balance() {
		let encoded = U256::from(42u8).abi_encode();
		assert_eq!(decode_balance_of(&encoded).unwrap(), U256::from(42u8));
	}
}
