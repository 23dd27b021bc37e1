//! Conversion route returned by the path-finding service

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_ROUTE_STEPS;

/// Structural problems with a route
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteValidationError {
	#[error("Route is empty")]
	Empty,

	#[error("Route uses {steps} steps, more than the maximum of {max}")]
	TooManySteps { steps: usize, max: usize },

	#[error("Route shape mismatch: {path} path entries, {amounts} amounts, {adapters} adapters")]
	ShapeMismatch {
		path: usize,
		amounts: usize,
		adapters: usize,
	},

	#[error("Route amount '{0}' is not a decimal integer")]
	InvalidAmount(String),
}

/// Ordered hops, per-hop amounts and adapters converting the deposited asset
/// into the vault's target asset
///
/// A route over `n` steps has `n + 1` path entries and amounts and `n` adapters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
	pub path: Vec<Address>,
	pub amounts: Vec<U256>,
	pub adapters: Vec<Address>,
}

impl Route {
	pub fn new(path: Vec<Address>, amounts: Vec<U256>, adapters: Vec<Address>) -> Self {
		Self {
			path,
			amounts,
			adapters,
		}
	}

	/// Number of conversion steps
	pub fn steps(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty() || self.path.len() < 2
	}

	pub fn amount_in(&self) -> Option<U256> {
		self.amounts.first().copied()
	}

	/// Expected amount of the target asset
	pub fn amount_out(&self) -> Option<U256> {
		self.amounts.last().copied()
	}

	/// Validate against the deployment-wide limit of [`MAX_ROUTE_STEPS`]
	pub fn validate(&self) -> Result<(), RouteValidationError> {
		self.validate_within(MAX_ROUTE_STEPS)
	}

	/// Validate the shape and reject routes longer than `max_steps`
	pub fn validate_within(&self, max_steps: usize) -> Result<(), RouteValidationError> {
		if self.is_empty() {
			return Err(RouteValidationError::Empty);
		}
		if self.steps() > max_steps {
			return Err(RouteValidationError::TooManySteps {
				steps: self.steps(),
				max: max_steps,
			});
		}
		if self.path.len() != self.adapters.len() + 1 || self.amounts.len() != self.path.len() {
			return Err(RouteValidationError::ShapeMismatch {
				path: self.path.len(),
				amounts: self.amounts.len(),
				adapters: self.adapters.len(),
			});
		}
		Ok(())
	}
}

/// Wire format of a route: amounts travel as decimal strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteResponse {
	pub path: Vec<Address>,
	pub amounts: Vec<String>,
	pub adapters: Vec<Address>,
}

impl From<&Route> for RouteResponse {
	fn from(route: &Route) -> Self {
		Self {
			path: route.path.clone(),
			amounts: route.amounts.iter().map(|a| a.to_string()).collect(),
			adapters: route.adapters.clone(),
		}
	}
}

impl TryFrom<RouteResponse> for Route {
	type Error = RouteValidationError;

	fn try_from(response: RouteResponse) -> Result<Self, Self::Error> {
		let amounts = response
			.amounts
			.iter()
			.map(|a| {
				U256::from_str_radix(a, 10).map_err(|_| RouteValidationError::InvalidAmount(a.clone()))
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Route::new(response.path, amounts, response.adapters))
	}
}
