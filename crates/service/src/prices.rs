//! Periodic USD price refresh

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use vault_types::AssetSymbol;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceError {
	#[error("Price source unavailable: {0}")]
	Unavailable(String),
}

/// Anything that can quote USD prices for the supported assets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
	async fn fetch_prices(&self) -> Result<HashMap<AssetSymbol, f64>, PriceError>;
}

/// Fixed placeholder prices
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
	prices: HashMap<AssetSymbol, f64>,
}

impl StaticPriceSource {
	pub fn new(prices: HashMap<AssetSymbol, f64>) -> Self {
		Self { prices }
	}
}

#[async_trait]
impl PriceSource for StaticPriceSource {
	async fn fetch_prices(&self) -> Result<HashMap<AssetSymbol, f64>, PriceError> {
		Ok(self.prices.clone())
	}
}

/// Shared price-by-symbol map
#[derive(Debug, Clone, Default)]
pub struct PriceFeed {
	prices: Arc<DashMap<AssetSymbol, f64>>,
}

impl PriceFeed {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn price(&self, asset: AssetSymbol) -> Option<f64> {
		self.prices.get(&asset).map(|p| *p.value())
	}

	pub fn snapshot(&self) -> HashMap<AssetSymbol, f64> {
		self.prices
			.iter()
			.map(|entry| (*entry.key(), *entry.value()))
			.collect()
	}

	/// Fetch once; on failure the previous prices stay in place
	pub async fn refresh(&self, source: &dyn PriceSource) -> Result<usize, PriceError> {
		let prices = source.fetch_prices().await?;
		let count = prices.len();
		for (asset, price) in prices {
			self.prices.insert(asset, price);
		}
		debug!("Refreshed {} price(s)", count);
		Ok(count)
	}

	/// Refresh now and then every `interval` until the handle is dropped
	pub fn spawn(source: Arc<dyn PriceSource>, interval: Duration) -> PriceFeedHandle {
		let feed = PriceFeed::new();
		let task_feed = feed.clone();

		let task = tokio::spawn(async move {
			let mut ticker = tokio::time::interval(interval);
			loop {
				ticker.tick().await;
				if let Err(e) = task_feed.refresh(source.as_ref()).await {
					warn!("Price refresh failed, keeping previous prices: {}", e);
				}
			}
		});

		PriceFeedHandle { feed, task }
	}
}

/// Keeps the refresh task alive; dropping it stops refreshing
#[derive(Debug)]
pub struct PriceFeedHandle {
	feed: PriceFeed,
	task: JoinHandle<()>,
}

impl PriceFeedHandle {
	pub fn feed(&self) -> &PriceFeed {
		&self.feed
	}
}

impl Drop for PriceFeedHandle {
	fn drop(&mut self) {
		self.task.abort();
	}
}
