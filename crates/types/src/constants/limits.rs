//! Global limits and defaults for configuration and runtime

/// Maximum number of hops the router may use for a deposit route
pub const MAX_ROUTE_STEPS: usize = 3;

/// Fractional digits shown in the amount field when driven by the slider
pub const AMOUNT_DISPLAY_PLACES: usize = 6;

/// Minimum allowed timeout for routing requests in milliseconds
pub const MIN_ROUTING_TIMEOUT_MS: u64 = 100; // 100ms

/// Maximum allowed timeout for routing requests in milliseconds
pub const MAX_ROUTING_TIMEOUT_MS: u64 = 30_000; // 30s

/// Default timeout for routing requests in milliseconds
pub const DEFAULT_ROUTING_TIMEOUT_MS: u64 = 10_000;

/// Default interval between receipt polls while waiting for confirmation
pub const DEFAULT_RECEIPT_POLL_MS: u64 = 2_000;

/// Default interval between account/chain polls for change notifications
pub const DEFAULT_EVENT_POLL_MS: u64 = 1_000;

/// Default interval between price refreshes
pub const DEFAULT_PRICE_REFRESH_MS: u64 = 60_000;

/// Capacity of the provider event channel
pub const PROVIDER_EVENT_CAPACITY: usize = 16;
