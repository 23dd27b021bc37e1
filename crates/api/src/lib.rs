//! Vault API
//!
//! Axum router serving the path-finding endpoint used by deposit clients.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use handlers::ErrorResponse;
pub use router::create_router;
pub use state::AppState;
