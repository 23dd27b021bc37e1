//! Centralized mocks and fixtures for testing

pub mod fixtures;
pub mod routes;
pub mod test_server;
pub mod wallet;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use routes::MockRouteService;
#[allow(unused_imports)]
pub use test_server::TestServer;
#[allow(unused_imports)]
pub use wallet::MockWallet;
