//! Path-finding requests, errors and the routing service trait

pub mod errors;
pub mod request;
pub mod traits;

pub use errors::{QuoteError, QuoteRecovery, QuoteValidationError};
pub use request::{FindBestPathBody, PathRequest};
pub use traits::RouteService;

/// Result type for path-finding operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Result type for request validation
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;
