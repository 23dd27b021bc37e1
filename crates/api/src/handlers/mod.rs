pub mod common;
pub mod health;
pub mod paths;

pub use common::{error_response, method_not_allowed, ApiError, ErrorResponse};
pub use health::health;
pub use paths::post_find_best_path;
