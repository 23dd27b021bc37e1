//! Deposit intents, workflow status and submission errors

pub mod errors;
pub mod intent;
pub mod status;

pub use errors::{DepositValidationError, SubmitRejection};
pub use intent::DepositIntent;
pub use status::{FailureReason, WorkflowStatus};
