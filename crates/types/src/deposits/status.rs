//! Workflow status and failure reasons

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse failure reason, enough to decide whether a retry makes sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
	PathNotFound,
	ApprovalRejected,
	ApprovalFailed,
	DepositRejected,
	DepositFailed,
}

impl FailureReason {
	/// Message shown to the user
	pub fn message(&self) -> &'static str {
		match self {
			FailureReason::PathNotFound => "Failed to find best path. Please try again.",
			FailureReason::ApprovalRejected => "WAVAX approval was rejected in the wallet.",
			FailureReason::ApprovalFailed => "WAVAX approval failed. Please try again.",
			FailureReason::DepositRejected => "Deposit was rejected in the wallet.",
			FailureReason::DepositFailed => "Deposit failed. Please try again.",
		}
	}

	/// The user declined in the wallet, as opposed to a service or chain failure
	pub fn is_user_rejection(&self) -> bool {
		matches!(
			self,
			FailureReason::ApprovalRejected | FailureReason::DepositRejected
		)
	}
}

impl fmt::Display for FailureReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			FailureReason::PathNotFound => "PathNotFound",
			FailureReason::ApprovalRejected => "ApprovalRejected",
			FailureReason::ApprovalFailed => "ApprovalFailed",
			FailureReason::DepositRejected => "DepositRejected",
			FailureReason::DepositFailed => "DepositFailed",
		};
		f.write_str(name)
	}
}

/// Position of a deposit attempt in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkflowStatus {
	#[default]
	Idle,
	FindingPath,
	Approving,
	Depositing,
	Completed,
	Failed(FailureReason),
}

impl WorkflowStatus {
	/// A submission is in flight
	pub fn is_busy(&self) -> bool {
		matches!(
			self,
			WorkflowStatus::FindingPath | WorkflowStatus::Approving | WorkflowStatus::Depositing
		)
	}

	pub fn is_terminal(&self) -> bool {
		matches!(self, WorkflowStatus::Completed | WorkflowStatus::Failed(_))
	}

	pub fn failure(&self) -> Option<FailureReason> {
		match self {
			WorkflowStatus::Failed(reason) => Some(*reason),
			_ => None,
		}
	}
}

impl fmt::Display for WorkflowStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			WorkflowStatus::Idle => f.write_str("Idle"),
			WorkflowStatus::FindingPath => f.write_str("FindingPath"),
			WorkflowStatus::Approving => f.write_str("Approving"),
			WorkflowStatus::Depositing => f.write_str("Depositing"),
			WorkflowStatus::Completed => f.write_str("Completed"),
			WorkflowStatus::Failed(reason) => write!(f, "Failed({})", reason),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_busy_and_terminal() {
		assert!(!WorkflowStatus::Idle.is_busy());
		assert!(WorkflowStatus::FindingPath.is_busy());
		assert!(WorkflowStatus::Approving.is_busy());
		assert!(WorkflowStatus::Depositing.is_busy());
		assert!(WorkflowStatus::Completed.is_terminal());
		assert!(WorkflowStatus::Failed(FailureReason::DepositFailed).is_terminal());
		assert!(!WorkflowStatus::Failed(FailureReason::DepositFailed).is_busy());
	}

	#[test]
	fn test_display() {
		assert_eq!(
			WorkflowStatus::Failed(FailureReason::PathNotFound).to_string(),
			"Failed(PathNotFound)"
		);
		assert_eq!(WorkflowStatus::Depositing.to_string(), "Depositing");
	}

	#[test]
	fn test_rejections_flagged() {
		assert!(FailureReason::ApprovalRejected.is_user_rejection());
		assert!(FailureReason::DepositRejected.is_user_rejection());
		assert!(!FailureReason::DepositFailed.is_user_rejection());
		assert!(!FailureReason::PathNotFound.is_user_rejection());
	}
}
