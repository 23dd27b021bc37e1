//! Deployment constants and runtime limits

pub mod deployment;
pub mod limits;

pub use deployment::*;
pub use limits::*;
