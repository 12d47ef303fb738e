//! The three automations the assistant runs against a pull request: size
//! labelling, diff review, and reply triage. Each takes the platform and the
//! identifiers it needs explicitly; none of them read the environment.

pub mod respond;
pub mod review;
pub mod size;

pub use respond::handle_response;
pub use review::run_review;
pub use size::run_size_check;

use thiserror::Error;

use crate::github::PlatformError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
}
