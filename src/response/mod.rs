//! Committer reply triage: classify a reply to a review comment and decide
//! whether a defense is strong enough to resolve the thread.
//!
//! Everything here is pure and synchronous. Callers classify first and only
//! consult the resolution policy for defenses; the reply templates turn both
//! results into text for the hosting platform.

pub mod classifier;
pub mod replies;
pub mod resolution;
pub mod rules;
pub mod types;

pub use classifier::classify;
pub use resolution::{assess, should_resolve, ResolutionAssessment};
pub use types::{ResponseAnalysis, ResponseType, Sentiment};
