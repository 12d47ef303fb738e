pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{NewReviewComment, ReviewComment};

use async_trait::async_trait;
use thiserror::Error;

use crate::pr::{PrError, PrRef, PullRequest};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub token not found in config or environment")]
    MissingToken,

    #[error(transparent)]
    Diff(#[from] PrError),
}

/// Operations the assistant needs from the code hosting platform.
///
/// Implementations must be Send + Sync so workflows can hold them behind a
/// shared reference across await points.
#[async_trait]
pub trait ReviewPlatform: Send + Sync {
    /// Fetch PR metadata together with its parsed diff.
    async fn get_pull_request(&self, pr: &PrRef) -> Result<PullRequest, PlatformError>;

    async fn get_review_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
    ) -> Result<ReviewComment, PlatformError>;

    async fn get_issue_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
    ) -> Result<ReviewComment, PlatformError>;

    /// Submit a review with event `COMMENT` carrying all line comments at once.
    async fn create_review(
        &self,
        pr: &PrRef,
        commit_sha: &str,
        comments: &[NewReviewComment],
    ) -> Result<(), PlatformError>;

    async fn create_review_comment(
        &self,
        pr: &PrRef,
        commit_sha: &str,
        comment: &NewReviewComment,
    ) -> Result<(), PlatformError>;

    async fn reply_to_review_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
        body: &str,
    ) -> Result<(), PlatformError>;

    async fn update_review_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
        body: &str,
    ) -> Result<(), PlatformError>;

    async fn create_issue_comment(&self, pr: &PrRef, body: &str) -> Result<(), PlatformError>;

    async fn add_labels(&self, pr: &PrRef, labels: &[String]) -> Result<(), PlatformError>;
}
