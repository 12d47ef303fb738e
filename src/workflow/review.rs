use tracing::{error, info, instrument, warn};

use super::WorkflowError;
use crate::analysis::scan_pull_request;
use crate::github::{NewReviewComment, ReviewPlatform};
use crate::pr::PrRef;
use crate::report::Finding;

pub const NO_ISSUES_COMMENT: &str = "✅ Automated review complete - no issues found. Code looks good!";

/// Result of reviewing a PR diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Nothing flagged; a single "looks good" comment was posted
    NoIssues,
    /// Findings were posted as one batched review
    Reviewed { comments: usize },
    /// The batched review was rejected and comments were posted one by one
    PostedIndividually { posted: usize, failed: usize },
}

/// Scan a PR's diff and post findings as review comments at the head commit.
#[instrument(skip(platform, pr), fields(pr = %pr))]
pub async fn run_review<P>(platform: &P, pr: &PrRef) -> Result<ReviewOutcome, WorkflowError>
where
    P: ReviewPlatform + ?Sized,
{
    let pull_request = platform.get_pull_request(pr).await?;
    info!(
        number = pull_request.number,
        title = %pull_request.title,
        author = %pull_request.author,
        files = pull_request.files.len(),
        "starting review"
    );

    let findings = scan_pull_request(&pull_request);
    if findings.is_empty() {
        info!("no issues found");
        platform.create_issue_comment(pr, NO_ISSUES_COMMENT).await?;
        return Ok(ReviewOutcome::NoIssues);
    }

    let comments: Vec<NewReviewComment> = findings.iter().map(to_review_comment).collect();
    info!(comments = comments.len(), "posting review comments");
    Ok(post_review_comments(platform, pr, &pull_request.head_sha, &comments).await)
}

fn to_review_comment(finding: &Finding) -> NewReviewComment {
    NewReviewComment {
        path: finding.file.clone(),
        position: finding.position,
        body: finding.message.clone(),
    }
}

/// Post all comments as one review; if the platform rejects the batch, post
/// them individually. Individual failures are logged and skipped.
async fn post_review_comments<P>(
    platform: &P,
    pr: &PrRef,
    commit_sha: &str,
    comments: &[NewReviewComment],
) -> ReviewOutcome
where
    P: ReviewPlatform + ?Sized,
{
    match platform.create_review(pr, commit_sha, comments).await {
        Ok(()) => {
            info!(comments = comments.len(), "posted review");
            ReviewOutcome::Reviewed {
                comments: comments.len(),
            }
        }
        Err(e) => {
            warn!(error = %e, "batched review failed, posting comments individually");
            let mut posted = 0;
            let mut failed = 0;
            for comment in comments {
                match platform.create_review_comment(pr, commit_sha, comment).await {
                    Ok(()) => posted += 1,
                    Err(e) => {
                        error!(path = %comment.path, error = %e, "failed to post comment");
                        failed += 1;
                    }
                }
            }
            ReviewOutcome::PostedIndividually { posted, failed }
        }
    }
}
