use tracing::{info, instrument};

use super::WorkflowError;
use crate::analysis::SizeLabel;
use crate::github::ReviewPlatform;
use crate::pr::PrRef;
use crate::report::summary_comment;

/// Label the PR by size and post the statistics summary comment.
#[instrument(skip(platform, pr), fields(pr = %pr))]
pub async fn run_size_check<P>(platform: &P, pr: &PrRef) -> Result<SizeLabel, WorkflowError>
where
    P: ReviewPlatform + ?Sized,
{
    let pull_request = platform.get_pull_request(pr).await?;
    let size = SizeLabel::from_changes(pull_request.additions, pull_request.deletions);
    info!(
        number = pull_request.number,
        title = %pull_request.title,
        author = %pull_request.author,
        additions = pull_request.additions,
        deletions = pull_request.deletions,
        label = %size,
        "sized pull request"
    );

    platform.add_labels(pr, &[size.label().to_string()]).await?;
    platform
        .create_issue_comment(pr, &summary_comment(&pull_request, size))
        .await?;

    Ok(size)
}
