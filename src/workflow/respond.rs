use tracing::{info, instrument, warn};

use super::WorkflowError;
use crate::config::CommentEvent;
use crate::github::{ReviewComment, ReviewPlatform};
use crate::pr::PrRef;
use crate::response::replies::{
    counter_reply, question_reply, resolution_reply, ACKNOWLEDGMENT_REPLY, RESOLVED_MARKER,
};
use crate::response::{assess, classify, ResponseType};

/// What the assistant did with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Posted an answer to a question
    Answered,
    /// Accepted a defense; `marked` is false when the original comment could not be updated
    Resolved { marked: bool },
    /// Pushed back on a defense
    Countered,
    /// Thanked the committer
    Acknowledged,
}

/// Triage a committer's reply to a review comment and respond on the thread.
#[instrument(skip(platform, pr, event), fields(pr = %pr, comment_id = event.comment_id, user = event.user.as_deref().unwrap_or("unknown")))]
pub async fn handle_response<P>(
    platform: &P,
    pr: &PrRef,
    event: &CommentEvent,
) -> Result<ResponseOutcome, WorkflowError>
where
    P: ReviewPlatform + ?Sized,
{
    info!("analyzing response");
    let review_comment = fetch_comment(platform, pr, event.comment_id).await?;

    let analysis = classify(&event.body, review_comment);
    info!(response_type = %analysis.response_type, sentiment = %analysis.sentiment, "classified response");

    let thread_id = analysis.original_comment.id;
    let outcome = match analysis.response_type {
        ResponseType::Question => {
            let reply = question_reply(&event.body, &analysis);
            platform.reply_to_review_comment(pr, thread_id, &reply).await?;
            info!("posted answer to committer question");
            ResponseOutcome::Answered
        }
        ResponseType::Defense => {
            let assessment = assess(&event.body, &analysis);
            info!(score = assessment.score, verdict = ?assessment.verdict, "assessed defense");

            if assessment.is_resolved() {
                let reply = resolution_reply(&analysis);
                platform.reply_to_review_comment(pr, thread_id, &reply).await?;

                let marked_body = format!("{}{}", analysis.original_comment.body, RESOLVED_MARKER);
                let marked = match platform.update_review_comment(pr, thread_id, &marked_body).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, "could not update comment, but response was posted");
                        false
                    }
                };
                info!("resolved comment based on valid defense");
                ResponseOutcome::Resolved { marked }
            } else {
                let reply = counter_reply(&analysis);
                platform.reply_to_review_comment(pr, thread_id, &reply).await?;
                info!("posted counter-response to defense");
                ResponseOutcome::Countered
            }
        }
        ResponseType::Acknowledgment => {
            platform
                .reply_to_review_comment(pr, thread_id, ACKNOWLEDGMENT_REPLY)
                .await?;
            info!("committer acknowledged the review feedback");
            ResponseOutcome::Acknowledged
        }
    };

    Ok(outcome)
}

/// The reply may target a line-level review comment or a conversation comment.
async fn fetch_comment<P>(
    platform: &P,
    pr: &PrRef,
    comment_id: u64,
) -> Result<ReviewComment, WorkflowError>
where
    P: ReviewPlatform + ?Sized,
{
    match platform.get_review_comment(pr, comment_id).await {
        Ok(comment) => Ok(comment),
        Err(e) => {
            info!(error = %e, "not a review comment, checking issue comments");
            Ok(platform.get_issue_comment(pr, comment_id).await?)
        }
    }
}
