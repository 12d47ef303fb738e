use serde::Serialize;

/// Intent of a committer's reply to a review comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// The committer is asking for clarification
    Question,
    /// The committer is justifying the flagged change rather than fixing it
    Defense,
    /// The committer accepts the feedback
    Acknowledgment,
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseType::Question => write!(f, "question"),
            ResponseType::Defense => write!(f, "defense"),
            ResponseType::Acknowledgment => write!(f, "acknowledgment"),
        }
    }
}

/// Overall tone of a reply, derived from word-list counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Result of classifying a single reply.
///
/// `C` is whatever the caller uses to represent the review comment being
/// answered. It is carried through untouched so downstream steps can reply
/// on the right thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseAnalysis<C> {
    /// Classified intent of the reply
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    /// Tone of the reply
    pub sentiment: Sentiment,
    /// Up to three salient sentences, in text order
    pub key_points: Vec<String>,
    /// Explanations for weak-defense patterns; empty unless `Defense`
    pub concerns: Vec<String>,
    /// The review comment this reply answers
    pub original_comment: C,
}
