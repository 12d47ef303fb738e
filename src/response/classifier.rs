use super::rules::{
    contains_any, ACKNOWLEDGMENT_CUES, CONCERN_RULES, CONCESSION_CUES, DEFENSE_CUES,
    KEY_POINT_CUES, NEGATIVE_WORDS, POSITIVE_WORDS, QUESTION_CUES,
};
use super::types::{ResponseAnalysis, ResponseType, Sentiment};

const MAX_KEY_POINTS: usize = 3;
const FALLBACK_KEY_POINTS: usize = 2;
const SUBSTANTIAL_SENTENCE_WORDS: usize = 5;

/// Classify a committer's reply to a review comment.
///
/// Type detection is an override cascade: question cues first, then defense
/// cues (skipped when the reply already reads as a question), then
/// acknowledgment cues, which win over both. "Thanks, but why?" is therefore an
/// acknowledgment.
///
/// Total over any input; empty text yields an acknowledgment with neutral
/// sentiment and no key points.
pub fn classify<C>(text: &str, original_comment: C) -> ResponseAnalysis<C> {
    let lower = text.to_lowercase();
    let response_type = classify_type(text, &lower);

    let concerns = if response_type == ResponseType::Defense {
        identify_concerns(&lower)
    } else {
        Vec::new()
    };

    ResponseAnalysis {
        response_type,
        sentiment: analyze_sentiment(&lower),
        key_points: extract_key_points(text),
        concerns,
        original_comment,
    }
}

fn classify_type(text: &str, lower: &str) -> ResponseType {
    let mut response_type = ResponseType::Acknowledgment;

    if text.contains('?') || contains_any(lower, QUESTION_CUES) {
        response_type = ResponseType::Question;
    }

    if response_type != ResponseType::Question
        && contains_any(lower, DEFENSE_CUES)
        && !contains_any(lower, CONCESSION_CUES)
    {
        response_type = ResponseType::Defense;
    }

    if contains_any(lower, ACKNOWLEDGMENT_CUES) {
        response_type = ResponseType::Acknowledgment;
    }

    response_type
}

/// Each word-list entry counts once if it appears anywhere in the text.
fn analyze_sentiment(lower: &str) -> Sentiment {
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

fn extract_key_points(text: &str) -> Vec<String> {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut points: Vec<String> = sentences
        .iter()
        .filter(|s| contains_any(&s.to_lowercase(), KEY_POINT_CUES))
        .map(|s| s.to_string())
        .collect();

    if points.is_empty() {
        points = sentences
            .iter()
            .filter(|s| s.split_whitespace().count() > SUBSTANTIAL_SENTENCE_WORDS)
            .take(FALLBACK_KEY_POINTS)
            .map(|s| s.to_string())
            .collect();
    }

    points.truncate(MAX_KEY_POINTS);
    points
}

fn identify_concerns(lower: &str) -> Vec<String> {
    CONCERN_RULES
        .iter()
        .filter(|rule| contains_any(lower, rule.triggers))
        .map(|rule| rule.message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_of(text: &str) -> ResponseType {
        classify(text, ()).response_type
    }

    #[test]
    fn test_question_scenario() {
        assert_eq!(
            type_of("Why is this change needed? Can you explain?"),
            ResponseType::Question
        );
    }

    #[test]
    fn test_question_mark_alone_is_question() {
        assert_eq!(type_of("Really?"), ResponseType::Question);
    }

    #[test]
    fn test_question_cue_without_mark() {
        assert_eq!(type_of("Could you point me to an example"), ResponseType::Question);
    }

    #[test]
    fn test_question_blocks_defense_stage() {
        // "because" is a defense cue but the question stage already fired
        let analysis = classify("Is it wrong because of the lock?", ());
        assert_eq!(analysis.response_type, ResponseType::Question);
        assert!(analysis.concerns.is_empty());
    }

    #[test]
    fn test_defense_scenario_with_legacy_justification() {
        let text = "This is necessary because of backward compatibility requirements. \
                    The legacy system requires this specific format. \
                    We have documentation here: https://docs.example.com/legacy-api";
        let analysis = classify(text, ());
        assert_eq!(analysis.response_type, ResponseType::Defense);
        assert_eq!(
            analysis.key_points,
            vec!["This is necessary because of backward compatibility requirements".to_string()]
        );
    }

    #[test]
    fn test_concession_vetoes_defense() {
        // "good point" is also an acknowledgment cue, so the result is acknowledgment
        assert_eq!(
            type_of("Good point, but this is intentional"),
            ResponseType::Acknowledgment
        );
    }

    #[test]
    fn test_acknowledgment_overrides_question() {
        assert_eq!(type_of("Thanks, but why?"), ResponseType::Acknowledgment);
    }

    #[test]
    fn test_acknowledgment_overrides_defense() {
        let analysis = classify("I think it is fine but I updated it anyway", ());
        assert_eq!(analysis.response_type, ResponseType::Acknowledgment);
        assert!(analysis.concerns.is_empty());
    }

    #[test]
    fn test_acknowledgment_scenario_is_positive() {
        let analysis = classify("Thanks for the feedback! Will fix this.", ());
        assert_eq!(analysis.response_type, ResponseType::Acknowledgment);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_dismissal_without_defense_cue_defaults_to_acknowledgment() {
        let analysis = classify("It works fine, no problem.", ());
        assert_eq!(analysis.response_type, ResponseType::Acknowledgment);
        assert!(analysis.concerns.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let analysis = classify("", ());
        assert_eq!(analysis.response_type, ResponseType::Acknowledgment);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert!(analysis.key_points.is_empty());
        assert!(analysis.concerns.is_empty());
    }

    #[test]
    fn test_whitespace_only_text() {
        let analysis = classify("   \n\t ", ());
        assert_eq!(analysis.response_type, ResponseType::Acknowledgment);
        assert!(analysis.key_points.is_empty());
    }

    #[test]
    fn test_sentiment_negative() {
        assert_eq!(
            classify("I disagree, that is wrong", ()).sentiment,
            Sentiment::Negative
        );
    }

    #[test]
    fn test_sentiment_counts_each_word_once() {
        // "good" three times counts as one positive; "bad" and "wrong" are two negatives
        assert_eq!(
            classify("good good good, bad and wrong", ()).sentiment,
            Sentiment::Negative
        );
    }

    #[test]
    fn test_sentiment_tie_is_neutral() {
        assert_eq!(classify("good but bad", ()).sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_concerns_follow_rule_order() {
        let analysis = classify(
            "Actually it doesn't matter, we always ship it like this and it works",
            (),
        );
        assert_eq!(analysis.response_type, ResponseType::Defense);
        assert_eq!(analysis.concerns.len(), 3);
        assert!(analysis.concerns[0].starts_with("\"It works\""));
        assert!(analysis.concerns[1].starts_with("Past practices"));
        assert!(analysis.concerns[2].starts_with("Code quality matters"));
    }

    #[test]
    fn test_concern_messages_are_fixed_text() {
        let analysis = classify("I think a quick fix is enough", ());
        assert_eq!(analysis.response_type, ResponseType::Defense);
        assert_eq!(
            analysis.concerns,
            vec!["Technical debt should be minimized. Quick fixes often lead to long-term maintenance issues.".to_string()]
        );
    }

    #[test]
    fn test_key_points_capped_at_three() {
        let text = "It is needed. It is required. It is necessary. It must stay.";
        let points = classify(text, ()).key_points;
        assert_eq!(
            points,
            vec!["It is needed", "It is required", "It is necessary"]
        );
    }

    #[test]
    fn test_key_points_fallback_to_substantial_sentences() {
        let text = "Short one. The first sentence here has plenty of words in it! \
                    Tiny. Another longer sentence that also has many words. A third long sentence with many words too.";
        let points = classify(text, ()).key_points;
        assert_eq!(
            points,
            vec![
                "The first sentence here has plenty of words in it",
                "Another longer sentence that also has many words",
            ]
        );
    }

    #[test]
    fn test_key_points_fallback_requires_more_than_five_words() {
        let points = classify("One two three four five. Ok.", ()).key_points;
        assert!(points.is_empty());
    }

    #[test]
    fn test_original_comment_is_passed_through() {
        let analysis = classify("done", "comment-42");
        assert_eq!(analysis.original_comment, "comment-42");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let text = "Actually this is on purpose, it works because of the cache.";
        assert_eq!(classify(text, 1u8), classify(text, 1u8));
    }
}
