use super::rules::{
    CODE_EXAMPLE, CODE_EXAMPLE_BONUS, DETAIL_WORD_COUNT, DISMISSAL, DISMISSAL_SCORE_FLOOR,
    REFERENCE, REFERENCE_BONUS, RESOLUTION_RULES, RESOLUTION_THRESHOLD,
    word_count,
};
use super::types::{ResponseAnalysis, ResponseType};

/// Why the policy reached its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Only defenses are ever resolved
    NotDefense,
    /// A dismissal ("it works", "no problem", ...) without enough justification
    Dismissed,
    /// Justification score below the resolution threshold
    InsufficientScore,
    /// Score is high enough but the reply is short and cites nothing
    InsufficientDetail,
    Resolved,
}

/// Full working of a resolution decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionAssessment {
    pub score: f64,
    pub matched_rules: Vec<&'static str>,
    pub has_code_example: bool,
    pub has_reference: bool,
    pub word_count: usize,
    pub verdict: Verdict,
}

impl ResolutionAssessment {
    pub fn is_resolved(&self) -> bool {
        self.verdict == Verdict::Resolved
    }
}

/// Decide whether a defense is strong enough to resolve the review comment it answers.
pub fn should_resolve<C>(text: &str, analysis: &ResponseAnalysis<C>) -> bool {
    assess(text, analysis).is_resolved()
}

/// Score a reply against the weighted justification table and apply the
/// dismissal and detail gates.
///
/// The score threshold and the detail gate are independent: a short
/// high-scoring reply with no code or reference is not resolved, and neither
/// is a long reply that matches no justification pattern.
pub fn assess<C>(text: &str, analysis: &ResponseAnalysis<C>) -> ResolutionAssessment {
    let has_code_example = CODE_EXAMPLE.is_match(text);
    let has_reference = REFERENCE.is_match(text);
    let word_count = word_count(text);

    let mut assessment = ResolutionAssessment {
        score: 0.0,
        matched_rules: Vec::new(),
        has_code_example,
        has_reference,
        word_count,
        verdict: Verdict::NotDefense,
    };

    if analysis.response_type != ResponseType::Defense {
        return assessment;
    }

    for rule in RESOLUTION_RULES.iter() {
        if rule.pattern.is_match(text) {
            assessment.score += rule.weight;
            assessment.matched_rules.push(rule.name);
        }
    }
    if has_code_example {
        assessment.score += CODE_EXAMPLE_BONUS;
    }
    if has_reference {
        assessment.score += REFERENCE_BONUS;
    }

    let has_sufficient_detail = word_count > DETAIL_WORD_COUNT || has_code_example || has_reference;

    assessment.verdict = if DISMISSAL.is_match(text) && assessment.score < DISMISSAL_SCORE_FLOOR {
        Verdict::Dismissed
    } else if assessment.score < RESOLUTION_THRESHOLD {
        Verdict::InsufficientScore
    } else if !has_sufficient_detail {
        Verdict::InsufficientDetail
    } else {
        Verdict::Resolved
    };

    assessment
}
