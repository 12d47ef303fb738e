//! Fixed cue tables used by the classifier and the resolution policy.
//!
//! All plain cues are matched by substring containment against lower-cased
//! text, so "how" also fires inside "however" and "show".

use regex::Regex;
use std::sync::LazyLock;

pub const QUESTION_CUES: &[&str] = &[
    "why",
    "how",
    "what",
    "when",
    "where",
    "could you",
    "can you",
    "would you",
    "should i",
    "is there",
    "are there",
];

pub const DEFENSE_CUES: &[&str] = &[
    "but",
    "however",
    "actually",
    "because",
    "the reason",
    "this is",
    "i disagree",
    "i think",
    "in my opinion",
    "i believe",
    "necessary",
    "required",
    "needed",
    "intentional",
    "on purpose",
];

/// Concessions that veto the defense stage even when a justification cue is present.
pub const CONCESSION_CUES: &[&str] = &["you're right", "good point"];

pub const ACKNOWLEDGMENT_CUES: &[&str] = &[
    "thanks",
    "thank you",
    "will fix",
    "will change",
    "good point",
    "you're right",
    "agreed",
    "makes sense",
    "fixed",
    "done",
    "updated",
];

pub const POSITIVE_WORDS: &[&str] = &[
    "thanks",
    "thank",
    "appreciate",
    "good",
    "great",
    "excellent",
    "helpful",
    "agree",
    "right",
    "correct",
    "perfect",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "disagree",
    "wrong",
    "incorrect",
    "bad",
    "unnecessary",
    "don't",
    "won't",
    "can't",
    "shouldn't",
];

pub const KEY_POINT_CUES: &[&str] = &[
    "because",
    "reason",
    "since",
    "due to",
    "therefore",
    "this is",
    "this allows",
    "this ensures",
    "this prevents",
    "required",
    "necessary",
    "needed",
    "must",
];

/// A group of phrases that mark a weak defense, with the explanation posted back.
#[derive(Debug)]
pub struct ConcernRule {
    pub triggers: &'static [&'static str],
    pub message: &'static str,
}

pub const CONCERN_RULES: &[ConcernRule] = &[
    ConcernRule {
        triggers: &["it works", "it's working"],
        message: "\"It works\" is not sufficient justification. Code should also be maintainable, secure, and follow best practices.",
    },
    ConcernRule {
        triggers: &["always done", "we always"],
        message: "Past practices should be evaluated against current best practices and standards.",
    },
    ConcernRule {
        triggers: &["don't have time", "quick fix"],
        message: "Technical debt should be minimized. Quick fixes often lead to long-term maintenance issues.",
    },
    ConcernRule {
        triggers: &["no one will notice", "doesn't matter"],
        message: "Code quality matters regardless of visibility. This affects maintainability and team standards.",
    },
];

/// A weighted justification pattern. Every rule is tested; weights of all
/// matching rules are summed.
#[derive(Debug)]
pub struct ResolutionRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub weight: f64,
}

const RESOLUTION_TABLE: &[(&str, &str, f64)] = &[
    ("performance", r"(?i)performance|optimization|faster|efficient", 0.8),
    ("compatibility", r"(?i)backward compatibility|legacy|existing", 0.9),
    (
        "framework",
        r"(?i)(framework|library) (requirement|convention|standard)",
        0.9,
    ),
    ("design", r"(?i)design pattern|architecture|by design", 0.8),
    ("test-fixture", r"(?i)(test|mock|stub) (data|code|setup)", 0.7),
    ("temporary", r"(?i)temporary|placeholder|will be replaced", 0.5),
];

pub static RESOLUTION_RULES: LazyLock<Vec<ResolutionRule>> = LazyLock::new(|| {
    RESOLUTION_TABLE
        .iter()
        .map(|&(name, pattern, weight)| ResolutionRule {
            name,
            pattern: Regex::new(pattern).expect("resolution pattern is valid"),
            weight,
        })
        .collect()
});

pub const CODE_EXAMPLE_BONUS: f64 = 0.3;
pub const REFERENCE_BONUS: f64 = 0.2;

/// Fenced block marker or a non-empty inline code span.
pub static CODE_EXAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```|`[^`]+`").expect("code example pattern is valid"));

pub static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)http|link|documentation|docs|spec").expect("reference pattern is valid")
});

/// Dismissals that cannot carry a reply on their own.
pub static DISMISSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)it works|no problem|don't worry|it's fine").expect("dismissal pattern is valid")
});

pub const DISMISSAL_SCORE_FLOOR: f64 = 0.5;
pub const RESOLUTION_THRESHOLD: f64 = 0.7;
pub const DETAIL_WORD_COUNT: usize = 20;

static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("word separator pattern is valid"));

/// Number of pieces left by splitting on whitespace runs. Leading and
/// trailing whitespace each leave an empty piece, and empty text is one piece.
pub fn word_count(text: &str) -> usize {
    WORD_SEPARATOR.split(text).count()
}

/// True when `lower` contains any of `cues`.
pub fn contains_any(lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lower.contains(cue))
}
