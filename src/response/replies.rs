use super::types::ResponseAnalysis;

pub const ACKNOWLEDGMENT_REPLY: &str = "👍 Thank you for addressing this feedback!";

/// Appended to the original review comment when a defense resolves it.
pub const RESOLVED_MARKER: &str = "\n\n✅ **Resolved**: The committer's explanation is valid.";

/// Answer a committer's question, picking a template by the kind of question asked.
pub fn question_reply<C>(text: &str, analysis: &ResponseAnalysis<C>) -> String {
    let lower = text.to_lowercase();

    if lower.contains("why") || lower.contains("reason") {
        "This suggestion is made to improve code quality, maintainability, or security. \
         The specific concern is highlighted in the original review comment. \
         If you need more clarification on any particular point, please let me know!"
            .to_string()
    } else if lower.contains("how") {
        "Here's how you can address this:\n\n\
         1. Review the suggested change in the comment above\n\
         2. Apply the recommended pattern or approach\n\
         3. Test the change to ensure it works as expected\n\n\
         If you need specific code examples or further guidance, please ask!"
            .to_string()
    } else if lower.contains("alternative") || lower.contains("better way") {
        "The approach suggested in the review comment is considered a best practice. \
         However, if you have a specific alternative in mind that addresses the same concerns, \
         please share it and I'll be happy to review it!"
            .to_string()
    } else {
        let detail = match analysis.key_points.first() {
            Some(point) => format!("The main concern here is: {}", point),
            None => "Please refer to the review comment above for details.".to_string(),
        };
        format!(
            "Good question! {} Feel free to ask for more specific guidance if needed.",
            detail
        )
    }
}

/// Accept a defense, echoing the key points that justified it.
pub fn resolution_reply<C>(analysis: &ResponseAnalysis<C>) -> String {
    format!(
        "✅ Thank you for the explanation! Your reasoning is valid:\n\n{}\n\n\
         This addresses the concern raised in the review. Marking this as resolved.",
        bullets(&analysis.key_points)
    )
}

/// Push back on a defense, listing the weak-defense concerns found in it.
pub fn counter_reply<C>(analysis: &ResponseAnalysis<C>) -> String {
    format!(
        "I understand your perspective, but I'd like to clarify:\n\n{}\n\n\
         The original suggestion still stands as it addresses important concerns about code quality, \
         security, or maintainability. If you have additional context that I'm missing, please share it!",
        bullets(&analysis.concerns)
    )
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
