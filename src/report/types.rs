use serde::Serialize;

/// Severity of a diff finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// A single issue found on an added diff line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Markdown body posted as the review comment
    pub message: String,
    /// File path the line belongs to
    pub file: String,
    /// Line number in the new version of the file
    pub line: usize,
    /// GitHub diff position: lines below the file's first hunk header
    pub position: usize,
    /// Severity of this individual finding
    pub severity: Severity,
}

/// Offline scan report for a diff, rendered to the terminal or markdown.
#[derive(Debug)]
pub struct ScanReport {
    /// Where the diff came from (file path or PR reference)
    pub source: String,
    /// Files in the diff
    pub files_changed: usize,
    /// Lines added
    pub additions: usize,
    /// Lines deleted
    pub deletions: usize,
    /// Findings across all files, in diff order
    pub findings: Vec<Finding>,
    /// Highest severity across all findings, `None` when clean
    pub highest_severity: Option<Severity>,
}
