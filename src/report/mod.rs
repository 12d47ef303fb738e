pub mod types;

pub use types::{Finding, ScanReport, Severity};

use crate::analysis::SizeLabel;
use crate::pr::{DiffFile, PullRequest};
use crate::response::{ResolutionAssessment, ResponseAnalysis, ResponseType, Sentiment};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Build a ScanReport from scanner findings and the files they came from.
pub fn build(source: &str, files: &[DiffFile], findings: Vec<Finding>) -> ScanReport {
    let highest_severity = findings.iter().map(|f| f.severity).max();

    ScanReport {
        source: source.to_string(),
        files_changed: files.len(),
        additions: files.iter().map(|f| f.additions).sum(),
        deletions: files.iter().map(|f| f.deletions).sum(),
        findings,
        highest_severity,
    }
}

/// Output the report to terminal (default) or to a markdown file.
#[instrument(skip(report), fields(source = %report.source, findings = report.findings.len()))]
pub fn output(report: &ScanReport, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing report to terminal");
            print_terminal_report(report);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            std::fs::write(path, render_markdown_report(report))?;
            Ok(())
        }
    }
}

/// PR statistics comment posted by the size workflow.
pub fn summary_comment(pr: &PullRequest, size: SizeLabel) -> String {
    format!(
        "## 🤖 Automated PR Review\n\n\
         ### PR Statistics\n\
         - **Files changed:** {}\n\
         - **Lines added:** +{}\n\
         - **Lines deleted:** -{}\n\
         - **Total changes:** {}\n\n\
         ### Size Assessment\n\
         {}\n\n\
         ### Checklist\n\
         - [ ] Code follows the project's coding standards\n\
         - [ ] Tests have been added/updated\n\
         - [ ] Documentation updated (if needed)\n\
         - [ ] All CI checks pass\n\
         - [ ] PR reviewed by a team member\n\n\
         ---\n\
         *This is an automated review. Please reach out to maintainers if you have questions.*",
        pr.files_changed,
        pr.additions,
        pr.deletions,
        pr.additions + pr.deletions,
        size.comment()
    )
}

/// Print a reply classification and, for defenses, the resolution working.
pub fn print_analysis<C>(analysis: &ResponseAnalysis<C>, assessment: &ResolutionAssessment) {
    println!();
    println!("Type: {}", colorize_type(analysis.response_type));
    println!("Sentiment: {}", colorize_sentiment(analysis.sentiment));

    if !analysis.key_points.is_empty() {
        println!("Key points:");
        for point in &analysis.key_points {
            println!("  • {}", point);
        }
    }
    if !analysis.concerns.is_empty() {
        println!("Concerns:");
        for concern in &analysis.concerns {
            println!("  • {}", concern);
        }
    }

    if analysis.response_type == ResponseType::Defense {
        println!(
            "Resolution: score {:.2} ({}) | words {} | code {} | reference {}",
            assessment.score,
            if assessment.matched_rules.is_empty() {
                "no rules matched".to_string()
            } else {
                assessment.matched_rules.join(", ")
            },
            assessment.word_count,
            assessment.has_code_example,
            assessment.has_reference,
        );
        let verdict = format!("{:?}", assessment.verdict);
        if assessment.is_resolved() {
            println!("Verdict: {}", verdict.green().bold());
        } else {
            println!("Verdict: {}", verdict.yellow().bold());
        }
    }
    println!();
}

/// Format and print the report to the terminal with colors.
///
/// Diff: sample.patch
/// Files changed: 2 | +14 -3
///
/// ═══ Findings ═══
/// • [HIGH] message (src/app.js:12)
///
/// ═══ Highest Severity: HIGH ═══
fn print_terminal_report(report: &ScanReport) {
    println!();
    println!("Diff: {}", report.source);
    println!(
        "Files changed: {} | +{} -{}",
        report.files_changed, report.additions, report.deletions
    );
    println!();

    println!("═══ Findings ═══");
    if report.findings.is_empty() {
        println!("  No findings.");
    } else {
        for finding in &report.findings {
            println!(
                "  • [{}] {} ({}:{})",
                colorize_severity(finding.severity),
                finding.message,
                finding.file,
                finding.line
            );
        }
    }
    println!();

    match report.highest_severity {
        Some(severity) => println!("═══ Highest Severity: {} ═══", colorize_severity(severity)),
        None => println!("═══ {} ═══", "Clean".green().bold()),
    }
    println!();
}

fn render_markdown_report(report: &ScanReport) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Diff scan: {}\n\n", report.source));
    md.push_str(&format!(
        "**Files changed:** {} | **+{} -{}**\n\n",
        report.files_changed, report.additions, report.deletions
    ));

    md.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        md.push_str("No findings.\n\n");
    } else {
        for finding in &report.findings {
            md.push_str(&format!(
                "- **[{}]** {} (`{}:{}`)\n",
                finding.severity, finding.message, finding.file, finding.line
            ));
        }
        md.push('\n');
    }

    match report.highest_severity {
        Some(severity) => md.push_str(&format!("## Highest Severity: {}\n", severity)),
        None => md.push_str("## Clean\n"),
    }
    md
}

fn colorize_severity(level: Severity) -> colored::ColoredString {
    match level {
        Severity::High => "HIGH".red().bold(),
        Severity::Medium => "MEDIUM".yellow().bold(),
        Severity::Low => "LOW".green().bold(),
    }
}

fn colorize_type(response_type: ResponseType) -> colored::ColoredString {
    let text = response_type.to_string();
    match response_type {
        ResponseType::Question => text.cyan().bold(),
        ResponseType::Defense => text.yellow().bold(),
        ResponseType::Acknowledgment => text.green().bold(),
    }
}

fn colorize_sentiment(sentiment: Sentiment) -> colored::ColoredString {
    let text = sentiment.to_string();
    match sentiment {
        Sentiment::Positive => text.green(),
        Sentiment::Neutral => text.normal(),
        Sentiment::Negative => text.red(),
    }
}
