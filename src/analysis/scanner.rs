//! Line-oriented diff scanner.
//!
//! Each added line is checked against a fixed table of textual rules, some of
//! them scoped to file extensions. Every matching rule yields one finding, in
//! table order.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::pr::{DiffFile, PullRequest};
use crate::report::{Finding, Severity};

const MAX_LINE_LENGTH: usize = 120;
const NESTING_LIMIT: usize = 3;

/// An issue detected on a single line of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issue {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: &'static str,
}

/// Which files a rule applies to.
#[derive(Debug)]
enum Scope {
    AllFiles,
    Extensions(&'static [&'static str]),
    /// Extensions, skipping paths that contain any of the given fragments
    ExtensionsExcept(&'static [&'static str], &'static [&'static str]),
}

impl Scope {
    fn applies_to(&self, filename: &str) -> bool {
        match self {
            Scope::AllFiles => true,
            Scope::Extensions(exts) => exts.iter().any(|ext| filename.ends_with(ext)),
            Scope::ExtensionsExcept(exts, excluded) => {
                exts.iter().any(|ext| filename.ends_with(ext))
                    && !excluded.iter().any(|fragment| filename.contains(fragment))
            }
        }
    }
}

#[derive(Debug)]
enum Matcher {
    Pattern(Regex),
    /// Trimmed line longer than the given number of characters
    LongerThan(usize),
    /// At least `n` non-overlapping matches of the pattern
    Repeated(Regex, usize),
}

impl Matcher {
    fn is_match(&self, code: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(code),
            Matcher::LongerThan(limit) => code.trim().chars().count() > *limit,
            Matcher::Repeated(re, n) => re.find_iter(code).count() >= *n,
        }
    }
}

#[derive(Debug)]
struct IssueRule {
    name: &'static str,
    scope: Scope,
    matcher: Matcher,
    severity: Severity,
    message: &'static str,
}

const JAVA: &[&str] = &[".java"];
const JS_TS: &[&str] = &[".js", ".ts"];

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("scanner pattern is valid")
}

static RULES: LazyLock<Vec<IssueRule>> = LazyLock::new(|| {
    vec![
        IssueRule {
            name: "hardcoded-credentials",
            scope: Scope::AllFiles,
            matcher: Matcher::Pattern(regex(
                r#"(?i)(password|api[_-]?key|secret)\s*=\s*["'][^"']+["']"#,
            )),
            severity: Severity::High,
            message: "🔒 **Security Issue**: Possible hardcoded credentials detected. Please use environment variables or a secure vault for sensitive data.",
        },
        IssueRule {
            name: "java-stdout",
            scope: Scope::Extensions(JAVA),
            matcher: Matcher::Pattern(regex(r"System\.out\.print")),
            severity: Severity::Medium,
            message: "📝 **Best Practice**: Consider using a proper logging framework (e.g., SLF4J) instead of `System.out.println`.",
        },
        IssueRule {
            name: "java-empty-catch",
            scope: Scope::Extensions(JAVA),
            matcher: Matcher::Pattern(regex(r"catch\s*\([^)]+\)\s*\{\s*\}")),
            severity: Severity::High,
            message: "⚠️ **Code Quality**: Empty catch block detected. Either handle the exception or log it appropriately.",
        },
        IssueRule {
            name: "java-sql-concat",
            scope: Scope::Extensions(JAVA),
            matcher: Matcher::Pattern(regex(
                r#"(executeQuery|prepareStatement)\s*\(\s*["'].*\+"#,
            )),
            severity: Severity::High,
            message: "🔒 **Security Issue**: Potential SQL injection vulnerability. Use parameterized queries or prepared statements.",
        },
        IssueRule {
            name: "js-console-log",
            scope: Scope::ExtensionsExcept(JS_TS, &["test", "spec"]),
            matcher: Matcher::Pattern(regex(r"console\.log")),
            severity: Severity::Low,
            message: "📝 **Code Quality**: `console.log` statement found. Consider using a proper logging library or remove before production.",
        },
        IssueRule {
            name: "js-loose-equality",
            scope: Scope::Extensions(JS_TS),
            matcher: Matcher::Pattern(regex(r"[^=!]==[^=]")),
            severity: Severity::Medium,
            message: "📝 **Best Practice**: Use strict equality (`===`) instead of loose equality (`==`) to avoid type coercion issues.",
        },
        IssueRule {
            name: "js-var",
            scope: Scope::Extensions(JS_TS),
            matcher: Matcher::Pattern(regex(r"\bvar\s+\w+")),
            severity: Severity::Low,
            message: "📝 **Best Practice**: Use `let` or `const` instead of `var` for better scoping.",
        },
        IssueRule {
            name: "todo-comment",
            scope: Scope::AllFiles,
            matcher: Matcher::Pattern(regex(r"(?i)//\s*TODO|/\*\s*TODO|#\s*TODO")),
            severity: Severity::Low,
            message: "📌 **Note**: TODO comment found. Consider creating a tracked issue for this work.",
        },
        IssueRule {
            name: "long-line",
            scope: Scope::AllFiles,
            matcher: Matcher::LongerThan(MAX_LINE_LENGTH),
            severity: Severity::Low,
            message: "📏 **Code Style**: Line is very long (>120 characters). Consider breaking it up for better readability.",
        },
        IssueRule {
            name: "nested-conditionals",
            scope: Scope::AllFiles,
            matcher: Matcher::Repeated(regex(r"\bif\s*\("), NESTING_LIMIT),
            severity: Severity::Medium,
            message: "🔄 **Complexity**: High nesting level detected. Consider refactoring to reduce complexity.",
        },
    ]
});

/// Check one line of code (without its diff prefix) for known issues.
pub fn check_for_issues(code: &str, filename: &str) -> Vec<Issue> {
    RULES
        .iter()
        .filter(|rule| rule.scope.applies_to(filename) && rule.matcher.is_match(code))
        .map(|rule| Issue {
            rule: rule.name,
            severity: rule.severity,
            message: rule.message,
        })
        .collect()
}

/// Scan the added lines of one file.
///
/// Findings carry both the new-file line number and the GitHub diff position,
/// which is the hunk header's position plus the line's offset in the hunk.
pub fn scan_file(file: &DiffFile) -> Vec<Finding> {
    let mut findings = Vec::new();

    for hunk in &file.hunks {
        let mut line_number = hunk.new_start;

        for (offset, raw) in hunk.lines.iter().enumerate() {
            let position = hunk.position + offset + 1;
            if let Some(code) = raw.strip_prefix('+') {
                for issue in check_for_issues(code, &file.path) {
                    debug!(file = %file.path, line = line_number, rule = issue.rule, "issue found");
                    findings.push(Finding {
                        message: issue.message.to_string(),
                        file: file.path.clone(),
                        line: line_number,
                        position,
                        severity: issue.severity,
                    });
                }
                line_number += 1;
            } else if raw.starts_with(' ') {
                line_number += 1;
            }
        }
    }

    findings
}

/// Scan every file that still exists after the PR.
pub fn scan_pull_request(pr: &PullRequest) -> Vec<Finding> {
    let mut findings = Vec::new();
    for file in pr.files.iter().filter(|f| !f.is_deleted) {
        let file_findings = scan_file(file);
        debug!(file = %file.path, findings = file_findings.len(), "scanned file");
        findings.extend(file_findings);
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pr::types::Hunk;

    fn rules_for(code: &str, filename: &str) -> Vec<&'static str> {
        check_for_issues(code, filename).iter().map(|i| i.rule).collect()
    }

    fn diff_file(path: &str, hunks: Vec<(usize, Vec<&str>)>) -> DiffFile {
        let mut next_position = 0;
        let hunks = hunks
            .into_iter()
            .map(|(new_start, lines)| {
                let hunk = Hunk {
                    position: next_position,
                    old_count: lines.len(),
                    new_start,
                    new_count: lines.len(),
                    lines: lines.into_iter().map(String::from).collect(),
                };
                next_position += hunk.lines.len() + 1;
                hunk
            })
            .collect();
        DiffFile {
            path: path.to_string(),
            is_new: false,
            is_deleted: false,
            additions: 0,
            deletions: 0,
            hunks,
        }
    }

    #[test]
    fn test_detects_hardcoded_credentials_in_any_file() {
        assert_eq!(rules_for(r#"PASSWORD = "hunter2""#, "config.py"), vec!["hardcoded-credentials"]);
        assert_eq!(rules_for("apiKey = 'abc123'", "app.rb"), vec!["hardcoded-credentials"]);
        assert_eq!(rules_for(r#"api-key="xyz""#, "a.yaml"), vec!["hardcoded-credentials"]);
        assert!(rules_for(r#"password = """#, "config.py").is_empty());
        assert!(rules_for("password = env::var(\"PW\")", "main.rs").is_empty());
    }

    #[test]
    fn test_java_rules_only_apply_to_java_files() {
        let code = "System.out.println(\"hi\");";
        assert_eq!(rules_for(code, "src/Main.java"), vec!["java-stdout"]);
        assert!(rules_for(code, "src/main.kt").is_empty());
    }

    #[test]
    fn test_java_empty_catch_and_sql_concat() {
        assert_eq!(
            rules_for("} catch (IOException e) { }", "Io.java"),
            vec!["java-empty-catch"]
        );
        assert_eq!(
            rules_for("stmt.executeQuery(\"SELECT * FROM t WHERE id=\" + id);", "Dao.java"),
            vec!["java-sql-concat"]
        );
        assert!(rules_for("conn.prepareStatement(QUERY);", "Dao.java").is_empty());
    }

    #[test]
    fn test_console_log_skipped_in_test_and_spec_paths() {
        assert_eq!(rules_for("console.log(x);", "src/app.js"), vec!["js-console-log"]);
        assert!(rules_for("console.log(x);", "src/app.test.js").is_empty());
        assert!(rules_for("console.log(x);", "spec/app.ts").is_empty());
    }

    #[test]
    fn test_js_equality_and_var() {
        assert_eq!(rules_for("if (a == b) {", "x.ts"), vec!["js-loose-equality"]);
        assert!(rules_for("if (a === b) {", "x.ts").is_empty());
        assert!(rules_for("if (a != b) {", "x.ts").is_empty());
        assert_eq!(rules_for("var count = 0;", "x.js"), vec!["js-var"]);
        assert!(rules_for("let variance = 0;", "x.js").is_empty());
    }

    #[test]
    fn test_todo_comment_styles() {
        assert_eq!(rules_for("// TODO: remove", "a.rs"), vec!["todo-comment"]);
        assert_eq!(rules_for("/* todo later */", "a.c"), vec!["todo-comment"]);
        assert_eq!(rules_for("# TODO", "a.py"), vec!["todo-comment"]);
        assert!(rules_for("let todo = 1;", "a.rs").is_empty());
    }

    #[test]
    fn test_long_line_uses_trimmed_length() {
        let long = "x".repeat(121);
        assert_eq!(rules_for(&long, "a.txt"), vec!["long-line"]);
        let padded = format!("        {}", "x".repeat(120));
        assert!(rules_for(&padded, "a.txt").is_empty());
    }

    #[test]
    fn test_nested_conditionals() {
        assert_eq!(
            rules_for("if (a) if (b) if(c) go();", "a.c"),
            vec!["nested-conditionals"]
        );
        assert!(rules_for("if (a) if (b) go();", "a.c").is_empty());
    }

    #[test]
    fn test_multiple_rules_reported_in_table_order() {
        let issues = check_for_issues("var secret = 'shh'; if (x == 1) {} // TODO rotate", "auth.js");
        let rules: Vec<_> = issues.iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec!["hardcoded-credentials", "js-loose-equality", "js-var", "todo-comment"]);
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn test_scan_file_tracks_lines_and_positions() {
        let file = diff_file(
            "src/app.js",
            vec![
                (1, vec![" const a = 1;", "-var b = 2;", "+var b = 3;"]),
                (10, vec![" return a;", "+console.log(b);", "\\ No newline at end of file"]),
            ],
        );
        let findings = scan_file(&file);
        assert_eq!(findings.len(), 2);

        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].position, 3);
        assert!(findings[0].message.contains("`var`"));

        // second hunk header occupies position 4
        assert_eq!(findings[1].line, 11);
        assert_eq!(findings[1].position, 6);
        assert!(findings[1].message.contains("console.log"));
        assert_eq!(findings[1].file, "src/app.js");
    }

    #[test]
    fn test_scan_file_ignores_removed_lines() {
        let file = diff_file("a.js", vec![(1, vec!["-var old = 1;"])]);
        assert!(scan_file(&file).is_empty());
    }

    #[test]
    fn test_scan_pull_request_skips_deleted_files() {
        let mut deleted = diff_file("gone.js", vec![(1, vec!["+var x = 1;"])]);
        deleted.is_deleted = true;
        let kept = diff_file("kept.js", vec![(1, vec!["+var y = 1;"])]);
        let pr = PullRequest {
            number: 1,
            title: "t".to_string(),
            author: "a".to_string(),
            head_sha: "abc".to_string(),
            files_changed: 2,
            additions: 2,
            deletions: 0,
            files: vec![deleted, kept],
        };
        let findings = scan_pull_request(&pr);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].file, "kept.js");
    }
}
