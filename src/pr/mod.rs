pub mod diff;
pub mod types;

pub use types::{DiffFile, PrRef, PullRequest};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrError {
    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse diff: {0}")]
    DiffParse(String),
}

/// Parse a GitHub PR URL into its component parts.
///
/// Expected format: https://github.com/{owner}/{repo}/pull/{number}
pub fn parse_pr_url(url: &str) -> Result<PrRef, PrError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| PrError::InvalidUrl(url.to_string()))?;

    if parsed.host_str() != Some("github.com") {
        return Err(PrError::InvalidUrl(url.to_string()));
    }

    let segments: Vec<_> = parsed
        .path_segments()
        .ok_or_else(|| PrError::InvalidUrl(url.to_string()))?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 4 || segments[2] != "pull" {
        return Err(PrError::InvalidUrl(url.to_string()));
    }

    let pr_number = segments[3]
        .parse::<u64>()
        .map_err(|_| PrError::InvalidUrl(url.to_string()))?;

    Ok(PrRef {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        pr_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pr_url() {
        let pr = parse_pr_url("https://github.com/org/repo/pull/42").unwrap();
        assert_eq!(pr.owner, "org");
        assert_eq!(pr.repo, "repo");
        assert_eq!(pr.pr_number, 42);
    }

    #[test]
    fn test_parse_pr_url_with_trailing_slash() {
        let pr = parse_pr_url("https://github.com/org/repo/pull/7/").unwrap();
        assert_eq!(pr.pr_number, 7);
    }

    #[test]
    fn test_parse_invalid_pr_url() {
        assert!(parse_pr_url("https://example.com").is_err());
        assert!(parse_pr_url("not-a-url").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pulls/42").is_err());
        assert!(parse_pr_url("https://github.com/org/repo/pull/abc").is_err());
    }
}
