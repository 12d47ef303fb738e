/// Metadata about a pull request fetched from the GitHub API.
/// Not Deserialize: assembled from the GitHub API JSON
/// response plus the parsed diff (DiffFile/Hunk).
#[derive(Debug, Clone)]
pub struct PullRequest {
    /// PR number (e.g., 42)
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author's GitHub login
    pub author: String,
    /// Commit SHA of the PR head; review comments are anchored to it
    pub head_sha: String,
    /// Total files changed
    pub files_changed: usize,
    /// Total lines added
    pub additions: usize,
    /// Total lines deleted
    pub deletions: usize,
    /// Parsed diff files
    pub files: Vec<DiffFile>,
}

/// A single file within the PR diff.
#[derive(Debug, Clone)]
pub struct DiffFile {
    /// File path (e.g., "src/auth/config.rs")
    pub path: String,
    /// Whether this is a new file
    pub is_new: bool,
    /// Whether this file was deleted
    pub is_deleted: bool,
    /// Lines added in this file
    pub additions: usize,
    /// Lines deleted in this file
    pub deletions: usize,
    /// Hunks (contiguous changed regions)
    pub hunks: Vec<Hunk>,
}

/// A contiguous region of changes within a file.
#[derive(Debug, Clone)]
pub struct Hunk {
    /// GitHub diff position of the `@@` header line. The first hunk's header
    /// is position 0; each later header takes the position after the previous
    /// hunk's last line.
    pub position: usize,
    /// Number of old-file lines the header announces
    pub old_count: usize,
    /// Starting line number in the new file
    pub new_start: usize,
    /// Number of new-file lines the header announces
    pub new_count: usize,
    /// Raw lines of the hunk (prefixed with +, -, space, or `\` for
    /// "No newline at end of file" markers)
    pub lines: Vec<String>,
}

/// Identifies one pull request on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRef {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
}

impl PrRef {
    /// Build from an `owner/repo` slug as found in the `REPOSITORY` variable.
    pub fn from_repository(repository: &str, pr_number: u64) -> Option<PrRef> {
        let (owner, repo) = repository.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(PrRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pr_number,
        })
    }
}

impl std::fmt::Display for PrRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.pr_number)
    }
}
