use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

/// A comment on a pull request, either a line-level review comment or a
/// conversation (issue) comment. Issue comments carry no `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// A line comment to attach to a review, anchored by diff position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReviewComment {
    pub path: String,
    pub position: usize,
    pub body: String,
}
