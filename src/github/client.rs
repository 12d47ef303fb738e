use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::types::{NewReviewComment, ReviewComment};
use super::{PlatformError, ReviewPlatform};
use crate::config::Config;
use crate::pr::{diff, PrRef, PullRequest};

const USER_AGENT: &str = "pr-assistant";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.diff";

/// GitHub REST API client authenticated with a token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

#[derive(Deserialize)]
struct PullUser {
    login: String,
}

#[derive(Deserialize)]
struct PullHead {
    sha: String,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    title: String,
    user: PullUser,
    head: PullHead,
    changed_files: usize,
    additions: usize,
    deletions: usize,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Build a client from configuration; fails when no token is available.
    pub fn from_config(config: &Config) -> Result<Self, PlatformError> {
        let token = config.github_token().ok_or(PlatformError::MissingToken)?;
        Ok(Self::new(token, config.github.api_url.clone()))
    }

    fn repo_url(&self, pr: &PrRef, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, pr.owner, pr.repo, path)
    }

    fn request(&self, method: reqwest::Method, url: &str, accept: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", accept)
            .bearer_auth(&self.token)
    }

    async fn get_comment(&self, url: String) -> Result<ReviewComment, PlatformError> {
        let comment = self
            .request(reqwest::Method::GET, &url, JSON_MEDIA_TYPE)
            .send()
            .await?
            .error_for_status()?
            .json::<ReviewComment>()
            .await?;
        Ok(comment)
    }

    async fn send_json(
        &self,
        method: reqwest::Method,
        url: String,
        payload: serde_json::Value,
    ) -> Result<(), PlatformError> {
        self.request(method, &url, JSON_MEDIA_TYPE)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ReviewPlatform for GitHubClient {
    #[instrument(skip(self, pr), fields(pr = %pr))]
    async fn get_pull_request(&self, pr: &PrRef) -> Result<PullRequest, PlatformError> {
        let url = self.repo_url(pr, &format!("pulls/{}", pr.pr_number));

        debug!("fetching PR metadata from GitHub API");
        let metadata = self
            .request(reqwest::Method::GET, &url, JSON_MEDIA_TYPE)
            .send()
            .await?
            .error_for_status()?
            .json::<PullResponse>()
            .await?;
        debug!(title = %metadata.title, changed_files = metadata.changed_files, "received PR metadata");

        debug!("fetching PR diff from GitHub API");
        let diff_text = self
            .request(reqwest::Method::GET, &url, DIFF_MEDIA_TYPE)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(diff_bytes = diff_text.len(), "received PR diff");

        let files = diff::parse_diff(&diff_text)?;
        debug!(parsed_files = files.len(), "parsed diff");

        Ok(PullRequest {
            number: metadata.number,
            title: metadata.title,
            author: metadata.user.login,
            head_sha: metadata.head.sha,
            files_changed: metadata.changed_files,
            additions: metadata.additions,
            deletions: metadata.deletions,
            files,
        })
    }

    #[instrument(skip(self, pr), fields(pr = %pr))]
    async fn get_review_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
    ) -> Result<ReviewComment, PlatformError> {
        self.get_comment(self.repo_url(pr, &format!("pulls/comments/{}", comment_id)))
            .await
    }

    #[instrument(skip(self, pr), fields(pr = %pr))]
    async fn get_issue_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
    ) -> Result<ReviewComment, PlatformError> {
        self.get_comment(self.repo_url(pr, &format!("issues/comments/{}", comment_id)))
            .await
    }

    #[instrument(skip(self, pr, comments), fields(pr = %pr, comments = comments.len()))]
    async fn create_review(
        &self,
        pr: &PrRef,
        commit_sha: &str,
        comments: &[NewReviewComment],
    ) -> Result<(), PlatformError> {
        let url = self.repo_url(pr, &format!("pulls/{}/reviews", pr.pr_number));
        let payload = json!({
            "commit_id": commit_sha,
            "event": "COMMENT",
            "comments": comments,
        });
        self.send_json(reqwest::Method::POST, url, payload).await
    }

    #[instrument(skip(self, pr, comment), fields(pr = %pr, path = %comment.path))]
    async fn create_review_comment(
        &self,
        pr: &PrRef,
        commit_sha: &str,
        comment: &NewReviewComment,
    ) -> Result<(), PlatformError> {
        let url = self.repo_url(pr, &format!("pulls/{}/comments", pr.pr_number));
        let payload = json!({
            "commit_id": commit_sha,
            "path": comment.path,
            "position": comment.position,
            "body": comment.body,
        });
        self.send_json(reqwest::Method::POST, url, payload).await
    }

    #[instrument(skip(self, pr, body), fields(pr = %pr))]
    async fn reply_to_review_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
        body: &str,
    ) -> Result<(), PlatformError> {
        let url = self.repo_url(
            pr,
            &format!("pulls/{}/comments/{}/replies", pr.pr_number, comment_id),
        );
        self.send_json(reqwest::Method::POST, url, json!({ "body": body }))
            .await
    }

    #[instrument(skip(self, pr, body), fields(pr = %pr))]
    async fn update_review_comment(
        &self,
        pr: &PrRef,
        comment_id: u64,
        body: &str,
    ) -> Result<(), PlatformError> {
        let url = self.repo_url(pr, &format!("pulls/comments/{}", comment_id));
        self.send_json(reqwest::Method::PATCH, url, json!({ "body": body }))
            .await
    }

    #[instrument(skip(self, pr, body), fields(pr = %pr))]
    async fn create_issue_comment(&self, pr: &PrRef, body: &str) -> Result<(), PlatformError> {
        let url = self.repo_url(pr, &format!("issues/{}/comments", pr.pr_number));
        self.send_json(reqwest::Method::POST, url, json!({ "body": body }))
            .await
    }

    #[instrument(skip(self, pr), fields(pr = %pr))]
    async fn add_labels(&self, pr: &PrRef, labels: &[String]) -> Result<(), PlatformError> {
        let url = self.repo_url(pr, &format!("issues/{}/labels", pr.pr_number));
        self.send_json(reqwest::Method::POST, url, json!({ "labels": labels }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_DIFF: &str = "diff --git a/src/app.js b/src/app.js\n\
--- a/src/app.js\n\
+++ b/src/app.js\n\
@@ -1,1 +1,2 @@\n\
 const a = 1;\n\
+var b = 2;\n";

    fn pr_ref() -> PrRef {
        PrRef {
            owner: "org".to_string(),
            repo: "repo".to_string(),
            pr_number: 42,
        }
    }

    #[tokio::test]
    async fn test_get_pull_request_merges_metadata_and_diff() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls/42"))
            .and(header("Accept", DIFF_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_DIFF))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls/42"))
            .and(header("Accept", JSON_MEDIA_TYPE))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 42,
                "title": "Add login",
                "body": null,
                "user": { "login": "alice" },
                "head": { "sha": "abc123" },
                "changed_files": 1,
                "additions": 1,
                "deletions": 0
            })))
            .mount(&server)
            .await;

        let client = GitHubClient::new("test-token", server.uri());
        let pr = client.get_pull_request(&pr_ref()).await.unwrap();

        assert_eq!(pr.number, 42);
        assert_eq!(pr.author, "alice");
        assert_eq!(pr.head_sha, "abc123");
        assert!(pr.body.is_empty());
        assert_eq!(pr.files.len(), 1);
        assert_eq!(pr.files[0].path, "src/app.js");
        assert_eq!(pr.files[0].additions, 1);
    }

    #[tokio::test]
    async fn test_get_review_comment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls/comments/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "body": "Avoid var",
                "path": "src/app.js",
                "user": { "login": "pr-bot" }
            })))
            .mount(&server)
            .await;

        let client = GitHubClient::new("t", server.uri());
        let comment = client.get_review_comment(&pr_ref(), 7).await.unwrap();
        assert_eq!(comment.id, 7);
        assert_eq!(comment.body, "Avoid var");
    }

    #[tokio::test]
    async fn test_missing_comment_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/pulls/comments/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GitHubClient::new("t", server.uri());
        let result = client.get_review_comment(&pr_ref(), 9).await;
        assert!(matches!(result, Err(PlatformError::ApiRequest(_))));
    }

    #[tokio::test]
    async fn test_create_review_posts_comment_event() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/org/repo/pulls/42/reviews"))
            .and(body_partial_json(json!({
                "commit_id": "abc123",
                "event": "COMMENT",
                "comments": [{ "path": "src/app.js", "position": 2, "body": "note" }]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new("t", server.uri());
        let comments = vec![NewReviewComment {
            path: "src/app.js".to_string(),
            position: 2,
            body: "note".to_string(),
        }];
        client
            .create_review(&pr_ref(), "abc123", &comments)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reply_and_update_review_comment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/org/repo/pulls/42/comments/7/replies"))
            .and(body_partial_json(json!({ "body": "thanks" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/repos/org/repo/pulls/comments/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new("t", format!("{}/", server.uri()));
        client
            .reply_to_review_comment(&pr_ref(), 7, "thanks")
            .await
            .unwrap();
        client
            .update_review_comment(&pr_ref(), 7, "updated body")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/org/repo/issues/42/labels"))
            .and(body_partial_json(json!({ "labels": ["size/S"] })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new("t", server.uri());
        client
            .add_labels(&pr_ref(), &["size/S".to_string()])
            .await
            .unwrap();
    }

    #[test]
    fn test_from_config_uses_token_and_api_url() {
        let mut config = Config::default();
        config.github.token = Some("abc".to_string());
        config.github.api_url = "https://ghe.example.com/api/v3/".to_string();
        let client = GitHubClient::from_config(&config).unwrap();
        assert_eq!(client.token, "abc");
        assert_eq!(client.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_from_config_requires_token() {
        let config = Config::default();
        assert!(matches!(
            GitHubClient::from_config(&config),
            Err(PlatformError::MissingToken)
        ));

        let mut config = Config::default();
        config.github.token = Some(String::new());
        assert!(matches!(
            GitHubClient::from_config(&config),
            Err(PlatformError::MissingToken)
        ));
    }
}
