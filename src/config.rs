use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::pr::PrRef;

const DEFAULT_CONFIG_FILE: &str = ".pr-assistant.toml";
const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Top-level configuration loaded from .pr-assistant.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,

    /// REST API root, overridable for GitHub Enterprise
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    /// Load configuration from `path`, or from .pr-assistant.toml in the
    /// current directory when no path is given. A missing default file yields
    /// the default config; an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Like [`Config::load`], reading the `GITHUB_TOKEN` fallback through
    /// `lookup` instead of the process environment.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        if config.github_token().is_none() {
            config.github.token = lookup("GITHUB_TOKEN");
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// The GitHub token, if one is set and non-empty.
    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref().filter(|token| !token.trim().is_empty())
    }
}

/// The reply being triaged, as delivered by the comment event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEvent {
    /// ID of the comment the committer posted
    pub comment_id: u64,
    /// Raw reply text
    pub body: String,
    /// Login of the replying user, when known
    pub user: Option<String>,
}

impl CommentEvent {
    /// Read `COMMENT_ID`, `COMMENT_BODY` and `COMMENT_USER` from the process
    /// environment.
    pub fn from_env() -> Result<Option<CommentEvent>, ConfigError> {
        Self::from_lookup(&|name: &str| std::env::var(name).ok())
    }

    /// `None` when no `COMMENT_ID` is set.
    pub fn from_lookup<F>(lookup: &F) -> Result<Option<CommentEvent>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(parse_number(lookup, "COMMENT_ID")?.map(|comment_id| CommentEvent {
            comment_id,
            body: lookup("COMMENT_BODY").unwrap_or_default(),
            user: lookup("COMMENT_USER").filter(|u| !u.is_empty()),
        }))
    }
}

/// Identifiers for one workflow run, read once at startup and passed
/// explicitly to the workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowContext {
    pub pr: PrRef,
    pub comment: Option<CommentEvent>,
}

impl WorkflowContext {
    /// Read `REPOSITORY`, `PR_NUMBER`, and the optional `COMMENT_ID`,
    /// `COMMENT_BODY`, `COMMENT_USER` from the process environment.
    pub fn from_env() -> Result<WorkflowContext, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<WorkflowContext, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repository = lookup("REPOSITORY").ok_or(ConfigError::Missing("REPOSITORY"))?;
        let pr_number = parse_number(&lookup, "PR_NUMBER")?.ok_or(ConfigError::Missing("PR_NUMBER"))?;
        let pr = PrRef::from_repository(&repository, pr_number).ok_or(ConfigError::Invalid {
            name: "REPOSITORY",
            value: repository.clone(),
        })?;

        let comment = CommentEvent::from_lookup(&lookup)?;

        Ok(WorkflowContext { pr, comment })
    }

    /// Overlay explicitly given values on the comment event. Fields left as
    /// `None` keep their environment value; without a comment ID from either
    /// source there is no event.
    pub fn override_comment(
        &mut self,
        comment_id: Option<u64>,
        body: Option<String>,
        user: Option<String>,
    ) {
        let base = self.comment.take();
        let Some(comment_id) = comment_id.or(base.as_ref().map(|event| event.comment_id)) else {
            return;
        };
        let (base_body, base_user) = base
            .map(|event| (event.body, event.user))
            .unwrap_or_default();
        self.comment = Some(CommentEvent {
            comment_id,
            body: body.unwrap_or(base_body),
            user: user.or(base_user),
        });
    }

    /// The comment event, required by the response workflow.
    pub fn require_comment(&self) -> Result<&CommentEvent, ConfigError> {
        match &self.comment {
            Some(event) if !event.body.trim().is_empty() => Ok(event),
            Some(_) => Err(ConfigError::Missing("COMMENT_BODY")),
            None => Err(ConfigError::Missing("COMMENT_ID")),
        }
    }
}

fn parse_number<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
