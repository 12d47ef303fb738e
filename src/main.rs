mod analysis;
mod config;
mod github;
mod pr;
mod report;
mod response;
mod workflow;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use config::{CommentEvent, Config, WorkflowContext};
use github::GitHubClient;

/// PR Assistant: sizes GitHub Pull Requests, scans their diffs for common
/// code-quality and security issues, and triages committer replies to review
/// comments.
#[derive(Parser, Debug)]
#[command(name = "pr-assistant", version, about)]
struct Cli {
    /// Config file (defaults to .pr-assistant.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Label the PR by size and post a statistics summary
    Size {
        /// PR URL; defaults to REPOSITORY and PR_NUMBER from the environment
        #[arg(long)]
        pr: Option<String>,
    },
    /// Scan the PR diff and post findings as review comments
    Review {
        /// PR URL; defaults to REPOSITORY and PR_NUMBER from the environment
        #[arg(long)]
        pr: Option<String>,
    },
    /// Triage a reply to a review comment and respond on its thread
    Respond {
        /// PR URL; defaults to REPOSITORY and PR_NUMBER from the environment
        #[arg(long)]
        pr: Option<String>,
        /// ID of the comment being replied to (defaults to COMMENT_ID)
        #[arg(long)]
        comment_id: Option<u64>,
        /// Reply text (defaults to COMMENT_BODY)
        #[arg(long)]
        body: Option<String>,
        /// Login of the replying user (defaults to COMMENT_USER)
        #[arg(long)]
        user: Option<String>,
    },
    /// Classify reply text offline and show the resolution decision
    Classify {
        /// Reply text to classify
        text: String,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan a local unified diff file offline
    Scan {
        /// Path to a unified diff (e.g. `git diff > change.patch`)
        diff: PathBuf,
        /// Optional output file path for a markdown report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify { text, json } => classify_text(&text, json)?,
        Command::Scan { diff, output } => scan_diff_file(&diff, output.as_deref())?,
        Command::Size { pr } => {
            let ctx = workflow_context(pr.as_deref())?;
            let _span = info_span!("size", pr = %ctx.pr).entered();
            let client = github_client(cli.config.as_deref())?;
            let size = workflow::run_size_check(&client, &ctx.pr).await?;
            info!(label = %size, "done");
        }
        Command::Review { pr } => {
            let ctx = workflow_context(pr.as_deref())?;
            let _span = info_span!("review", pr = %ctx.pr).entered();
            let client = github_client(cli.config.as_deref())?;
            let outcome = workflow::run_review(&client, &ctx.pr).await?;
            info!(?outcome, "done");
        }
        Command::Respond {
            pr,
            comment_id,
            body,
            user,
        } => {
            let mut ctx = workflow_context(pr.as_deref())?;
            ctx.override_comment(comment_id, body, user);
            let event = ctx.require_comment()?;
            let _span = info_span!("respond", pr = %ctx.pr).entered();
            let client = github_client(cli.config.as_deref())?;
            let outcome = workflow::handle_response(&client, &ctx.pr, event).await?;
            info!(?outcome, "done");
        }
    }

    Ok(())
}

/// Use the PR URL when given, otherwise REPOSITORY and PR_NUMBER. The comment
/// event always comes from the environment.
fn workflow_context(
    pr_url: Option<&str>,
) -> Result<WorkflowContext, Box<dyn std::error::Error>> {
    match pr_url {
        Some(url) => {
            let pr = pr::parse_pr_url(url)?;
            debug!(owner = %pr.owner, repo = %pr.repo, pr = pr.pr_number, "parsed PR URL");
            Ok(WorkflowContext {
                pr,
                comment: CommentEvent::from_env()?,
            })
        }
        None => Ok(WorkflowContext::from_env()?),
    }
}

fn github_client(
    config_path: Option<&std::path::Path>,
) -> Result<GitHubClient, Box<dyn std::error::Error>> {
    info!("loading configuration");
    let config = Config::load(config_path)?;
    Ok(GitHubClient::from_config(&config)?)
}

fn classify_text(text: &str, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = response::classify(text, ());

    if as_json {
        let value = serde_json::json!({
            "type": analysis.response_type,
            "sentiment": analysis.sentiment,
            "key_points": analysis.key_points,
            "concerns": analysis.concerns,
            "resolve": response::should_resolve(text, &analysis),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let assessment = response::assess(text, &analysis);
        report::print_analysis(&analysis, &assessment);
    }
    Ok(())
}

fn scan_diff_file(
    path: &std::path::Path,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let _span = info_span!("scan", diff = %path.display()).entered();
    let diff_text = std::fs::read_to_string(path)?;
    let files = pr::diff::parse_diff(&diff_text)?;
    info!(files = files.len(), "parsed diff");

    let findings: Vec<_> = files
        .iter()
        .filter(|f| !f.is_deleted)
        .flat_map(analysis::scan_file)
        .collect();
    info!(findings = findings.len(), "scan complete");

    let built_report = report::build(&path.display().to_string(), &files, findings);
    report::output(&built_report, output)?;
    Ok(())
}
