// Resolution flow for one invocation.
// Parses the target, finds the contributor, runs the engine, prints labels.

use clap::Parser;

use crate::cache::Store;
use crate::error::{FirstprError, Result};
use crate::github::GitHubClient;
use crate::scope::{PageRef, Scope};
use crate::settings::Settings;
use crate::stats::{Engine, StatsDisplay};

#[derive(Debug, Parser)]
#[command(
    name = "firstpr",
    about = "Contributor PR/issue stats for a GitHub pull request or issue"
)]
pub struct Args {
    /// Pull request or issue URL, e.g. https://github.com/babel/babel/pull/3390
    pub url: String,

    /// Granularity over which stats are aggregated
    #[arg(long, value_enum, default_value = "repo")]
    pub scope: Scope,

    /// Contributor login (default: the thread author of the item)
    #[arg(long)]
    pub author: Option<String>,

    /// Clear the cached record for this contributor/scope before resolving
    #[arg(long)]
    pub refresh: bool,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN")]
    pub token: Option<String>,
}

pub async fn run(args: Args) -> Result<()> {
    let page = PageRef::parse(&args.url)?;
    let settings = Settings::load()?;

    let token = args.token.or_else(|| settings.access_token.clone());
    let client = GitHubClient::new(token.as_deref())?;

    if !settings.show_private_repos
        && hidden_by_privacy_gate(client.get_repo(&page.owner, &page.repo).await)?
    {
        tracing::info!(repo = %page.repo_path(), "private repo, stats disabled");
        return Ok(());
    }

    let contributor = match args.author {
        Some(author) => author,
        None => thread_author(&client, &page).await?,
    };

    let store = Store::open()?;
    let engine = Engine::new(&store).with_viewer(settings.login.clone());

    let display = if args.refresh {
        engine.refresh(&client, &contributor, &page, args.scope).await?
    } else {
        engine.resolve(&client, &contributor, &page, args.scope).await?
    };

    print_display(&contributor, &page, args.scope, &display);
    Ok(())
}

/// Whether the privacy gate hides stats for this repository. Private repos
/// answer 404 to viewers without access, so a not-found probe is treated as
/// private rather than failing the run.
fn hidden_by_privacy_gate(
    lookup: Result<crate::github::Repository>,
) -> Result<bool> {
    match lookup {
        Ok(repo) => Ok(repo.private),
        Err(FirstprError::NotFound(_)) => Ok(true),
        Err(err) => Err(err),
    }
}

/// Contributor discovery: the login of the item's thread author.
async fn thread_author(client: &GitHubClient, page: &PageRef) -> Result<String> {
    let issue = client.get_issue(&page.owner, &page.repo, page.number).await?;
    issue
        .user
        .map(|user| user.login)
        .ok_or_else(|| FirstprError::MissingContributor(page.repo_path()))
}

fn print_display(contributor: &str, page: &PageRef, scope: Scope, display: &StatsDisplay) {
    println!("{} on {}", contributor, page.scope_target(scope));
    println!("  PRs:    {:<24} {}", display.pr_text, display.pr_link);
    println!("  Issues: {:<24} {}", display.issue_text, display.issue_link);
    match display.last_update {
        Some(time) => {
            let source = if display.from_cache { "cached" } else { "fetched" };
            println!(
                "  Last updated: {} ({})",
                time.format("%Y-%m-%d %H:%M:%S UTC"),
                source
            );
        }
        None => println!("  Last updated: N/A"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Repository;

    fn repo(private: bool) -> Repository {
        Repository {
            full_name: "acme/widgets".to_string(),
            private,
        }
    }

    #[test]
    fn test_gate_hides_private_repo() {
        assert!(hidden_by_privacy_gate(Ok(repo(true))).unwrap());
    }

    #[test]
    fn test_gate_passes_public_repo() {
        assert!(!hidden_by_privacy_gate(Ok(repo(false))).unwrap());
    }

    #[test]
    fn test_gate_treats_not_found_as_private() {
        let lookup = Err(FirstprError::NotFound(
            "https://api.github.com/repos/acme/secret".to_string(),
        ));
        assert!(hidden_by_privacy_gate(lookup).unwrap());
    }

    #[test]
    fn test_gate_propagates_other_errors() {
        let lookup = Err(FirstprError::Unauthorized);
        assert!(hidden_by_privacy_gate(lookup).is_err());
    }
}
