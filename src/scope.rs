// Scope and cache-key resolution.
// Derives the query target and composite cache key from a PR/issue URL
// and an explicit scope selection.

use clap::ValueEnum;

use crate::error::{FirstprError, Result};

/// Sentinel scope target for "the viewer's own global activity".
pub const ACCOUNT_TARGET: &str = "__self";

/// Granularity over which contributor stats are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scope {
    /// Stats within the single repository of the current item.
    #[default]
    Repo,
    /// Stats across all repositories of the item's organization.
    Org,
    /// Stats across the contributor's entire account.
    Account,
}

/// Whether an item is a pull request or an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Pr,
    Issue,
}

impl ItemKind {
    /// Qualifier value for the search API's `type:` filter.
    pub fn search_type(&self) -> &'static str {
        match self {
            ItemKind::Pr => "pr",
            ItemKind::Issue => "issue",
        }
    }

    /// Display name used in badges ("First PR" / "First Issue").
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Pr => "PR",
            ItemKind::Issue => "Issue",
        }
    }
}

/// A parsed reference to one pull request or issue page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub owner: String,
    pub repo: String,
    pub kind: ItemKind,
    pub number: u64,
}

impl PageRef {
    /// Parse a GitHub PR/issue URL or path, e.g.
    /// `https://github.com/babel/babel-eslint/pull/3390` or
    /// `/babel/babel-eslint/issues/12`.
    pub fn parse(input: &str) -> Result<Self> {
        let path = input
            .strip_prefix("https://github.com")
            .or_else(|| input.strip_prefix("http://github.com"))
            .unwrap_or(input);

        let mut segments = path.trim_matches('/').split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let kind = match segments.next() {
            Some("pull") => ItemKind::Pr,
            Some("issues") => ItemKind::Issue,
            _ => return Err(FirstprError::BadItemUrl(input.to_string())),
        };
        let number: u64 = segments
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| FirstprError::BadItemUrl(input.to_string()))?;

        if owner.is_empty() || repo.is_empty() {
            return Err(FirstprError::BadItemUrl(input.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            kind,
            number,
        })
    }

    /// The `owner/repo` path of the item.
    pub fn repo_path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// The scope target this page resolves to under the given scope.
    pub fn scope_target(&self, scope: Scope) -> String {
        match scope {
            Scope::Repo => self.repo_path(),
            Scope::Org => self.owner.clone(),
            Scope::Account => ACCOUNT_TARGET.to_string(),
        }
    }
}

/// Composite key identifying one cached record: `contributor|scopeTarget`.
pub fn composite_key(contributor: &str, scope_target: &str) -> String {
    format!("{}|{}", contributor, scope_target)
}
