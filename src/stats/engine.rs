// Stats cache/fetch engine.
// Returns cached stats when fresh, otherwise runs the two count queries
// concurrently and merges both results into the record in one step.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::Store;
use crate::error::Result;
use crate::github::{GitHubClient, SearchQuery, SearchResponse};
use crate::scope::{ItemKind, PageRef, Scope, composite_key};

use super::labels::{self, RATE_LIMIT_ANONYMOUS, RATE_LIMIT_AUTHENTICATED};
use super::record::StatsRecord;

/// How long a complete record satisfies a lookup without refetching.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Displayable result of a resolution: one label per item type, the search
/// links behind them, and the record's timestamp. Failures degrade to text
/// on the labels rather than propagating.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsDisplay {
    pub pr_text: String,
    pub issue_text: String,
    pub pr_link: String,
    pub issue_link: String,
    pub last_update: Option<DateTime<Utc>>,
    pub from_cache: bool,
}

/// Cache-or-fetch engine over one store. Scope is threaded through every
/// call; nothing here holds mutable selection state.
pub struct Engine<'a> {
    store: &'a Store,
    viewer: Option<String>,
    ttl: Duration,
}

impl<'a> Engine<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            viewer: None,
            ttl: DEFAULT_TTL,
        }
    }

    /// Login of the current viewer, used to tell the authenticated rate-limit
    /// message apart from the anonymous one.
    pub fn with_viewer(mut self, viewer: Option<String>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Cache-only lookup: the stored record if it is complete and fresh.
    /// Never touches the network, so repeated lookups against a populated
    /// entry are idempotent.
    pub fn lookup(&self, contributor: &str, scope_target: &str) -> Result<Option<StatsRecord>> {
        let key = composite_key(contributor, scope_target);
        let record: Option<StatsRecord> = self.store.get(&key)?;
        Ok(record.filter(|r| r.is_fresh(self.ttl, Utc::now())))
    }

    /// Drop the stored record for this contributor/scope.
    pub fn clear(&self, contributor: &str, scope_target: &str) -> Result<()> {
        self.store.clear(&composite_key(contributor, scope_target))
    }

    /// Resolve displayable stats, from cache when possible.
    pub async fn resolve(
        &self,
        client: &GitHubClient,
        contributor: &str,
        page: &PageRef,
        scope: Scope,
    ) -> Result<StatsDisplay> {
        let target = page.scope_target(scope);

        if let Some(record) = self.lookup(contributor, &target)? {
            tracing::debug!(contributor, scope_target = %target, "cache hit");
            return Ok(self.display(&record, contributor, page, scope, &target, true));
        }

        self.fetch(client, contributor, page, scope, &target).await
    }

    /// Clear the stored record, then resolve. Forces a fresh pair of remote
    /// calls even when a valid cache entry existed.
    pub async fn refresh(
        &self,
        client: &GitHubClient,
        contributor: &str,
        page: &PageRef,
        scope: Scope,
    ) -> Result<StatsDisplay> {
        self.clear(contributor, &page.scope_target(scope))?;
        self.resolve(client, contributor, page, scope).await
    }

    /// Run both count queries concurrently and merge the joined results into
    /// the prior record in a single step, so neither partial write can clobber
    /// the other.
    async fn fetch(
        &self,
        client: &GitHubClient,
        contributor: &str,
        page: &PageRef,
        scope: Scope,
        target: &str,
    ) -> Result<StatsDisplay> {
        let key = composite_key(contributor, target);
        let old: StatsRecord = self.store.get(&key)?.unwrap_or_default();

        let pr_query = SearchQuery::for_scope(contributor, page, scope, ItemKind::Pr);
        let issue_query = SearchQuery::for_scope(contributor, page, scope, ItemKind::Issue);

        tracing::debug!(contributor, scope_target = target, "fetching contributor stats");
        let (pr, issue) = tokio::join!(
            client.search_count(&pr_query),
            client.search_count(&issue_query)
        );
        let (pr, issue) = (pr?, issue?);

        if let Some(advisory) = classify_failure(&pr, &issue, self.viewer.as_deref()) {
            tracing::warn!(
                contributor,
                scope_target = target,
                %advisory,
                "search did not yield counts"
            );
            return Ok(StatsDisplay {
                pr_text: advisory.clone(),
                issue_text: advisory,
                pr_link: labels::search_link(ItemKind::Pr, target, contributor),
                issue_link: labels::search_link(ItemKind::Issue, target, contributor),
                // The only timestamp available here is the prior record's.
                last_update: old.last_update,
                from_cache: true,
            });
        }

        let mut record = old;
        record.apply(ItemKind::Pr, &pr);
        record.apply(ItemKind::Issue, &issue);
        record.last_update = Some(Utc::now());
        self.store.set(&key, &record)?;

        Ok(self.display(&record, contributor, page, scope, target, false))
    }

    fn display(
        &self,
        record: &StatsRecord,
        contributor: &str,
        page: &PageRef,
        scope: Scope,
        target: &str,
        from_cache: bool,
    ) -> StatsDisplay {
        StatsDisplay {
            pr_text: labels::item_label(record, ItemKind::Pr, page.number, scope),
            issue_text: labels::item_label(record, ItemKind::Issue, page.number, scope),
            pr_link: labels::search_link(ItemKind::Pr, target, contributor),
            issue_link: labels::search_link(ItemKind::Issue, target, contributor),
            last_update: record.last_update,
            from_cache,
        }
    }
}

/// Classify failure payloads from the joined pair of responses. An `errors`
/// array wins and surfaces its first message; a rate-limit `message` maps to
/// one of the two advisories; any other message falls through to normal
/// rendering.
fn classify_failure(
    pr: &SearchResponse,
    issue: &SearchResponse,
    viewer: Option<&str>,
) -> Option<String> {
    for response in [pr, issue] {
        if let Some(detail) = response.errors.first() {
            return Some(
                detail
                    .message
                    .clone()
                    .unwrap_or_else(|| "Search query failed".to_string()),
            );
        }
    }

    for response in [pr, issue] {
        let Some(message) = &response.message else {
            continue;
        };

        // "API rate limit exceeded for <login>." names the viewer on the
        // authenticated per-user limit; the anonymous variant names an IP and
        // upsells tokens with "(But here's the good news: ...)".
        if let Some(viewer) = viewer {
            if message.contains(&format!("API rate limit exceeded for {}", viewer)) {
                return Some(RATE_LIMIT_AUTHENTICATED.to_string());
            }
        }
        if message.contains("the good news") {
            return Some(RATE_LIMIT_ANONYMOUS.to_string());
        }
    }

    None
}
