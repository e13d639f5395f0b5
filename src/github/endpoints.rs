// GitHub API endpoint functions.
// Provides typed methods for fetching data from the GitHub REST API.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Issue, Repository, SearchQuery, SearchResponse};

impl GitHubClient {
    /// Get a pull request or issue. The issues endpoint serves both kinds,
    /// which is all that contributor discovery needs.
    pub async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue> {
        let response = self
            .get(&format!("/repos/{}/{}/issues/{}", owner, repo, number))
            .await?;
        let issue: Issue = response.json().await?;
        Ok(issue)
    }

    /// Get a specific repository.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let response = self.get(&format!("/repos/{}/{}", owner, repo)).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }

    /// Run one count query against the search API. Sorted ascending by
    /// creation with a single-item page, so `items[0]` is the contributor's
    /// earliest matching PR/issue and `total_count` is their overall count.
    /// Error bodies deserialize into the same type for later classification.
    pub async fn search_count(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let params = [
            ("q", query.q()),
            ("sort", "created".to_string()),
            ("order", "asc".to_string()),
            ("per_page", "1".to_string()),
        ];
        let response = self.get_lenient("/search/issues", &params).await?;
        let search: SearchResponse = response.json().await?;
        Ok(search)
    }
}
