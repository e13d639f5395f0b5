// GitHub API request and response types.
// Defines the search query builder and structs for deserializing responses.

use serde::{Deserialize, Serialize};

use crate::scope::{ItemKind, PageRef, Scope};

/// GitHub user or organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// The slice of an issue or pull request this tool cares about. The issues
/// endpoint returns both kinds; `user` is the thread author.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub user: Option<Owner>,
}

/// GitHub repository, reduced to the privacy gate's needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub private: bool,
}

/// One count query against the search API. Qualifiers depend on scope:
/// repo scope filters by `repo:`, org scope by `user:`, account scope adds
/// neither and relies on the author qualifier alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub author: String,
    pub repo: Option<String>,
    pub user: Option<String>,
    pub item_type: ItemKind,
}

impl SearchQuery {
    /// Build the query for one item type under the given scope.
    pub fn for_scope(contributor: &str, page: &PageRef, scope: Scope, kind: ItemKind) -> Self {
        let (repo, user) = match scope {
            Scope::Repo => (Some(page.repo_path()), None),
            Scope::Org => (None, Some(page.owner.clone())),
            Scope::Account => (None, None),
        };
        Self {
            author: contributor.to_string(),
            repo,
            user,
            item_type: kind,
        }
    }

    /// The `q` parameter value, e.g. `author:alice repo:acme/widgets type:pr`.
    pub fn q(&self) -> String {
        let mut q = format!("author:{}", self.author);
        if let Some(repo) = &self.repo {
            q.push_str(&format!(" repo:{}", repo));
        }
        if let Some(user) = &self.user {
            q.push_str(&format!(" user:{}", user));
        }
        q.push_str(&format!(" type:{}", self.item_type.search_type()));
        q
    }
}

/// Response from `GET /search/issues`. Success carries `total_count` and
/// `items`; failure carries `message` and/or `errors` instead, so every
/// field is optional and classification happens after deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub items: Vec<SearchItem>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl SearchResponse {
    /// Number of the earliest matching item, when the query sorted ascending
    /// by creation and asked for a single item.
    pub fn first_item_number(&self) -> Option<u64> {
        self.items.first().map(|item| item.number)
    }
}

/// Item entry in a search response. Only the number is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub number: u64,
}

/// Entry in a search response `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageRef {
        PageRef::parse("/acme/widgets/pull/7").unwrap()
    }

    #[test]
    fn test_repo_scope_query() {
        let query = SearchQuery::for_scope("alice", &page(), Scope::Repo, ItemKind::Pr);
        assert_eq!(query.q(), "author:alice repo:acme/widgets type:pr");
    }

    #[test]
    fn test_org_scope_query() {
        let query = SearchQuery::for_scope("alice", &page(), Scope::Org, ItemKind::Issue);
        assert_eq!(query.q(), "author:alice user:acme type:issue");
    }

    #[test]
    fn test_account_scope_query_has_no_repo_or_user() {
        let query = SearchQuery::for_scope("alice", &page(), Scope::Account, ItemKind::Pr);
        assert_eq!(query.q(), "author:alice type:pr");
    }

    #[test]
    fn test_search_response_success_shape() {
        let json = r#"{"total_count": 4, "items": [{"number": 2}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_count, Some(4));
        assert_eq!(response.first_item_number(), Some(2));
        assert!(response.message.is_none());
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_search_response_error_shape() {
        let json = r#"{"message": "Validation Failed", "errors": [{"message": "bad qualifier"}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.total_count.is_none());
        assert_eq!(response.errors[0].message.as_deref(), Some("bad qualifier"));
    }
}
