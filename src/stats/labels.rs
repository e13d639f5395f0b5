// Display label derivation.
// Pure functions from a record plus the current item to user-facing text.

use crate::scope::{ACCOUNT_TARGET, ItemKind, Scope};

use super::record::StatsRecord;

/// Advisory shown when the authenticated per-user search limit is hit.
pub const RATE_LIMIT_AUTHENTICATED: &str = "More than 30 req/min :D";

/// Advisory shown when the anonymous search limit is hit.
pub const RATE_LIMIT_ANONYMOUS: &str = "More than 10 req/min: Maybe add an access token!";

/// Label for one item type: "First PR" (optionally "out of N") when the
/// contributor's earliest item is the one being viewed, the raw count
/// otherwise. The first-item check is skipped under account scope, where
/// "first" has no single repo/org to be relative to.
pub fn item_label(
    record: &StatsRecord,
    kind: ItemKind,
    current_number: u64,
    scope: Scope,
) -> String {
    let Some(count) = record.count(kind) else {
        return "?".to_string();
    };

    let is_first =
        scope != Scope::Account && record.first_number(kind) == Some(current_number);
    if is_first {
        let mut label = format!("First {}", kind.display_name());
        if count > 1 {
            label.push_str(&format!(" out of {}", count));
        }
        label
    } else {
        count.to_string()
    }
}

/// Web search URL listing the contributor's items within the scope target.
pub fn search_link(kind: ItemKind, scope_target: &str, contributor: &str) -> String {
    let list = match kind {
        ItemKind::Pr => "pulls",
        ItemKind::Issue => "issues",
    };
    let q = format!("is:{}+author:{}", kind.search_type(), contributor);

    if scope_target == ACCOUNT_TARGET {
        format!("https://github.com/{}?q={}", list, q)
    } else if scope_target.contains('/') {
        format!("https://github.com/{}/{}?q={}", scope_target, list, q)
    } else {
        format!("https://github.com/{}?q={}+user:{}", list, q, scope_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(count: u64, first: Option<u64>) -> StatsRecord {
        StatsRecord {
            prs: Some(count),
            first_pr_number: first,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_pr_single() {
        let label = item_label(&record(1, Some(7)), ItemKind::Pr, 7, Scope::Repo);
        assert_eq!(label, "First PR");
    }

    #[test]
    fn test_first_pr_out_of_many() {
        let label = item_label(&record(4, Some(7)), ItemKind::Pr, 7, Scope::Repo);
        assert_eq!(label, "First PR out of 4");
    }

    #[test]
    fn test_not_first_shows_count() {
        let label = item_label(&record(4, Some(2)), ItemKind::Pr, 7, Scope::Repo);
        assert_eq!(label, "4");
    }

    #[test]
    fn test_account_scope_skips_first_check() {
        let label = item_label(&record(1, Some(7)), ItemKind::Pr, 7, Scope::Account);
        assert_eq!(label, "1");
    }

    #[test]
    fn test_first_issue() {
        let rec = StatsRecord {
            issues: Some(2),
            first_issue_number: Some(9),
            ..Default::default()
        };
        assert_eq!(item_label(&rec, ItemKind::Issue, 9, Scope::Org), "First Issue out of 2");
    }

    #[test]
    fn test_missing_count_placeholder() {
        let label = item_label(&StatsRecord::default(), ItemKind::Pr, 7, Scope::Repo);
        assert_eq!(label, "?");
    }

    #[test]
    fn test_search_links_per_scope() {
        assert_eq!(
            search_link(ItemKind::Pr, "acme/widgets", "alice"),
            "https://github.com/acme/widgets/pulls?q=is:pr+author:alice"
        );
        assert_eq!(
            search_link(ItemKind::Issue, "acme", "alice"),
            "https://github.com/issues?q=is:issue+author:alice+user:acme"
        );
        assert_eq!(
            search_link(ItemKind::Pr, ACCOUNT_TARGET, "alice"),
            "https://github.com/pulls?q=is:pr+author:alice"
        );
    }
}
