// Cached per-contributor statistics record.
// One record per composite key; counts are independently optional because
// each item type is filled by its own query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::github::SearchResponse;
use crate::scope::ItemKind;

/// Stats for one contributor within one scope target. A `None` count means
/// "not yet fetched for this type", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_pr_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_issue_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

impl StatsRecord {
    /// Both item types have been fetched. A record with only one count is
    /// incomplete and must not satisfy a cache lookup, otherwise the missing
    /// type would never be fetched.
    pub fn is_complete(&self) -> bool {
        self.prs.is_some() && self.issues.is_some()
    }

    /// Complete and updated within `ttl`.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        if !self.is_complete() {
            return false;
        }
        let Some(last_update) = self.last_update else {
            return false;
        };
        let elapsed = now
            .signed_duration_since(last_update)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed <= ttl
    }

    /// Merge one count query's result into this record. Fields belonging to
    /// the other item type are left untouched.
    pub fn apply(&mut self, kind: ItemKind, response: &SearchResponse) {
        match kind {
            ItemKind::Pr => {
                if let Some(total) = response.total_count {
                    self.prs = Some(total);
                }
                if let Some(number) = response.first_item_number() {
                    self.first_pr_number = Some(number);
                }
            }
            ItemKind::Issue => {
                if let Some(total) = response.total_count {
                    self.issues = Some(total);
                }
                if let Some(number) = response.first_item_number() {
                    self.first_issue_number = Some(number);
                }
            }
        }
    }

    /// Count for the given item type.
    pub fn count(&self, kind: ItemKind) -> Option<u64> {
        match kind {
            ItemKind::Pr => self.prs,
            ItemKind::Issue => self.issues,
        }
    }

    /// Earliest item number for the given item type.
    pub fn first_number(&self, kind: ItemKind) -> Option<u64> {
        match kind {
            ItemKind::Pr => self.first_pr_number,
            ItemKind::Issue => self.first_issue_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::SearchItem;

    fn response(total: u64, first: Option<u64>) -> SearchResponse {
        SearchResponse {
            total_count: Some(total),
            items: first.map(|n| vec![SearchItem { number: n }]).unwrap_or_default(),
            message: None,
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_apply_preserves_other_type() {
        let t0 = Utc::now();
        let mut record = StatsRecord {
            prs: Some(3),
            last_update: Some(t0),
            ..Default::default()
        };

        record.apply(ItemKind::Issue, &response(5, Some(12)));
        record.last_update = Some(Utc::now());

        assert_eq!(record.prs, Some(3));
        assert_eq!(record.issues, Some(5));
        assert_eq!(record.first_issue_number, Some(12));
        assert!(record.last_update.unwrap() >= t0);
    }

    #[test]
    fn test_apply_without_total_leaves_count_absent() {
        let mut record = StatsRecord::default();
        record.apply(ItemKind::Pr, &SearchResponse::default());
        assert!(record.prs.is_none());
        assert!(record.first_pr_number.is_none());
    }

    #[test]
    fn test_freshness_requires_both_counts() {
        let record = StatsRecord {
            prs: Some(3),
            last_update: Some(Utc::now()),
            ..Default::default()
        };
        assert!(!record.is_fresh(Duration::from_secs(60), Utc::now()));

        let record = StatsRecord {
            prs: Some(3),
            issues: Some(0),
            last_update: Some(Utc::now()),
            ..Default::default()
        };
        assert!(record.is_fresh(Duration::from_secs(60), Utc::now()));
    }

    #[test]
    fn test_freshness_expires() {
        let now = Utc::now();
        let record = StatsRecord {
            prs: Some(1),
            issues: Some(1),
            last_update: Some(now - chrono::Duration::hours(2)),
            ..Default::default()
        };
        assert!(!record.is_fresh(Duration::from_secs(3600), now));
        assert!(record.is_fresh(Duration::from_secs(3 * 3600), now));
    }

    #[test]
    fn test_zero_count_is_not_absent() {
        let mut record = StatsRecord::default();
        record.apply(ItemKind::Pr, &response(0, None));
        assert_eq!(record.prs, Some(0));
    }
}
