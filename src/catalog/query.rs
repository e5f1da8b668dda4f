//! Deterministic ordering over validated repository lists.

use chrono::{DateTime, SecondsFormat, Utc};

use super::{Metadata, Repository};

/// Recognized sort keys for the repository listing. Anything else falls back
/// to [`SortKey::DateAdded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateAdded,
    LastUpdated,
    CreatedDate,
}

impl SortKey {
    /// Parses a query parameter. Absent or unrecognized values behave
    /// exactly like `dateAdded`.
    pub fn parse(param: Option<&str>) -> Self {
        match param {
            Some("lastUpdated") => SortKey::LastUpdated,
            Some("createdDate") => SortKey::CreatedDate,
            _ => SortKey::DateAdded,
        }
    }

    fn field<'a>(&self, repo: &'a Repository) -> &'a str {
        match self {
            SortKey::DateAdded => &repo.added_at,
            SortKey::LastUpdated => &repo.last_updated_at,
            SortKey::CreatedDate => &repo.created_at,
        }
    }
}

/// Returns a new list ordered descending (newest first) by the chosen
/// timestamp field. The input is never mutated; ties keep their
/// input-relative order (`sort_by` is stable).
pub fn sort_repositories(repos: &[Repository], key: SortKey) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| instant_of(key.field(b)).cmp(&instant_of(key.field(a))));
    sorted
}

/// Freshness metadata for a response of `total_count` repositories,
/// timestamped now.
pub fn metadata(total_count: usize) -> Metadata {
    Metadata {
        total_count,
        last_scanned: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Millisecond instant of a validated timestamp string. Unparseable input
/// sorts last, mirroring an invalid-date epoch.
fn instant_of(timestamp: &str) -> i64 {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.timestamp_millis())
        .unwrap_or(i64::MIN)
}
