use serde::{Deserialize, Serialize};

/// A cataloged starred repository as stored in `repos.json`.
///
/// Timestamps are kept as the ISO-8601 strings they arrive as; the validator
/// guarantees they parse, and the query layer compares their instants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub url: String,
    pub name: String,
    pub owner: String,
    pub summary: String,
    pub created_at: String,
    pub last_updated_at: String,
    pub added_at: String,
}

/// Freshness metadata attached to every query response. Derived, never
/// persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub total_count: usize,
    pub last_scanned: String,
}
