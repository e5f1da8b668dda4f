//! Catalog domain model: repository records, installation instructions,
//! schema validation and the query layer.

mod instructions;
pub mod query;
mod repository;
pub mod validate;

pub use instructions::{DockerInstructions, Instructions, MobileInstructions, OsInstructions};
pub use query::{SortKey, sort_repositories};
pub use repository::{Metadata, Repository};

/// Canonical host prefix every cataloged repository URL must carry.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";
